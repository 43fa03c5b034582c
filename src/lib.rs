//! # Lightbox Reveal
//!
//! Two small behaviors for static gallery pages, compiled to WebAssembly:
//!
//! - **Scroll reveal**: content blocks start hidden and shifted down, then fade
//!   and slide into place the first time they scroll into view.
//! - **Lightbox carousel**: clicking a gallery thumbnail opens a full-screen
//!   modal with wraparound previous/next navigation, a 3-second autoplay,
//!   keyboard control, and navigation buttons that follow the image's edges.
//!
//! The page ships a `<script type="module">` that instantiates the `.wasm`
//! file; everything else happens on its own once the document is parsed.
//!
//! # Architecture: Pure Core, Thin Browser Shell
//!
//! All decisions live in plain Rust that compiles and tests on any target:
//!
//! ```text
//! DOM events ──▶ web (wasm32 only) ──▶ LightboxEvent ──▶ Lightbox ──▶ LightboxView
//!                                                            │
//!                                                            └──▶ Scheduler (timers)
//! ```
//!
//! The controller never touches the DOM directly. It talks to two traits,
//! [`lightbox::LightboxView`] and [`lightbox::Scheduler`], which the `web`
//! module implements over `web-sys` and the tests implement with in-memory
//! fakes and a manual clock. The same split applies to scroll reveal through
//! [`reveal::Stylable`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`reveal`] | Initial hidden style, viewport-entry test, and the one-way transition to visible |
//! | [`lightbox`] | Carousel state machine: open/close, wraparound navigation, autoplay, event dispatch |
//! | [`geometry`] | Navigation button placement beside the displayed image, clamped to the panel |
//! | [`keyboard`] | Mapping of DOM `key`/`code` values to the keys the lightbox understands |
//! | [`types`] | `GalleryItem` and the non-empty, ordered `Gallery` |
//! | [`config`] | `lightbox.toml` loading, validation, merging, and the page's JSON config block |
//! | [`output`] | CLI output formatting for `lightbox-reveal check` |
//! | `web` | Browser binding (wasm32 only): DOM view, timers, listeners, console logging |
//!
//! # Design Decisions
//!
//! ## Autoplay Is a Handle, Not a Flag
//!
//! The lightbox stores its running interval as `Option<Interval>`. There is no
//! separate "is autoplaying" boolean to drift out of sync: stopping autoplay
//! means taking the handle and cancelling it, and closing the lightbox always
//! does that first.
//!
//! ## Visibility Is Read From the View
//!
//! Whether the lightbox is open is the modal's visible class, not a cached
//! field. Keyboard handling and the play control check that class, so markup
//! that starts visible (or is toggled by other page code) is handled honestly.
//!
//! ## One Config, Two Encodings
//!
//! Site authors write `lightbox.toml`; the CLI validates it and exports JSON
//! that the page embeds for the wasm module to read. Both sides deserialize
//! the same [`config::PageConfig`], so a setting that passes `check` means the
//! same thing in the browser.

pub mod config;
pub mod geometry;
pub mod keyboard;
pub mod lightbox;
pub mod output;
pub mod reveal;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;
