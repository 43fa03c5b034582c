use clap::{Parser, Subcommand};
use lightbox_reveal::{config, output};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::prelude::*;

/// Shared flags for commands that read `lightbox.toml`.
#[derive(clap::Args, Clone)]
struct ConfigArgs {
    /// Directory containing lightbox.toml (stock defaults when absent)
    #[arg(long, default_value = ".")]
    config: PathBuf,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "lightbox-reveal")]
#[command(about = "Configure scroll reveal and the lightbox carousel for a gallery page")]
#[command(long_about = "\
Configure scroll reveal and the lightbox carousel for a gallery page

The browser side is a WebAssembly module that wires itself up once the page
is parsed. This tool manages its settings.

Workflow:

  lightbox-reveal gen-config > lightbox.toml   # documented stock config
  lightbox-reveal check                        # validate and summarize
  lightbox-reveal export > config.json         # JSON for the page

Embed the exported JSON in the page:

  <script type=\"application/json\" id=\"lightbox-reveal-config\">
    { ... }
  </script>

Without that block the module uses the stock defaults.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate lightbox.toml and summarize the resolved settings
    Check(ConfigArgs),
    /// Print the resolved settings as JSON for the page config block
    Export {
        #[command(flatten)]
        args: ConfigArgs,
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print a stock lightbox.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => {
            println!("==> Checking {}", args.config.display());
            let page = config::load_config(&args.config)?;
            output::print_check_output(&page, &args.config);
            println!("==> Config is valid");
        }
        Command::Export { args, compact } => {
            let page = config::load_config(&args.config)?;
            debug!(compact, "exporting page config");
            println!("{}", config::to_json(&page, !compact)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
