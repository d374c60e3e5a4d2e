//! ImmoKPA - purchase price allocation between land and building
//!
//! Command-line front end for the valuation engine and the property store.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use immokpa::cli::{
    CalcArgs, CliResult, CommentaryArgs, ConfigArgs, PropertyArgs, TablesArgs, ValidateArgs,
};
use immokpa::constants::APP_NAME;

/// ImmoKPA - split a property purchase price into land and building
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the land/building allocation
    Calc(CalcArgs),
    /// Check inputs without computing
    Validate(ValidateArgs),
    /// Manage stored properties
    Property(PropertyArgs),
    /// Inspect the reference tables
    Tables(TablesArgs),
    /// Show or change the configuration
    Config(ConfigArgs),
    /// Ask a language model for commentary on a valuation
    Commentary(CommentaryArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Calc(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::Property(args) => args.execute(),
            Self::Tables(args) => args.execute(),
            Self::Config(args) => args.execute(),
            Self::Commentary(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code.code());
    }
}
