use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use home_cost_ui::{
    app,
    config::{AppConfig, DEFAULT_CONFIG_FILE},
    logging,
    quote::{self, QuoteRequest},
    state::CalculatorScreen,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Up-front cost of buying a home: cash share, mortgage deed fee and title
/// deed fee.
///
/// Without a subcommand, opens the interactive calculator and restores the
/// inputs from the previous run.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML configuration file. Defaults to `home-cost.toml` if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the interactive inputs are saved between runs.
    #[arg(long)]
    session: Option<PathBuf>,

    /// Digit grouping separator, overriding the config file.
    #[arg(long)]
    separator: Option<char>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the breakdown for one set of inputs and exit.
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
struct QuoteArgs {
    /// Purchase price.
    #[arg(long)]
    price: String,

    /// Existing mortgage taken over with the purchase.
    #[arg(long, default_value = "")]
    mortgage: String,

    /// Share of the price paid in cash, in percent.
    #[arg(long)]
    percent: Option<u8>,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl From<QuoteArgs> for QuoteRequest {
    fn from(args: QuoteArgs) -> Self {
        Self {
            price: args.price,
            mortgage: args.mortgage,
            percent: args.percent,
            json: args.json,
        }
    }
}

// ─── configuration ───────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    }
    .with_separator(cli.separator)?;

    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    if let Some(level) = config.log_level_override(rust_log_set) {
        logging::set_log_level(level)?;
    }

    Ok(config)
}

// ─── interactive mode ────────────────────────────────────────────────────────

fn run_interactive(
    config: &AppConfig,
    session_path: &Path,
) -> anyhow::Result<()> {
    let mut screen = CalculatorScreen::from_config(config)?;

    screen.restore_from_file(session_path);

    logging::set_stdout_enabled(false)?;
    let res = app::run(&mut screen);
    logging::set_stdout_enabled(true)?;
    res?;

    screen
        .snapshot()
        .save(session_path)
        .with_context(|| format!("failed to save session to '{}'", session_path.display()))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep quote output clean unless RUST_LOG asks for more.
    let default_filter = if cli.command.is_some() { "warn" } else { "info" };
    logging::init_default_logging(default_filter);

    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = load_config(&cli)?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Some(Command::Quote(args)) => {
            let output = quote::render_quote(&config, &args.into())?;
            println!("{output}");
        }
        None => {
            let session_path = cli
                .session
                .or_else(|| config.session.path.clone())
                .unwrap_or_else(logging::default_session_path);
            info!(session = %session_path.display(), "starting calculator");
            run_interactive(&config, &session_path)?;
        }
    }

    if cli.log_file.is_some() {
        logging::disable_file_logging();
    }
    Ok(())
}
