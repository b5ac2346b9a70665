//! Headless line-oriented driver.
//!
//! Reads commands from stdin, prints event lines to stdout and logs to
//! stderr. Flags override `KEYSTRIKE_*` environment variables, which may
//! also come from a `.env` file.
mod config;
mod dirs;
mod logging;
mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use keystrike_content::{ContentFactory, builtin};
use keystrike_core::{GameController, GameMode};

use config::CliConfig;
use repl::Repl;

const DEFAULT_PROFILE: &str = "first_night";

/// Typing defense, one line at a time
#[derive(Parser, Debug)]
#[command(name = "keystrike")]
#[command(about = "Headless driver for the keystrike simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Run seed (random if omitted)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<String>,

    /// Game mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Wave profile for slice mode
    #[arg(short, long, value_name = "PROFILE")]
    profile: Option<String>,

    /// Directory with RON/TOML tables overriding the built-in content
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory for :save, :load and :export
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Also write logs to DIR/keystrike.log
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum ModeArg {
    Campaign,
    Endless,
    /// A single scripted wave
    Slice,
}

impl std::str::FromStr for ModeArg {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "campaign" => Ok(Self::Campaign),
            "endless" => Ok(Self::Endless),
            "slice" | "vertical_slice" => Ok(Self::Slice),
            other => bail!("unknown mode '{other}' (expected campaign, endless or slice)"),
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists; other failures are logged below
    let env_file_error = config::load_env_file(None);

    let cli = Cli::parse();
    let env = CliConfig::from_env();

    let log_dir = cli.log_dir.or(env.log_dir);
    let _guard = logging::setup_logging(log_dir.as_deref())?;
    if let Some(err) = env_file_error {
        tracing::debug!(error = %err, "ignoring unreadable .env file");
    }

    let mode_arg = match cli.mode {
        Some(mode) => mode,
        None => env.mode.as_deref().unwrap_or("campaign").parse()?,
    };
    let mode = match mode_arg {
        ModeArg::Campaign => GameMode::Campaign,
        ModeArg::Endless => GameMode::Endless,
        ModeArg::Slice => GameMode::VerticalSlice {
            profile_id: cli
                .profile
                .or(env.profile)
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
        },
    };
    let seed = cli.seed.or(env.seed).unwrap_or_else(random_seed);

    let (bundle, config) = match cli.data_dir.or(env.data_dir) {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            (factory.load_bundle()?, factory.load_config()?)
        }
        None => (builtin::bundle()?, builtin::config()?),
    };
    let save_dir = cli.save_dir.or(env.save_dir).unwrap_or_else(dirs::save_dir);

    tracing::info!(seed = %seed, mode = %mode, saves = %save_dir.display(), "starting run");

    let (game, opening) = GameController::new(bundle.env(), &config, &seed, mode);
    for line in &opening {
        println!("{line}");
    }

    let mut repl = Repl::new(game, save_dir, env.show_prompt);
    repl.run(io::stdin().lock(), io::stdout().lock())?;

    tracing::info!(nonce = repl.game().state().nonce, "driver exiting");
    Ok(())
}

/// Seeds from the clock when none is given. Runs are only reproducible with
/// an explicit seed.
fn random_seed() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    format!("{nanos:x}")
}
