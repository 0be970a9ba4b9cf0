use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use vending::core::Money;
use vending::{Config, Error, Outcome, Session};

#[derive(Parser)]
#[command(name = "vending", about = "Text-menu vending machine simulation")]
struct Args {
    /// Starting balance, e.g. 100 or 12.50
    #[arg(short, long)]
    balance: Option<Money>,

    /// TOML catalog replacing the built-in machine
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Where diagnostics are written
    #[arg(long, default_value = "vending.log")]
    log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // stdout belongs to the menu, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    match run(args) {
        Ok(outcome) => {
            log::info!("vending finished: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("vending: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<Outcome, Error> {
    let mut config = match &args.catalog {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(balance) = args.balance {
        config = config.with_balance(balance);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(config, stdin.lock(), stdout.lock())?;
    session.run()
}
