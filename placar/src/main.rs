use clap::Parser;
use log::*;
#[cfg(debug_assertions)]
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::{
    append::rolling_file::{
        RollingFileAppender,
        policy::compound::{
            CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
        },
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use std::{io, path::PathBuf};
use tokio::io::BufReader;

mod app;
use app::{Route, ScoreboardApp};

mod persistence;
use persistence::{FileStore, MemoryStore, PersistenceStore};

mod scoreboard_manager;
use scoreboard_manager::ScoreboardManager;

mod ticker;
use ticker::TokioTicker;

mod config;
use config::Config;

const APP_NAME: &str = "placar";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,

    #[clap(long)]
    /// View to start on, `admin` for the control panel, anything else for the board
    route: Option<String>,

    #[clap(long)]
    /// Keep the match in memory only, nothing is read from or written to disk
    ephemeral: bool,

    #[clap(long)]
    /// Directory within which the match is saved, overrides the config file
    data_dir: Option<PathBuf>,

    #[clap(long)]
    /// Directory within which log files will be placed, default is platform dependent
    log_location: Option<PathBuf>,

    #[clap(long, default_value = "5000000")]
    /// Max size in bytes that a log file is allowed to reach before being rolled over
    log_max_file_size: u64,

    #[clap(long, default_value = "3")]
    /// Number of archived logs to keep
    num_old_logs: u32,
}

fn local_data_dir(leaf: &str) -> io::Result<PathBuf> {
    let base = directories::BaseDirs::new().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not find a local data directory",
        )
    })?;
    Ok(base.data_local_dir().join(leaf))
}

fn init_logging(args: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_base_path = match &args.log_location {
        Some(path) => path.clone(),
        None => local_data_dir("placar-logs")?,
    };
    let log_path = log_base_path.join(format!("{APP_NAME}-log.txt"));
    let archived_log_path = log_base_path.join(format!("{APP_NAME}-log-{{}}.txt.gz"));
    let archived_log_pattern = archived_log_path
        .to_str()
        .ok_or("The log location is not valid UTF-8")?;

    // The console is reserved for the scoreboard, except in debug builds
    #[cfg(debug_assertions)]
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    let roller = FixedWindowRoller::builder().build(archived_log_pattern, args.num_old_logs)?;
    let file_policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(args.log_max_file_size)),
        Box::new(roller),
    );
    let file_appender = RollingFileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new("[{d} {l:5} {M}] {m}{n}")))
        .build(log_path, Box::new(file_policy))?;

    let root = Root::builder().appender("file_appender");
    #[cfg(debug_assertions)]
    let root = root.appender("console");
    let root = root.build(LevelFilter::Error);

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file_appender", Box::new(file_appender)));

    #[cfg(debug_assertions)]
    let log_config = log_config.appender(Appender::builder().build("console", Box::new(console)));

    let log_config = log_config
        .logger(Logger::builder().build(APP_NAME, log_level))
        .build(root)?;

    log4rs::init_config(log_config)?;
    log_panics::init();
    Ok(())
}

fn load_config() -> Config {
    match confy::get_configuration_file_path(APP_NAME, None) {
        Ok(path) => info!("Reading config file from {path:?}"),
        Err(e) => warn!("Could not locate the config file: {e}"),
    }

    match confy::load(APP_NAME, None) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file, overwriting with default. Error: {e}");
            let config = Config::default();
            if let Err(e) = confy::store(APP_NAME, None, &config) {
                error!("Failed to write the default config file: {e}");
            }
            config
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    init_logging(&args)?;
    info!("Starting Placar");

    let config = load_config();

    let route = args
        .route
        .as_deref()
        .map(Route::from_fragment)
        .unwrap_or(config.display.default_route);

    let (ticker, ticks) = TokioTicker::new();
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = io::stdout();

    let last = if args.ephemeral {
        info!("Keeping the match in memory only");
        let store = PersistenceStore::new(MemoryStore::default(), config.storage.slot_key);
        let manager = ScoreboardManager::new(store, ticker);
        ScoreboardApp::new(manager, route, config.display.clear_screen, stdout)
            .run(stdin, ticks)
            .await?
    } else {
        let data_dir = match args.data_dir.or(config.storage.data_dir) {
            Some(dir) => dir,
            None => local_data_dir(APP_NAME)?,
        };
        let medium = FileStore::new(data_dir);
        info!("Saving the match under {:?}", medium.dir());
        let store = PersistenceStore::new(medium, config.storage.slot_key);
        let manager = ScoreboardManager::new(store, ticker);
        ScoreboardApp::new(manager, route, config.display.clear_screen, stdout)
            .run(stdin, ticks)
            .await?
    };

    info!(
        "Final state: {} at {}",
        last.teams.map(|team| team.score),
        last.period
    );
    Ok(())
}
