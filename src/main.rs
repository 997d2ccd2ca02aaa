// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use stringsmith::app_config::{self, Config};
use stringsmith::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the source strings.xml into every target language (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for stringsmith
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct TranslateArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Source strings.xml (overrides paths.source_file)
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,

    /// Output base directory (overrides paths.output_dir)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Comma-separated target languages (overrides languages.target_languages)
    #[arg(short, long, value_delimiter = ',')]
    targets: Vec<String>,

    /// Texts per request (overrides api.batch_size)
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Plan batches without calling the service or writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

/// stringsmith - Android string resource translator
///
/// Translates strings.xml into values-<lang>/strings.xml files through a
/// configurable HTTP translation service.
#[derive(Parser, Debug)]
#[command(name = "stringsmith")]
#[command(version)]
#[command(about = "Android string resource translator")]
#[command(long_about = "stringsmith translates an Android strings.xml into one values-<lang>/strings.xml per target language.

EXAMPLES:
    stringsmith                                   # Translate using conf.json
    stringsmith -t fr,de                          # Only generate French and German
    stringsmith -s app/src/main/res/values/strings.xml -o build/res
    stringsmith --dry-run --log-level debug       # Show the batches without sending them
    stringsmith completions bash > stringsmith.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Color and symbol for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, symbol) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                symbol,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger accepts everything; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "stringsmith", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

/// Load the configuration, or write a default one when the file is missing
fn load_or_create_config(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        return Config::load(config_path);
    }

    warn!(
        "Config file not found at '{}', creating default config.",
        config_path.display()
    );
    let config = Config::default();
    config.save(config_path)?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(source) = &options.source {
        config.paths.source_file = source.clone();
    }
    if let Some(output) = &options.output {
        config.paths.output_dir = output.clone();
    }
    if !options.targets.is_empty() {
        config.languages.target_languages = options.targets.clone();
    }
    if let Some(batch_size) = options.batch_size {
        config.api.batch_size = batch_size;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(Path::new(&options.config_path))?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?
        .dry_run(options.dry_run)
        .show_progress(!options.no_progress);

    let summary = controller.run().await?;
    if options.dry_run {
        info!("Dry run complete, {} languages planned", summary.reports.len());
    }
    Ok(())
}
