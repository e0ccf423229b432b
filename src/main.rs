// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod engine;
mod errors;
mod file_utils;
mod inclusion;
mod language_utils;
mod providers;
mod scanner;
mod segments;
mod stats;
mod translation;

// Affirmative answer to the demo-endpoint prompt
static ANSWER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^y(?:es)?$").unwrap());

const LOGO: &str = r"
  _
 | |_ _ __ __ _ _ __  ___ _ __ ___
 | __| '__/ _` | '_ \/ __| '__/ __|
 | |_| | | (_| | | | \__ \ | | (__
  \__|_|  \__,_|_| |_|___/_|  \___|
";

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    DeepL,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::DeepL => TranslationProvider::DeepL,
        }
    }
}

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate source annotations using a translation backend (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for transrc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Directory containing source files (default is the current directory)
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    directory: PathBuf,

    /// Translation backend API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Translation provider to use
    #[arg(short = 't', long = "translator", value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Language to translate to (e.g., 'en', 'fr', 'pt-BR')
    #[arg(short = 'l', long)]
    language: Option<String>,

    /// Source language code; omit to let the backend detect it
    #[arg(long)]
    source_language: Option<String>,

    /// Regex pattern matching comments and strings to be translated
    #[arg(short = 'r', long = "regex")]
    pattern: Option<String>,

    /// Glob patterns of files to include
    #[arg(short = 'i', long = "includes", num_args = 1..)]
    includes: Option<Vec<String>>,

    /// Glob patterns of files to exclude
    #[arg(short = 'e', long = "excludes", num_args = 1..)]
    excludes: Option<Vec<String>>,

    /// Do not capitalize the first letter of translated text
    #[arg(long)]
    no_capitalize: bool,

    /// Preprocessor symbols considered active for conditional code parts
    #[arg(short = 's', long = "symbols", num_args = 1..)]
    symbols: Option<Vec<String>>,

    /// Skip translating line and block comments
    #[arg(long)]
    no_comments: bool,

    /// Skip translating doc comments
    #[arg(long)]
    no_doc_comments: bool,

    /// Skip translating string literals
    #[arg(long)]
    no_strings: bool,

    /// Acknowledge and disable the Google demo endpoint warning by implicitly
    /// answering "yes"
    #[arg(short = 'y', long = "yes")]
    acknowledged: bool,

    /// Skip printing the logo
    #[arg(short = 'n', long)]
    no_logo: bool,

    /// Configuration file path
    #[arg(long, default_value = "transrc.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// transrc - Source Annotation Translator
///
/// Translates the comments, doc comments, and string literals of a source
/// tree in place using a pluggable translation backend.
#[derive(Parser, Debug)]
#[command(name = "transrc")]
#[command(version = "1.0.0")]
#[command(about = "Translate source-code comments and strings in place")]
#[command(long_about = "transrc scans a tree of source files and translates the human-readable
text inside comments, doc comments, and string literals, splicing the results
back without touching any surrounding code or decoration.

EXAMPLES:
    transrc                                  # Translate the current directory
    transrc src/ -l en                       # Translate src/ to English
    transrc -t deepl -k KEY -l fr .          # Use DeepL with an API key
    transrc -i '**/*.cs' -e 'obj/**' .       # Custom include/exclude globs
    transrc -r '[^\\x00-\\x7F]' .            # Custom inclusion pattern
    transrc -s DEBUG TRACE .                 # Activate preprocessor symbols
    transrc --no-strings .                   # Leave string literals alone
    transrc completions bash > transrc.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in transrc.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist, a
    default one is created automatically.

SUPPORTED PROVIDERS:
    google - Google Translate; without an API key the free demo endpoint is
             used, which is only suitable for evaluation
    deepl  - DeepL API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

/// Custom logger implementation writing colored lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    /// Install as the global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "transrc", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let config = load_config(&options)?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    if !options.no_logo {
        println!("\x1B[36m{}\x1B[0m", LOGO);
    }

    println!("Translating comments...");

    // Using Google Translate without an API key falls back to the keyless
    // demo endpoint; make the operator acknowledge that first
    if config.translation.provider == TranslationProvider::Google
        && config.translation.get_api_key().is_empty()
        && !options.acknowledged
        && !confirm_demo_endpoint()?
    {
        println!();
        println!("Terminating the translation...");
        return Ok(());
    }

    let controller = Controller::with_config(config)?;
    controller.run(options.directory.clone()).await?;

    Ok(())
}

/// Load the configuration file (creating a default one if missing) and apply
/// command-line overrides
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(api_key) = &options.api_key {
        config.translation.set_api_key(api_key);
    }

    if let Some(language) = &options.language {
        config.target_language = language.clone();
    }

    if let Some(source_language) = &options.source_language {
        config.source_language = Some(source_language.clone());
    }

    if let Some(pattern) = &options.pattern {
        config.pattern = pattern.clone();
    }

    if let Some(includes) = &options.includes {
        config.includes = includes.clone();
    }

    if let Some(excludes) = &options.excludes {
        config.excludes = excludes.clone();
    }

    if let Some(symbols) = &options.symbols {
        config.symbols = symbols.clone();
    }

    if options.no_capitalize {
        config.capitalize = false;
    }

    if options.no_comments {
        config.translate_comments = false;
    }

    if options.no_doc_comments {
        config.translate_doc_comments = false;
    }

    if options.no_strings {
        config.translate_strings = false;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

/// Interactive acknowledgment of the keyless demo endpoint
fn confirm_demo_endpoint() -> Result<bool> {
    println!(
        "\x1B[33mNOTE: Using Google Translate without an API key will switch to Google's free \
         Translation API that is provided only for demo purposes and should not be used in \
         commercial and production environments.\x1B[0m"
    );
    println!();
    print!("Do you want to continue? [y/n] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(ANSWER_REGEX.is_match(&answer))
}
