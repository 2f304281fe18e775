use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ember_console::{ConsoleConfig, Theme};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Ember - styled text console demo")]
struct Args {
    /// Color theme
    #[arg(long, value_enum, default_value = "dark")]
    theme: Theme,

    /// Interpret ANSI SGR escapes in output
    #[arg(long)]
    ansi: bool,

    /// Character that introduces a color code
    #[arg(long, default_value = "&")]
    trigger: char,

    /// Character shown in place of protected input
    #[arg(long, default_value = "*")]
    mask: char,

    /// Number of inputs kept in history
    #[arg(long, default_value = "10")]
    history: usize,

    /// Scroll to the bottom after every output
    #[arg(long)]
    scroll_to_bottom: bool,

    /// Type on a separate line below the output instead of inline
    #[arg(long)]
    separate_input: bool,

    /// Shift+Enter submits instead of breaking the line
    #[arg(long)]
    shift_enter_submits: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Write logs to this file; without it logging is off while the console
    /// owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let log_level = match args.log_level {
        LogLevel::Trace => tracing::Level::TRACE,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    };

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = ConsoleConfig {
        trigger: args.trigger,
        mask: args.mask,
        history_capacity: args.history,
        use_ansi: args.ansi,
        always_scroll_to_bottom: args.scroll_to_bottom,
        inline_input: !args.separate_input,
        prompt: ember::demo::LINE_PROMPT.to_string(),
        input_field_newline: !args.shift_enter_submits,
        ..ConsoleConfig::default()
    }
    .with_theme(args.theme);

    let result = ember::app::run(config);

    // Ensure terminal is in a good state before exiting
    use std::io::{self, Write};
    let _ = io::stderr().flush();
    let _ = io::stdout().flush();

    result
}
