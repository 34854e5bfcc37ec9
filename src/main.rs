//! Purpose: `inspiration-box` CLI entry point.
//! Role: Binary crate root; parses args, drives the shell, renders outcomes.
//! Invariants: Each command has one stable stdout format (human or JSON by command/flags).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: All store access goes through `api::Shell` events.
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell as CompletionShell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use inspiration_box::api::{
    Clock, Column, DEFAULT_EXPORT_FILE, Error, ErrorKind, LocalClock, Outcome, Shell, ShellEvent,
    Store, StoreConfig, Viewer, format_timestamp, to_exit_code,
};
use inspiration_box::notice::{Notice, notice_json};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `inspiration-box --help`."));
            }
        },
    };

    let config = StoreConfig::default();
    command_dispatch::dispatch_command(cli.command, &config)
        .map_err(add_write_hint)
        .map_err(add_internal_hint)
}

// Silent unless RUST_LOG is set; stderr otherwise carries only error/notice envelopes.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "inspiration-box",
    version,
    about = "Feed text snippets into a timestamped local box, browse them, export them",
    long_about = None,
    after_help = r#"EXAMPLES
  $ inspiration-box feed "a chair that folds into a lamp"
  $ pbpaste | inspiration-box feed --paste
  $ inspiration-box list
  $ inspiration-box show 1
  $ inspiration-box export ideas.txt

NOTES
  - Inspirations are stored in ./inspirations.db (relative to the working directory)"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Feed one inspiration",
        long_about = r#"Feed one inspiration.

Text is trimmed; blank input is discarded with a notice on stderr.
Reads stdin when TEXT is omitted or `-`."#
    )]
    Feed {
        #[arg(help = "Inspiration text (omit or `-` to read stdin)")]
        text: Option<String>,
        #[arg(long, help = "Treat the input as a clipboard paste")]
        paste: bool,
    },
    #[command(about = "List every inspiration, most recent first")]
    List {
        #[arg(long, help = "Emit JSON instead of a table")]
        json: bool,
    },
    #[command(about = "Print the full content of one listed row (1-based)")]
    Show {
        #[arg(help = "Row number as shown by `list`")]
        row: usize,
    },
    #[command(
        about = "Export every inspiration to a text file",
        long_about = r#"Export every inspiration to a text file.

Writes a timestamp line then a content line per inspiration, most recent first.
Overwrites the destination."#
    )]
    Export {
        #[arg(help = "Destination file (default: inspirations.txt)", value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

fn open_shell(config: &StoreConfig) -> Result<Shell, Error> {
    Shell::open(Store::new(config))
}

fn read_stdin() -> Result<String, Error> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_source(err)
    })?;
    Ok(buf)
}

fn unexpected_outcome(outcome: Outcome) -> Error {
    Error::new(ErrorKind::Internal).with_message(format!("unexpected shell outcome: {outcome:?}"))
}

fn emit_json(value: Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

const TIME_COLUMN_WIDTH: usize = 19;

fn emit_list_human(viewer: &Viewer) {
    println!(
        "{:<width$}  {}",
        Column::Timestamp.header().to_uppercase(),
        Column::Content.header().to_uppercase(),
        width = TIME_COLUMN_WIDTH
    );
    for record in viewer.rows() {
        let mut lines = record.content.lines();
        println!(
            "{:<width$}  {}",
            record.timestamp,
            lines.next().unwrap_or_default(),
            width = TIME_COLUMN_WIDTH
        );
        for line in lines {
            println!("{:<width$}  {line}", "", width = TIME_COLUMN_WIDTH);
        }
    }
}

fn emit_notice(notice: &Notice) {
    if io::stderr().is_terminal() {
        eprintln!("notice: {}", notice.message);
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn notice_time_now() -> String {
    format_timestamp(LocalClock.now())
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::StorageUnavailable => "storage unavailable".to_string(),
        ErrorKind::Write => "write failed".to_string(),
        ErrorKind::Export => "export failed".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(err.kind().as_str()));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn add_write_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Write || err.hint().is_some() {
        return err;
    }
    err.with_hint("The inspiration was not saved. Check disk space and that inspirations.db is not locked.")
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_LOG=debug and share command/context if it persists.",
    )
}
