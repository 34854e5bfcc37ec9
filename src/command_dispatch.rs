//! Purpose: Hold top-level CLI command dispatch for `inspiration-box`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap; translate commands into shell events.
//! Invariants: The store is opened (and initialized) only for commands that need it.
//! Invariants: Output envelopes and exit code semantics live in `main.rs` helpers.

use std::time::Instant;

use super::*;

pub(super) fn dispatch_command(
    command: Command,
    config: &StoreConfig,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "inspiration-box", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Feed { text, paste } => {
            let mut shell = open_shell(config)?;
            let (input, source) = match text {
                Some(text) if text != "-" => (text, "arg"),
                _ => (read_stdin()?, "stdin"),
            };
            let event = if paste {
                ShellEvent::Paste(input)
            } else {
                ShellEvent::ManualEntry(input)
            };
            match shell.handle(event, Instant::now())? {
                Outcome::Fed { content } => {
                    emit_json(json!({
                        "fed": {
                            "content": content,
                            "chars": content.chars().count(),
                        }
                    }));
                }
                Outcome::Rejected => {
                    let mut details = Map::new();
                    details.insert("source".to_string(), json!(source));
                    emit_notice(&Notice {
                        kind: "empty_input".to_string(),
                        time: notice_time_now(),
                        cmd: "feed".to_string(),
                        message: "nothing to feed after trimming".to_string(),
                        details,
                    });
                }
                other => return Err(unexpected_outcome(other)),
            }
            Ok(RunOutcome::ok())
        }
        Command::List { json } => {
            let mut shell = open_shell(config)?;
            let viewer = open_viewer(&mut shell)?;
            if json {
                emit_json(json!({ "inspirations": viewer.rows() }));
            } else {
                emit_list_human(viewer);
            }
            Ok(RunOutcome::ok())
        }
        Command::Show { row } => {
            if row == 0 {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("rows are numbered from 1")
                    .with_hint("Use `inspiration-box list` to see row numbers."));
            }
            let mut shell = open_shell(config)?;
            let viewer = open_viewer(&mut shell)?;
            let content = viewer.cell(row - 1, Column::Content).ok_or_else(|| {
                Error::new(ErrorKind::NotFound)
                    .with_message(format!("no row {row} (have {})", viewer.len()))
            })?;
            println!("{content}");
            Ok(RunOutcome::ok())
        }
        Command::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            let mut shell = open_shell(config)?;
            match shell.handle(ShellEvent::Export(path), Instant::now())? {
                Outcome::Exported(summary) => {
                    emit_json(json!({
                        "exported": {
                            "path": summary.path.display().to_string(),
                            "records": summary.records,
                        }
                    }));
                    Ok(RunOutcome::ok())
                }
                Outcome::ExportFailed(err) => Err(err),
                other => Err(unexpected_outcome(other)),
            }
        }
    }
}

fn open_viewer(shell: &mut Shell) -> Result<&Viewer, Error> {
    match shell.handle(ShellEvent::OpenViewer, Instant::now())? {
        Outcome::ViewerOpened { .. } => {}
        other => return Err(unexpected_outcome(other)),
    }
    shell.viewer().ok_or_else(|| {
        Error::new(ErrorKind::Internal).with_message("viewer missing after open")
    })
}
