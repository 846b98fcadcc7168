//! ox-line entrypoint: a small REPL on top of the line editor.
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::Result;
use clap::Parser;
use core_actions::{LineReader, ReadOutcome};
use core_model::LineEditor;
use core_terminal::input::read_key;
use core_terminal::{ConsoleOutput, CrosstermConsole, RawModeGuard};
use core_text::CursorBuffer;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

mod history_file;
mod words;

const LOG_FILE: &str = "ox-line.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ox-line", version, about = "Interactive line editor demo")]
struct Args {
    /// Configuration file path (overrides discovery of `oxline.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Prompt text; defaults to `[editor] prompt` from the config.
    #[arg(long = "prompt")]
    prompt: Option<String>,
    /// History file (newline-delimited, oldest first).
    #[arg(long = "history")]
    history: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Print `text` on its own row below the line just read.
fn print_row(console: &mut CrosstermConsole, text: &str) -> Result<()> {
    console.write(text)?;
    console.finish_line()?;
    Ok(())
}

/// What the REPL does with an accepted line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Clear,
    Help,
    History,
    Echo(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    let (head, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    match head {
        "exit" | "quit" => Command::Exit,
        "clear" => Command::Clear,
        "help" => Command::Help,
        "history" => Command::History,
        "echo" => Command::Echo(rest.trim_start()),
        _ => Command::Echo(trimmed),
    }
}

fn run(args: Args) -> Result<()> {
    let config = core_config::load_from(args.config.clone())?;
    let prompt = args
        .prompt
        .clone()
        .unwrap_or_else(|| config.prompt().to_string());
    let max_entries = config.history_max_entries();
    let history_path = args.history.clone().unwrap_or_else(history_file::default_path);
    let history = history_file::load(&history_path, max_entries)?;

    let mut raw_mode = RawModeGuard::enter()?;
    let console = CrosstermConsole::default();
    info!(
        target: "runtime",
        config = ?config.source,
        caps = ?console.capabilities(),
        history = history.len(),
        "startup"
    );
    let mut editor = LineEditor::new(
        console,
        CursorBuffer::new(),
        history,
        Some(words::completer(words::COMMANDS)),
    )?;
    editor.set_insert_mode(config.insert_mode());
    let mut reader = LineReader::new(editor, config.key_bindings());

    'session: loop {
        reader.begin(&prompt)?;
        let line = loop {
            match reader.feed(read_key()?)? {
                ReadOutcome::Pending => {}
                ReadOutcome::Accepted(line) => break line,
                ReadOutcome::Aborted if reader.editor().contents().is_empty() => {
                    break 'session;
                }
                ReadOutcome::Aborted => continue 'session,
            }
        };
        match parse_command(&line) {
            Command::Exit => break,
            Command::Clear => reader.editor_mut().console_mut().clear()?,
            Command::Help => {
                print_row(reader.editor_mut().console_mut(), &words::COMMANDS.join(" "))?;
            }
            Command::History => {
                let entries = reader.editor().history().entries().to_vec();
                for (i, entry) in entries.iter().enumerate() {
                    let row = format!("{:>4}  {entry}", i + 1);
                    print_row(reader.editor_mut().console_mut(), &row)?;
                }
            }
            Command::Echo("") => {}
            Command::Echo(text) => print_row(reader.editor_mut().console_mut(), text)?,
        }
    }

    raw_mode.leave()?;
    let entries = reader.editor().history().entries();
    history_file::save(&history_path, entries, max_entries)?;
    info!(target: "runtime", entries = entries.len(), "shutdown");
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    let args = Args::parse();
    run(args).inspect_err(|e| error!(target: "runtime", error = %e, "fatal"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn commands_are_parsed_from_the_first_word() {
        assert_eq!(parse_command("  quit "), Command::Exit);
        assert_eq!(parse_command("history"), Command::History);
        assert_eq!(parse_command("echo   a b"), Command::Echo("a b"));
        assert_eq!(parse_command("hello there"), Command::Echo("hello there"));
        assert_eq!(parse_command("   "), Command::Echo(""));
    }

    #[test]
    fn cli_flags() {
        let args = Args::parse_from(["ox-line", "--prompt", "$ ", "--history", "h.txt"]);
        assert_eq!(args.prompt.as_deref(), Some("$ "));
        assert_eq!(args.history, Some(PathBuf::from("h.txt")));
        assert_eq!(args.config, None);
    }
}
