//! The session: configuration, bounded history, and the cooperative
//! read-eval-print loop.
//!
//! The loop is single-threaded and blocks only on reads. Each iteration
//! flows one way: raw input, optional continuation accumulation, history
//! append, dispatch to the command table or the engine, textual result to
//! the output stream. Highlighting is a read-only echo of the same raw
//! input and never feeds dispatch.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::command::{self, COMMAND_MARKER};
use crate::complete;
use crate::config::ReplConfig;
use crate::engine::ScriptEngine;
use crate::error::{CantripError, ERROR_TAG, WARN_TAG};
use crate::highlight::Highlighter;
use crate::history::History;
use crate::language;

pub struct Repl {
    config: ReplConfig,
    history: Arc<History>,
    engine: Arc<dyn ScriptEngine>,
    highlighter: Highlighter,
    closed: bool,
}

impl Repl {
    /// Validates the configuration and loads the history file if one is
    /// configured. A missing history file starts the session empty.
    pub fn new(
        mut config: ReplConfig,
        engine: Arc<dyn ScriptEngine>,
    ) -> Result<Self, CantripError> {
        config.validate()?;
        let history = Arc::new(History::with_capacity(config.history_size));
        if let Some(path) = &config.history_file {
            if let Err(e) = history.load(path) {
                eprintln!(
                    "{WARN_TAG} could not load history from {}: {}",
                    path.display(),
                    e
                );
            }
        }
        let highlighter = Highlighter::new(config.engine.clone());
        Ok(Self {
            config,
            history,
            engine,
            highlighter,
            closed: false,
        })
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn ScriptEngine {
        self.engine.as_ref()
    }

    /// Shared handle for callers that need history access while the loop
    /// runs (e.g. a line editor's completion callback).
    pub fn history_handle(&self) -> Arc<History> {
        Arc::clone(&self.history)
    }

    pub fn add_history(&self, line: &str) {
        self.history.push(line);
    }

    /// Independent copy of the history, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.snapshot()
    }

    pub fn save_history_to(&self, path: &Path) -> Result<(), CantripError> {
        Ok(self.history.save(path)?)
    }

    pub fn complete(&self, input: &str) -> Vec<String> {
        complete::complete(input, &self.config.engine)
    }

    pub fn highlight(&self, input: &str) -> String {
        self.highlighter.highlight(input)
    }

    /// Judges whether accumulated input still needs more lines.
    pub fn needs_continuation(&self, input: &str) -> bool {
        self.config.multi_line
            && language::profile(&self.config.engine)
                .is_some_and(|p| (p.is_incomplete)(input.trim()))
    }

    /// Routes one submitted line: marker-prefixed input goes to the
    /// command table, everything else to the engine. Callers manage
    /// history themselves; this has no history side effects.
    pub fn evaluate(&mut self, input: &str) -> Result<String, CantripError> {
        let input = input.trim();
        if let Some((name, args)) = command::parse(input) {
            return command::dispatch(self, name, &args);
        }
        self.engine.eval(input)
    }

    /// Runs the loop over explicit streams until end-of-input or an exit
    /// command, then closes the session. Per-line failures are reported on
    /// `errors` and the loop continues; only a read failure aborts it.
    pub fn run_with_io<R: BufRead, W: Write, E: Write>(
        &mut self,
        mut input: R,
        mut output: W,
        mut errors: E,
    ) -> Result<(), CantripError> {
        if self.closed {
            return Err(CantripError::config("session is closed"));
        }
        writeln!(
            output,
            "Starting {} REPL. Type {COMMAND_MARKER}help for commands.",
            self.config.engine
        )?;

        loop {
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;
            let Some(line) = read_line(&mut input)? else {
                writeln!(output, "\nGoodbye!")?;
                break;
            };
            let mut buffer = line.trim().to_string();
            if buffer.is_empty() {
                continue;
            }

            // Accumulate continuation lines until the heuristic is
            // satisfied; an empty line force-ends the accumulation.
            while self.needs_continuation(&buffer) {
                write!(output, "{}", self.config.continue_prompt)?;
                output.flush()?;
                let Some(next) = read_line(&mut input)? else {
                    break;
                };
                let next = next.trim();
                if next.is_empty() {
                    break;
                }
                buffer.push('\n');
                buffer.push_str(next);
            }

            if self.config.syntax_highlight {
                let highlighted = self.highlighter.highlight(&buffer);
                if highlighted != buffer {
                    writeln!(
                        output,
                        "\x1b[1A\x1b[K{}{}",
                        self.config.prompt, highlighted
                    )?;
                }
            }

            self.history.push(&buffer);

            match self.evaluate(&buffer) {
                Ok(result) => {
                    if !result.is_empty() {
                        writeln!(output, "{}", result)?;
                    }
                }
                Err(CantripError::Exit) => {
                    writeln!(output, "Goodbye!")?;
                    break;
                }
                Err(e) => writeln!(errors, "Error: {}", e)?,
            }
        }

        self.close()
    }

    /// Interactive variant on the process terminal, with line editing and
    /// editor-side history via rustyline.
    pub fn run(&mut self) -> Result<(), CantripError> {
        if self.closed {
            return Err(CantripError::config("session is closed"));
        }
        let mut rl = DefaultEditor::new()
            .map_err(|e| CantripError::config(format!("failed to set up line editor: {e}")))?;
        if let Some(path) = &self.config.history_file {
            let _ = rl.load_history(path);
        }
        println!(
            "Starting {} REPL. Type {COMMAND_MARKER}help for commands.",
            self.config.engine
        );

        loop {
            match rl.readline(&self.config.prompt) {
                Ok(line) => {
                    let mut buffer = line.trim().to_string();
                    if buffer.is_empty() {
                        continue;
                    }
                    while self.needs_continuation(&buffer) {
                        match rl.readline(&self.config.continue_prompt) {
                            Ok(next) => {
                                let next = next.trim().to_string();
                                if next.is_empty() {
                                    break;
                                }
                                buffer.push('\n');
                                buffer.push_str(&next);
                            }
                            Err(_) => break,
                        }
                    }
                    if self.config.syntax_highlight {
                        let highlighted = self.highlighter.highlight(&buffer);
                        if highlighted != buffer {
                            println!("\x1b[1A\x1b[K{}{}", self.config.prompt, highlighted);
                        }
                    }
                    let _ = rl.add_history_entry(&buffer);
                    self.history.push(&buffer);
                    match self.evaluate(&buffer) {
                        Ok(result) => {
                            if !result.is_empty() {
                                println!("{result}");
                            }
                        }
                        Err(CantripError::Exit) => {
                            println!("Goodbye!");
                            break;
                        }
                        Err(e) => eprintln!("Error: {e}"),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("\nGoodbye!");
                    break;
                }
                Err(e) => {
                    eprintln!("{ERROR_TAG} repl: {e}");
                    break;
                }
            }
        }

        self.close()
    }

    /// Persists history (when enabled) and marks the session closed.
    /// Subsequent calls are no-ops.
    pub fn close(&mut self) -> Result<(), CantripError> {
        if self.closed {
            return Ok(());
        }
        if self.config.save_history {
            if let Some(path) = &self.config.history_file {
                if let Err(e) = self.history.save(path) {
                    eprintln!(
                        "{WARN_TAG} could not save history to {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
        self.closed = true;
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, CantripError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EchoEngine;

    fn lua_repl() -> Repl {
        let config = ReplConfig {
            engine: "lua".to_string(),
            ..ReplConfig::default()
        };
        Repl::new(config, Arc::new(EchoEngine::new("lua"))).unwrap()
    }

    #[test]
    fn evaluate_routes_to_engine() {
        let mut repl = lua_repl();
        assert_eq!(
            repl.evaluate("print(1)").unwrap(),
            "Executing (lua): print(1)"
        );
    }

    #[test]
    fn evaluate_routes_marker_lines_to_commands() {
        let mut repl = lua_repl();
        let out = repl.evaluate(".help").unwrap();
        assert!(out.contains("Available commands:"));
    }

    #[test]
    fn continuation_respects_multi_line_flag() {
        let mut repl = lua_repl();
        assert!(!repl.needs_continuation("if x then"));

        let config = ReplConfig {
            engine: "lua".to_string(),
            multi_line: true,
            ..ReplConfig::default()
        };
        repl = Repl::new(config, Arc::new(EchoEngine::new("lua"))).unwrap();
        assert!(repl.needs_continuation("if x then"));
        assert!(!repl.needs_continuation("print(1)"));
    }

    #[test]
    fn close_is_idempotent() {
        let mut repl = lua_repl();
        repl.close().unwrap();
        repl.close().unwrap();
    }

    #[test]
    fn closed_session_refuses_to_run() {
        let mut repl = lua_repl();
        repl.close().unwrap();
        let err = repl
            .run_with_io(std::io::Cursor::new(""), Vec::new(), Vec::new())
            .unwrap_err();
        assert!(matches!(err, CantripError::Config(_)));
    }
}
