//! Built-in session commands, dispatched on the `.` marker.

use crate::config::expand_path;
use crate::error::CantripError;
use crate::language;
use crate::repl::Repl;

pub const COMMAND_MARKER: char = '.';

pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: fn(&mut Repl, &[&str]) -> Result<String, CantripError>,
}

/// Immutable process-wide command table, in `.help` display order.
pub static COMMANDS: &[Command] = &[
    Command {
        name: "help",
        description: "Show help information",
        usage: ".help [command]",
        handler: help_command,
    },
    Command {
        name: "exit",
        description: "Exit the REPL",
        usage: ".exit",
        handler: exit_command,
    },
    Command {
        name: "quit",
        description: "Exit the REPL (alias for .exit)",
        usage: ".quit",
        handler: exit_command,
    },
    Command {
        name: "clear",
        description: "Clear the screen",
        usage: ".clear",
        handler: clear_command,
    },
    Command {
        name: "load",
        description: "Load and execute a script file",
        usage: ".load <filename>",
        handler: load_command,
    },
    Command {
        name: "save",
        description: "Save session history to a file",
        usage: ".save <filename>",
        handler: save_command,
    },
    Command {
        name: "engines",
        description: "List available engines",
        usage: ".engines",
        handler: engines_command,
    },
];

pub fn find(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Splits marker-prefixed input into the command name and its arguments.
pub fn parse(input: &str) -> Option<(&str, Vec<&str>)> {
    let trimmed = input.trim();
    if !trimmed.starts_with(COMMAND_MARKER) {
        return None;
    }
    let mut words = trimmed.split_whitespace();
    let name = words.next().unwrap_or("").trim_start_matches(COMMAND_MARKER);
    Some((name, words.collect()))
}

/// Runs a named command; unknown names are a validation failure.
pub fn dispatch(repl: &mut Repl, name: &str, args: &[&str]) -> Result<String, CantripError> {
    let Some(command) = find(name) else {
        return Err(CantripError::validation(format!(
            "unknown command: {COMMAND_MARKER}{name}"
        )));
    };
    (command.handler)(repl, args)
}

fn help_command(_repl: &mut Repl, args: &[&str]) -> Result<String, CantripError> {
    if let Some(name) = args.first() {
        let name = name.trim_start_matches(COMMAND_MARKER);
        return Ok(match find(name) {
            Some(cmd) => format!("{} - {}\nUsage: {}", cmd.name, cmd.description, cmd.usage),
            None => format!("Unknown command: {name}"),
        });
    }

    let mut out = String::from("Available commands:\n");
    for cmd in COMMANDS {
        out.push_str(&format!("  .{:<10}{}\n", cmd.name, cmd.description));
    }
    out.push_str("\nType .help <command> for more information about a specific command.");
    Ok(out)
}

fn exit_command(_repl: &mut Repl, _args: &[&str]) -> Result<String, CantripError> {
    Err(CantripError::Exit)
}

fn clear_command(_repl: &mut Repl, _args: &[&str]) -> Result<String, CantripError> {
    Ok("\x1b[2J\x1b[H".to_string())
}

fn load_command(repl: &mut Repl, args: &[&str]) -> Result<String, CantripError> {
    let Some(path) = args.first() else {
        return Err(CantripError::validation("usage: .load <filename>"));
    };
    let path = expand_path(path);
    let result = repl.engine().eval_file(&path)?;
    let mut out = format!("Loaded file: {}", path.display());
    if !result.is_empty() {
        out.push_str("\nResult: ");
        out.push_str(&result);
    }
    Ok(out)
}

fn save_command(repl: &mut Repl, args: &[&str]) -> Result<String, CantripError> {
    let Some(path) = args.first() else {
        return Err(CantripError::validation("usage: .save <filename>"));
    };
    let path = expand_path(path);
    repl.save_history_to(&path)?;
    Ok(format!("Saved session to: {}", path.display()))
}

fn engines_command(repl: &mut Repl, _args: &[&str]) -> Result<String, CantripError> {
    let current = repl.config().engine.clone();
    let mut out = String::from("Available engines:\n");
    for profile in language::supported() {
        if profile.name == current || profile.aliases.contains(&current.as_str()) {
            out.push_str(&format!("  - {} (current)\n", profile.name));
        } else {
            out.push_str(&format!("  - {}\n", profile.name));
        }
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReplConfig;
    use crate::engine::EchoEngine;
    use std::sync::Arc;

    fn test_repl() -> Repl {
        let config = ReplConfig {
            engine: "lua".to_string(),
            ..ReplConfig::default()
        };
        Repl::new(config, Arc::new(EchoEngine::new("lua"))).unwrap()
    }

    #[test]
    fn parse_splits_name_and_args() {
        assert_eq!(parse(".load a.lua"), Some(("load", vec!["a.lua"])));
        assert_eq!(parse("  .help  "), Some(("help", vec![])));
        assert_eq!(parse("print(1)"), None);
    }

    #[test]
    fn help_lists_every_command() {
        let mut repl = test_repl();
        let out = dispatch(&mut repl, "help", &[]).unwrap();
        for cmd in COMMANDS {
            assert!(out.contains(cmd.name), "missing {}", cmd.name);
        }
    }

    #[test]
    fn help_with_argument_shows_usage() {
        let mut repl = test_repl();
        let out = dispatch(&mut repl, "help", &["load"]).unwrap();
        assert!(out.contains(".load <filename>"));

        let out = dispatch(&mut repl, "help", &["bogus"]).unwrap();
        assert!(out.contains("Unknown command: bogus"));
    }

    #[test]
    fn exit_and_quit_raise_the_end_signal() {
        let mut repl = test_repl();
        assert!(dispatch(&mut repl, "exit", &[]).unwrap_err().is_exit());
        assert!(dispatch(&mut repl, "quit", &[]).unwrap_err().is_exit());
    }

    #[test]
    fn unknown_command_is_a_validation_error() {
        let mut repl = test_repl();
        let err = dispatch(&mut repl, "bogus", &[]).unwrap_err();
        assert!(matches!(err, CantripError::Validation(_)));
        assert!(err.to_string().contains("unknown command: .bogus"));
    }

    #[test]
    fn load_requires_an_argument() {
        let mut repl = test_repl();
        let err = dispatch(&mut repl, "load", &[]).unwrap_err();
        assert!(err.to_string().contains("usage: .load <filename>"));
    }

    #[test]
    fn engines_marks_the_current_one() {
        let mut repl = test_repl();
        let out = dispatch(&mut repl, "engines", &[]).unwrap();
        assert!(out.contains("- lua (current)"));
        assert!(out.contains("- javascript"));
        assert!(out.contains("- tengo"));
    }
}
