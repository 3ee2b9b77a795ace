//! Reedline frontend: completion menu, token-based line highlighting,
//! continuation validation, and file-backed editing history around the
//! core session.

use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, Completer as ReedlineCompleter, DescriptionMode, Emacs,
    FileBackedHistory, Highlighter as ReedlineHighlighter, IdeMenu, KeyCode, KeyModifiers,
    Keybindings, MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, Span, StyledText, Suggestion, ValidationResult,
    Validator,
};

use cantrip_core::error::ERROR_TAG;
use cantrip_core::token::{tokenize_with_categories, TokenKind};
use cantrip_core::{command, complete, highlight, language, CantripError, Repl};

const COMPLETION_MENU_NAME: &str = "completion_menu";

struct ReplPrompt {
    prompt: String,
    continue_prompt: String,
}

impl Prompt for ReplPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.prompt)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.continue_prompt)
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}

struct LineHighlighter {
    language: String,
}

impl ReedlineHighlighter for LineHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        let Some(profile) = language::profile(&self.language) else {
            styled.push((Style::new(), line.to_string()));
            return styled;
        };
        let tokens = tokenize_with_categories(
            line,
            profile.keywords,
            profile.builtins,
            profile.comment_marker,
        );
        for token in tokens {
            let style = match token.kind {
                TokenKind::String => Style::new().fg(Color::LightGreen),
                TokenKind::Comment => Style::new().fg(Color::DarkGray),
                TokenKind::Keyword => Style::new().fg(Color::LightBlue),
                TokenKind::Number => Style::new().fg(Color::LightCyan),
                TokenKind::Builtin { category } => ansi_style(profile.builtins[category].color),
                TokenKind::Default => Style::new(),
            };
            styled.push((style, token.text.to_string()));
        }
        if styled.buffer.is_empty() {
            styled.push((Style::new(), String::new()));
        }
        styled
    }
}

/// Maps a core palette code to the terminal style reedline renders with.
fn ansi_style(code: &str) -> Style {
    let color = match code {
        highlight::COLOR_KEYWORD => Color::LightBlue,
        highlight::COLOR_STRING => Color::LightGreen,
        highlight::COLOR_COMMENT => Color::DarkGray,
        highlight::COLOR_NUMBER => Color::LightCyan,
        highlight::COLOR_OPERATOR => Color::LightYellow,
        highlight::COLOR_FUNCTION => Color::LightMagenta,
        highlight::COLOR_BUILTIN => Color::LightRed,
        highlight::COLOR_BRACKET => Color::White,
        _ => return Style::new(),
    };
    Style::new().fg(color)
}

struct LineCompleter {
    language: String,
}

impl ReedlineCompleter for LineCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let prefix = &line[..pos];
        // Candidates replace the whole typed prefix.
        let span = Span::new(0, pos);
        complete::complete(prefix, &self.language)
            .into_iter()
            .map(|value| {
                let description = value
                    .strip_prefix('.')
                    .and_then(command::find)
                    .map(|cmd| cmd.description.to_string());
                Suggestion {
                    value,
                    description,
                    style: None,
                    extra: None,
                    span,
                    append_whitespace: false,
                }
            })
            .collect()
    }
}

struct LineValidator {
    language: String,
}

impl Validator for LineValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        let incomplete = language::profile(&self.language)
            .is_some_and(|p| (p.is_incomplete)(line.trim()));
        if incomplete {
            ValidationResult::Incomplete
        } else {
            ValidationResult::Complete
        }
    }
}

fn configure_completion_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU_NAME.to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::SHIFT,
        KeyCode::BackTab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU_NAME.to_string()),
            ReedlineEvent::MenuPrevious,
        ]),
    );
}

fn create_completion_menu() -> Box<IdeMenu> {
    Box::new(
        IdeMenu::default()
            .with_name(COMPLETION_MENU_NAME)
            .with_description_mode(DescriptionMode::PreferRight)
            .with_padding(1),
    )
}

/// Runs the session on the terminal with the rich editor, then closes it.
pub fn run_interactive(repl: &mut Repl) -> Result<(), CantripError> {
    let config = repl.config().clone();

    let mut keybindings = default_emacs_keybindings();
    configure_completion_keybindings(&mut keybindings);
    let edit_mode = Box::new(Emacs::new(keybindings));

    let mut line_editor = Reedline::create()
        .with_quick_completions(false)
        .with_edit_mode(edit_mode)
        .with_ansi_colors(true)
        .use_bracketed_paste(true);

    if config.syntax_highlight {
        line_editor = line_editor.with_highlighter(Box::new(LineHighlighter {
            language: config.engine.clone(),
        }));
    }
    if config.auto_complete {
        line_editor = line_editor
            .with_completer(Box::new(LineCompleter {
                language: config.engine.clone(),
            }))
            .with_menu(ReedlineMenu::EngineCompleter(create_completion_menu()));
    }
    if config.multi_line {
        line_editor = line_editor.with_validator(Box::new(LineValidator {
            language: config.engine.clone(),
        }));
    }
    if let Some(path) = &config.history_file {
        if let Ok(history) = FileBackedHistory::with_file(config.history_size, path.clone()) {
            line_editor = line_editor.with_history(Box::new(history));
        }
    }

    println!(
        "Starting {} REPL. Type .help for commands, .exit to quit.",
        config.engine
    );
    println!("Tab opens completions; arrow keys move inside the menu.");

    let prompt = ReplPrompt {
        prompt: config.prompt.clone(),
        continue_prompt: config.continue_prompt.clone(),
    };

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                repl.add_history(trimmed);
                match repl.evaluate(trimmed) {
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
            Ok(Signal::CtrlC) => {
                println!("^C");
            }
            Ok(Signal::CtrlD) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                eprintln!("{ERROR_TAG} repl: {e}");
                break;
            }
        }
    }

    repl.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completer_replaces_the_whole_prefix() {
        let mut completer = LineCompleter {
            language: "lua".to_string(),
        };
        let suggestions = completer.complete(".he", 3);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, ".help");
        assert_eq!(suggestions[0].span, Span::new(0, 3));
        assert!(suggestions[0].description.is_some());
    }

    #[test]
    fn completer_respects_cursor_position() {
        let mut completer = LineCompleter {
            language: "tengo".to_string(),
        };
        let suggestions = completer.complete("print extra", 3);
        let values: Vec<_> = suggestions.into_iter().map(|s| s.value).collect();
        assert_eq!(values, vec!["print", "printf"]);
    }

    #[test]
    fn validator_follows_the_language_heuristic() {
        let validator = LineValidator {
            language: "lua".to_string(),
        };
        assert!(matches!(
            validator.validate("if x then"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            validator.validate("print(1)"),
            ValidationResult::Complete
        ));

        let validator = LineValidator {
            language: "tengo".to_string(),
        };
        assert!(matches!(
            validator.validate("if a {"),
            ValidationResult::Complete
        ));
    }

    #[test]
    fn palette_codes_map_to_terminal_styles() {
        assert_eq!(
            ansi_style(highlight::COLOR_BUILTIN).foreground,
            Some(Color::LightRed)
        );
        assert_eq!(
            ansi_style(highlight::COLOR_FUNCTION).foreground,
            Some(Color::LightMagenta)
        );
        assert_eq!(ansi_style("\x1b[999m").foreground, None);
    }
}
