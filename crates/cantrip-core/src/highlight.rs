//! ANSI syntax highlighting over the token stream.

use crate::language;
use crate::token::{tokenize_with_categories, TokenKind};

pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_KEYWORD: &str = "\x1b[94m";
pub const COLOR_STRING: &str = "\x1b[92m";
pub const COLOR_COMMENT: &str = "\x1b[90m";
pub const COLOR_NUMBER: &str = "\x1b[96m";
pub const COLOR_OPERATOR: &str = "\x1b[93m";
pub const COLOR_FUNCTION: &str = "\x1b[95m";
pub const COLOR_BUILTIN: &str = "\x1b[91m";
pub const COLOR_BRACKET: &str = "\x1b[97m";

/// A group of builtin identifiers sharing one highlight color.
///
/// Languages whose builtin vocabulary splits semantically (functions vs.
/// standard-library namespaces) carry one category per split.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinCategory<'w> {
    pub words: &'w [&'w str],
    pub color: &'static str,
}

/// Colors console input for one guest language.
///
/// Unknown languages are a no-op: the input comes back unchanged.
#[derive(Clone, Debug)]
pub struct Highlighter {
    language: String,
}

impl Highlighter {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn highlight(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let Some(profile) = language::profile(&self.language) else {
            return input.to_string();
        };
        let tokens = tokenize_with_categories(
            input,
            profile.keywords,
            profile.builtins,
            profile.comment_marker,
        );
        let mut out = String::with_capacity(input.len());
        for token in tokens {
            let color = match token.kind {
                TokenKind::String => Some(COLOR_STRING),
                TokenKind::Comment => Some(COLOR_COMMENT),
                TokenKind::Keyword => Some(COLOR_KEYWORD),
                TokenKind::Number => Some(COLOR_NUMBER),
                TokenKind::Builtin { category } => {
                    Some(profile.builtins[category].color)
                }
                TokenKind::Default => None,
            };
            match color {
                Some(color) => {
                    out.push_str(color);
                    out.push_str(token.text);
                    out.push_str(COLOR_RESET);
                }
                None => out.push_str(token.text),
            }
        }
        out
    }
}

/// Removes every `ESC [ … m` color sequence in one pass.
///
/// Incomplete escape sequences are passed through verbatim, so stripping
/// plain text is a no-op.
pub fn strip_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\x1b') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match color_sequence_len(tail) {
            Some(len) => rest = &tail[len..],
            None => {
                out.push('\x1b');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn color_sequence_len(tail: &str) -> Option<usize> {
    let bytes = tail.as_bytes();
    if bytes.get(1) != Some(&b'[') {
        return None;
    }
    let mut i = 2;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b';') {
        i += 1;
    }
    if bytes.get(i) == Some(&b'm') {
        Some(i + 1)
    } else {
        None
    }
}
