//! Single-pass scanner that splits console input into typed spans.
//!
//! Tokens are contiguous and ordered: `tokens[i].end == tokens[i + 1].start`,
//! and concatenating the `text` fields reconstructs the input exactly. The
//! scanner never backtracks and classifies every position exactly once,
//! which is what lets the highlighter render without re-scanning its own
//! output.

use crate::highlight::{BuiltinCategory, COLOR_BUILTIN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    String,
    Comment,
    Number,
    Keyword,
    /// Builtin identifier; `category` indexes the owning [`BuiltinCategory`].
    Builtin { category: usize },
    Default,
}

/// A classified span of input. `start`/`end` are byte offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Tokenizes against a flat builtin set.
pub fn tokenize<'a>(
    input: &'a str,
    keywords: &[&str],
    builtins: &[&str],
    comment_marker: &str,
) -> Vec<Token<'a>> {
    let categories = [BuiltinCategory {
        words: builtins,
        color: COLOR_BUILTIN,
    }];
    tokenize_with_categories(input, keywords, &categories, comment_marker)
}

/// Tokenizes against categorized builtin sets.
pub fn tokenize_with_categories<'a>(
    input: &'a str,
    keywords: &[&str],
    categories: &[BuiltinCategory],
    comment_marker: &str,
) -> Vec<Token<'a>> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(input.len(), |&(b, _)| b);
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, ch) = chars[i];

        // Quoted strings. A backslash and the character it escapes are
        // consumed together; an unterminated string runs to end of input.
        if ch == '"' || ch == '\'' {
            let quote = ch;
            i += 1;
            while i < chars.len() && chars[i].1 != quote {
                if chars[i].1 == '\\' && i + 1 < chars.len() {
                    i += 1;
                }
                i += 1;
            }
            if i < chars.len() {
                i += 1; // closing quote
            }
            push(&mut tokens, input, TokenKind::String, start, byte_at(i));
            continue;
        }

        // Line comments run to end of line, newline excluded.
        if !comment_marker.is_empty() && input[start..].starts_with(comment_marker) {
            while i < chars.len() && chars[i].1 != '\n' {
                i += 1;
            }
            push(&mut tokens, input, TokenKind::Comment, start, byte_at(i));
            continue;
        }

        // Digit-led numbers. The dot is only consumed when a digit follows,
        // so trailing punctuation stays out of the literal.
        if ch.is_ascii_digit() {
            while i < chars.len() && chars[i].1.is_ascii_digit() {
                i += 1;
            }
            if i < chars.len()
                && chars[i].1 == '.'
                && chars.get(i + 1).is_some_and(|&(_, c)| c.is_ascii_digit())
            {
                i += 1;
                while i < chars.len() && chars[i].1.is_ascii_digit() {
                    i += 1;
                }
            }
            push(&mut tokens, input, TokenKind::Number, start, byte_at(i));
            continue;
        }

        // Maximal word runs. A word with an embedded digit run is never
        // split; numbers only start at a leading digit.
        if is_word_char(ch) {
            while i < chars.len() && is_word_char(chars[i].1) {
                i += 1;
            }
            let end = byte_at(i);
            let kind = classify_word(&input[start..end], keywords, categories);
            push(&mut tokens, input, kind, start, end);
            continue;
        }

        // Anything else is a single-character token.
        i += 1;
        push(&mut tokens, input, TokenKind::Default, start, byte_at(i));
    }

    tokens
}

fn push<'a>(tokens: &mut Vec<Token<'a>>, input: &'a str, kind: TokenKind, start: usize, end: usize) {
    tokens.push(Token {
        kind,
        text: &input[start..end],
        start,
        end,
    });
}

fn classify_word(word: &str, keywords: &[&str], categories: &[BuiltinCategory]) -> TokenKind {
    if keywords.contains(&word) {
        return TokenKind::Keyword;
    }
    for (category, set) in categories.iter().enumerate() {
        if set.words.contains(&word) {
            return TokenKind::Builtin { category };
        }
    }
    if is_numeric_literal(word) {
        TokenKind::Number
    } else {
        TokenKind::Default
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_numeric_literal(s: &str) -> bool {
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<(TokenKind, &'a str)> {
        tokens.iter().map(|t| (t.kind, t.text)).collect()
    }

    fn assert_lossless(input: &str, tokens: &[Token<'_>]) {
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, input);
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("", &[], &[], "--").is_empty());
    }

    #[test]
    fn builtin_call_with_string_argument() {
        let tokens = tokenize("print(\"hello\")", &[], &["print"], "--");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Builtin { category: 0 }, "print"),
                (TokenKind::Default, "("),
                (TokenKind::String, "\"hello\""),
                (TokenKind::Default, ")"),
            ]
        );
        assert_lossless("print(\"hello\")", &tokens);
    }

    #[test]
    fn keywords_and_identifiers() {
        let tokens = tokenize("if x then", &["if", "then"], &[], "--");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Keyword, "if"),
                (TokenKind::Default, " "),
                (TokenKind::Default, "x"),
                (TokenKind::Default, " "),
                (TokenKind::Keyword, "then"),
            ]
        );
    }

    #[test]
    fn escaped_quote_stays_inside_string() {
        let tokens = tokenize(r#""a\"b""#, &[], &[], "--");
        assert_eq!(kinds(&tokens), vec![(TokenKind::String, r#""a\"b""#)]);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let input = "x = \"open";
        let tokens = tokenize(input, &[], &[], "--");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::String);
        assert_eq!(tokens.last().unwrap().text, "\"open");
        assert_lossless(input, &tokens);
    }

    #[test]
    fn comment_stops_at_newline() {
        let tokens = tokenize("x -- note\ny", &[], &[], "--");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Default, "x"),
                (TokenKind::Default, " "),
                (TokenKind::Comment, "-- note"),
                (TokenKind::Default, "\n"),
                (TokenKind::Default, "y"),
            ]
        );
    }

    #[test]
    fn decimal_number_consumes_dot_only_before_digit() {
        let tokens = tokenize("3.14", &[], &[], "--");
        assert_eq!(kinds(&tokens), vec![(TokenKind::Number, "3.14")]);

        let tokens = tokenize("42.", &[], &[], "--");
        assert_eq!(
            kinds(&tokens),
            vec![(TokenKind::Number, "42"), (TokenKind::Default, ".")]
        );
    }

    #[test]
    fn digits_inside_identifier_are_not_split() {
        let tokens = tokenize("var123", &[], &[], "--");
        assert_eq!(kinds(&tokens), vec![(TokenKind::Default, "var123")]);
    }

    #[test]
    fn non_ascii_chars_are_single_default_tokens() {
        let input = "é = 1";
        let tokens = tokenize(input, &[], &[], "--");
        assert_eq!(tokens[0].text, "é");
        assert_lossless(input, &tokens);
    }

    #[test]
    fn tokenization_is_lossless_on_mixed_input() {
        for input in [
            "local x = 'a' -- t\nprint(x)",
            "1+2.5*fn_name(\"s\")",
            "\"unclosed",
            "   \t\n",
        ] {
            let tokens = tokenize(input, &["local"], &["print"], "--");
            assert_lossless(input, &tokens);
        }
    }
}
