//! Static profiles for the supported guest languages.
//!
//! A profile is the whole of what the console knows about a language: the
//! word lists driving highlighting and completion, the line-comment marker,
//! and the continuation heuristic. Execution semantics live behind
//! [`crate::engine::ScriptEngine`].

use crate::highlight::{BuiltinCategory, COLOR_BUILTIN, COLOR_FUNCTION};

pub struct LanguageProfile {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub builtins: &'static [BuiltinCategory<'static>],
    pub comment_marker: &'static str,
    /// Completion-only vocabulary: dotted library members that are not
    /// single words and therefore never tokenize as builtins.
    pub extra_completions: &'static [&'static str],
    /// Judges whether trimmed accumulated input still needs more lines.
    pub is_incomplete: fn(&str) -> bool,
}

impl LanguageProfile {
    /// Full completion vocabulary: keywords, every builtin category, and
    /// the dotted extras.
    pub fn vocabulary(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keywords
            .iter()
            .copied()
            .chain(self.builtins.iter().flat_map(|c| c.words.iter().copied()))
            .chain(self.extra_completions.iter().copied())
    }
}

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

const LUA_BUILTIN_FUNCTIONS: &[&str] = &[
    "print", "type", "tostring", "tonumber", "pairs", "ipairs", "next", "rawget", "rawset",
    "rawlen", "rawequal", "getmetatable", "setmetatable", "pcall", "xpcall", "error", "assert",
    "select", "unpack",
];

const LUA_LIBRARIES: &[&str] = &["table", "string", "math", "io", "os", "debug", "coroutine"];

const LUA_BUILTINS: &[BuiltinCategory<'static>] = &[
    BuiltinCategory {
        words: LUA_BUILTIN_FUNCTIONS,
        color: COLOR_BUILTIN,
    },
    BuiltinCategory {
        words: LUA_LIBRARIES,
        color: COLOR_FUNCTION,
    },
];

const LUA_EXTRA_COMPLETIONS: &[&str] = &[
    "table.insert", "table.remove", "table.concat", "table.sort",
    "string.len", "string.sub", "string.find", "string.match",
    "string.gsub", "string.format", "string.upper", "string.lower",
    "math.abs", "math.ceil", "math.floor", "math.max", "math.min",
    "math.random", "math.sqrt", "math.sin", "math.cos", "math.pi",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try", "typeof",
    "var", "void", "while", "with", "yield", "true", "false", "null", "undefined",
];

const JAVASCRIPT_BUILTIN_WORDS: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "Function", "JSON", "Math", "Number", "Object",
    "Promise", "RegExp", "String", "Symbol", "console", "parseInt", "parseFloat", "isNaN",
    "isFinite", "setTimeout", "setInterval", "clearTimeout", "clearInterval",
];

const JAVASCRIPT_BUILTINS: &[BuiltinCategory<'static>] = &[BuiltinCategory {
    words: JAVASCRIPT_BUILTIN_WORDS,
    color: COLOR_BUILTIN,
}];

const JAVASCRIPT_EXTRA_COMPLETIONS: &[&str] =
    &["console.log", "console.error", "console.warn", "console.info"];

const TENGO_KEYWORDS: &[&str] = &[
    "break", "continue", "else", "for", "func", "if", "return", "true", "false", "undefined",
    "import", "in",
];

const TENGO_BUILTIN_WORDS: &[&str] = &[
    "len", "copy", "append", "string", "int", "float", "bool", "char", "bytes", "time",
    "is_string", "is_int", "is_float", "is_bool", "is_char", "is_bytes", "is_array", "is_map",
    "is_undefined", "is_function", "is_callable", "is_iterable", "type_name", "format", "range",
    "printf", "sprintf", "print",
];

const TENGO_BUILTINS: &[BuiltinCategory<'static>] = &[BuiltinCategory {
    words: TENGO_BUILTIN_WORDS,
    color: COLOR_BUILTIN,
}];

static LANGUAGES: &[LanguageProfile] = &[
    LanguageProfile {
        name: "lua",
        aliases: &[],
        keywords: LUA_KEYWORDS,
        builtins: LUA_BUILTINS,
        comment_marker: "--",
        extra_completions: LUA_EXTRA_COMPLETIONS,
        is_incomplete: lua_is_incomplete,
    },
    LanguageProfile {
        name: "javascript",
        aliases: &["js"],
        keywords: JAVASCRIPT_KEYWORDS,
        builtins: JAVASCRIPT_BUILTINS,
        comment_marker: "//",
        extra_completions: JAVASCRIPT_EXTRA_COMPLETIONS,
        is_incomplete: always_complete,
    },
    LanguageProfile {
        name: "tengo",
        aliases: &[],
        keywords: TENGO_KEYWORDS,
        builtins: TENGO_BUILTINS,
        comment_marker: "//",
        extra_completions: &[],
        is_incomplete: always_complete,
    },
];

/// Looks up a profile by name or alias.
pub fn profile(name: &str) -> Option<&'static LanguageProfile> {
    LANGUAGES
        .iter()
        .find(|p| p.name == name || p.aliases.contains(&name))
}

pub fn supported() -> &'static [LanguageProfile] {
    LANGUAGES
}

/// Suffix-based guess at whether a lua fragment still needs more lines.
///
/// This is a plain string check, not a parse: a line ending in an
/// identifier that happens to end in `then` triggers it, and nested blocks
/// can end the accumulation early. The empty-line escape in the session
/// loop covers both misfires.
fn lua_is_incomplete(input: &str) -> bool {
    let input = input.trim();
    input.ends_with("then")
        || input.ends_with("do")
        || input.ends_with('{')
        || (input.starts_with("function") && !input.contains("end"))
}

fn always_complete(_input: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_and_alias() {
        assert_eq!(profile("lua").unwrap().name, "lua");
        assert_eq!(profile("javascript").unwrap().name, "javascript");
        assert_eq!(profile("js").unwrap().name, "javascript");
        assert!(profile("cobol").is_none());
    }

    #[test]
    fn vocabulary_spans_keywords_builtins_and_extras() {
        let lua = profile("lua").unwrap();
        let vocab: Vec<_> = lua.vocabulary().collect();
        assert!(vocab.contains(&"while"));
        assert!(vocab.contains(&"print"));
        assert!(vocab.contains(&"coroutine"));
        assert!(vocab.contains(&"table.insert"));
    }

    #[test]
    fn lua_continuation_heuristic() {
        let lua = profile("lua").unwrap();
        assert!((lua.is_incomplete)("if x then"));
        assert!((lua.is_incomplete)("for i = 1, 10 do"));
        assert!((lua.is_incomplete)("t = {"));
        assert!((lua.is_incomplete)("function foo()"));
        assert!(!(lua.is_incomplete)("function foo() return 1 end"));
        assert!(!(lua.is_incomplete)("print(1)"));
    }

    #[test]
    fn languages_without_heuristic_never_continue() {
        let tengo = profile("tengo").unwrap();
        assert!(!(tengo.is_incomplete)("if a {"));
        let js = profile("js").unwrap();
        assert!(!(js.is_incomplete)("function f() {"));
    }
}
