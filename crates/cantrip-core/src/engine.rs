//! The evaluation seam: the console hands source text to a [`ScriptEngine`]
//! and prints whatever comes back, without inspecting it.

use std::fs;
use std::path::Path;

use crate::error::CantripError;

/// An engine that executes guest-language source for one session.
///
/// Implementations carry their own interpreter state; the console creates
/// one engine per session and never shares it across sessions.
pub trait ScriptEngine: Send + Sync {
    /// Engine name, e.g. `lua`.
    fn name(&self) -> &str;

    /// Evaluates a chunk of source and returns its textual result.
    /// An empty result suppresses output in the session loop.
    fn eval(&self, source: &str) -> Result<String, CantripError>;

    /// Evaluates a script file.
    fn eval_file(&self, path: &Path) -> Result<String, CantripError>;
}

/// Placeholder engine that echoes what it would execute. Stands in where
/// no real interpreter is wired up, and keeps the session loop testable.
pub struct EchoEngine {
    name: String,
}

impl EchoEngine {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ScriptEngine for EchoEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn eval(&self, source: &str) -> Result<String, CantripError> {
        Ok(format!("Executing ({}): {}", self.name, source))
    }

    fn eval_file(&self, path: &Path) -> Result<String, CantripError> {
        let source = fs::read_to_string(path)?;
        self.eval(source.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_engine_reports_source() {
        let engine = EchoEngine::new("lua");
        assert_eq!(
            engine.eval("print(1)").unwrap(),
            "Executing (lua): print(1)"
        );
    }

    #[test]
    fn echo_engine_eval_file_requires_existing_file() {
        let engine = EchoEngine::new("lua");
        assert!(engine.eval_file(Path::new("/no/such/file.lua")).is_err());
    }
}
