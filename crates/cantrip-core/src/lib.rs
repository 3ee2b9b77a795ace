//! Core console subsystem: tokenizer-driven syntax highlighting, prefix
//! completion, a dot-command registry, bounded persistent history, and the
//! read-eval-print session loop. Script execution itself stays behind the
//! [`engine::ScriptEngine`] seam.

pub mod command;
pub mod complete;
pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod history;
pub mod language;
pub mod repl;
pub mod token;

pub use config::ReplConfig;
pub use engine::{EchoEngine, ScriptEngine};
pub use error::CantripError;
pub use highlight::{strip_colors, Highlighter};
pub use history::History;
pub use repl::Repl;
