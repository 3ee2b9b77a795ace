//! Bounded, lock-guarded command history with flat-file persistence.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::RwLock;

/// Ordered history of submitted lines, oldest first.
///
/// Appends and snapshots may interleave from different threads (a
/// line-editing callback can ask for completions while the loop is
/// writing), so the entries live behind an `RwLock` and readers always
/// get an independent copy.
#[derive(Debug)]
pub struct History {
    capacity: usize,
    entries: RwLock<Vec<String>>,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a line. Blank lines and consecutive duplicates are
    /// suppressed; the oldest entry is evicted once capacity is reached.
    pub fn push(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let mut entries = self.entries.write().unwrap();
        if entries.last().is_some_and(|last| last == line) {
            return;
        }
        entries.push(line.to_string());
        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }
    }

    /// Returns an independent copy of the entries.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads entries from a newline-delimited file. A missing file leaves
    /// the history empty and is not an error.
    pub fn load(&self, path: &Path) -> io::Result<()> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        let mut entries = self.entries.write().unwrap();
        for line in content.lines() {
            let line = line.trim();
            if !line.is_empty() {
                entries.push(line.to_string());
            }
        }
        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }
        Ok(())
    }

    /// Rewrites the file wholesale, creating the parent directory first.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let entries = self.entries.read().unwrap();
        let mut content = String::new();
        for line in entries.iter() {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(path, content)
    }
}
