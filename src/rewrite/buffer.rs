use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, RewriteError};
use crate::parser::{locate, ComponentBounds, LocateError};

/// The text of one input file, edited in place and saved once.
///
/// Offsets handed out by [`SourceBuffer::locate`] describe the text at the
/// time of the call; any edit invalidates them.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    text: String,
    edits: usize,
}

impl SourceBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            edits: 0,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| RewriteError::io(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "loaded source");
        Ok(Self::new(text))
    }

    /// Write the buffer to `path` through a temporary file in the same
    /// directory, so the target is either fully replaced or untouched.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of edits applied since load.
    pub fn edits(&self) -> usize {
        self.edits
    }

    pub fn locate(&self, name: &str) -> std::result::Result<ComponentBounds, LocateError> {
        locate(&self.text, name)
    }

    pub fn insert(&mut self, at: usize, text: &str) {
        self.text.insert_str(at, text);
        self.edits += 1;
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        self.text.replace_range(range, text);
        self.edits += 1;
    }
}

pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| RewriteError::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| RewriteError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| RewriteError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
