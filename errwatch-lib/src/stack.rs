//! Stack trace normalization.
//!
//! Condenses a multi-line stack trace into one `~`-separated line that is
//! short enough to ship with a record.

use std::sync::LazyLock;

use regex::Regex;

/// Default number of frame segments kept by [`normalize_stack`].
pub const DEFAULT_MAX_FRAMES: usize = 9;

/// Whole-word `at`, the frame prefix some runtimes print instead of `@`.
static FRAME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bat\b").expect("frame prefix pattern is valid"));

/// Query string of a file url, up to the `:line` suffix.
static QUERY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?[^:]+").expect("query suffix pattern is valid"));

/// An error value as raised by the host, possibly without a stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaisedError {
    /// Error class name, e.g. `TypeError`.
    pub name: String,
    pub message: String,
    /// Raw stack text as produced by the runtime.
    pub stack: Option<String>,
}

impl RaisedError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Wraps a Rust error. The source chain is folded into the stack text.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut raised = Self::new("Error", err.to_string());
        let mut frames = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            frames.push(format!("    at {}", cause));
            source = cause.source();
        }
        if !frames.is_empty() {
            raised.stack = Some(format!("{}\n{}", raised, frames.join("\n")));
        }
        raised
    }
}

impl std::fmt::Display for RaisedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.name.is_empty(), self.message.is_empty()) {
            (true, _) => f.write_str(&self.message),
            (false, true) => f.write_str(&self.name),
            (false, false) => write!(f, "{}: {}", self.name, self.message),
        }
    }
}

/// Normalizes the stack of `error` into a single display line.
///
/// Returns an empty string when the error carries no stack text. The
/// result always contains the error's own string form.
pub fn normalize_stack(error: &RaisedError, max_frames: usize) -> String {
    let Some(raw) = error.stack.as_deref() else {
        return String::new();
    };

    let flat = raw.replace(['\r', '\n'], "");
    let marked = FRAME_PREFIX.replace_all(&flat, "@");
    let joined = marked
        .split('@')
        .take(max_frames)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("~");
    let mut stack = QUERY_SUFFIX.replace_all(&joined, "").into_owned();

    let msg = error.to_string();
    if !stack.contains(&msg) {
        stack = format!("{}@{}", msg, stack);
    }
    stack
}
