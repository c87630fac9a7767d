//! The normalized error record every handler produces.

use serde::Serialize;

/// Sentinel used for `file` when no origin is known.
pub const NONE: &str = "none";

/// Which error source produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorType {
    /// Error caught by the UI framework inside a component.
    Framework,
    /// Uncaught script error.
    Script,
    /// Resource (image, script, stylesheet) that failed to load.
    Resource,
    /// Failed network request. Declared for sink compatibility, no handler produces it.
    NetworkRequest,
    /// Unhandled promise rejection.
    Promise,
}

impl ErrorType {
    /// Wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::Script => "script",
            Self::Resource => "resource",
            Self::NetworkRequest => "network-request",
            Self::Promise => "promise",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured fault, normalized for the diagnostic sink.
///
/// Records are built inside a handler and handed to the sink exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    #[serde(rename = "type")]
    pub kind: ErrorType,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub detail: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl ErrorRecord {
    /// Creates a record with the given type, message and page url.
    ///
    /// An empty message is replaced so that `message` is never blank.
    pub fn new(kind: ErrorType, message: impl Into<String>, url: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            format!("unknown {} error", kind)
        } else {
            message
        };

        Self {
            kind,
            file: NONE.to_string(),
            name: None,
            message,
            stack: None,
            detail: String::new(),
            url: url.into(),
            time: None,
        }
    }

    /// Sets the origin file. An empty path falls back to the `"none"` sentinel.
    pub fn file(mut self, file: impl Into<String>) -> Self {
        let file = file.into();
        self.file = if file.is_empty() { NONE.to_string() } else { file };
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Serializes the record as a single-line JSON object.
    pub fn to_json(&self) -> String {
        // Every field is a plain string or unit enum, so this cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_gets_placeholder() {
        let record = ErrorRecord::new(ErrorType::Script, "  ", "https://a/");
        assert_eq!(record.message, "unknown script error");
    }

    #[test]
    fn test_empty_file_falls_back_to_sentinel() {
        let record = ErrorRecord::new(ErrorType::Resource, "x", "https://a/").file("");
        assert_eq!(record.file, NONE);
    }

    #[test]
    fn test_json_field_names() {
        let record = ErrorRecord::new(ErrorType::NetworkRequest, "timeout", "https://a/")
            .name("fetch")
            .detail("GET /api");
        let value: serde_json::Value = serde_json::from_str(&record.to_json()).unwrap();

        assert_eq!(value["type"], "network-request");
        assert_eq!(value["file"], "none");
        assert_eq!(value["name"], "fetch");
        assert_eq!(value["detail"], "GET /api");
        assert!(value.get("stack").is_none());
        assert!(value.get("time").is_none());
    }
}
