//! Inbound error events.
//!
//! The host adapts its native error sources into [`CaptureEvent`] and hands
//! them to [`ErrorCapture::handle`](crate::ErrorCapture::handle).

use serde::Serialize;
use serde_json::Value;

use crate::component::ComponentInstance;
use crate::stack::RaisedError;

/// One firing of any of the four error sources.
pub enum CaptureEvent<'a> {
    Framework(FrameworkError<'a>),
    Script(ScriptError),
    Rejection(PromiseRejection),
    Resource(ResourceError),
}

impl CaptureEvent<'_> {
    /// Short name of the source, for logging.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Framework(_) => "framework",
            Self::Script(_) => "script",
            Self::Rejection(_) => "rejection",
            Self::Resource(_) => "resource",
        }
    }
}

/// Error caught by the UI framework inside a component.
pub struct FrameworkError<'a> {
    pub error: RaisedError,
    pub component: &'a dyn ComponentInstance,
    /// Lifecycle hook the error was raised in, as described by the framework.
    pub info: String,
}

impl<'a> FrameworkError<'a> {
    pub fn new(
        error: RaisedError,
        component: &'a dyn ComponentInstance,
        info: impl Into<String>,
    ) -> Self {
        Self {
            error,
            component,
            info: info.into(),
        }
    }
}

/// Uncaught script error, as delivered to the global error hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptError {
    pub message: String,
    pub source: Option<String>,
    pub lineno: Option<u32>,
    pub colno: Option<u32>,
    pub error: Option<RaisedError>,
    /// Column reported by the runtime itself, used when `colno` is missing.
    pub runtime_colno: Option<u32>,
}

impl ScriptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn position(mut self, lineno: u32, colno: u32) -> Self {
        self.lineno = Some(lineno);
        self.colno = Some(colno);
        self
    }

    pub fn lineno(mut self, lineno: u32) -> Self {
        self.lineno = Some(lineno);
        self
    }

    pub fn runtime_colno(mut self, colno: u32) -> Self {
        self.runtime_colno = Some(colno);
        self
    }

    pub fn error(mut self, error: RaisedError) -> Self {
        self.error = Some(error);
        self
    }
}

/// A promise rejected with nobody handling it.
#[derive(Debug, Clone, PartialEq)]
pub struct PromiseRejection {
    /// Rejection reason, exactly as the promise was rejected with.
    pub reason: Value,
}

impl PromiseRejection {
    pub fn new(reason: impl Into<Value>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Document element involved in a resource failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lower-case tag name.
    pub local_name: String,
    pub outer_html: String,
    /// Resolved source the element tried to load.
    pub current_src: Option<String>,
}

impl Element {
    pub fn new(tag: impl AsRef<str>) -> Self {
        let local_name = tag.as_ref().to_ascii_lowercase();
        Self {
            outer_html: format!("<{0}></{0}>", local_name),
            local_name,
            current_src: None,
        }
    }

    pub fn outer_html(mut self, html: impl Into<String>) -> Self {
        self.outer_html = html.into();
        self
    }

    pub fn current_src(mut self, src: impl Into<String>) -> Self {
        self.current_src = Some(src.into());
        self
    }
}

/// A resource failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceError {
    pub target: Option<Element>,
    /// Legacy source element field, only consulted when `target` is missing.
    pub src_element: Option<Element>,
    /// Event type as dispatched, normally `"error"`.
    pub event_type: String,
}

impl ResourceError {
    pub fn new(target: Element) -> Self {
        Self {
            target: Some(target),
            src_element: None,
            event_type: "error".to_string(),
        }
    }

    /// An event that arrived without any element attached.
    pub fn detached() -> Self {
        Self {
            target: None,
            src_element: None,
            event_type: "error".to_string(),
        }
    }

    /// The failing element, falling back to the legacy source element.
    pub fn element(&self) -> Option<&Element> {
        self.target.as_ref().or(self.src_element.as_ref())
    }
}

/// JSON shape of the resource record's `detail` field.
#[derive(Serialize)]
pub(crate) struct ResourceDetail<'a> {
    #[serde(rename = "tagName", skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<&'a str>,
    #[serde(rename = "type")]
    pub event_type: &'a str,
}

/// Event kinds a listener can be registered for on the global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Resource load failures.
    Error,
    /// Unhandled promise rejections.
    UnhandledRejection,
}

/// Payload of a listener-dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Error(ResourceError),
    UnhandledRejection(PromiseRejection),
}

impl WindowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Error(_) => EventKind::Error,
            Self::UnhandledRejection(_) => EventKind::UnhandledRejection,
        }
    }
}
