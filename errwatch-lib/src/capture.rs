//! Error capture: turns each error source into an [`ErrorRecord`] and
//! forwards it to the diagnostic sink.

use std::sync::Arc;

use serde_json::Value;

use crate::component::ComponentIdentity;
use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::event::{
    CaptureEvent, EventKind, FrameworkError, PromiseRejection, ResourceDetail, ResourceError,
    ScriptError, WindowEvent,
};
use crate::host::{ApplicationHandle, GlobalScope, ListenerOptions};
use crate::location::PageLocation;
use crate::record::{ErrorRecord, ErrorType};
use crate::sink::{DiagnosticSink, LogSink};
use crate::stack::normalize_stack;

/// Sink label for framework errors.
pub const FRAMEWORK_LABEL: &str = "framework error";
/// Sink label for script errors.
pub const SCRIPT_LABEL: &str = "script error";
/// Sink label for unhandled promise rejections.
pub const PROMISE_LABEL: &str = "promise error";
/// Sink label for resource load failures.
pub const RESOURCE_LABEL: &str = "resource load error";

const SCRIPT_NAME: &str = "script";
const PROMISE_NAME: &str = "Promise Error!";
const PROMISE_PLACEHOLDER: &str = "promise error!";
const RESOURCE_NAME: &str = "Resource Error!";
const RESOURCE_STACK: &str = "resource is not found";
const UNKNOWN_TAG: &str = "unknown";

/// Error capture service.
///
/// Cheap to clone; every installed handler holds its own clone. Handlers
/// are stateless and never fail.
#[derive(Clone)]
pub struct ErrorCapture {
    sink: Arc<dyn DiagnosticSink>,
    location: Arc<dyn PageLocation>,
    config: Arc<CaptureConfig>,
}

impl ErrorCapture {
    pub fn builder() -> ErrorCaptureBuilder {
        ErrorCaptureBuilder::default()
    }

    /// Attach all four handlers.
    ///
    /// The framework and script hooks are single slots and get overwritten.
    /// The rejection and resource listeners are appended, so installing
    /// twice registers them twice and every such event is recorded twice.
    pub fn install<A, G>(&self, app: &mut A, scope: &mut G)
    where
        A: ApplicationHandle + ?Sized,
        G: GlobalScope + ?Sized,
    {
        let capture = self.clone();
        app.set_error_handler(Box::new(move |event: FrameworkError<'_>| {
            capture.on_framework_error(event)
        }));

        let capture = self.clone();
        scope.set_onerror(Box::new(move |event: ScriptError| capture.on_script_error(event)));

        let capture = self.clone();
        scope.add_event_listener(
            EventKind::UnhandledRejection,
            Box::new(move |event: &WindowEvent| {
                if let WindowEvent::UnhandledRejection(rejection) = event {
                    capture.on_rejection(rejection);
                }
            }),
            ListenerOptions::capture(),
        );

        let capture = self.clone();
        scope.add_event_listener(
            EventKind::Error,
            Box::new(move |event: &WindowEvent| {
                if let WindowEvent::Error(resource) = event {
                    capture.on_resource_error(resource);
                }
            }),
            ListenerOptions::capture(),
        );

        log::debug!("Error capture installed");
    }

    /// Single inbound port for all sources.
    ///
    /// Returns whether the host should continue its default handling. Only
    /// the script source can answer `false`.
    pub fn handle(&self, event: CaptureEvent<'_>) -> bool {
        log::trace!("Capturing {} event", event.source_name());
        match event {
            CaptureEvent::Framework(e) => {
                self.on_framework_error(e);
                true
            }
            CaptureEvent::Script(e) => self.on_script_error(e),
            CaptureEvent::Rejection(e) => {
                self.on_rejection(&e);
                true
            }
            CaptureEvent::Resource(e) => {
                self.on_resource_error(&e);
                true
            }
        }
    }

    /// Record an error the UI framework caught inside a component.
    pub fn on_framework_error(&self, event: FrameworkError<'_>) {
        let identity = ComponentIdentity::resolve(event.component);
        let message = if event.error.message.is_empty() {
            event.error.to_string()
        } else {
            event.error.message.clone()
        };

        let mut record = ErrorRecord::new(ErrorType::Framework, message, self.location.href())
            .file(identity.path.unwrap_or_default())
            .stack(normalize_stack(&event.error, self.config.max_frames))
            .detail(event.info);
        record.name = identity.name;

        self.forward(FRAMEWORK_LABEL, record);
    }

    /// Record an uncaught script error.
    ///
    /// Returns `false` without recording for the cross-origin placeholder
    /// message when no source file is known; `true` otherwise.
    pub fn on_script_error(&self, event: ScriptError) -> bool {
        let source = event.source.as_deref().filter(|s| !s.is_empty());
        if source.is_none() && event.message == self.config.cross_origin_message {
            log::debug!("Ignoring cross-origin script error");
            return false;
        }

        let name = source
            .map(|s| s.rsplit('/').next().unwrap_or(s))
            .unwrap_or(SCRIPT_NAME);
        let lineno = event.lineno.unwrap_or(0);
        let colno = event
            .colno
            .filter(|&c| c != 0)
            .or(event.runtime_colno)
            .unwrap_or(0);
        let stack = event
            .error
            .as_ref()
            .and_then(|e| e.stack.clone())
            .unwrap_or_default();

        let href = self.location.href();
        let record = ErrorRecord::new(ErrorType::Script, event.message.as_str(), href)
            .name(name)
            .file(source.unwrap_or_default())
            .detail(format!("lineno:{}, colno:{}", lineno, colno))
            .stack(stack);

        self.forward(SCRIPT_LABEL, record);
        true
    }

    /// Record an unhandled promise rejection.
    pub fn on_rejection(&self, event: &PromiseRejection) {
        let message = match &event.reason {
            Value::String(reason) => reason.clone(),
            other => other.to_string(),
        };

        let record = ErrorRecord::new(ErrorType::Promise, message, self.location.href())
            .name(PROMISE_NAME)
            .detail(PROMISE_PLACEHOLDER)
            .stack(PROMISE_PLACEHOLDER);

        self.forward(PROMISE_LABEL, record);
    }

    /// Record a resource that failed to load.
    pub fn on_resource_error(&self, event: &ResourceError) {
        let element = event.element();
        let tag = element
            .map(|e| e.local_name.to_ascii_lowercase())
            .filter(|t| !t.is_empty());

        let detail = ResourceDetail {
            tag_name: tag.as_deref(),
            html: element.map(|e| e.outer_html.as_str()),
            event_type: &event.event_type,
        };
        let detail = serde_json::to_string(&detail).unwrap_or_else(|e| {
            log::warn!("Failed to encode resource detail: {}", e);
            String::new()
        });

        let record = ErrorRecord::new(
            ErrorType::Resource,
            format!("{} is load error", tag.as_deref().unwrap_or(UNKNOWN_TAG)),
            self.location.href(),
        )
        .name(RESOURCE_NAME)
        .file(element.and_then(|e| e.current_src.clone()).unwrap_or_default())
        .detail(detail)
        .stack(RESOURCE_STACK);

        self.forward(RESOURCE_LABEL, record);
    }

    fn forward(&self, label: &str, mut record: ErrorRecord) {
        if self.config.stamp_time {
            record.time = Some(chrono::Utc::now().to_rfc3339());
        }
        self.sink.emit(label, &record);
    }
}

/// Builder for [`ErrorCapture`].
#[derive(Default)]
pub struct ErrorCaptureBuilder {
    sink: Option<Arc<dyn DiagnosticSink>>,
    location: Option<Arc<dyn PageLocation>>,
    config: CaptureConfig,
}

impl ErrorCaptureBuilder {
    /// Set the sink. Defaults to [`LogSink`].
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Share an existing sink.
    pub fn shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the page location provider. Defaults to `about:blank`.
    pub fn location(mut self, location: impl PageLocation + 'static) -> Self {
        self.location = Some(Arc::new(location));
        self
    }

    pub fn config(mut self, config: CaptureConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the config and build the service.
    pub fn build(self) -> Result<ErrorCapture, CaptureError> {
        self.config.validate()?;
        Ok(ErrorCapture {
            sink: self
                .sink
                .unwrap_or_else(|| Arc::new(LogSink) as Arc<dyn DiagnosticSink>),
            location: self
                .location
                .unwrap_or_else(|| Arc::new(|| "about:blank".to_string()) as Arc<dyn PageLocation>),
            config: Arc::new(self.config),
        })
    }
}
