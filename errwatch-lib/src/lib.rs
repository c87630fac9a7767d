//! Global error capture for UI applications.
//!
//! Installs handlers for framework errors, uncaught script errors,
//! unhandled promise rejections and resource load failures, normalizes each
//! into an [`ErrorRecord`] and forwards it to a [`DiagnosticSink`].
//!
//! ```ignore
//! let capture = ErrorCapture::builder()
//!     .location(SharedLocation::parse("https://app.example.com/")?)
//!     .build()?;
//!
//! let mut app = AppShell::new("dashboard");
//! let mut window = Window::new();
//! capture.install(&mut app, &mut window);
//! app.mount("#app");
//! ```

pub mod capture;
pub mod component;
pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod location;
pub mod record;
pub mod sink;
pub mod stack;

pub use capture::{ErrorCapture, ErrorCaptureBuilder};
pub use component::{ComponentIdentity, ComponentInfo, ComponentInstance};
pub use config::CaptureConfig;
pub use error::CaptureError;
pub use event::{
    CaptureEvent, Element, EventKind, FrameworkError, PromiseRejection, ResourceError, ScriptError,
    WindowEvent,
};
pub use host::{
    AppShell, ApplicationHandle, GlobalScope, ListenerOptions, Window, install_panic_hook,
};
pub use location::{PageLocation, SharedLocation};
pub use record::{ErrorRecord, ErrorType};
pub use sink::{DiagnosticSink, FnSink, JsonLinesSink, LogSink};
pub use stack::{RaisedError, normalize_stack};
