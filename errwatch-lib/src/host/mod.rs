//! Host-side seams the capture service installs itself into.
//!
//! [`ApplicationHandle`] stands for the running UI application and
//! [`GlobalScope`] for the process-wide error hooks. [`AppShell`] and
//! [`Window`] are in-process implementations of both.

mod app;
mod panic;
mod window;

pub use app::AppShell;
pub use panic::{extract_panic_message, install_panic_hook};
pub use window::Window;

use panic::ComponentGuard;

use crate::event::{EventKind, FrameworkError, ScriptError, WindowEvent};

/// Handler the UI framework calls for errors caught in components.
pub type FrameworkErrorHandler = Box<dyn Fn(FrameworkError<'_>) + Send + Sync>;

/// Global uncaught-error hook. Returns whether default handling proceeds.
pub type ScriptErrorHandler = Box<dyn Fn(ScriptError) -> bool + Send + Sync>;

/// Listener registered on the global scope.
pub type EventListener = Box<dyn Fn(&WindowEvent) + Send + Sync>;

/// Options for [`GlobalScope::add_event_listener`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Observe the event during the capture phase.
    pub capture: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true }
    }

    pub fn bubble() -> Self {
        Self { capture: false }
    }
}

/// The running UI application.
pub trait ApplicationHandle {
    /// Replace the framework-level error handler.
    fn set_error_handler(&mut self, handler: FrameworkErrorHandler);
}

/// Process-wide error hooks.
pub trait GlobalScope {
    /// Replace the uncaught script error hook.
    fn set_onerror(&mut self, handler: ScriptErrorHandler);

    /// Append a listener. Listeners are never deduplicated.
    fn add_event_listener(
        &mut self,
        kind: EventKind,
        listener: EventListener,
        options: ListenerOptions,
    );
}
