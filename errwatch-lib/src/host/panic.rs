//! Panics as uncaught script errors.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::Cell;
use std::panic;

use crate::capture::ErrorCapture;
use crate::event::ScriptError;
use crate::stack::RaisedError;

thread_local! {
    /// Nesting depth of component work running on this thread.
    static COMPONENT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Marks the current thread as running component work until dropped.
///
/// Panics raised meanwhile belong to the framework error handler and are
/// not reported as uncaught script errors.
pub(crate) struct ComponentGuard;

impl ComponentGuard {
    pub(crate) fn enter() -> Self {
        COMPONENT_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self
    }
}

impl Drop for ComponentGuard {
    fn drop(&mut self) {
        COMPONENT_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn in_component_work() -> bool {
    COMPONENT_DEPTH.with(|depth| depth.get() > 0)
}

/// Extract a human-readable message from a panic payload.
///
/// Panics carry either `&str` or `String` payloads; anything else gets a
/// generic message.
pub fn extract_panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Route every panic in the process through the script error handler.
///
/// The panic location becomes the source file, line and column. The
/// previously installed hook still runs unless the handler declines.
/// Panics inside [`AppShell::run`](super::AppShell::run) are left to the
/// framework error handler.
pub fn install_panic_hook(capture: ErrorCapture) {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if in_component_work() {
            original_hook(info);
            return;
        }

        let message = extract_panic_message(info.payload());

        let mut error = RaisedError::new("Panic", message.as_str());
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            error = error.with_stack(backtrace.to_string());
        }

        let mut event = ScriptError::new(message).error(error);
        if let Some(location) = info.location() {
            event = event
                .source(location.file())
                .position(location.line(), location.column());
        }

        if capture.on_script_error(event) {
            original_hook(info);
        }
    }));
    log::debug!("Panic hook installed");
}
