//! In-process application handle.

use std::panic::{self, AssertUnwindSafe};

use crate::component::ComponentInstance;
use crate::event::FrameworkError;
use crate::stack::RaisedError;

use super::{ApplicationHandle, ComponentGuard, FrameworkErrorHandler, extract_panic_message};

/// Error name used for panics caught inside component work.
const PANIC_NAME: &str = "Panic";

/// A running application with a framework-level error hook.
///
/// Component work runs through [`AppShell::run`], which routes both
/// returned errors and panics to the installed handler.
pub struct AppShell {
    name: String,
    error_handler: Option<FrameworkErrorHandler>,
    mounted_at: Option<String>,
}

impl AppShell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error_handler: None,
            mounted_at: None,
        }
    }

    pub fn has_error_handler(&self) -> bool {
        self.error_handler.is_some()
    }

    /// Attach the app to a mount point.
    pub fn mount(&mut self, selector: impl Into<String>) {
        let selector = selector.into();
        log::info!("Mounting app '{}' at {}", self.name, selector);
        self.mounted_at = Some(selector);
    }

    pub fn mounted_at(&self) -> Option<&str> {
        self.mounted_at.as_deref()
    }

    /// Run component work for the lifecycle hook described by `info`.
    ///
    /// Returns `None` when the work failed. Failures go to the error
    /// handler; without one, returned errors are logged and panics resume.
    pub fn run<T, F>(&self, component: &dyn ComponentInstance, info: &str, work: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, RaisedError>,
    {
        // Only claim panics when a handler is there to record them.
        let guard = self.error_handler.is_some().then(ComponentGuard::enter);
        let outcome = panic::catch_unwind(AssertUnwindSafe(work));
        drop(guard);

        let error = match outcome {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(error)) => error,
            Err(payload) => {
                if self.error_handler.is_none() {
                    panic::resume_unwind(payload);
                }
                RaisedError::new(PANIC_NAME, extract_panic_message(&*payload))
            }
        };

        match &self.error_handler {
            Some(handler) => handler(FrameworkError::new(error, component, info)),
            None => log::error!(
                "Unhandled error in app '{}' during {}: {}",
                self.name,
                info,
                error
            ),
        }
        None
    }
}

impl ApplicationHandle for AppShell {
    fn set_error_handler(&mut self, handler: FrameworkErrorHandler) {
        self.error_handler = Some(handler);
    }
}
