//! In-process global scope.

use crate::event::{EventKind, ScriptError, WindowEvent};

use super::{EventListener, GlobalScope, ListenerOptions, ScriptErrorHandler};

struct Registration {
    kind: EventKind,
    listener: EventListener,
    options: ListenerOptions,
}

/// Global scope holding the error hook and event listeners.
///
/// Registrations are made once at start-up and only read afterwards.
#[derive(Default)]
pub struct Window {
    onerror: Option<ScriptErrorHandler>,
    listeners: Vec<Registration>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|r| r.kind == kind).count()
    }

    pub fn has_onerror(&self) -> bool {
        self.onerror.is_some()
    }

    /// Deliver an uncaught script error to the error hook.
    ///
    /// Returns whether default handling proceeds. Without a hook it always does.
    pub fn dispatch_script_error(&self, event: ScriptError) -> bool {
        match &self.onerror {
            Some(handler) => handler(event),
            None => true,
        }
    }

    /// Deliver an event to matching listeners and return how many ran.
    ///
    /// Resource failures are raised on the failing element and do not
    /// bubble, so only capture-phase listeners see them. Events raised
    /// on the window itself reach every listener, capture-phase first.
    pub fn dispatch_event(&self, event: &WindowEvent) -> usize {
        let kind = event.kind();
        let at_target = match event {
            WindowEvent::Error(resource) => resource.element().is_none(),
            WindowEvent::UnhandledRejection(_) => true,
        };

        let capturing = self
            .listeners
            .iter()
            .filter(|r| r.kind == kind && r.options.capture);
        let bubbling = self
            .listeners
            .iter()
            .filter(|r| r.kind == kind && !r.options.capture && at_target);

        let mut delivered = 0;
        for registration in capturing.chain(bubbling) {
            (registration.listener)(event);
            delivered += 1;
        }
        log::trace!("Dispatched {:?} to {} listener(s)", kind, delivered);
        delivered
    }
}

impl GlobalScope for Window {
    fn set_onerror(&mut self, handler: ScriptErrorHandler) {
        if self.onerror.is_some() {
            log::debug!("Replacing existing onerror handler");
        }
        self.onerror = Some(handler);
    }

    fn add_event_listener(
        &mut self,
        kind: EventKind,
        listener: EventListener,
        options: ListenerOptions,
    ) {
        self.listeners.push(Registration {
            kind,
            listener,
            options,
        });
    }
}
