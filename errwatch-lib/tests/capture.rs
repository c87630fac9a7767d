//! End-to-end tests: install capture into an app and window, fire events
//! through the host dispatch paths and inspect what reaches the sink.

use std::sync::{Arc, Mutex};

use errwatch_lib::{
    AppShell, CaptureConfig, ComponentInfo, DiagnosticSink, Element, ErrorCapture, ErrorRecord,
    ErrorType, EventKind, PromiseRejection, RaisedError, ResourceError, ScriptError,
    SharedLocation, Window, WindowEvent,
};

#[derive(Default)]
struct MemorySink {
    records: Mutex<Vec<(String, ErrorRecord)>>,
}

impl MemorySink {
    fn records(&self) -> Vec<(String, ErrorRecord)> {
        self.records.lock().unwrap().clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, label: &str, record: &ErrorRecord) {
        self.records.lock().unwrap().push((label.to_string(), record.clone()));
    }
}

struct Harness {
    app: AppShell,
    window: Window,
    location: SharedLocation,
    sink: Arc<MemorySink>,
    capture: ErrorCapture,
}

fn harness() -> Harness {
    let sink = Arc::new(MemorySink::default());
    let location = SharedLocation::parse("https://app.example.com/home").unwrap();
    let capture = ErrorCapture::builder()
        .shared_sink(sink.clone())
        .location(location.clone())
        .config(CaptureConfig::default())
        .build()
        .unwrap();

    let mut app = AppShell::new("dashboard");
    let mut window = Window::new();
    capture.install(&mut app, &mut window);
    app.mount("#app");

    Harness {
        app,
        window,
        location,
        sink,
        capture,
    }
}

#[test]
fn test_install_registers_every_source() {
    let h = harness();
    assert!(h.app.has_error_handler());
    assert!(h.window.has_onerror());
    assert_eq!(h.window.listener_count(EventKind::Error), 1);
    assert_eq!(h.window.listener_count(EventKind::UnhandledRejection), 1);
}

#[test]
fn test_component_failure_is_recorded() {
    let h = harness();
    let card = ComponentInfo::named("UserCard").file("src/components/UserCard.vue");

    let rendered: Option<()> = h.app.run(&card, "render function", || {
        Err(RaisedError::new("TypeError", "Cannot read properties of undefined").with_stack(
            "TypeError: Cannot read properties of undefined\n    \
             at render (https://app.example.com/assets/index.js?v=3:120:9)",
        ))
    });
    assert!(rendered.is_none());

    let records = h.sink.records();
    assert_eq!(records.len(), 1);
    let (label, record) = &records[0];
    assert_eq!(label, "framework error");
    assert_eq!(record.kind, ErrorType::Framework);
    assert_eq!(record.name.as_deref(), Some("UserCard"));
    assert_eq!(record.file, "src/components/UserCard.vue");
    assert_eq!(record.detail, "render function");
    assert_eq!(
        record.stack.as_deref(),
        Some(
            "TypeError: Cannot read properties of undefined~\
             render (https://app.example.com/assets/index.js:120:9)"
        )
    );
    assert_eq!(record.url, "https://app.example.com/home");
}

#[test]
fn test_component_panic_is_recorded_from_root() {
    let h = harness();
    let _: Option<()> = h.app.run(&ComponentInfo::root(), "setup function", || {
        panic!("state not initialized")
    });

    let records = h.sink.records();
    let (_, record) = &records[0];
    assert_eq!(record.name.as_deref(), Some("root"));
    assert_eq!(record.file, "root");
    assert_eq!(record.message, "state not initialized");
}

#[test]
fn test_script_error_through_window() {
    let h = harness();
    let proceed = h.window.dispatch_script_error(
        ScriptError::new("TypeError: x")
            .source("https://a/b/app.js")
            .position(10, 5),
    );
    assert!(proceed);

    let records = h.sink.records();
    let (label, record) = &records[0];
    assert_eq!(label, "script error");
    assert_eq!(record.name.as_deref(), Some("app.js"));
    assert_eq!(record.detail, "lineno:10, colno:5");
}

#[test]
fn test_cross_origin_script_error_is_suppressed() {
    let h = harness();
    assert!(!h.window.dispatch_script_error(ScriptError::new("Script error.")));
    assert!(h.sink.records().is_empty());
}

#[test]
fn test_resource_error_through_capture_listener() {
    let h = harness();
    let delivered = h
        .window
        .dispatch_event(&WindowEvent::Error(ResourceError::new(Element::new("IMG"))));
    assert_eq!(delivered, 1);

    let records = h.sink.records();
    let (label, record) = &records[0];
    assert_eq!(label, "resource load error");
    assert_eq!(record.kind, ErrorType::Resource);
    assert!(record.message.ends_with("img is load error"));
    let detail: serde_json::Value = serde_json::from_str(&record.detail).unwrap();
    assert_eq!(detail["tagName"], "img");
}

#[test]
fn test_rejection_through_listener() {
    let h = harness();
    h.window
        .dispatch_event(&WindowEvent::UnhandledRejection(PromiseRejection::new("boom")));

    let records = h.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.kind, ErrorType::Promise);
    assert_eq!(records[0].1.message, "boom");
}

#[test]
fn test_record_url_follows_navigation() {
    let h = harness();
    h.location.navigate("/reports/42").unwrap();
    h.window
        .dispatch_event(&WindowEvent::UnhandledRejection(PromiseRejection::new("late")));

    assert_eq!(h.sink.records()[0].1.url, "https://app.example.com/reports/42");
}

#[test]
fn test_install_twice_duplicates_listeners() {
    let mut h = harness();
    h.capture.install(&mut h.app, &mut h.window);

    assert_eq!(h.window.listener_count(EventKind::Error), 2);
    assert_eq!(h.window.listener_count(EventKind::UnhandledRejection), 2);

    h.window
        .dispatch_event(&WindowEvent::UnhandledRejection(PromiseRejection::new("boom")));
    h.window
        .dispatch_event(&WindowEvent::Error(ResourceError::new(Element::new("script"))));
    h.window.dispatch_script_error(ScriptError::new("x").source("https://a/app.js"));

    let kinds: Vec<ErrorType> = h.sink.records().into_iter().map(|(_, r)| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorType::Promise,
            ErrorType::Promise,
            ErrorType::Resource,
            ErrorType::Resource,
            ErrorType::Script,
        ]
    );
}
