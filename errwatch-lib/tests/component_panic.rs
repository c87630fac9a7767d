//! Panic hook and app shell installed together. Own test binary because
//! the panic hook is process-global.

use std::panic;
use std::sync::{Arc, Mutex};

use errwatch_lib::{
    AppShell, ComponentInfo, ErrorCapture, ErrorRecord, ErrorType, FnSink, Window,
    install_panic_hook,
};

fn crash_outside_components() {
    panic!("background sync crashed");
}

#[test]
fn test_component_panic_is_recorded_once() {
    let seen: Arc<Mutex<Vec<(String, ErrorRecord)>>> = Arc::default();
    let captured = seen.clone();
    let capture = ErrorCapture::builder()
        .sink(FnSink::new(move |label: &str, record: &ErrorRecord| {
            captured.lock().unwrap().push((label.to_string(), record.clone()));
        }))
        .location(|| "https://app.example.com/".to_string())
        .build()
        .unwrap();

    let mut app = AppShell::new("dashboard");
    let mut window = Window::new();
    capture.install(&mut app, &mut window);
    install_panic_hook(capture);

    let _: Option<()> = app.run(&ComponentInfo::named("SaveButton"), "component event handler", || {
        panic!("form not ready")
    });

    {
        let records = seen.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "framework error");
        assert_eq!(records[0].1.kind, ErrorType::Framework);
        assert_eq!(records[0].1.name.as_deref(), Some("SaveButton"));
        assert_eq!(records[0].1.message, "form not ready");
    }

    // Outside component work the hook still reports.
    let result = panic::catch_unwind(crash_outside_components);
    let _ = panic::take_hook();
    assert!(result.is_err());

    let records = seen.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].0, "script error");
    assert_eq!(records[1].1.message, "background sync crashed");
}
