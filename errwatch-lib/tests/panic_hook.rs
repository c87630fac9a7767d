//! The panic hook replaces process-global state, so it lives in its own
//! test binary.

use std::panic;
use std::sync::{Arc, Mutex};

use errwatch_lib::{ErrorCapture, ErrorRecord, ErrorType, FnSink, install_panic_hook};

fn crash_worker(id: u32) {
    panic!("worker {} crashed", id);
}

#[test]
fn test_panic_becomes_script_record() {
    let seen: Arc<Mutex<Vec<ErrorRecord>>> = Arc::default();
    let captured = seen.clone();
    let capture = ErrorCapture::builder()
        .sink(FnSink::new(move |_: &str, record: &ErrorRecord| {
            captured.lock().unwrap().push(record.clone());
        }))
        .location(|| "https://app.example.com/".to_string())
        .build()
        .unwrap();

    install_panic_hook(capture);
    let result = panic::catch_unwind(|| crash_worker(7));
    let _ = panic::take_hook();
    assert!(result.is_err());

    let records = seen.lock().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.kind, ErrorType::Script);
    assert_eq!(record.message, "worker 7 crashed");
    assert_eq!(record.name.as_deref(), Some("panic_hook.rs"));
    assert!(record.file.ends_with("panic_hook.rs"));
    assert!(record.detail.starts_with("lineno:"));
    assert!(!record.detail.ends_with("colno:0"));
    assert_eq!(record.url, "https://app.example.com/");
}
