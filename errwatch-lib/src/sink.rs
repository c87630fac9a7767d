//! Diagnostic sinks receiving finished records.

use std::io::Write;
use std::sync::Mutex;

use crate::record::ErrorRecord;

/// Destination for captured records.
///
/// A sink must never panic or propagate failures back into a handler.
pub trait DiagnosticSink: Send + Sync {
    /// Deliver one record together with a descriptive label.
    fn emit(&self, label: &str, record: &ErrorRecord);
}

/// Writes records through the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, label: &str, record: &ErrorRecord) {
        log::error!("{} {}", label, record.to_json());
    }
}

/// Writes one JSON object per line to any writer.
///
/// The label is stored under a `label` key next to the record fields.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> DiagnosticSink for JsonLinesSink<W> {
    fn emit(&self, label: &str, record: &ErrorRecord) {
        let mut line = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to serialize {} record: {}", label, e);
                return;
            }
        };
        if let Some(obj) = line.as_object_mut() {
            obj.insert("label".to_string(), label.into());
        }

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            log::warn!("Failed to write {} record: {}", label, e);
        }
    }
}

/// Forwards records to a callback.
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: Fn(&str, &ErrorRecord) + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self(handler)
    }
}

impl<F> DiagnosticSink for FnSink<F>
where
    F: Fn(&str, &ErrorRecord) + Send + Sync,
{
    fn emit(&self, label: &str, record: &ErrorRecord) {
        (self.0)(label, record);
    }
}
