use log::Level;
use serde_json::Value;

/// Receives structured facts about policies (see `EffectivePolicy::emit_facts`).
pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Receives human-readable trace lines about rule decisions.
pub trait AuditSink: Send + Sync {
    fn log(&self, level: Level, msg: &str);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FactsEmitter for NullSink {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, _fields: Value) {}
}

impl AuditSink for NullSink {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// Forwards facts and trace lines to the `log` facade under the `equivalency` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl FactsEmitter for LogSink {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        log::info!(target: "equivalency", "{subsystem}.{event} decision={decision} {fields}");
    }
}

impl AuditSink for LogSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "equivalency", level, "{msg}");
    }
}
