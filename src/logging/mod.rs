pub mod audit;
pub mod facts;

pub use audit::PolicyFacts;
pub use facts::{AuditSink, FactsEmitter, LogSink, NullSink};
