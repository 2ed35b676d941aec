//! Telemetry seam for reporting render faults outward.
//!
//! A fault is reported to the collaborator and recovered locally; it is never
//! re-thrown past the section boundary.

use crate::error::Error;
use crate::model::SectionKind;

/// External collaborator notified when a section fails to render.
pub trait Telemetry: Send + Sync {
    /// Called once per section fault, after the fallback has been installed.
    ///
    /// The fault is always [`Error::SectionFault`], carrying the section id
    /// and the underlying failure reason.
    fn render_fault(&self, section_id: &str, kind: SectionKind, fault: &Error);
}

/// Default telemetry that forwards faults to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogTelemetry;

impl LogTelemetry {
    /// Create a new log-backed telemetry sink.
    pub fn new() -> Self {
        Self
    }
}

impl Telemetry for LogTelemetry {
    fn render_fault(&self, section_id: &str, kind: SectionKind, fault: &Error) {
        log::error!("render fault in {} ({}): {}", section_id, kind.label(), fault);
    }
}

/// Telemetry that silently drops faults. Useful for tests and batch export.
#[derive(Debug, Clone, Default)]
pub struct NullTelemetry;

impl Telemetry for NullTelemetry {
    fn render_fault(&self, _section_id: &str, _kind: SectionKind, _fault: &Error) {}
}
