//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured gait events to the
//! ESP-IDF logger (UART / USB-CDC in production).

use log::{debug, info, warn};

use crate::app::events::GaitEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`GaitEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &GaitEvent) {
        match event {
            GaitEvent::Started {
                prescale,
                phase_delay_ms,
            } => {
                info!("START | prescale={} | phase_delay={}ms", prescale, phase_delay_ms);
            }
            GaitEvent::PhaseCompleted(report) if !report.is_clean() => {
                warn!(
                    "GAIT | {:?} | {}/{} commands failed",
                    report.phase, report.failed, report.issued
                );
            }
            GaitEvent::PhaseCompleted(report) => {
                debug!("GAIT | {:?} | {} commands", report.phase, report.issued);
            }
            GaitEvent::CycleCompleted(n) => {
                info!("GAIT | cycle {} complete", n);
            }
        }
    }
}
