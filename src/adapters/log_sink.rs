//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Outbound events are logged with the radio topic and payload they
//! would be published under; a radio adapter would implement the same
//! trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
///
/// Outbound events carry a running sequence number so gaps show up in
/// the console log.
#[derive(Default)]
pub struct LogEventSink {
    published: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if let Some(topic) = event.topic() {
            self.published = self.published.wrapping_add(1);
            let seq = self.published;
            match (event, event.payload()) {
                (AppEvent::SafetyStop, _) => warn!("PUBLISH #{} | {}", seq, topic),
                (_, Some(payload)) => info!("PUBLISH #{} | {} = {}", seq, topic, payload),
                (_, None) => info!("PUBLISH #{} | {}", seq, topic),
            }
            return;
        }

        match event {
            AppEvent::PhaseChanged { from, to } => info!("PHASE | {:?} -> {:?}", from, to),
            AppEvent::Started(phase) => info!("START | initial_phase={:?}", phase),
            AppEvent::Closed | AppEvent::SafetyStop | AppEvent::Opened { .. } => {}
        }
    }
}
