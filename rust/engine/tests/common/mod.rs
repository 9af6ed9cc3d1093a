#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use blackjack_engine::cards::{Card, Rank, Suit};
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

pub fn c(s: Suit, r: Rank) -> Card {
    Card { suit: s, rank: r }
}

/// Log event captured while a test closure ran.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl<S: tracing::Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.entries.lock().unwrap().push(LogEntry {
            level: *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }
}

/// Runs `f` with a subscriber that records every event, returning the
/// closure's result and the captured entries.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<LogEntry>) {
    let layer = CaptureLayer::default();
    let entries = layer.entries.clone();
    let registry = Registry::default().with(layer);
    let out = tracing::subscriber::with_default(registry, f);
    let logged = entries.lock().unwrap().clone();
    (out, logged)
}

pub fn warnings_containing(entries: &[LogEntry], needle: &str) -> usize {
    entries
        .iter()
        .filter(|e| e.level == Level::WARN && e.message.contains(needle))
        .count()
}
