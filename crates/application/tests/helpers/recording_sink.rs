use ferrous_recon_application::ports::StatusSink;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Status,
    Good,
    Warning,
    Error,
}

/// Keeps every message it is given, in order.
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::default())
    }

    fn push(&self, level: Level, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.at(Level::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::Warning)
    }
}

impl StatusSink for RecordingSink {
    fn status(&self, message: &str) {
        self.push(Level::Status, message);
    }

    fn good(&self, message: &str) {
        self.push(Level::Good, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
