// Memory log adapter - Captures the job log in memory

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::*;

/// Job log adapter that keeps every line for later inspection
#[derive(Default)]
pub struct MemoryLogAdapter {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines in emission order
    pub async fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().await.clone()
    }

    /// Captured messages only, in emission order
    pub async fn messages(&self) -> Vec<String> {
        self.lines
            .lock()
            .await
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    async fn push(&self, level: LogLevel, message: &str) {
        self.lines.lock().await.push((level, message.to_string()));
    }
}

#[async_trait]
impl LogPort for MemoryLogAdapter {
    async fn info(&self, message: &str) {
        self.push(LogLevel::Info, message).await;
    }

    async fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message).await;
    }

    async fn error(&self, message: &str) {
        self.push(LogLevel::Error, message).await;
    }

    async fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message).await;
    }
}
