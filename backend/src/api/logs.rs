//! Request log streaming via Server-Sent Events (SSE).
//!
//! Every handled request produces one [`RequestLog`]. Entries are printed
//! to stdout and broadcast to clients connected to `GET /logs`.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Outcome of a request, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ok,
    Rejected,
}

/// A single handled request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLog {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Endpoint path, e.g. `/sum`
    pub endpoint: String,
    pub outcome: Outcome,
    pub status: u16,
    /// Size of the uploaded file, if one was read
    pub upload_bytes: Option<usize>,
    /// Error message for rejected requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RequestLog {
    pub fn ok(endpoint: impl Into<String>, upload_bytes: usize) -> Self {
        Self::new(endpoint, Outcome::Ok, 200, Some(upload_bytes), None)
    }

    pub fn rejected(
        endpoint: impl Into<String>,
        upload_bytes: Option<usize>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(endpoint, Outcome::Rejected, 400, upload_bytes, Some(error.into()))
    }

    fn new(
        endpoint: impl Into<String>,
        outcome: Outcome,
        status: u16,
        upload_bytes: Option<usize>,
        error: Option<String>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            endpoint: endpoint.into(),
            outcome,
            status,
            upload_bytes,
            error,
        }
    }

    /// One-line rendering used for stdout.
    pub fn line(&self) -> String {
        let bytes = self
            .upload_bytes
            .map(|b| format!(" ({} bytes)", b))
            .unwrap_or_default();
        let prefix = match self.outcome {
            Outcome::Ok => "✓",
            Outcome::Rejected => "❌",
        };
        match &self.error {
            Some(err) => format!(
                "{} {} {} {}{}: {}",
                prefix, self.timestamp.format("%H:%M:%S"), self.status, self.endpoint, bytes, err
            ),
            None => format!(
                "{} {} {} {}{}",
                prefix, self.timestamp.format("%H:%M:%S"), self.status, self.endpoint, bytes
            ),
        }
    }
}

/// Global request log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Broadcasts request logs to all connected SSE clients
pub struct LogBroadcaster {
    sender: broadcast::Sender<RequestLog>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Print an entry and send it to all subscribers
    pub fn log(&self, entry: RequestLog) {
        println!("   {}", entry.line());

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RequestLog> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_request(entry: RequestLog) {
    LOG_BROADCASTER.log(entry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_line_contains_error() {
        let entry = RequestLog::rejected("/sum", Some(12), "only integers allowed in matrix");
        let line = entry.line();
        assert!(line.contains("400"));
        assert!(line.contains("/sum"));
        assert!(line.contains("12 bytes"));
        assert!(line.contains("only integers allowed in matrix"));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = RequestLog::ok("/echo", 18);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["endpoint"], "/echo");
        assert_eq!(json["outcome"], "ok");
        assert_eq!(json["status"], 200);
        assert_eq!(json["uploadBytes"], 18);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_subscribers_receive_entries() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(RequestLog::rejected("/echo", None, "no such file"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.outcome, Outcome::Rejected);
        assert_eq!(received.error.as_deref(), Some("no such file"));
    }

    #[test]
    fn test_log_without_subscribers_does_not_fail() {
        LogBroadcaster::new().log(RequestLog::ok("/flatten", 3));
    }
}
