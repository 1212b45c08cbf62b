pub type UpdateId = i64;
pub type UserId = i64;
pub type ChatIntId = i64;
pub type MessageId = i32;
pub type MessageThreadId = i32;

/// Unix time in seconds, as sent by the server.
pub type Date = i64;

/// Nested payload the binding deliberately leaves unmodeled.
pub type RawObject = serde_json::Map<String, serde_json::Value>;
