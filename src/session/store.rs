/// Session-scoped key/value storage on the client.
///
/// Mirrors browser session storage: string values, gone when the session
/// ends. Writes are single operations so an aborted page never leaves a half
/// written timestamp.
pub trait TimestampStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);

    fn remove(&self, key: &str);
}
