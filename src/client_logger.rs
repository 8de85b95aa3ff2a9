//! Logging trait for client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture and log all traffic passing through the [`Sadhak`] client. Dispatch
//! failures are reported here with their full detail; the transcript only ever
//! receives a generic notice, so a logger is the place to recover the raw
//! error text.
//!
//! [`Sadhak`]: crate::Sadhak

use crate::error::Error;
use crate::types::{AssistantReply, MessageIngest};

/// A trait for logging client operations.
///
/// Implement this trait to capture and record all API interactions.
///
/// # Example
///
/// ```rust,ignore
/// use sadhak::{AssistantReply, ClientLogger, Error, MessageIngest};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, payload: &MessageIngest) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Request: {}", serde_json::to_string(payload).unwrap()).unwrap();
///     }
///
///     fn log_reply(&self, reply: &AssistantReply) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Reply: {}", serde_json::to_string(reply).unwrap()).unwrap();
///     }
///
///     fn log_error(&self, error: &Error) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Error: {}", error).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log an outbound payload just before dispatch.
    fn log_request(&self, payload: &MessageIngest);

    /// Log a successfully parsed reply.
    fn log_reply(&self, reply: &AssistantReply);

    /// Log a dispatch failure with its full detail.
    fn log_error(&self, error: &Error);
}
