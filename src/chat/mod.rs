//! Chat application module for conversing with the donor-support assistant.
//!
//! This module provides a terminal REPL interface built on top of the sadhak
//! client library. It supports:
//!
//! - Text messages and image references (URL-prefixed input)
//! - Classification badges on assistant replies
//! - Slash commands for session control
//! - An in-memory donor profile editable at any time
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core session state and the submit pipeline
//! - [`commands`]: Slash command parsing and handling
//! - [`render`]: Transcript rendering
//!
//! [`config`]: crate::chat::ChatConfig
//! [`session`]: crate::chat::ChatSession
//! [`commands`]: crate::chat::parse_command
//! [`render`]: crate::chat::Renderer

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{ChatSession, SessionStats, TIMEOUT_NOTICE, TRANSPORT_NOTICE, status_notice};
