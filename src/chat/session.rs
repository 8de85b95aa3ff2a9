//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript
//! and the donor profile, and runs the submit pipeline: validate, classify,
//! append the user turn, dispatch, and append the assistant turn.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use uuid::Uuid;

use crate::chat::config::ChatConfig;
use crate::chat::render::Renderer;
use crate::client::Sadhak;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{DonorProfile, MessageIngest, Transcript, Turn, UserInput};
use crate::utils::time;

/// Notice appended when the request deadline is exceeded.
pub const TIMEOUT_NOTICE: &str = "Request timed out. Please try again.";

/// Notice appended on any transport or decode failure.
///
/// The raw error detail goes to the client logger, never to the transcript.
pub const TRANSPORT_NOTICE: &str =
    "Sorry, something went wrong while contacting the assistant. Please try again.";

/// Notice appended when the service answers with a non-success status.
pub fn status_notice(status: u16) -> String {
    format!("Sorry, I encountered an error (HTTP {status}). Please try again.")
}

/// A chat session that owns the transcript and handles submissions.
///
/// All mutation happens through `&mut self`, so a second submission cannot
/// start while one is in flight; submissions are fire-and-wait.
pub struct ChatSession {
    client: Sadhak,
    config: ChatConfig,
    transcript: Transcript,
    request_count: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The configured mobile number.
    pub mobile_number: String,
    /// The configured donor name.
    pub donor_name: String,
    /// The configured donor code (0 = unknown).
    pub donor_code: u32,
    /// The endpoint submissions go to.
    pub api_url: String,
    /// Total turns in the transcript.
    pub total_turns: usize,
    /// User-authored turns.
    pub user_turns: usize,
    /// Assistant-authored turns (including notices).
    pub assistant_turns: usize,
    /// Total number of API requests made.
    pub total_requests: u64,
}

impl ChatSession {
    /// Creates a new chat session with the given client and configuration.
    pub fn new(client: Sadhak, config: ChatConfig) -> Self {
        Self {
            client,
            config,
            transcript: Transcript::new(),
            request_count: 0,
        }
    }

    /// Submits a message and appends the resulting turns.
    ///
    /// This method:
    /// 1. Rejects blank input and submissions without a mobile number
    ///    (validation errors; nothing is appended, nothing is sent)
    /// 2. Classifies the input as text or an image reference
    /// 3. Appends and renders the user turn (it is never rolled back)
    /// 4. Dispatches the payload and appends the assistant turn, or a
    ///    recovery notice on failure
    ///
    /// # Errors
    ///
    /// Returns an error only for validation failures. Dispatch failures are
    /// absorbed into the transcript as assistant-authored notices and the
    /// call still returns `Ok(())`; they are never fatal to the session.
    pub async fn send(&mut self, raw: &str, renderer: &mut dyn Renderer) -> Result<()> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            observability::SESSION_VALIDATION_REJECTS.click();
            return Err(Error::validation(
                "message is empty",
                Some("message".to_string()),
            ));
        }
        if !self.config.profile.has_mobile_number() {
            observability::SESSION_VALIDATION_REJECTS.click();
            return Err(Error::validation(
                "mobile number is not set; use /mobile first",
                Some("mobile_number".to_string()),
            ));
        }

        observability::SESSION_SENDS.click();
        let input = UserInput::classify(trimmed);
        self.append(Turn::user(&input, time::now()), renderer);

        let payload = MessageIngest::new(
            &self.config.profile,
            &input,
            time::now(),
            Uuid::new_v4().to_string(),
        );

        renderer.print_busy();
        self.request_count += 1;

        let turn = match self.client.send(&payload).await {
            Ok(reply) => Turn::assistant(&reply, time::now()),
            Err(err) => {
                observability::SESSION_RECOVERED_ERRORS.click();
                Turn::notice(recovery_text(&err), time::now())
            }
        };
        self.append(turn, renderer);
        Ok(())
    }

    fn append(&mut self, turn: Turn, renderer: &mut dyn Renderer) {
        observability::SESSION_TURNS_APPENDED.click();
        renderer.render_turn(&turn);
        self.transcript.push(turn);
    }

    /// The transcript, in append order.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Clears the transcript.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// The active donor profile.
    pub fn profile(&self) -> &DonorProfile {
        &self.config.profile
    }

    /// Sets the mobile number.
    pub fn set_mobile_number(&mut self, mobile_number: impl Into<String>) {
        self.config.profile.mobile_number = mobile_number.into();
    }

    /// Sets the donor display name.
    pub fn set_donor_name(&mut self, donor_name: impl Into<String>) {
        self.config.profile.donor_name = donor_name.into();
    }

    /// Sets the donor code; 0 marks the donor as unknown.
    pub fn set_donor_code(&mut self, donor_code: u32) {
        self.config.profile.donor_code = donor_code;
    }

    /// Points the session at a new assistant endpoint.
    ///
    /// The URL must parse; the transcript and profile are untouched.
    pub fn set_api_url(&mut self, api_url: &str) -> Result<()> {
        url::Url::parse(api_url)?;
        self.client = self.client.rebase(api_url.to_string())?;
        self.config.api_url = Some(api_url.to_string());
        Ok(())
    }

    /// The endpoint submissions go to.
    pub fn api_url(&self) -> &str {
        self.client.base_url()
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            mobile_number: self.config.profile.mobile_number.clone(),
            donor_name: self.config.profile.donor_name.clone(),
            donor_code: self.config.profile.donor_code,
            api_url: self.client.base_url().to_string(),
            total_turns: self.transcript.len(),
            user_turns: self.transcript.user_turns(),
            assistant_turns: self.transcript.assistant_turns(),
            total_requests: self.request_count,
        }
    }

    /// Saves the transcript to the specified path.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let transcript = TranscriptFile::new(&self.transcript);
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &transcript).map_err(|err| {
            Error::serialization("failed to serialize transcript", Some(Box::new(err)))
        })
    }

    /// Loads a transcript from disk, replacing the current one.
    pub fn load_transcript_from<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path.as_ref())
            .map_err(|err| Error::io("failed to open transcript file", err))?;
        let reader = BufReader::new(file);
        let transcript: TranscriptFile = from_reader(reader).map_err(|err| {
            Error::serialization("failed to parse transcript", Some(Box::new(err)))
        })?;
        self.transcript = transcript.transcript;
        Ok(())
    }
}

/// Maps a dispatch failure to the transcript notice it recovers into.
fn recovery_text(err: &Error) -> String {
    if err.is_timeout() {
        TIMEOUT_NOTICE.to_string()
    } else if let Some(status) = err.http_status() {
        status_notice(status)
    } else {
        TRANSPORT_NOTICE.to_string()
    }
}

#[derive(Serialize, Deserialize)]
struct TranscriptFile {
    version: u8,
    transcript: Transcript,
}

impl TranscriptFile {
    fn new(transcript: &Transcript) -> Self {
        Self {
            version: 1,
            transcript: transcript.clone(),
        }
    }
}
