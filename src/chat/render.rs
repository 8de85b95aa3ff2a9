//! Output rendering for the chat transcript.
//!
//! This module provides the renderer trait and a plain-text implementation.
//! Rendering is presentation only: it traverses turns in append order and
//! never mutates the transcript.

use std::io::{self, Stdout, Write};

use crate::types::{Role, Turn};
use crate::utils::time::clock_label;

/// ANSI escape code for dim text (used for timestamps and badges).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the assistant label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for image references).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - A capture renderer for tests
pub trait Renderer: Send {
    /// Render one turn as it is appended to the transcript.
    fn render_turn(&mut self, turn: &Turn);

    /// Show that a request is pending; submissions are fire-and-wait.
    fn print_busy(&mut self);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Outputs directly to stdout with optional ANSI escape codes for speaker
/// labels and classification badges.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn render_turn(&mut self, turn: &Turn) {
        let label = match turn.role {
            Role::User => self.paint(ANSI_CYAN, "You"),
            Role::Assistant => self.paint(ANSI_GREEN, "Sadhak"),
        };
        let stamp = self.paint(ANSI_DIM, &format!("[{}]", clock_label(turn.timestamp)));
        println!("{label} {stamp}");

        if turn.is_image {
            if let Some(url) = turn.image_url.as_deref() {
                println!("  {}", self.paint(ANSI_YELLOW, &format!("[image] {url}")));
            }
        }
        for line in turn.text.lines() {
            println!("  {line}");
        }

        if let Some(classification) = turn.classification.as_deref() {
            println!(
                "  {}",
                self.paint(ANSI_DIM, &format!("Classification: {classification}"))
            );
        }
        if let Some(sub) = turn.sub_classification.as_deref() {
            println!(
                "  {}",
                self.paint(ANSI_DIM, &format!("Sub-classification: {sub}"))
            );
        }
        if let Some(confidence) = turn.confidence.as_deref() {
            println!(
                "  {}",
                self.paint(ANSI_DIM, &format!("Confidence: {confidence}"))
            );
        }
        println!();
        self.flush();
    }

    fn print_busy(&mut self) {
        println!("{}", self.paint(ANSI_DIM, "Sadhak is typing..."));
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{}", self.paint(ANSI_DIM, info));
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        println!("{}", self.paint(ANSI_RED, error));
        self.flush();
    }
}
