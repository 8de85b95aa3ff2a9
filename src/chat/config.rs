//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use arrrg_derive::CommandLine;

use crate::types::DonorProfile;

/// Command-line arguments for the sadhak-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Mobile number with country code.
    #[arrrg(optional, "Mobile number with country code, e.g. +919876543210", "MOBILE")]
    pub mobile: Option<String>,

    /// Donor display name.
    #[arrrg(optional, "Donor display name", "NAME")]
    pub name: Option<String>,

    /// Donor code (0 = unknown).
    #[arrrg(optional, "Donor code; use 0 if you don't have one", "CODE")]
    pub code: Option<u32>,

    /// Assistant endpoint URL.
    #[arrrg(optional, "Assistant endpoint URL (default: hosted service)", "URL")]
    pub url: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults. It lives only in
/// memory for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// The donor identity attached to every outbound message.
    pub profile: DonorProfile,

    /// The assistant endpoint; `None` uses the client's built-in default.
    pub api_url: Option<String>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Profile: empty (mobile number must be set before sending)
    /// - Endpoint: the client's built-in default
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            profile: DonorProfile::new(),
            api_url: None,
            use_color: true,
        }
    }

    /// Sets the donor profile.
    pub fn with_profile(mut self, profile: DonorProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the assistant endpoint URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let profile = DonorProfile::new()
            .with_mobile_number(args.mobile.unwrap_or_default())
            .with_donor_name(args.name.unwrap_or_default())
            .with_donor_code(args.code.unwrap_or(0));

        ChatConfig {
            profile,
            api_url: args.url,
            use_color: !args.no_color,
        }
    }
}
