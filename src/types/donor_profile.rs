/// Identity details attached to every outbound message.
///
/// The profile is session-scoped: it lives in memory, is mutated only by an
/// explicit user action, and is never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonorProfile {
    /// Mobile number with country code, used as both sender and destination.
    pub mobile_number: String,

    /// Display name of the donor.
    pub donor_name: String,

    /// Donor code; 0 means unknown/unset.
    pub donor_code: u32,
}

impl DonorProfile {
    /// Creates an empty profile (no mobile number, no name, code 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mobile number.
    pub fn with_mobile_number(mut self, mobile_number: impl Into<String>) -> Self {
        self.mobile_number = mobile_number.into();
        self
    }

    /// Sets the donor display name.
    pub fn with_donor_name(mut self, donor_name: impl Into<String>) -> Self {
        self.donor_name = donor_name.into();
        self
    }

    /// Sets the donor code.
    pub fn with_donor_code(mut self, donor_code: u32) -> Self {
        self.donor_code = donor_code;
        self
    }

    /// Returns true if a non-blank mobile number is configured.
    ///
    /// Submissions are blocked until this holds.
    pub fn has_mobile_number(&self) -> bool {
        !self.mobile_number.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile() {
        let profile = DonorProfile::new();
        assert_eq!(profile.mobile_number, "");
        assert_eq!(profile.donor_name, "");
        assert_eq!(profile.donor_code, 0);
        assert!(!profile.has_mobile_number());
    }

    #[test]
    fn builder() {
        let profile = DonorProfile::new()
            .with_mobile_number("+919876543210")
            .with_donor_name("Asha")
            .with_donor_code(42);
        assert_eq!(profile.mobile_number, "+919876543210");
        assert_eq!(profile.donor_name, "Asha");
        assert_eq!(profile.donor_code, 42);
        assert!(profile.has_mobile_number());
    }

    #[test]
    fn blank_mobile_number_does_not_count() {
        let profile = DonorProfile::new().with_mobile_number("   ");
        assert!(!profile.has_mobile_number());
    }
}
