use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{Direction, DonorProfile, MessageKind, UserInput};

/// Tag identifying this client to the ingestion service.
pub const INTEGRATION_TAG: &str = "sadhak-chat";

/// The outbound message payload.
///
/// The serialized field names mirror the CRM ingestion schema and are part of
/// the wire contract; they must not change. `mobile_no` doubles as the
/// destination (`WA_Msg_To`), and exactly one of `msg_text` / `url` is
/// non-empty depending on the message kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageIngest {
    /// Row identifier assigned by the service; always 0 on submission.
    #[serde(rename = "WA_Auto_Id")]
    pub auto_id: u64,

    /// Direction marker; submissions are always inbound.
    #[serde(rename = "WA_In_Out")]
    pub in_out: Direction,

    /// Account identifier; always 0 on submission.
    #[serde(rename = "Account_Code")]
    pub account_code: u32,

    /// When the message was received, RFC 3339.
    #[serde(rename = "WA_Received_At", with = "crate::utils::time")]
    pub received_at: OffsetDateTime,

    /// Donor code; 0 means unknown.
    #[serde(rename = "NGCode")]
    pub donor_code: u32,

    /// Donor display name.
    #[serde(rename = "Wa_Name")]
    pub wa_name: String,

    /// Sender mobile number.
    #[serde(rename = "MobileNo")]
    pub mobile_no: String,

    /// Destination mobile number; same as the sender for this client.
    #[serde(rename = "WA_Msg_To")]
    pub msg_to: String,

    /// Message body; empty when the message is an image reference.
    #[serde(rename = "WA_Msg_Text")]
    pub msg_text: String,

    /// Message kind.
    #[serde(rename = "WA_Msg_Type")]
    pub msg_type: MessageKind,

    /// Which client produced the message.
    #[serde(rename = "Integration_Type")]
    pub integration_type: String,

    /// Unique identifier for this message.
    #[serde(rename = "WA_Message_Id")]
    pub message_id: String,

    /// Image URL; empty when the message is plain text.
    #[serde(rename = "WA_Url")]
    pub url: String,

    /// Submission status marker.
    #[serde(rename = "Status")]
    pub status: String,

    /// Donor display name, repeated per the upstream schema.
    #[serde(rename = "Donor_Name")]
    pub donor_name: String,
}

impl MessageIngest {
    /// Builds the payload for a classified input.
    ///
    /// Pure: the receipt timestamp and message id are supplied by the caller,
    /// and no I/O happens here.
    pub fn new(
        profile: &DonorProfile,
        input: &UserInput,
        received_at: OffsetDateTime,
        message_id: String,
    ) -> Self {
        Self {
            auto_id: 0,
            in_out: Direction::In,
            account_code: 0,
            received_at,
            donor_code: profile.donor_code,
            wa_name: profile.donor_name.clone(),
            mobile_no: profile.mobile_number.clone(),
            msg_to: profile.mobile_number.clone(),
            msg_text: input.message_text().to_string(),
            msg_type: input.kind(),
            integration_type: INTEGRATION_TAG.to_string(),
            message_id,
            url: input.image_url().unwrap_or("").to_string(),
            status: "success".to_string(),
            donor_name: profile.donor_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};
    use time::macros::datetime;

    fn profile() -> DonorProfile {
        DonorProfile::new()
            .with_mobile_number("+919876543210")
            .with_donor_name("Asha")
            .with_donor_code(42)
    }

    #[test]
    fn text_payload_serialization() {
        let input = UserInput::classify("When does the camp open?");
        let payload = MessageIngest::new(
            &profile(),
            &input,
            datetime!(2024-01-15 10:30:00 UTC),
            "msg-0001".to_string(),
        );
        let json = to_value(&payload).unwrap();

        assert_eq!(
            json,
            json!({
                "WA_Auto_Id": 0,
                "WA_In_Out": "In",
                "Account_Code": 0,
                "WA_Received_At": "2024-01-15T10:30:00Z",
                "NGCode": 42,
                "Wa_Name": "Asha",
                "MobileNo": "+919876543210",
                "WA_Msg_To": "+919876543210",
                "WA_Msg_Text": "When does the camp open?",
                "WA_Msg_Type": "text",
                "Integration_Type": "sadhak-chat",
                "WA_Message_Id": "msg-0001",
                "WA_Url": "",
                "Status": "success",
                "Donor_Name": "Asha"
            })
        );
    }

    #[test]
    fn image_payload_serialization() {
        let input = UserInput::classify("https://example.com/receipt.png");
        let payload = MessageIngest::new(
            &profile(),
            &input,
            datetime!(2024-01-15 10:30:00 UTC),
            "msg-0002".to_string(),
        );
        let json = to_value(&payload).unwrap();

        assert_eq!(json["WA_Msg_Type"], json!("image"));
        assert_eq!(json["WA_Msg_Text"], json!(""));
        assert_eq!(json["WA_Url"], json!("https://example.com/receipt.png"));
    }

    #[test]
    fn text_and_image_fields_are_exclusive() {
        let text = MessageIngest::new(
            &profile(),
            &UserInput::classify("hello"),
            datetime!(2024-01-15 10:30:00 UTC),
            "a".to_string(),
        );
        assert_eq!(text.msg_text, "hello");
        assert_eq!(text.url, "");

        let image = MessageIngest::new(
            &profile(),
            &UserInput::classify("http://x/y.jpg"),
            datetime!(2024-01-15 10:30:00 UTC),
            "b".to_string(),
        );
        assert_eq!(image.msg_text, "");
        assert_eq!(image.url, "http://x/y.jpg");
    }

    #[test]
    fn destination_repeats_sender() {
        let payload = MessageIngest::new(
            &profile(),
            &UserInput::classify("hi"),
            datetime!(2024-01-15 10:30:00 UTC),
            "c".to_string(),
        );
        assert_eq!(payload.mobile_no, payload.msg_to);
        assert_eq!(payload.wa_name, payload.donor_name);
    }

    #[test]
    fn payload_round_trip() {
        let payload = MessageIngest::new(
            &profile(),
            &UserInput::classify("hello"),
            datetime!(2024-01-15 10:30:00 UTC),
            "d".to_string(),
        );
        let json = to_value(&payload).unwrap();
        let back: MessageIngest = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }
}
