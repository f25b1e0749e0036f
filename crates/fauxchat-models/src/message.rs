//! Chat message and phone-chrome types.
//!
//! These are the records the render sink consumes: one [`ChatMessage`] per
//! bubble, plus the [`PhoneStatus`] / [`Contact`] values shown in the capture
//! area above the conversation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::ClockTime;
use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Sender
// ---------------------------------------------------------------------------

/// Which party a chat bubble belongs to.
///
/// `Sent` is the first-person party (right-aligned bubbles with read
/// receipts), `Received` the counterpart.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    /// Authored by the conversation's first-person party.
    Sent,
    /// Authored by the counterpart party.
    Received,
}

impl Sender {
    /// The opposite party.
    pub fn other(self) -> Self {
        match self {
            Self::Sent => Self::Received,
            Self::Received => Self::Sent,
        }
    }
}

// ---------------------------------------------------------------------------
// ChatMessage
// ---------------------------------------------------------------------------

/// One rendered chat bubble.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Stable identity, used by the deletion UI to target a bubble.
    pub id: Uuid,
    /// Bubble text. May be empty when the message is only an attachment.
    pub text: String,
    /// Which side of the conversation the bubble sits on.
    pub sender: Sender,
    /// Zero-padded "HH:MM" display timestamp.
    pub timestamp: String,
    /// Raw attachment bytes, if any. The organizer never attaches one.
    pub image: Option<Vec<u8>>,
}

impl ChatMessage {
    /// Create a message with a fresh id.
    pub fn new(
        text: impl Into<String>,
        sender: Sender,
        timestamp: impl Into<String>,
        image: Option<Vec<u8>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: timestamp.into(),
            image,
        }
    }

    /// Whether the message has neither text nor an attachment.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.image.is_none()
    }
}

// ---------------------------------------------------------------------------
// PhoneStatus
// ---------------------------------------------------------------------------

/// The fabricated phone's status bar: clock and battery charge.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneStatus {
    /// Status-bar clock; also the organizer's start time.
    pub clock: ClockTime,
    /// Battery percentage, 0–100.
    battery: u8,
}

impl PhoneStatus {
    /// Create a status bar value, validating the battery percentage.
    pub fn new(clock: ClockTime, battery: u16) -> Result<Self, ModelError> {
        if battery > 100 {
            return Err(ModelError::InvalidBatteryLevel {
                value: battery,
                reason: "must be between 0 and 100".to_string(),
            });
        }
        Ok(Self {
            clock,
            battery: battery as u8,
        })
    }

    /// Battery percentage, 0–100.
    pub fn battery(&self) -> u8 {
        self.battery
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// The contact shown in the conversation header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Display name.
    pub name: String,
    /// Presence line under the name, e.g. "online".
    pub status: String,
}

impl Contact {
    /// Create a contact header value.
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }

    /// Uppercase initial used for the avatar placeholder, `"?"` when the
    /// name is empty.
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_display_and_from_str() {
        use std::str::FromStr;
        assert_eq!(Sender::Sent.to_string(), "sent");
        assert_eq!(Sender::Received.to_string(), "received");
        assert_eq!(Sender::from_str("sent").unwrap(), Sender::Sent);
        assert_eq!(Sender::from_str("received").unwrap(), Sender::Received);
        assert!(Sender::from_str("both").is_err());
    }

    #[test]
    fn sender_other_flips() {
        assert_eq!(Sender::Sent.other(), Sender::Received);
        assert_eq!(Sender::Received.other(), Sender::Sent);
    }

    #[test]
    fn chat_message_blankness() {
        let blank = ChatMessage::new("   ", Sender::Sent, "12:00", None);
        assert!(blank.is_blank());

        let texty = ChatMessage::new("oi", Sender::Sent, "12:00", None);
        assert!(!texty.is_blank());

        let photo_only = ChatMessage::new("", Sender::Received, "12:00", Some(vec![1, 2, 3]));
        assert!(!photo_only.is_blank());
    }

    #[test]
    fn chat_message_ids_are_unique() {
        let a = ChatMessage::new("a", Sender::Sent, "12:00", None);
        let b = ChatMessage::new("a", Sender::Sent, "12:00", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn phone_status_rejects_overcharge() {
        let clock: ClockTime = "10:00".parse().unwrap();
        assert!(PhoneStatus::new(clock, 101).is_err());
        let status = PhoneStatus::new(clock, 87).unwrap();
        assert_eq!(status.battery(), 87);
    }

    #[test]
    fn contact_initial() {
        assert_eq!(Contact::new("maria", "online").initial(), "M");
        assert_eq!(Contact::new("  ", "online").initial(), "?");
    }

    #[test]
    fn chat_message_serde_roundtrip() {
        let msg = ChatMessage::new("Oi, tudo bem?", Sender::Received, "14:59", None);
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }
}
