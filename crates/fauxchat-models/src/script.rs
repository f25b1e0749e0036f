//! Script line parsing and sender classification.
//!
//! A pasted script is a free-form blob of dialogue, one utterance per line.
//! Lines may carry an explicit speaker marker (`Eu: …`, `Ele: …`); lines
//! without one alternate strictly between the two parties.

use crate::message::Sender;

// ---------------------------------------------------------------------------
// Line parser
// ---------------------------------------------------------------------------

/// Split a raw script into trimmed, non-empty lines.
///
/// Lazy and finite; blank-after-trim segments are dropped. Empty input simply
/// yields nothing — rejecting a wholly empty script is the organizer's job.
///
/// # Examples
///
/// ```
/// use fauxchat_models::script_lines;
///
/// let lines: Vec<_> = script_lines("  oi \n\n tudo bem \n").collect();
/// assert_eq!(lines, vec!["oi", "tudo bem"]);
/// ```
pub fn script_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

// ---------------------------------------------------------------------------
// Marker table
// ---------------------------------------------------------------------------

/// Speaker-prefix tokens, checked in priority order: first-person markers
/// win over counterpart markers. Each token matches case-insensitively and
/// must be followed by a colon.
const MARKERS: &[(&[&str], Sender)] = &[
    (&["eu", "me"], Sender::Sent),
    (&["ele", "ela", "vc"], Sender::Received),
];

/// If `line` starts with a recognised `marker:` prefix, return the marked
/// sender and the text with the marker, colon, and following whitespace
/// stripped.
///
/// Only the leading marker is consumed: a stacked prefix such as
/// `"Eu: vc: oi"` classifies as the outer marker and keeps `"vc: oi"` as
/// message text.
fn match_marker(line: &str) -> Option<(Sender, &str)> {
    for (tokens, sender) in MARKERS {
        for token in *tokens {
            let Some((head, tail)) = line.split_at_checked(token.len()) else {
                continue;
            };
            if head.eq_ignore_ascii_case(token) {
                if let Some(rest) = tail.strip_prefix(':') {
                    return Some((*sender, rest.trim_start()));
                }
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Tracks whose turn is implied when a line has no explicit marker.
///
/// The stored value is always the sender most recently assigned. It starts
/// at [`Sender::Sent`] so that the first unmarked line of a run classifies
/// as [`Sender::Received`].
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    last_sender: Sender,
}

impl Classifier {
    /// Fresh classifier for a new organizer run.
    pub fn new() -> Self {
        Self {
            last_sender: Sender::Sent,
        }
    }

    /// Classify one trimmed line.
    ///
    /// Explicit markers take absolute priority and pin the alternation flag
    /// to the marked sender; unmarked lines flip it. Either way the flag ends
    /// up equal to the sender just assigned.
    pub fn classify<'a>(&mut self, line: &'a str) -> (Sender, &'a str) {
        let (sender, text) = match match_marker(line) {
            Some((sender, stripped)) => (sender, stripped),
            None => (self.last_sender.other(), line),
        };
        self.last_sender = sender;
        (sender, text)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
