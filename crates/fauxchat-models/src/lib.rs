#![deny(missing_docs)]

//! # Fauxchat Models
//!
//! Core data types and the script-to-conversation organizer for the fauxchat
//! screenshot fabricator.
//!
//! ## Organizer pipeline
//!
//! ```text
//! raw pasted script
//! └── script::script_lines      (trim, drop empties)
//!     └── script::Classifier    (marker table / strict alternation)
//!         └── clock::ClockTime  (randomised 1–3 minute steps)
//!             └── organizer::RenderSink::emit
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | `Sender`, `ChatMessage`, `PhoneStatus`, `Contact` |
//! | [`clock`] | Wall-clock `ClockTime` and the `MinuteJitter` increment source |
//! | [`script`] | Line parsing and sender classification |
//! | [`organizer`] | The organizer orchestrator and its `RenderSink` boundary |
//! | [`error`] | `ModelError` |

pub mod clock;
pub mod error;
pub mod message;
pub mod organizer;
pub mod script;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `fauxchat_models::ChatMessage` directly.
pub use clock::*;
pub use error::*;
pub use message::*;
pub use organizer::*;
pub use script::*;
