//! par-connector-protocol: wire types for the chat-panel connector.
//!
//! The connector sits between a chat-panel UI and a host process. This crate
//! holds everything that crosses that boundary as serialized JSON, so the
//! router crate and any host-side tooling agree on one definition.
//!
//! - [`category`] - Tab categories and their `tabType` wire names
//! - [`payloads`] - Payload structs carried by UI events (follow-ups, code blocks, feedback)
//! - [`outbound`] - [`HostCommand`], the `command`-tagged messages sent to the host
//! - [`inbound`] - [`HostMessage`], the `sender`-tagged payloads received from the host
//! - [`error`] - [`ProtocolError`] for malformed inbound payloads

pub mod category;
pub mod error;
pub mod inbound;
pub mod outbound;
pub mod payloads;

pub use category::TabCategory;
pub use error::ProtocolError;
pub use inbound::{HostMessage, parse_host_message};
pub use outbound::{FocusType, HostCommand};
pub use payloads::{
    ChatPrompt, CodeBlockPayload, CodeReference, FeedbackPayload, FollowUp, FormAction,
    ReferenceSpan, Vote,
};
