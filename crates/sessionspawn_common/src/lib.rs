pub mod properties;
pub use properties::*;

pub mod codec;
pub use codec::SpawnPayload;

pub mod error;

use serde::{Deserialize, Serialize};

use std::fmt::Display;

#[derive(Serialize, Deserialize, Hash, PartialEq, Eq, Clone, Copy, Debug)]
/// A [`ParticipantId`] denotes a single participant of a session
pub struct ParticipantId {
    /// The ordinal the session service issued to this participant (1-based).
    pub ordinal: i32,
}

impl ParticipantId {
    /// Wrap an ordinal issued by the session service.
    pub fn new(ordinal: i32) -> Self {
        Self { ordinal }
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Participant with ordinal={0}", self.ordinal))
    }
}

/// Opaque handle returned by the session service for an instantiated entity.
#[derive(Serialize, Deserialize, Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub struct EntityHandle(pub u64);
