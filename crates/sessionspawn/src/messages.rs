use bevy::prelude::*;
use sessionspawn_common::error::SessionSpawnError;
use sessionspawn_common::{ParticipantId, SessionIdentifier};

use crate::spawner::SpawnOutcome;

// ============================================================================
// Inbound lifecycle messages, written by the session service integration
// ============================================================================

/// The local process finished starting up.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReady;

/// The local participant entered a session.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinedSession;

/// A different participant now leads the session.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderChanged(pub ParticipantId);

/// Another participant entered the session.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantJoined(pub ParticipantId);

/// A participant left the session.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantLeft(pub ParticipantId);

/// Someone pressed "start". Authorization happens when this is handled.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartSessionRequested;

// ============================================================================
// Outbound messages
// ============================================================================

/// Emitted once per spawn trigger with what the resolver did.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct SpawnAttempted(pub SpawnOutcome);

/// Emitted for every handled [`StartSessionRequested`].
#[derive(Message, Debug, Clone, PartialEq)]
pub struct SessionStartResult(pub Result<SessionIdentifier, SessionSpawnError>);

/// Emitted when the start action becomes available or unavailable.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartAvailabilityChanged {
    /// Whether the local participant may start the session now.
    pub can_start: bool,
}
