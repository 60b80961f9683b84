//! Leader-gated session start.

use std::sync::Arc;

use bevy::prelude::Resource;
use sessionspawn_common::error::SessionSpawnError;
use sessionspawn_common::{ParticipantId, SessionIdentifier};
use tracing::{debug, info, warn};

use crate::config::StarterConfig;
use crate::session::SessionService;

/// Lets the session leader move every participant into the shared context.
///
/// `can_start` only drives presentation (e.g. whether a start button is
/// interactable). [`request_session_start`](Self::request_session_start)
/// always asks the session service again, since leadership can change between
/// the last refresh and the call.
#[derive(Resource)]
pub struct SessionStartCoordinator {
    config: StarterConfig,
    session: Arc<dyn SessionService>,
    can_start: bool,
}

impl std::fmt::Debug for SessionStartCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStartCoordinator")
            .field("config", &self.config)
            .field("can_start", &self.can_start)
            .finish_non_exhaustive()
    }
}

impl SessionStartCoordinator {
    /// Coordinator that reports `can_start == false` until the first refresh.
    pub fn new(config: StarterConfig, session: Arc<dyn SessionService>) -> Self {
        Self {
            config,
            session,
            can_start: false,
        }
    }

    /// The configuration this coordinator was built with.
    pub fn config(&self) -> &StarterConfig {
        &self.config
    }

    /// Cached leadership, as of the last refresh.
    pub fn can_start(&self) -> bool {
        self.can_start
    }

    /// Recompute `can_start` from the session service.
    pub fn refresh(&mut self) -> bool {
        self.can_start = self.session.is_local_leader();
        self.can_start
    }

    /// Refresh once the local process is up.
    pub fn on_local_start(&mut self) -> bool {
        self.refresh()
    }

    /// Refresh after leadership moved.
    pub fn on_leader_changed(&mut self, new_leader: ParticipantId) -> bool {
        debug!(%new_leader, "[SessionStartCoordinator] Leader changed");
        self.refresh()
    }

    /// Refresh after a participant joined.
    pub fn on_participant_joined(&mut self, participant: ParticipantId) -> bool {
        debug!(%participant, "[SessionStartCoordinator] Participant joined");
        self.refresh()
    }

    /// Refresh after a participant left.
    pub fn on_participant_left(&mut self, participant: ParticipantId) -> bool {
        debug!(%participant, "[SessionStartCoordinator] Participant left");
        self.refresh()
    }

    /// Announce the session identifier and tell every participant to load it.
    ///
    /// The room property write is not awaited before the load instruction is
    /// issued; the session service orders both per room.
    pub fn request_session_start(&self) -> Result<SessionIdentifier, SessionSpawnError> {
        if !self.session.is_local_leader() {
            warn!("[SessionStartCoordinator] Only the session leader can start the session");
            return Err(SessionSpawnError::AuthorizationDenied);
        }

        let id = self.config.session_identifier.clone();
        self.session
            .set_room_properties(id.to_properties(&self.config.property_key));
        self.session.load_shared_context(&id);

        info!(session = %id, "[SessionStartCoordinator] Session start requested");
        Ok(id)
    }
}
