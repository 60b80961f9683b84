use bevy::math::{Quat, Vec3};
use sessionspawn_common::{CHARACTER_INDEX_KEY, SESSION_SCENE_KEY, SessionIdentifier};

use crate::catalog::{SpawnableCatalog, SpawnableId};

/// A fixed location a participant may be placed at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub orientation: Quat,
}

impl SpawnPoint {
    /// Spawn point with an explicit orientation.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// Spawn point at `position` with the identity orientation.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }
}

/// Configuration for the [`PlayerSpawnResolver`](crate::PlayerSpawnResolver).
#[derive(Clone, Debug)]
pub struct SpawnerConfig {
    /// Key used for both the replicated and the locally stored preference.
    pub preference_key: String,
    /// Character index to spawnable mapping.
    pub catalog: SpawnableCatalog,
    /// Directly assigned default spawnable. Wins over `default_name`.
    pub default_reference: Option<SpawnableId>,
    /// Registered name of the terminal fallback spawnable.
    pub default_name: SpawnableId,
    /// Distributed round-robin by participant ordinal. May be empty.
    pub spawn_points: Vec<SpawnPoint>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            preference_key: CHARACTER_INDEX_KEY.to_string(),
            catalog: SpawnableCatalog::default(),
            default_reference: None,
            default_name: SpawnableId::new("PlayerPrefab"),
            spawn_points: Vec::new(),
        }
    }
}

impl SpawnerConfig {
    /// Set the character index to spawnable mapping.
    pub fn with_catalog(mut self, catalog: SpawnableCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the directly assigned default spawnable.
    pub fn with_default_reference(mut self, reference: impl Into<String>) -> Self {
        self.default_reference = Some(SpawnableId::new(reference));
        self
    }

    /// Set the registered name of the terminal fallback.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = SpawnableId::new(name);
        self
    }

    /// Set the spawn points, in ordinal order.
    pub fn with_spawn_points(mut self, points: Vec<SpawnPoint>) -> Self {
        self.spawn_points = points;
        self
    }

    /// Set the key the character preference is stored under.
    pub fn with_preference_key(mut self, key: impl Into<String>) -> Self {
        self.preference_key = key.into();
        self
    }
}

/// Configuration for the [`SessionStartCoordinator`](crate::SessionStartCoordinator).
#[derive(Clone, Debug)]
pub struct StarterConfig {
    /// Shared context every participant moves into on start.
    pub session_identifier: SessionIdentifier,
    /// Room property that announces `session_identifier`.
    pub property_key: String,
    /// Spawnable the started session expects to be loadable. Only checked by
    /// the pre-flight diagnostics.
    pub reference_spawnable: Option<SpawnableId>,
}

impl Default for StarterConfig {
    fn default() -> Self {
        Self {
            session_identifier: SessionIdentifier::default(),
            property_key: SESSION_SCENE_KEY.to_string(),
            reference_spawnable: None,
        }
    }
}

impl StarterConfig {
    /// Set the shared context loaded on start.
    pub fn with_session_identifier(mut self, id: impl Into<String>) -> Self {
        self.session_identifier = SessionIdentifier::new(id);
        self
    }

    /// Set the spawnable checked by the pre-flight diagnostics.
    pub fn with_reference_spawnable(mut self, name: impl Into<String>) -> Self {
        self.reference_spawnable = Some(SpawnableId::new(name));
        self
    }
}
