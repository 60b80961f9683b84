#![deny(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::unwrap_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! sessionspawn
//!
//! Decision logic that sits above a real-time session service: who may start a
//! session, which character the local participant controls, where it appears,
//! and that it is spawned exactly once.
//!
//! It exposes:
//!
//! - [`PlayerSpawnResolver`]: idempotent spawn of the local participant with a
//!   tiered descriptor fallback and ordinal-based spawn points.
//! - [`SessionStartCoordinator`]: leader-only session start that announces the
//!   session identifier and tells every participant to load it.
//! - [`SessionService`], [`LocalPreferences`], [`AssetCatalog`]: the seams to the
//!   external collaborators.
//! - [`SessionSpawnPlugin`]: wires both components to lifecycle messages.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bevy::prelude::*;
//! use sessionspawn::{SessionSpawnPlugin, SpawnerConfig, StarterConfig, SpawnableCatalog};
//!
//! let session: Arc<dyn SessionService> = Arc::new(MyTransport::connect());
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(
//!         SessionSpawnPlugin::new(session)
//!             .with_spawner(
//!                 SpawnerConfig::default()
//!                     .with_catalog(SpawnableCatalog::from_names(["Knight", "Rogue"])),
//!             )
//!             .with_starter(StarterConfig::default().with_session_identifier("Arena")),
//!     )
//!     .run();
//! ```

mod catalog;
mod config;
mod coordinator;
mod messages;
mod placement;
mod selection;
mod spawner;
mod systems;
mod tiers;

/// Pre-flight checks of the configured spawnables.
pub mod diagnostics;

/// Collaborator traits and small in-process implementations.
pub mod session;

pub use catalog::{CatalogLookup, SpawnableCatalog, SpawnableId};
pub use config::{SpawnPoint, SpawnerConfig, StarterConfig};
pub use coordinator::SessionStartCoordinator;
pub use messages::*;
pub use placement::{SpawnTransform, spawn_point_index, spawn_transform};
pub use selection::{Selection, SelectionSource, resolve_selection};
pub use session::{
    AssetCatalog,
    LocalPreferences,
    MemoryPreferences,
    PermissiveCatalog,
    SessionService,
    StaticAssetCatalog,
};
pub use spawner::{PlayerSpawnResolver, SpawnDecision, SpawnGuard, SpawnOutcome, SpawnReport};
pub use systems::{PreflightReport, SessionSpawnSystems};
pub use tiers::{DescriptorResolution, DescriptorSource, TIERS, Tier, resolve_descriptor};

pub use sessionspawn_common as common;
pub use sessionspawn_common::error::{InstantiateError, SelectionWarning, SessionSpawnError};
pub use sessionspawn_common::{
    EntityHandle,
    ParticipantId,
    PropertyMap,
    PropertyValue,
    SessionIdentifier,
    SpawnPayload,
};

use std::sync::Arc;

use bevy::prelude::*;

/// Plugin that owns both components and drives them from lifecycle messages.
///
/// The session service integration writes [`JoinedSession`],
/// [`LeaderChanged`], [`ParticipantJoined`] and [`ParticipantLeft`]; UI writes
/// [`StartSessionRequested`]. [`ProcessReady`] is written in `PostStartup`
/// unless disabled with [`SessionSpawnPlugin::without_process_ready`].
#[derive(Clone)]
pub struct SessionSpawnPlugin {
    session: Arc<dyn SessionService>,
    preferences: Arc<dyn LocalPreferences>,
    assets: Arc<dyn AssetCatalog>,
    spawner: SpawnerConfig,
    starter: StarterConfig,
    emit_process_ready: bool,
}

impl SessionSpawnPlugin {
    /// Plugin with default configuration, empty local preferences and a
    /// permissive asset catalog.
    pub fn new(session: Arc<dyn SessionService>) -> Self {
        Self {
            session,
            preferences: Arc::new(MemoryPreferences::new()),
            assets: Arc::new(PermissiveCatalog),
            spawner: SpawnerConfig::default(),
            starter: StarterConfig::default(),
            emit_process_ready: true,
        }
    }

    /// Use `preferences` as the local preference store.
    pub fn with_preferences(mut self, preferences: Arc<dyn LocalPreferences>) -> Self {
        self.preferences = preferences;
        self
    }

    /// Use `assets` for the pre-flight and spawn-time diagnostics.
    pub fn with_assets(mut self, assets: Arc<dyn AssetCatalog>) -> Self {
        self.assets = assets;
        self
    }

    /// Replace the spawner configuration.
    pub fn with_spawner(mut self, config: SpawnerConfig) -> Self {
        self.spawner = config;
        self
    }

    /// Replace the session starter configuration.
    pub fn with_starter(mut self, config: StarterConfig) -> Self {
        self.starter = config;
        self
    }

    /// Leave [`ProcessReady`] to the host application.
    pub fn without_process_ready(mut self) -> Self {
        self.emit_process_ready = false;
        self
    }
}

impl Plugin for SessionSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PlayerSpawnResolver::new(
            self.spawner.clone(),
            self.session.clone(),
            self.preferences.clone(),
            self.assets.clone(),
        ))
        .insert_resource(SessionStartCoordinator::new(
            self.starter.clone(),
            self.session.clone(),
        ));

        systems::install(app, self.emit_process_ready);
        debug!("[SessionSpawnPlugin::build] installed");
    }
}
