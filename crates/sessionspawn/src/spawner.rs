//! Once-per-participant spawn resolution.
//!
//! [`PlayerSpawnResolver::attempt_spawn`] is wired to every lifecycle event that
//! might be the first moment a spawn is possible. The [`SpawnGuard`] turns any
//! number of those calls into at most one instantiation.

use std::sync::Arc;

use bevy::prelude::Resource;
use sessionspawn_common::error::{SelectionWarning, SessionSpawnError};
use sessionspawn_common::{EntityHandle, SpawnPayload};
use tracing::{debug, error, info, warn};

use crate::catalog::SpawnableId;
use crate::config::SpawnerConfig;
use crate::placement::{SpawnTransform, spawn_transform};
use crate::selection::{Selection, resolve_selection};
use crate::session::{AssetCatalog, LocalPreferences, SessionService};
use crate::tiers::{DescriptorSource, resolve_descriptor};

/// One-shot latch. Set after the first successful instantiation, never reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnGuard {
    spawned: bool,
}

impl SpawnGuard {
    /// Whether a spawn already succeeded.
    pub fn is_set(&self) -> bool {
        self.spawned
    }

    fn commit(&mut self) {
        self.spawned = true;
    }
}

/// Everything resolved for a spawn, before the instantiation call.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnDecision {
    /// Spawnable to instantiate.
    pub descriptor: SpawnableId,
    /// Fallback tier that produced `descriptor`.
    pub descriptor_source: DescriptorSource,
    /// Chosen character index and its source.
    pub selection: Selection,
    /// Placement derived from the local ordinal.
    pub transform: SpawnTransform,
    /// Selection problems that forced a fallback.
    pub warnings: Vec<SelectionWarning>,
}

impl SpawnDecision {
    /// Payload attached to the instantiation, carrying the chosen index.
    pub fn payload(&self) -> SpawnPayload {
        SpawnPayload::new(self.selection.index)
    }
}

/// A completed spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnReport {
    /// What was resolved.
    pub decision: SpawnDecision,
    /// Handle returned by the session service.
    pub entity: EntityHandle,
    /// The asset catalog did not know the descriptor at spawn time.
    pub asset_missing: bool,
}

/// Result of one [`PlayerSpawnResolver::attempt_spawn`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnOutcome {
    /// The local participant was instantiated.
    Spawned(SpawnReport),
    /// The guard was already set. Nothing happened.
    AlreadySpawned,
    /// Not inside a session yet; a later trigger is expected.
    NotInSession,
    /// Resolution or instantiation failed; the guard stays unset.
    Failed(SessionSpawnError),
}

impl SpawnOutcome {
    /// Whether this attempt instantiated the participant.
    pub fn is_spawned(&self) -> bool {
        matches!(self, SpawnOutcome::Spawned(_))
    }
}

/// Resolves and performs the local participant's spawn.
#[derive(Resource)]
pub struct PlayerSpawnResolver {
    config: SpawnerConfig,
    session: Arc<dyn SessionService>,
    preferences: Arc<dyn LocalPreferences>,
    assets: Arc<dyn AssetCatalog>,
    guard: SpawnGuard,
}

impl std::fmt::Debug for PlayerSpawnResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSpawnResolver")
            .field("config", &self.config)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl PlayerSpawnResolver {
    /// Resolver with an unset guard. `assets` is consulted by both the
    /// pre-flight and the spawn-time diagnostics.
    pub fn new(
        config: SpawnerConfig,
        session: Arc<dyn SessionService>,
        preferences: Arc<dyn LocalPreferences>,
        assets: Arc<dyn AssetCatalog>,
    ) -> Self {
        Self {
            config,
            session,
            preferences,
            assets,
            guard: SpawnGuard::default(),
        }
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// The asset catalog used for diagnostics.
    pub fn assets(&self) -> &dyn AssetCatalog {
        self.assets.as_ref()
    }

    /// Replace the asset catalog. Later attempts and pre-flight runs see the
    /// new one.
    pub fn set_assets(&mut self, assets: Arc<dyn AssetCatalog>) {
        self.assets = assets;
    }

    /// Whether the guard is set.
    pub fn has_spawned(&self) -> bool {
        self.guard.is_set()
    }

    /// Resolve selection, descriptor and transform without spawning.
    pub fn decide(&self) -> Result<SpawnDecision, SessionSpawnError> {
        let key = self.config.preference_key.as_str();
        let replicated = self.session.local_property(key);
        let selection = resolve_selection(replicated.as_ref(), self.preferences.as_ref(), key);
        debug!(index = ?selection.index, source = ?selection.source, "[PlayerSpawnResolver] Resolved selection");

        let resolution = resolve_descriptor(&self.config, selection.index)?;
        let transform = spawn_transform(&self.config.spawn_points, self.session.local_ordinal());

        Ok(SpawnDecision {
            descriptor: resolution.descriptor,
            descriptor_source: resolution.source,
            selection,
            transform,
            warnings: resolution.warnings,
        })
    }

    /// Spawn the local participant unless that already happened.
    ///
    /// Safe to call from every trigger. Failures are logged and returned; the
    /// guard stays unset so a later trigger can try again.
    pub fn attempt_spawn(&mut self) -> SpawnOutcome {
        if self.guard.is_set() {
            return SpawnOutcome::AlreadySpawned;
        }
        if !self.session.is_session_member() {
            debug!("[PlayerSpawnResolver] Not in a session yet, waiting for the next trigger");
            return SpawnOutcome::NotInSession;
        }

        let decision = match self.decide() {
            Ok(decision) => decision,
            Err(err) => {
                if err.is_configuration() {
                    error!(
                        error = %err,
                        "[PlayerSpawnResolver] Cannot resolve a spawnable; retries will fail until the spawner configuration changes"
                    );
                } else {
                    error!(error = %err, "[PlayerSpawnResolver] Cannot resolve a spawnable");
                }
                return SpawnOutcome::Failed(err);
            }
        };

        let asset_missing = !self.assets.exists(&decision.descriptor);
        if asset_missing {
            warn!(
                descriptor = %decision.descriptor,
                "[PlayerSpawnResolver] Spawnable was not found in the asset catalog; instantiation will likely fail"
            );
        }

        let payload = decision.payload();
        let result = self.session.instantiate(
            &decision.descriptor,
            decision.transform.position,
            decision.transform.orientation,
            &payload,
        );

        match result {
            Ok(entity) => {
                self.guard.commit();
                info!(
                    descriptor = %decision.descriptor,
                    chosen_index = payload.raw_index(),
                    ?entity,
                    "[PlayerSpawnResolver] Spawned local player"
                );
                SpawnOutcome::Spawned(SpawnReport {
                    decision,
                    entity,
                    asset_missing,
                })
            }
            Err(source) => {
                error!(
                    descriptor = %decision.descriptor,
                    error = %source,
                    transient = source.is_transient(),
                    "[PlayerSpawnResolver] Instantiation failed; ensure the spawnable is available to the session service"
                );
                SpawnOutcome::Failed(SessionSpawnError::Instantiation {
                    descriptor: decision.descriptor.to_string(),
                    source,
                })
            }
        }
    }
}
