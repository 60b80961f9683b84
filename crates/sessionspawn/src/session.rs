//! Collaborator seams.
//!
//! The real-time session service, the local key-value store and the asset
//! catalog are all external. Both components receive them as trait objects at
//! construction so tests can script ordinals, properties and leadership.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use bevy::math::{Quat, Vec3};
use sessionspawn_common::error::InstantiateError;
use sessionspawn_common::{EntityHandle, PropertyMap, PropertyValue, SessionIdentifier, SpawnPayload};

use crate::catalog::SpawnableId;

/// Read access to session membership plus the two write primitives this crate
/// needs.
///
/// Methods take `&self`; implementations hold their own interior state the way
/// a network handle does.
///
/// # Example
///
/// ```rust,ignore
/// struct PhotonLikeSession { /* transport handle */ }
///
/// impl SessionService for PhotonLikeSession {
///     fn is_session_member(&self) -> bool { self.client.in_room() }
///     fn local_ordinal(&self) -> i32 { self.client.local_actor_number() }
///     // ...
/// }
/// ```
pub trait SessionService: Send + Sync + 'static {
    /// Whether the local participant is currently inside an active session.
    fn is_session_member(&self) -> bool;

    /// Stable 1-based ordinal of the local participant.
    fn local_ordinal(&self) -> i32;

    /// A property from the local participant's replicated set.
    fn local_property(&self, key: &str) -> Option<PropertyValue>;

    /// Propose room-wide property writes. Not acknowledged.
    fn set_room_properties(&self, props: PropertyMap);

    /// Whether the local participant currently leads the session.
    fn is_local_leader(&self) -> bool;

    /// Ask the service to instantiate a networked entity.
    fn instantiate(
        &self,
        descriptor: &SpawnableId,
        position: Vec3,
        orientation: Quat,
        payload: &SpawnPayload,
    ) -> Result<EntityHandle, InstantiateError>;

    /// Instruct every participant to move into the given shared context.
    fn load_shared_context(&self, identifier: &SessionIdentifier);
}

/// Local persistent integer preferences.
pub trait LocalPreferences: Send + Sync + 'static {
    /// Whether a value is stored under `key`.
    fn has_key(&self, key: &str) -> bool;
    /// The stored value, or `default` when there is none.
    fn get_int(&self, key: &str, default: i32) -> i32;
}

/// Asset lookup behind the pre-flight and spawn-time diagnostics. A miss is
/// only ever reported, never enforced.
pub trait AssetCatalog: Send + Sync + 'static {
    /// Whether the spawnable can be loaded locally.
    fn exists(&self, descriptor: &SpawnableId) -> bool;
}

/// In-memory [`LocalPreferences`].
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: Arc<RwLock<HashMap<String, i32>>>,
}

impl MemoryPreferences {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryPreferences::set_int`].
    pub fn with_int(self, key: impl Into<String>, value: i32) -> Self {
        self.set_int(key, value);
        self
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_int(&self, key: impl Into<String>, value: i32) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value);
    }

    /// Forget the value stored under `key`.
    pub fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl LocalPreferences for MemoryPreferences {
    fn has_key(&self, key: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
            .unwrap_or(default)
    }
}

/// [`AssetCatalog`] backed by a fixed set of known names.
#[derive(Debug, Default, Clone)]
pub struct StaticAssetCatalog {
    known: HashSet<String>,
}

impl StaticAssetCatalog {
    /// Catalog that knows exactly `names`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetCatalog for StaticAssetCatalog {
    fn exists(&self, descriptor: &SpawnableId) -> bool {
        self.known.contains(descriptor.as_str())
    }
}

/// [`AssetCatalog`] that reports every descriptor as present. Useful when the
/// session service resolves assets itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveCatalog;

impl AssetCatalog for PermissiveCatalog {
    fn exists(&self, _descriptor: &SpawnableId) -> bool {
        true
    }
}
