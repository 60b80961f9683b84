#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bevy::math::{Quat, Vec3};
use sessionspawn::{
    AssetCatalog,
    EntityHandle,
    InstantiateError,
    PropertyMap,
    PropertyValue,
    SessionIdentifier,
    SessionService,
    SpawnPayload,
    SpawnableId,
};

/// Every call the components made into the session service, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetRoomProperties(PropertyMap),
    LoadSharedContext(SessionIdentifier),
    Instantiate {
        descriptor: String,
        position: Vec3,
        orientation: Quat,
        payload: SpawnPayload,
    },
}

#[derive(Default)]
struct FakeState {
    member: bool,
    ordinal: i32,
    leader: bool,
    properties: HashMap<String, PropertyValue>,
    failures: Vec<InstantiateError>,
    calls: Vec<Call>,
    next_handle: u64,
}

/// Scripted session service for tests.
#[derive(Default)]
pub struct FakeSession {
    state: Mutex<FakeState>,
}

impl FakeSession {
    /// A member with ordinal 1 that does not lead.
    pub fn member() -> Arc<Self> {
        let session = Self::default();
        {
            let mut state = session.state.lock().unwrap();
            state.member = true;
            state.ordinal = 1;
            state.next_handle = 100;
        }
        Arc::new(session)
    }

    pub fn outsider() -> Arc<Self> {
        let session = Self::member();
        session.set_member(false);
        session
    }

    pub fn set_member(&self, member: bool) {
        self.state.lock().unwrap().member = member;
    }

    pub fn set_ordinal(&self, ordinal: i32) {
        self.state.lock().unwrap().ordinal = ordinal;
    }

    pub fn set_leader(&self, leader: bool) {
        self.state.lock().unwrap().leader = leader;
    }

    pub fn set_property(&self, key: &str, value: PropertyValue) {
        self.state.lock().unwrap().properties.insert(key.to_string(), value);
    }

    /// Queue failures for the next instantiation calls.
    pub fn fail_next(&self, error: InstantiateError) {
        self.state.lock().unwrap().failures.push(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn instantiations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Instantiate { .. }))
            .collect()
    }
}

/// Asset catalog that knows nothing and remembers every lookup.
#[derive(Default)]
pub struct RecordingCatalog {
    lookups: Mutex<Vec<String>>,
}

impl RecordingCatalog {
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl AssetCatalog for RecordingCatalog {
    fn exists(&self, descriptor: &SpawnableId) -> bool {
        self.lookups.lock().unwrap().push(descriptor.to_string());
        false
    }
}

/// Upcast a shared fake so the caller keeps its concrete handle.
pub fn service(session: &Arc<FakeSession>) -> Arc<dyn SessionService> {
    session.clone()
}

impl SessionService for FakeSession {
    fn is_session_member(&self) -> bool {
        self.state.lock().unwrap().member
    }

    fn local_ordinal(&self) -> i32 {
        self.state.lock().unwrap().ordinal
    }

    fn local_property(&self, key: &str) -> Option<PropertyValue> {
        self.state.lock().unwrap().properties.get(key).cloned()
    }

    fn set_room_properties(&self, props: PropertyMap) {
        self.state.lock().unwrap().calls.push(Call::SetRoomProperties(props));
    }

    fn is_local_leader(&self) -> bool {
        self.state.lock().unwrap().leader
    }

    fn instantiate(
        &self,
        descriptor: &SpawnableId,
        position: Vec3,
        orientation: Quat,
        payload: &SpawnPayload,
    ) -> Result<EntityHandle, InstantiateError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Instantiate {
            descriptor: descriptor.to_string(),
            position,
            orientation,
            payload: *payload,
        });
        if !state.failures.is_empty() {
            return Err(state.failures.remove(0));
        }
        state.next_handle += 1;
        Ok(EntityHandle(state.next_handle))
    }

    fn load_shared_context(&self, identifier: &SessionIdentifier) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(Call::LoadSharedContext(identifier.clone()));
    }
}
