use serde::{Deserialize, Serialize};

use crate::error::SessionSpawnError;

/// Instantiation data handed to the session service alongside a spawn request.
///
/// The spawned entity reads this back to configure itself without querying the
/// selection sources again. On the wire the unset index is the `-1` sentinel,
/// so consumers written against the integer form keep working.
///
/// ## Usage
///
/// ```rust
/// use sessionspawn_common::SpawnPayload;
///
/// let payload = SpawnPayload::new(Some(2));
/// let bytes = payload.encode().unwrap();
/// assert_eq!(SpawnPayload::decode(&bytes).unwrap().character_index(), Some(2));
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPayload {
    character_index: i32,
}

impl SpawnPayload {
    /// Sentinel used on the wire for "no selection".
    pub const UNSET: i32 = -1;

    /// Payload for a resolved index, or [`SpawnPayload::UNSET`] for `None`.
    pub fn new(character_index: Option<u32>) -> Self {
        let character_index = character_index
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(Self::UNSET);
        Self { character_index }
    }

    /// The chosen character index, if any was resolved.
    pub fn character_index(&self) -> Option<u32> {
        u32::try_from(self.character_index).ok()
    }

    /// Raw wire value, `-1` when unset.
    pub fn raw_index(&self) -> i32 {
        self.character_index
    }

    /// Bincode-serialize the payload (standard config).
    pub fn encode(&self) -> Result<Vec<u8>, SessionSpawnError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| SessionSpawnError::PayloadEncode(e.to_string()))
    }

    /// Decode a payload produced by [`SpawnPayload::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, SessionSpawnError> {
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map(|(payload, _)| payload)
            .map_err(|e| SessionSpawnError::PayloadDecode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_index_uses_sentinel() {
        let payload = SpawnPayload::new(None);
        assert_eq!(payload.raw_index(), -1);
        assert_eq!(payload.character_index(), None);

        let enc = payload.encode().unwrap();
        let dec = SpawnPayload::decode(&enc).unwrap();
        assert_eq!(dec.character_index(), None);
    }

    #[test]
    fn test_index_survives_transport() {
        let enc = SpawnPayload::new(Some(4)).encode().unwrap();
        let dec = SpawnPayload::decode(&enc).unwrap();
        assert_eq!(dec.character_index(), Some(4));
        assert_eq!(dec.raw_index(), 4);
    }

    #[test]
    fn test_decode_rejects_empty_buffer() {
        let result = SpawnPayload::decode(&[]);
        assert!(matches!(result, Err(SessionSpawnError::PayloadDecode(_))));
    }
}
