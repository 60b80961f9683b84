//! Error taxonomy shared by the spawn resolver and the start coordinator.
//!
//! Nothing here is ever propagated to the session service's event loop; the
//! component that detects a failure logs it and hands it back as a value.

use thiserror::Error;

/// Failure reported by the session service's instantiation primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiateError {
    /// The service could not find or build the named spawnable.
    #[error("'{0}' is not instantiable")]
    NotInstantiable(String),
    /// The request did not reach the service or was dropped.
    #[error("transport error: {0}")]
    Transport(String),
    /// The call returned without an entity handle.
    #[error("no entity handle was returned")]
    NoHandle,
}

impl InstantiateError {
    /// Whether a later trigger (a reconnect, a rejoin) might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, InstantiateError::Transport(_) | InstantiateError::NoHandle)
    }
}

/// Recoverable problem with the chosen character index. The fallback chain
/// continues with the next tier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionWarning {
    /// The index is past the end of the catalog.
    #[error("chosen index {index} is out of range (catalog length {catalog_len})")]
    OutOfRange { index: u32, catalog_len: usize },
    /// The slot at the index is a hole.
    #[error("catalog entry {index} is empty")]
    AbsentEntry { index: u32 },
}

/// Errors reported by the sessionspawn components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionSpawnError {
    /// Every tier of the fallback chain came up empty.
    #[error("no spawnable assigned and no selection found to spawn (chosen index {chosen_index:?})")]
    EmptyDescriptor { chosen_index: Option<u32> },

    /// A catalog slot exists but names nothing.
    #[error("catalog entry {index} has an empty identifier")]
    EmptyCatalogEntry { index: u32 },

    /// A non-leader asked to start the session.
    #[error("only the session leader can start the session")]
    AuthorizationDenied,

    /// The instantiation primitive refused the request.
    #[error("instantiating '{descriptor}' failed: {source}")]
    Instantiation {
        descriptor: String,
        #[source]
        source: InstantiateError,
    },

    #[error("spawn payload could not be encoded: {0}")]
    PayloadEncode(String),

    #[error("spawn payload could not be decoded: {0}")]
    PayloadDecode(String),
}

impl SessionSpawnError {
    /// Configuration errors reproduce on every attempt until the configuration
    /// changes.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SessionSpawnError::EmptyDescriptor { .. } | SessionSpawnError::EmptyCatalogEntry { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(InstantiateError::Transport("timeout".into()).is_transient());
        assert!(InstantiateError::NoHandle.is_transient());
        assert!(!InstantiateError::NotInstantiable("Knight".into()).is_transient());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(SessionSpawnError::EmptyDescriptor { chosen_index: None }.is_configuration());
        assert!(SessionSpawnError::EmptyCatalogEntry { index: 1 }.is_configuration());
        assert!(!SessionSpawnError::AuthorizationDenied.is_configuration());
    }

    #[test]
    fn test_instantiation_message_names_descriptor() {
        let err = SessionSpawnError::Instantiation {
            descriptor: "Knight".to_string(),
            source: InstantiateError::NotInstantiable("Knight".to_string()),
        };
        assert!(err.to_string().contains("'Knight'"));
    }
}
