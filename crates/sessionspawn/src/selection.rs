//! Character index resolution.
//!
//! The replicated preference is authoritative; the locally persisted one is
//! only read when the replicated value is missing. Neither source is waited
//! on.

use sessionspawn_common::PropertyValue;
use tracing::debug;

use crate::session::LocalPreferences;

/// Where a resolved index came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSource {
    /// The local participant's replicated property.
    Replicated,
    /// The locally persisted preference.
    Local,
    /// Neither source had a usable value.
    Unset,
}

/// A resolved character selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Chosen catalog index, `None` when unset.
    pub index: Option<u32>,
    /// Where `index` came from.
    pub source: SelectionSource,
}

impl Selection {
    /// No selection.
    pub const UNSET: Selection = Selection {
        index: None,
        source: SelectionSource::Unset,
    };
}

/// Resolve the chosen index.
///
/// A replicated value that is negative or not integer-coercible counts as
/// missing. A negative local value resolves to unset.
pub fn resolve_selection(
    replicated: Option<&PropertyValue>,
    local: &dyn LocalPreferences,
    key: &str,
) -> Selection {
    if let Some(value) = replicated {
        match value.as_int().and_then(|raw| u32::try_from(raw).ok()) {
            Some(index) => {
                return Selection {
                    index: Some(index),
                    source: SelectionSource::Replicated,
                };
            }
            None => debug!(key, %value, "Ignoring unusable replicated selection"),
        }
    }

    if local.has_key(key) {
        if let Ok(index) = u32::try_from(local.get_int(key, -1)) {
            return Selection {
                index: Some(index),
                source: SelectionSource::Local,
            };
        }
    }

    Selection::UNSET
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryPreferences;
    use sessionspawn_common::CHARACTER_INDEX_KEY;

    #[test]
    fn test_replicated_wins_over_local() {
        let local = MemoryPreferences::new().with_int(CHARACTER_INDEX_KEY, 5);
        let selection = resolve_selection(Some(&PropertyValue::Int(2)), &local, CHARACTER_INDEX_KEY);

        assert_eq!(selection.index, Some(2));
        assert_eq!(selection.source, SelectionSource::Replicated);
    }

    #[test]
    fn test_local_used_when_replicated_absent() {
        let local = MemoryPreferences::new().with_int(CHARACTER_INDEX_KEY, 5);
        let selection = resolve_selection(None, &local, CHARACTER_INDEX_KEY);

        assert_eq!(selection.index, Some(5));
        assert_eq!(selection.source, SelectionSource::Local);
    }

    #[test]
    fn test_both_absent_is_unset() {
        let selection = resolve_selection(None, &MemoryPreferences::new(), CHARACTER_INDEX_KEY);
        assert_eq!(selection, Selection::UNSET);
    }

    #[test]
    fn test_textual_replicated_value() {
        let local = MemoryPreferences::new();
        let selection = resolve_selection(Some(&PropertyValue::from("3")), &local, CHARACTER_INDEX_KEY);
        assert_eq!(selection.index, Some(3));
    }

    #[test]
    fn test_unusable_replicated_value_falls_through() {
        let local = MemoryPreferences::new().with_int(CHARACTER_INDEX_KEY, 1);

        for value in [
            PropertyValue::from("knight"),
            PropertyValue::Int(-1),
            PropertyValue::Bool(true),
        ] {
            let selection = resolve_selection(Some(&value), &local, CHARACTER_INDEX_KEY);
            assert_eq!(selection.index, Some(1), "value {:?}", value);
            assert_eq!(selection.source, SelectionSource::Local);
        }
    }

    #[test]
    fn test_negative_local_value_is_unset() {
        let local = MemoryPreferences::new().with_int(CHARACTER_INDEX_KEY, -1);
        let selection = resolve_selection(None, &local, CHARACTER_INDEX_KEY);
        assert_eq!(selection, Selection::UNSET);
    }
}
