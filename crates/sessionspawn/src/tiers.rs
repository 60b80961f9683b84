//! Descriptor fallback chain.
//!
//! Each [`Tier`] either resolves a spawnable or tells the chain to continue.
//! Tiers run in the fixed order of [`TIERS`] and the first resolution wins.

use sessionspawn_common::error::{SelectionWarning, SessionSpawnError};
use tracing::warn;

use crate::catalog::{CatalogLookup, SpawnableId};
use crate::config::SpawnerConfig;

/// Which tier produced the descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptorSource {
    /// The chosen index mapped to this catalog slot.
    Catalog(u32),
    /// The directly assigned default spawnable.
    DefaultReference,
    /// The registered default name.
    DefaultName,
}

/// Output of [`resolve_descriptor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptorResolution {
    /// Spawnable to instantiate.
    pub descriptor: SpawnableId,
    /// Tier that produced `descriptor`.
    pub source: DescriptorSource,
    /// Selection problems met on the way. At most one per resolution.
    pub warnings: Vec<SelectionWarning>,
}

#[derive(Debug, PartialEq, Eq)]
enum TierOutcome {
    Resolved(SpawnableId, DescriptorSource),
    Continue,
    ContinueWithWarning(SelectionWarning),
}

/// One step of the fallback chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Chosen index looked up in the catalog.
    Selected,
    /// Directly assigned default spawnable.
    DefaultReference,
    /// Registered default name.
    DefaultName,
}

/// Evaluation order of the chain.
pub const TIERS: [Tier; 3] = [Tier::Selected, Tier::DefaultReference, Tier::DefaultName];

impl Tier {
    fn resolve(
        self,
        config: &SpawnerConfig,
        chosen: Option<u32>,
    ) -> Result<TierOutcome, SessionSpawnError> {
        match self {
            Tier::Selected => {
                let Some(index) = chosen else {
                    return Ok(TierOutcome::Continue);
                };
                match config.catalog.lookup(index) {
                    CatalogLookup::Entry(id) if id.is_empty() => {
                        Err(SessionSpawnError::EmptyCatalogEntry { index })
                    }
                    CatalogLookup::Entry(id) => Ok(TierOutcome::Resolved(
                        id.clone(),
                        DescriptorSource::Catalog(index),
                    )),
                    CatalogLookup::Absent => Ok(TierOutcome::ContinueWithWarning(
                        SelectionWarning::AbsentEntry { index },
                    )),
                    CatalogLookup::OutOfRange { len } => Ok(TierOutcome::ContinueWithWarning(
                        SelectionWarning::OutOfRange {
                            index,
                            catalog_len: len,
                        },
                    )),
                }
            }
            Tier::DefaultReference => Ok(match &config.default_reference {
                Some(id) if !id.is_empty() => {
                    TierOutcome::Resolved(id.clone(), DescriptorSource::DefaultReference)
                }
                _ => TierOutcome::Continue,
            }),
            Tier::DefaultName => {
                if config.default_name.is_empty() {
                    Err(SessionSpawnError::EmptyDescriptor { chosen_index: chosen })
                } else {
                    Ok(TierOutcome::Resolved(
                        config.default_name.clone(),
                        DescriptorSource::DefaultName,
                    ))
                }
            }
        }
    }
}

/// Walk [`TIERS`] and return the first descriptor found.
pub fn resolve_descriptor(
    config: &SpawnerConfig,
    chosen: Option<u32>,
) -> Result<DescriptorResolution, SessionSpawnError> {
    let mut warnings = Vec::new();

    for tier in TIERS {
        match tier.resolve(config, chosen)? {
            TierOutcome::Resolved(descriptor, source) => {
                return Ok(DescriptorResolution {
                    descriptor,
                    source,
                    warnings,
                });
            }
            TierOutcome::ContinueWithWarning(warning) => {
                warn!(%warning, "[PlayerSpawnResolver] Falling back to configured defaults");
                warnings.push(warning);
            }
            TierOutcome::Continue => {}
        }
    }

    Err(SessionSpawnError::EmptyDescriptor { chosen_index: chosen })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpawnableCatalog;

    fn two_entry_config() -> SpawnerConfig {
        SpawnerConfig::default()
            .with_catalog(SpawnableCatalog::from_names(["A", "B"]))
            .with_default_name("Default")
    }

    #[test]
    fn test_selected_index_wins() {
        let resolution = resolve_descriptor(&two_entry_config(), Some(1)).unwrap();
        assert_eq!(resolution.descriptor.as_str(), "B");
        assert_eq!(resolution.source, DescriptorSource::Catalog(1));
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_out_of_range_falls_to_default_with_one_warning() {
        let resolution = resolve_descriptor(&two_entry_config(), Some(7)).unwrap();
        assert_eq!(resolution.descriptor.as_str(), "Default");
        assert_eq!(resolution.source, DescriptorSource::DefaultName);
        assert_eq!(
            resolution.warnings,
            vec![SelectionWarning::OutOfRange {
                index: 7,
                catalog_len: 2
            }]
        );
    }

    #[test]
    fn test_hole_falls_to_reference() {
        let config = SpawnerConfig::default()
            .with_catalog(SpawnableCatalog::new(vec![None]))
            .with_default_reference("Inspector");

        let resolution = resolve_descriptor(&config, Some(0)).unwrap();
        assert_eq!(resolution.descriptor.as_str(), "Inspector");
        assert_eq!(resolution.source, DescriptorSource::DefaultReference);
        assert_eq!(resolution.warnings, vec![SelectionWarning::AbsentEntry { index: 0 }]);
    }

    #[test]
    fn test_unset_selection_skips_catalog_silently() {
        let resolution = resolve_descriptor(&two_entry_config(), None).unwrap();
        assert_eq!(resolution.descriptor.as_str(), "Default");
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_reference_wins_over_default_name() {
        let config = two_entry_config().with_default_reference("Inspector");
        let resolution = resolve_descriptor(&config, None).unwrap();
        assert_eq!(resolution.descriptor.as_str(), "Inspector");
    }

    #[test]
    fn test_everything_empty_is_configuration_error() {
        let config = SpawnerConfig::default().with_default_name("");
        let err = resolve_descriptor(&config, None).unwrap_err();
        assert_eq!(err, SessionSpawnError::EmptyDescriptor { chosen_index: None });
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_catalog_entry_is_fatal() {
        let config = SpawnerConfig::default()
            .with_catalog(SpawnableCatalog::new(vec![Some(SpawnableId::new(""))]));
        let err = resolve_descriptor(&config, Some(0)).unwrap_err();
        assert_eq!(err, SessionSpawnError::EmptyCatalogEntry { index: 0 });
    }
}
