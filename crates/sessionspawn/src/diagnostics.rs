//! Pre-flight checks of configured spawnables against the asset catalog.
//!
//! Findings are informational. The instantiation primitive stays the final
//! authority on whether a spawn works, so nothing here blocks a spawn or a
//! session start.

use std::fmt;

use tracing::warn;

use crate::catalog::SpawnableId;
use crate::config::{SpawnerConfig, StarterConfig};
use crate::session::AssetCatalog;

/// Which configured slot a finding refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticSubject {
    /// A catalog slot, by index.
    CatalogEntry(u32),
    /// [`SpawnerConfig::default_reference`].
    DefaultReference,
    /// [`SpawnerConfig::default_name`].
    DefaultName,
    /// [`StarterConfig::reference_spawnable`].
    StarterReference,
}

impl fmt::Display for DiagnosticSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSubject::CatalogEntry(index) => write!(f, "catalog[{}]", index),
            DiagnosticSubject::DefaultReference => f.write_str("default reference"),
            DiagnosticSubject::DefaultName => f.write_str("default name"),
            DiagnosticSubject::StarterReference => f.write_str("starter reference"),
        }
    }
}

/// A single configuration finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The asset catalog does not know this spawnable.
    MissingAsset {
        /// Slot the spawnable is configured in.
        subject: DiagnosticSubject,
        /// The unknown spawnable.
        descriptor: SpawnableId,
    },
    /// The slot is set to an empty name.
    EmptyName {
        /// Slot with the empty name.
        subject: DiagnosticSubject,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingAsset { subject, descriptor } => write!(
                f,
                "{} '{}' is not available to the asset catalog; instantiation will fail at runtime",
                subject, descriptor
            ),
            Diagnostic::EmptyName { subject } => write!(f, "{} has an empty name", subject),
        }
    }
}

fn check(
    assets: &dyn AssetCatalog,
    subject: DiagnosticSubject,
    descriptor: &SpawnableId,
    out: &mut Vec<Diagnostic>,
) {
    if descriptor.is_empty() {
        out.push(Diagnostic::EmptyName { subject });
    } else if !assets.exists(descriptor) {
        out.push(Diagnostic::MissingAsset {
            subject,
            descriptor: descriptor.clone(),
        });
    }
}

fn report(out: Vec<Diagnostic>) -> Vec<Diagnostic> {
    for diagnostic in &out {
        warn!(%diagnostic, "[Diagnostics] Spawn configuration issue");
    }
    out
}

/// Check every catalog entry and both defaults.
pub fn validate_spawner(config: &SpawnerConfig, assets: &dyn AssetCatalog) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    for (index, descriptor) in config.catalog.iter() {
        check(assets, DiagnosticSubject::CatalogEntry(index), descriptor, &mut out);
    }
    if let Some(reference) = &config.default_reference {
        check(assets, DiagnosticSubject::DefaultReference, reference, &mut out);
    }
    // An empty default name only matters when nothing else can resolve
    let reference_resolves = config
        .default_reference
        .as_ref()
        .is_some_and(|reference| !reference.is_empty());
    if !reference_resolves || !config.default_name.is_empty() {
        check(assets, DiagnosticSubject::DefaultName, &config.default_name, &mut out);
    }

    report(out)
}

/// Check the reference spawnable of the session starter.
pub fn validate_starter(config: &StarterConfig, assets: &dyn AssetCatalog) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if let Some(reference) = &config.reference_spawnable {
        check(assets, DiagnosticSubject::StarterReference, reference, &mut out);
    }
    report(out)
}
