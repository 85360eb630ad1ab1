// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lazy, cached resolution of device classes.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use super::catalog::{FALLBACK, ModelCatalog, ModelDeclaration};
use super::StaticDeviceInfo;
use crate::error::{ConfigError, Result};

type LoadResult = std::result::Result<Arc<StaticDeviceInfo>, ConfigError>;

/// One declared model and its load-once cell.
#[derive(Debug)]
struct Slot {
    declaration: ModelDeclaration,
    cell: OnceLock<LoadResult>,
}

impl Slot {
    fn new(declaration: ModelDeclaration) -> Self {
        Self {
            declaration,
            cell: OnceLock::new(),
        }
    }

    /// Builds the model on first use. Concurrent first callers block on this
    /// slot only; exactly one of them runs the declaration.
    fn load(&self, class: &str) -> LoadResult {
        if let Some(loaded) = self.cell.get() {
            tracing::trace!(class, "Static device info cache hit");
            return loaded.clone();
        }

        self.cell
            .get_or_init(|| {
                tracing::debug!(class, "Loading static device info");
                let loaded = self.declaration.build(class).map(Arc::new);
                if let Err(e) = &loaded {
                    tracing::error!(class, error = %e, "Malformed model declaration");
                }
                loaded
            })
            .clone()
    }

    fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }
}

/// Resolves device classes to shared [`StaticDeviceInfo`]s.
///
/// Created once at startup and passed by reference (usually inside an
/// `Arc`) to whatever needs device resolution.
///
/// Each declared class has its own load-once cell, so the first resolution
/// of a class builds its description exactly once even under concurrent
/// callers, while other classes resolve unhindered. Once loaded, a class
/// always resolves to the same `Arc`. Entries are never evicted.
///
/// Unknown classes resolve to the fallback description, which is built
/// when the resolver is created.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use deebot_core::HardwareResolver;
///
/// let resolver = HardwareResolver::new()?;
///
/// let first = resolver.resolve("p95mgv")?;
/// let second = resolver.resolve("p95mgv")?;
/// assert!(Arc::ptr_eq(&first, &second));
///
/// resolver.load_all()?;
/// assert_eq!(resolver.loaded_models().len(), 16);
/// # Ok::<(), deebot_core::Error>(())
/// ```
#[derive(Debug)]
pub struct HardwareResolver {
    models: BTreeMap<String, Slot>,
    fallback: Arc<StaticDeviceInfo>,
}

impl HardwareResolver {
    /// Creates a resolver over the built-in model catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the built-in catalog or its fallback
    /// declaration is malformed.
    pub fn new() -> Result<Self> {
        Self::with_catalog(ModelCatalog::builtin()?)
    }

    /// Creates a resolver over a custom catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFallback`] if the catalog has no
    /// fallback entry, or the fallback's own error if it is malformed.
    pub fn with_catalog(catalog: ModelCatalog) -> Result<Self> {
        let models: BTreeMap<_, _> = catalog
            .into_models()
            .into_iter()
            .map(|(class, declaration)| (class, Slot::new(declaration)))
            .collect();

        let fallback = models
            .get(FALLBACK)
            .ok_or(ConfigError::MissingFallback)?
            .load(FALLBACK)?;

        tracing::debug!(models = models.len(), "Created hardware resolver");
        Ok(Self { models, fallback })
    }

    /// Resolves a device class.
    ///
    /// Unknown classes resolve to [`fallback`](Self::fallback) and are not
    /// cached under their own name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the class is declared but its declaration
    /// is malformed. The failure is cached; later calls report it again
    /// without rebuilding.
    pub fn resolve(&self, class: &str) -> Result<Arc<StaticDeviceInfo>> {
        match self.models.get(class) {
            Some(slot) => Ok(slot.load(class)?),
            None => Ok(Arc::clone(&self.fallback)),
        }
    }

    /// Loads every declared model.
    ///
    /// Idempotent: models already loaded are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first malformed declaration's [`ConfigError`]. Every other
    /// model is still loaded.
    pub fn load_all(&self) -> Result<()> {
        let mut first_error = None;
        for (class, slot) in &self.models {
            if let Err(e) = slot.load(class) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Returns the fallback description.
    #[must_use]
    pub fn fallback(&self) -> Arc<StaticDeviceInfo> {
        Arc::clone(&self.fallback)
    }

    /// Returns `true` if `class` is declared (the fallback included).
    #[must_use]
    pub fn is_known(&self, class: &str) -> bool {
        self.models.contains_key(class)
    }

    /// Returns `true` if `class` is declared and already loaded.
    #[must_use]
    pub fn is_loaded(&self, class: &str) -> bool {
        self.models.get(class).is_some_and(Slot::is_loaded)
    }

    /// Returns every declared class in sorted order.
    #[must_use]
    pub fn known_models(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    /// Returns the classes loaded so far in sorted order.
    #[must_use]
    pub fn loaded_models(&self) -> Vec<&str> {
        self.models
            .iter()
            .filter(|(_, slot)| slot.is_loaded())
            .map(|(class, _)| class.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::capabilities::Capabilities;
    use crate::hardware::{DataType, models};

    fn catalog_with(class: &str, declaration: ModelDeclaration) -> ModelCatalog {
        let mut catalog = ModelCatalog::new();
        catalog
            .declare(FALLBACK, ModelDeclaration::new(models::fallback))
            .unwrap();
        catalog.declare(class, declaration).unwrap();
        catalog
    }

    #[test]
    fn fallback_is_loaded_on_creation() {
        let resolver = HardwareResolver::new().unwrap();
        assert_eq!(resolver.loaded_models(), ["fallback"]);
        assert!(resolver.is_loaded(FALLBACK));
    }

    #[test]
    fn lazy_load_on_first_resolve() {
        let resolver = HardwareResolver::new().unwrap();
        assert!(!resolver.is_loaded("yna5xi"));

        resolver.resolve("yna5xi").unwrap();
        assert!(resolver.is_loaded("yna5xi"));
        assert!(!resolver.is_loaded("p95mgv"));
    }

    #[test]
    fn unknown_class_is_not_cached() {
        let resolver = HardwareResolver::new().unwrap();
        let info = resolver.resolve("abc123").unwrap();

        assert!(Arc::ptr_eq(&info, &resolver.fallback()));
        assert!(!resolver.is_known("abc123"));
        assert_eq!(resolver.loaded_models(), ["fallback"]);
    }

    #[test]
    fn fallback_class_resolves_to_fallback_instance() {
        let resolver = HardwareResolver::new().unwrap();
        let info = resolver.resolve(FALLBACK).unwrap();
        assert!(Arc::ptr_eq(&info, &resolver.fallback()));
    }

    #[test]
    fn declaration_runs_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let catalog = catalog_with(
            "test01",
            ModelDeclaration::new(move |class| {
                counter.fetch_add(1, Ordering::SeqCst);
                models::yna5xi(class)
            }),
        );
        let resolver = HardwareResolver::with_catalog(catalog).unwrap();

        let first = resolver.resolve("test01").unwrap();
        resolver.load_all().unwrap();
        let second = resolver.resolve("test01").unwrap();

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_fallback_is_rejected() {
        let mut catalog = ModelCatalog::new();
        catalog
            .declare("yna5xi", ModelDeclaration::new(models::yna5xi))
            .unwrap();

        let err = HardwareResolver::with_catalog(catalog).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Config(ConfigError::MissingFallback)
        ));
    }

    #[test]
    fn malformed_declaration_fails_every_time() {
        let catalog = catalog_with(
            "broken",
            ModelDeclaration::new(|class| {
                let caps = Capabilities::builder()
                    .model(class)
                    .push_only(crate::EventType::Battery)
                    .push_only(crate::EventType::Battery)
                    .build()?;
                Ok(StaticDeviceInfo::new(DataType::Json, caps))
            }),
        );
        let resolver = HardwareResolver::with_catalog(catalog).unwrap();

        assert!(resolver.resolve("broken").is_err());
        assert!(resolver.resolve("broken").is_err());
        assert!(resolver.load_all().is_err());
        assert!(!resolver.is_loaded("broken"));
        assert_eq!(resolver.loaded_models(), ["fallback"]);
    }
}
