// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The table of declared device models.

use std::collections::BTreeMap;
use std::fmt;

use super::StaticDeviceInfo;
use super::models;
use crate::error::ConfigError;

/// Device class of the generic declaration used for unknown models.
pub const FALLBACK: &str = "fallback";

type BuildFn = dyn Fn(&str) -> Result<StaticDeviceInfo, ConfigError> + Send + Sync;

/// A deferred model declaration.
///
/// Holds the function that builds the model's [`StaticDeviceInfo`]. The
/// function receives the device class it is registered under.
pub struct ModelDeclaration {
    build: Box<BuildFn>,
}

impl ModelDeclaration {
    /// Wraps a build function.
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&str) -> Result<StaticDeviceInfo, ConfigError> + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
        }
    }

    /// Runs the declaration for `class`.
    ///
    /// # Errors
    ///
    /// Returns the declaration's [`ConfigError`] if it is malformed.
    pub fn build(&self, class: &str) -> Result<StaticDeviceInfo, ConfigError> {
        (self.build)(class)
    }
}

impl fmt::Debug for ModelDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDeclaration").finish_non_exhaustive()
    }
}

/// Device classes and their declarations, sorted by class.
///
/// # Examples
///
/// ```
/// use deebot_core::hardware::{FALLBACK, ModelCatalog, ModelDeclaration, models};
///
/// let mut catalog = ModelCatalog::new();
/// catalog.declare(FALLBACK, ModelDeclaration::new(models::fallback))?;
/// catalog.declare("yna5xi", ModelDeclaration::new(models::yna5xi))?;
///
/// assert!(catalog.declare("yna5xi", ModelDeclaration::new(models::yna5xi)).is_err());
/// assert_eq!(catalog.classes().collect::<Vec<_>>(), ["fallback", "yna5xi"]);
/// # Ok::<(), deebot_core::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ModelCatalog {
    models: BTreeMap<String, ModelDeclaration>,
}

impl ModelCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the catalog of every built-in model.
    ///
    /// Models of one family share a declaration but are registered, and
    /// later cached, under their own class.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateModel`] if the built-in table lists a
    /// class twice.
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.declare(FALLBACK, ModelDeclaration::new(models::fallback))?;
        for family in models::FAMILIES {
            for class in family.classes {
                catalog.declare(*class, ModelDeclaration::new(family.declare))?;
            }
        }
        Ok(catalog)
    }

    /// Adds a declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateModel`] if `class` is already declared.
    pub fn declare(
        &mut self,
        class: impl Into<String>,
        declaration: ModelDeclaration,
    ) -> Result<(), ConfigError> {
        let class = class.into();
        if self.models.contains_key(&class) {
            return Err(ConfigError::DuplicateModel(class));
        }
        self.models.insert(class, declaration);
        Ok(())
    }

    /// Returns `true` if `class` is declared.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.models.contains_key(class)
    }

    /// Returns the declared classes in sorted order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Returns the number of declared classes, fallback included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub(super) fn into_models(self) -> BTreeMap<String, ModelDeclaration> {
        self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_every_known_class() {
        let catalog = ModelCatalog::builtin().unwrap();
        assert_eq!(
            catalog.classes().collect::<Vec<_>>(),
            [
                "2o4lnm", "55aiho", "626v6g", "85nbtp", "9ku8nu", "clojes", "fallback", "lx3j7m",
                "p1jij8", "p95mgv", "rss8xk", "umwv6z", "vi829v", "x5d34r", "yna5xi", "zjavof",
            ]
        );
    }

    #[test]
    fn builtin_declarations_are_well_formed() {
        let catalog = ModelCatalog::builtin().unwrap();
        for (class, declaration) in &catalog.models {
            assert!(declaration.build(class).is_ok(), "{class} is malformed");
        }
    }

    #[test]
    fn duplicate_class_is_rejected() {
        let mut catalog = ModelCatalog::new();
        catalog
            .declare("p95mgv", ModelDeclaration::new(models::p95mgv))
            .unwrap();
        let err = catalog
            .declare("p95mgv", ModelDeclaration::new(models::fallback))
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateModel("p95mgv".to_string()));
        assert_eq!(catalog.len(), 1);
    }
}
