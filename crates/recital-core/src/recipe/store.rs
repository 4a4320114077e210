//! Recipe store: a name-keyed collection loaded from a static resource.
//!
//! The resource is not user-editable at runtime. A missing or malformed
//! resource, or a recipe with no steps, is a `Configuration` error and is
//! fatal for any request that needs it.

use crate::error::{RecitalError, Result};
use crate::recipe::Recipe;
use std::collections::HashMap;
use std::path::Path;

/// Recipe resource compiled into the crate.
const BUNDLED_RECIPES: &str = include_str!("../../data/recipes.json");

/// A name-keyed collection of recipes, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    recipes: HashMap<String, Recipe>,
}

impl RecipeStore {
    /// Loads the bundled recipe resource.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_RECIPES)
    }

    /// Parses a recipe collection from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the resource is malformed or
    /// when any recipe carries an empty step sequence.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let recipes: HashMap<String, Recipe> = serde_json::from_str(json).map_err(|e| {
            RecitalError::configuration(format!("malformed recipe resource: {}", e))
        })?;
        Self::validated(recipes)
    }

    /// Loads a recipe collection from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RecitalError::configuration(format!(
                "cannot read recipe resource '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    fn validated(recipes: HashMap<String, Recipe>) -> Result<Self> {
        for (name, recipe) in &recipes {
            if recipe.is_empty() {
                return Err(RecitalError::configuration(format!(
                    "recipe '{}' has no steps",
                    name
                )));
            }
        }
        Ok(Self { recipes })
    }

    /// Looks up a recipe by name.
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    /// Recipe names in sorted order, for enumerating choices in speech.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.recipes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of recipes in the store.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// True when the store holds no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
