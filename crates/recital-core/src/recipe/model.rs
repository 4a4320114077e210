//! Recipe domain model and step navigation.
//!
//! Steps are addressed by position within their recipe. Navigation never
//! searches the step list for a matching value, so two structurally
//! identical steps stay unambiguous.

use crate::error::{RecitalError, Result};
use serde::{Deserialize, Serialize};

/// A single instruction within a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Spoken instruction text.
    pub instruction: String,
    /// Estimated duration in SSML break syntax, e.g. `"2s"`.
    /// Absent or empty means no pause after the instruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

/// A named, ordered sequence of instructions. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Human-readable title, also used as the card title.
    pub title: String,
    /// Spoken once when the recipe is started.
    pub intro: String,
    /// Spoken after the last step.
    pub conclusion: String,
    /// Ordered steps. The resource key is `recipe` for compatibility with
    /// the published data format.
    #[serde(rename = "recipe")]
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Number of steps in this recipe.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the recipe has no steps. Such recipes are rejected at
    /// load time; see [`crate::recipe::RecipeStore`].
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the step at `index`, or `None` when out of range.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Index of the first step.
    ///
    /// # Errors
    ///
    /// Fails fast with a `Configuration` error on an empty step sequence
    /// rather than indexing out of bounds downstream.
    pub fn first_index(&self) -> Result<usize> {
        if self.steps.is_empty() {
            return Err(RecitalError::configuration(format!(
                "recipe '{}' has no steps",
                self.title
            )));
        }
        Ok(0)
    }

    /// Index of the step following `current`.
    ///
    /// Returns `None` when `current` is the last step or out of range;
    /// out-of-range carries the same meaning as "no next step".
    pub fn next_index(&self, current: usize) -> Option<usize> {
        let next = current.checked_add(1)?;
        if next < self.steps.len() { Some(next) } else { None }
    }

    /// Index of the step preceding `current`, clamped at the start.
    ///
    /// The first step maps to itself. An out-of-range `current` is clamped
    /// into the valid range first, so a stale pointer degrades to the last
    /// step instead of panicking.
    pub fn previous_index(&self, current: usize) -> usize {
        if self.steps.is_empty() {
            return 0;
        }
        current.min(self.steps.len() - 1).saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Recipe {
        Recipe {
            title: "Test".to_string(),
            intro: "Intro.  ".to_string(),
            conclusion: "Done.  ".to_string(),
            steps: vec![
                Step {
                    instruction: "One.".to_string(),
                    estimated_time: Some("1s".to_string()),
                },
                Step {
                    instruction: "Two.".to_string(),
                    estimated_time: None,
                },
                Step {
                    instruction: "Three.".to_string(),
                    estimated_time: Some("3s".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_next_index_laws() {
        let recipe = three_steps();
        for i in 0..recipe.len() {
            if i + 1 < recipe.len() {
                assert_eq!(recipe.next_index(i), Some(i + 1));
            } else {
                assert_eq!(recipe.next_index(i), None);
            }
        }
        // Out of range carries "no next step" semantics.
        assert_eq!(recipe.next_index(recipe.len()), None);
        assert_eq!(recipe.next_index(usize::MAX), None);
    }

    #[test]
    fn test_previous_index_clamps_at_start() {
        let recipe = three_steps();
        for i in 0..recipe.len() {
            assert_eq!(recipe.previous_index(i), i.saturating_sub(1));
        }
        assert_eq!(recipe.previous_index(0), 0);
        // Out of range clamps into the valid range first.
        assert_eq!(recipe.previous_index(100), recipe.len() - 2);
    }

    #[test]
    fn test_first_index() {
        let recipe = three_steps();
        assert_eq!(recipe.first_index().unwrap(), 0);
        // Repeated calls always land on step 0 (StartOver idempotence).
        assert_eq!(recipe.first_index().unwrap(), 0);
    }

    #[test]
    fn test_first_index_rejects_empty_recipe() {
        let recipe = Recipe {
            title: "Empty".to_string(),
            intro: String::new(),
            conclusion: String::new(),
            steps: vec![],
        };
        assert!(recipe.first_index().unwrap_err().is_configuration());
    }

    #[test]
    fn test_duplicate_steps_are_unambiguous() {
        // Two identical steps: position-based navigation distinguishes them.
        let recipe = Recipe {
            title: "Dup".to_string(),
            intro: String::new(),
            conclusion: String::new(),
            steps: vec![
                Step {
                    instruction: "Stir.".to_string(),
                    estimated_time: None,
                },
                Step {
                    instruction: "Stir.".to_string(),
                    estimated_time: None,
                },
            ],
        };
        assert_eq!(recipe.steps[0], recipe.steps[1]);
        assert_eq!(recipe.next_index(0), Some(1));
        assert_eq!(recipe.next_index(1), None);
    }

    #[test]
    fn test_steps_deserialize_from_recipe_key() {
        let json = r#"{
            "title": "T",
            "intro": "I",
            "conclusion": "C",
            "recipe": [{"instruction": "Go."}]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe.steps[0].instruction, "Go.");
        assert_eq!(recipe.steps[0].estimated_time, None);
    }
}
