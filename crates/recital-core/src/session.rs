//! Per-conversation session attributes.
//!
//! The platform round-trips a small key-value bag between turns of a single
//! conversation: attributes returned in a response become the next request's
//! input within the same session. This module gives that bag a typed view
//! while carrying through any keys the skill does not own.

use crate::request::SessionEnvelope;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed view of the session attribute bag.
///
/// `recipe` and `last_step` together form the navigation context. Steps are
/// tracked by index into the recipe's step sequence, so duplicate-valued
/// steps stay unambiguous.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionAttributes {
    /// Name of the currently selected recipe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    /// Index of the most recently spoken step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_step: Option<usize>,
    /// Attributes this skill does not own, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionAttributes {
    /// Returns the session's attributes, or the empty default when absent.
    ///
    /// Pure and total: a request without an attribute bag simply yields an
    /// empty one.
    pub fn resolve(session: &SessionEnvelope) -> Self {
        session.attributes.clone().unwrap_or_default()
    }

    /// True when both a recipe and a step pointer are present.
    pub fn has_context(&self) -> bool {
        self.recipe.is_some() && self.last_step.is_some()
    }

    /// Records the current navigation position.
    pub fn set_position(&mut self, recipe: impl Into<String>, step_index: usize) {
        self.recipe = Some(recipe.into());
        self.last_step = Some(step_index);
    }
}
