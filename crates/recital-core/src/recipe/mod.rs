//! Recipe domain module.
//!
//! - `model`: the `Recipe`/`Step` model and index-based step navigation
//! - `store`: the name-keyed collection loaded from a static resource

mod model;
mod store;

pub use model::{Recipe, Step};
pub use store::RecipeStore;
