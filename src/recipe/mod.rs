// src/recipe/mod.rs

//! xbps-src recipe generation
//!
//! A recipe is the `template` file xbps-src builds a package from. One is
//! generated per catalog repository:
//! - [`format`] holds the text rules (name/version normalization,
//!   `short_desc` truncation, column-wrapped dependency lists)
//! - [`render`] fills the template and writes it to disk
//!
//! # Output layout
//!
//! ```text
//! out/
//!   ros-melodic-geometry2/
//!     template
//!   ros-melodic-angles/
//!     template
//! ```

pub mod format;
mod render;

pub use format::{
    normalize_package_name, normalize_version, prefixed_name, truncate_description,
    wrap_dependency_list, IGNORED_DEPENDENCIES, WRAP_COLUMN,
};
pub use render::{RecipeRenderer, DEFAULT_TEMPLATE, RECIPE_FILE_NAME};
