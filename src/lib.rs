//! Connected-component labeling and region bookkeeping in Rust.
//!
//! This crate turns a binary (foreground/background) mask into a map of uniquely numbered
//! regions, and prunes and renumbers those regions by size. It also merges entities linked by an
//! adjacency matrix into components with the same traversal.
//!
//! The following example labels a mask and drops regions of a single pixel:
//!
//! ```rust
//! use fast_ccl_rust::arrays::Array2D;
//! use fast_ccl_rust::common::{Config, Connectivity};
//! use fast_ccl_rust::label::connected_components;
//! use fast_ccl_rust::postprocess::filter_regions;
//!
//! fn main(){
//!     // 4x3 mask in row-major order, nonzero is foreground
//!     let data = [
//!         1u8, 1, 0, 1,
//!         0, 1, 0, 0,
//!         0, 0, 0, 1,
//!     ];
//!     let mut mask = Array2D::from_slice(&data, 4, 3).unwrap();
//!     // create config with defaults and override what's needed
//!     let mut config = Config::default();
//!     config.connectivity = Connectivity::Four;
//!     config.min_area = 1;
//!     let mut grid = connected_components(&mask, &config);
//!     assert_eq!(grid.num_components(), 3);
//!     // removes both single pixels and rewrites the mask to match
//!     filter_regions(&mut grid, Some(&mut mask), &config);
//!     assert_eq!(grid.count, 2);
//!     assert_eq!(mask.as_slice(), [1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
//! }
//! ```
//!
//! Labels are `i64` with `0` as background. Every labeling returns a label count one larger than
//! the largest label, so it can be used directly as the length of per-label arrays such as the
//! area histogram from `postprocess::compute_areas()`.
//!
//! Each call owns all of its working memory. Independent masks can be labeled in parallel, see
//! `label::label_tiles()`. The linear post-processing passes are split over rayon tasks unless
//! `ThreadingStrategy::SingleThread` is selected.
//!
//! The traversal hot loop uses `assume!` macro to avoid boundary checks in release builds.
//!

pub mod arrays;
pub mod common;
pub mod label;
pub mod lists;
pub mod merge;
pub mod postprocess;
