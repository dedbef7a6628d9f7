//! Utility functions shared across docdex.
//!
//! ## Modules
//!
//! - [`app_data`] - Per-user configuration (`config.json` in the app data directory)
//! - [`text`] - Case folding and substring location helpers
//!
//! ```no_run
//! use docdex::utils::{fold_case, find_in_original};
//!
//! assert_eq!(fold_case("CUDA"), "cuda");
//! assert_eq!(find_in_original("Install CUDA", "cuda"), Some((8, 12)));
//! ```

pub mod app_data;
pub mod text;

pub use app_data::*;
pub use text::*;
