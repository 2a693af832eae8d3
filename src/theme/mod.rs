//! Theme access for components.
//!
//! The schema itself lives in `gpui_mosaic_theme`; this module re-exports it and
//! adds the semantic kinds components resolve against the active variant.

pub use gpui_mosaic_theme::*;

mod kinds;
pub use kinds::*;
