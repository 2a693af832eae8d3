//! Theme schema for the mosaic components.
//!
//! A theme is plain JSON: a layout (text, sizes, paddings, corner radii) and at
//! least one color variant. Lengths are given either as bare numbers (pixels) or
//! as strings with a `px`, `rem` or `%` suffix.

mod deserializers;

mod error;
pub use error::*;

mod ext;
pub use ext::*;

mod schema;
pub use schema::*;
