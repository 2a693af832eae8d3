//! Hands-on exercises for getting comfortable with `cargo test`.
//!
//! Each lesson is a small module whose tests are broken on purpose. Fixing
//! them is the exercise.

pub mod intro;
