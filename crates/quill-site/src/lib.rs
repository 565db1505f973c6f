//! Post discovery and rendering for Quill.
//!
//! [`Scanner`] finds markdown posts under a source directory and
//! [`PostBuilder`] renders them to HTML fragments in parallel.

mod builder;
mod scanner;

pub use builder::{BuildError, BuildReport, PostBuilder, PostError};
pub use scanner::{PostRef, Scanner};
