//! Data models for Projtrack

pub mod dates;
mod district;
mod draft;
mod project;
mod status;

pub use district::*;
pub use draft::*;
pub use project::*;
pub use status::*;
