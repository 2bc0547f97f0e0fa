//!
//! # Spirit21 Internal Utilities Crate
//!

pub mod ser;
pub use ser::*;

pub mod enumstr;
pub use enumstr::*;
