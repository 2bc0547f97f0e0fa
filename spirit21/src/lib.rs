//!
//! # Spirit21 SPIRIT / IP-XACT Component Descriptor Generator & Writer
//!
//! Packages a description of a hardware component's I/O surface - a set of named
//! threads, each exposing AXI endpoints - into an IEEE-1685 ("SPIRIT") XML component
//! descriptor consumed by the Xilinx IP-integration toolchain.
//!

// Crates.io Imports
#[macro_use]
extern crate fstrings;

// Shared utility crate
pub use spirit21utils as utils;

// Internal modules & re-exports
pub mod data;
pub use data::*;
pub mod xml;
pub use xml::*;
pub mod names;
pub mod gen;
pub use gen::{generate, generate_tree};
pub mod write;

// Unit tests
#[cfg(test)]
mod tests;
