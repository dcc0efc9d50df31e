//! Mesh file input.

pub mod stl;

pub use stl::read_stl;
