//! **monomaze** is a monochrome maze generation and serialisation library.
//!
//! A [`Grid`](grid/struct.Grid.html) starts with every wall closed, one of the
//! nineteen generation strategies carves passages into it, and the result can
//! be resized, rendered to a two colour raster image or written out as
//! ASCII / box-drawing text.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod renderers;
pub mod units;

pub use rand_xorshift::XorShiftRng;
