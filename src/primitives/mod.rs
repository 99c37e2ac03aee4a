//! Core compute primitives (Vector, Matrix).

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
