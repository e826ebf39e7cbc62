//! Linear algebra utilities
//!
//! Matrix and point-set operations used by the Kabsch solver:
//!
//! - [`svd3`] — Analytical 3×3 SVD decomposition (Jacobi eigenvalue method)
//! - [`mat3`] — 3×3 row-major matrix helpers and point-set reductions

pub mod mat3;
pub mod svd3;

pub use mat3::{
    centroid, cross_covariance, determinant, identity, is_orthogonal, mat_mul, row_times_mat,
    transpose, Mat3,
};
pub use svd3::{svd3, Svd3};
