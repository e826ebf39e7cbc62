//! 3×3 row-major matrix utilities
//!
//! Matrices are `[[f64; 3]; 3]` indexed `m[row][col]`. Points are row
//! vectors: a point `p` is transformed by `R` as `p · R`.

use lin_alg::f64::Vec3;

/// 3×3 row-major matrix (`m[row][col]`)
pub type Mat3 = [[f64; 3]; 3];

/// The identity matrix
pub const fn identity() -> Mat3 {
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
}

/// Transpose
pub fn transpose(m: &Mat3) -> Mat3 {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Matrix product `a · b`
pub fn mat_mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0f64; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            out[row][col] = a[row][0] * b[0][col] + a[row][1] * b[1][col] + a[row][2] * b[2][col];
        }
    }
    out
}

/// Determinant
pub fn determinant(m: &Mat3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Row vector times matrix: `v · m`
pub fn row_times_mat(v: Vec3, m: &Mat3) -> Vec3 {
    Vec3::new(
        v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0],
        v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1],
        v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2],
    )
}

/// Check `m · mᵀ ≈ I` within `tol`
pub fn is_orthogonal(m: &Mat3, tol: f64) -> bool {
    let prod = mat_mul(m, &transpose(m));
    let id = identity();
    (0..3).all(|i| (0..3).all(|j| (prod[i][j] - id[i][j]).abs() < tol))
}

/// Coordinate-wise mean of a point set, `None` for an empty set
pub fn centroid(points: &[Vec3]) -> Option<Vec3> {
    if points.is_empty() {
        return None;
    }
    let mut sum = Vec3::new(0.0, 0.0, 0.0);
    for &p in points {
        sum = sum + p;
    }
    Some(sum * (1.0 / points.len() as f64))
}

/// Cross-covariance `H = Pᵀ · Q` of two equal-length, already centered
/// point sets (`H[j][k] = Σᵢ pᵢ[j] · qᵢ[k]`)
pub fn cross_covariance(p: &[Vec3], q: &[Vec3]) -> Mat3 {
    let mut h = [[0.0f64; 3]; 3];
    for (a, b) in p.iter().zip(q) {
        let a = [a.x, a.y, a.z];
        let b = [b.x, b.y, b.z];
        for j in 0..3 {
            for k in 0..3 {
                h[j][k] += a[j] * b[k];
            }
        }
    }
    h
}
