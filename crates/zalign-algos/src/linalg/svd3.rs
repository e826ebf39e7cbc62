//! Analytical 3×3 SVD decomposition
//!
//! Computes A = U · diag(S) · Vᵀ for a 3×3 matrix using the Jacobi
//! eigenvalue algorithm on AᵀA (symmetric positive semi-definite).
//!
//! All matrices use row-major layout: `m[row][col]`.
//!
//! The decomposition is a true SVD: singular values are non-negative and
//! `U · diag(S) · Vᵀ` reproduces the input. `V` is returned right-handed;
//! `U` follows from `V` and is only oriented freely along directions with
//! a zero singular value. In particular `det(U) · det(V)` carries the sign
//! of `det(A)` whenever A has full rank.

use super::mat3::Mat3;

/// Relative threshold below which a singular value is treated as zero
const RANK_TOLERANCE: f64 = 1e-10;

/// Result of 3×3 SVD decomposition: A = U · diag(S) · Vᵀ
#[derive(Debug, Clone)]
pub struct Svd3 {
    /// Left singular vectors as columns (`u[row][col]`)
    pub u: Mat3,
    /// Singular values (sorted descending, non-negative)
    pub s: [f64; 3],
    /// Right singular vectors transposed (`vt[row][col]`, rows are the vectors)
    pub vt: Mat3,
}

/// Compute SVD of a 3×3 row-major matrix
pub fn svd3(a: &Mat3) -> Svd3 {
    // 1. Compute AᵀA (symmetric positive semi-definite)
    let ata = mat_mul_ata(a);

    // 2. Jacobi eigendecomposition of AᵀA → eigenvalues and eigenvectors
    let (eigenvalues, eigvec_cols) = jacobi_eigen_3x3(&ata);

    // 3. Sort by descending eigenvalue, compute singular values
    let mut order = [0usize, 1, 2];
    if eigenvalues[order[0]] < eigenvalues[order[1]] { order.swap(0, 1); }
    if eigenvalues[order[0]] < eigenvalues[order[2]] { order.swap(0, 2); }
    if eigenvalues[order[1]] < eigenvalues[order[2]] { order.swap(1, 2); }

    let mut v_cols = [eigvec_cols[order[0]], eigvec_cols[order[1]], eigvec_cols[order[2]]];

    // Right-handed V; U is derived from V below so the product stays exact
    if triple_product(&v_cols[0], &v_cols[1], &v_cols[2]) < 0.0 {
        v_cols[2] = scale(&v_cols[2], -1.0);
    }

    // |A · v_i| keeps full precision for small singular values, where
    // sqrt(eigenvalue) would amplify rounding in AᵀA
    let sigma = [
        norm(&mat_vec_mul(a, &v_cols[0])),
        norm(&mat_vec_mul(a, &v_cols[1])),
        norm(&mat_vec_mul(a, &v_cols[2])),
    ];

    let tol = RANK_TOLERANCE * sigma[0].max(1.0);
    let rank = sigma.iter().filter(|&&s| s > tol).count();

    // 4. U columns: u_i = A · v_i / sigma_i, re-orthogonalized
    let mut u_cols = [[0.0f64; 3]; 3];
    match rank {
        0 => {
            u_cols = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        }
        1 => {
            u_cols[0] = unit(&mat_vec_mul(a, &v_cols[0]));
            u_cols[1] = arbitrary_perpendicular(&u_cols[0]);
            u_cols[2] = unit(&cross(&u_cols[0], &u_cols[1]));
        }
        _ => {
            u_cols[0] = unit(&mat_vec_mul(a, &v_cols[0]));
            let av1 = mat_vec_mul(a, &v_cols[1]);
            u_cols[1] = unit(&sub(&av1, &scale(&u_cols[0], dot(&u_cols[0], &av1))));
            let normal = unit(&cross(&u_cols[0], &u_cols[1]));
            u_cols[2] = if rank == 3 {
                // u_3 is ±(u_1 × u_2); A · v_3 fixes the sign
                let av2 = mat_vec_mul(a, &v_cols[2]);
                if dot(&normal, &av2) < 0.0 {
                    scale(&normal, -1.0)
                } else {
                    normal
                }
            } else {
                normal
            };
        }
    }

    // 5. Build output: columns of U, rows of Vᵀ
    let u = [
        [u_cols[0][0], u_cols[1][0], u_cols[2][0]],
        [u_cols[0][1], u_cols[1][1], u_cols[2][1]],
        [u_cols[0][2], u_cols[1][2], u_cols[2][2]],
    ];
    let vt = [v_cols[0], v_cols[1], v_cols[2]];

    Svd3 { u, s: sigma, vt }
}

// ============================================================================
// Internal helpers
// ============================================================================

/// Compute AᵀA: (AᵀA)_{ij} = Σ_k A_{ki}·A_{kj}
fn mat_mul_ata(a: &Mat3) -> Mat3 {
    let mut result = [[0.0f64; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i][j] = a[0][i] * a[0][j] + a[1][i] * a[1][j] + a[2][i] * a[2][j];
        }
    }
    result
}

/// Multiply row-major matrix A by column vector v: result = A · v
fn mat_vec_mul(a: &Mat3, v: &[f64; 3]) -> [f64; 3] {
    [
        a[0][0] * v[0] + a[0][1] * v[1] + a[0][2] * v[2],
        a[1][0] * v[0] + a[1][1] * v[1] + a[1][2] * v[2],
        a[2][0] * v[0] + a[2][1] * v[1] + a[2][2] * v[2],
    ]
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(v: &[f64; 3], k: f64) -> [f64; 3] {
    [v[0] * k, v[1] * k, v[2] * k]
}

fn triple_product(a: &[f64; 3], b: &[f64; 3], c: &[f64; 3]) -> f64 {
    dot(a, &cross(b, c))
}

fn norm(v: &[f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

fn unit(v: &[f64; 3]) -> [f64; 3] {
    let len = norm(v);
    if len > 1e-300 {
        scale(v, 1.0 / len)
    } else {
        *v
    }
}

fn arbitrary_perpendicular(v: &[f64; 3]) -> [f64; 3] {
    let candidate = if v[0].abs() < v[1].abs() && v[0].abs() < v[2].abs() {
        [1.0, 0.0, 0.0]
    } else if v[1].abs() < v[2].abs() {
        [0.0, 1.0, 0.0]
    } else {
        [0.0, 0.0, 1.0]
    };
    unit(&cross(v, &candidate))
}

/// Jacobi eigenvalue algorithm for 3×3 symmetric matrices.
///
/// Returns (eigenvalues, eigenvector_columns).
/// Uses cyclic Jacobi rotations until convergence.
fn jacobi_eigen_3x3(m: &Mat3) -> ([f64; 3], [[f64; 3]; 3]) {
    let mut a = *m;

    // Eigenvector matrix (starts as identity, accumulates rotations)
    let mut v = [
        [1.0f64, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ];

    let scale2 = (a[0][0] * a[0][0] + a[1][1] * a[1][1] + a[2][2] * a[2][2]).max(1e-300);

    // Cyclic Jacobi: sweep through (0,1), (0,2), (1,2) pairs
    for _ in 0..64 {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off <= 1e-32 * scale2 {
            break;
        }

        for &(p, q) in &[(0usize, 1usize), (0, 2), (1, 2)] {
            if a[p][q] == 0.0 {
                continue;
            }
            jacobi_rotate(&mut a, &mut v, p, q);
        }
    }

    let eigenvalues = [a[0][0], a[1][1], a[2][2]];

    // Column j of v is the j-th eigenvector
    let eigvec_cols = [
        [v[0][0], v[1][0], v[2][0]],
        [v[0][1], v[1][1], v[2][1]],
        [v[0][2], v[1][2], v[2][2]],
    ];

    (eigenvalues, eigvec_cols)
}

/// Apply a single Jacobi rotation to eliminate a[p][q].
fn jacobi_rotate(a: &mut Mat3, v: &mut Mat3, p: usize, q: usize) {
    let app = a[p][p];
    let aqq = a[q][q];
    let apq = a[p][q];

    // Rotation angle
    let (c, s) = if app == aqq {
        let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        (inv_sqrt2, if apq > 0.0 { inv_sqrt2 } else { -inv_sqrt2 })
    } else {
        let tau = (aqq - app) / (2.0 * apq);
        let t = if tau >= 0.0 {
            1.0 / (tau + (1.0 + tau * tau).sqrt())
        } else {
            -1.0 / (-tau + (1.0 + tau * tau).sqrt())
        };
        let c = 1.0 / (1.0 + t * t).sqrt();
        (c, t * c)
    };

    // A' = GᵀAG where G is the Givens rotation in the (p,q) plane
    a[p][p] = c * c * app - 2.0 * s * c * apq + s * s * aqq;
    a[q][q] = s * s * app + 2.0 * s * c * apq + c * c * aqq;
    a[p][q] = 0.0;
    a[q][p] = 0.0;

    let r = 3 - p - q;
    let arp = a[r][p];
    let arq = a[r][q];
    a[r][p] = c * arp - s * arq;
    a[p][r] = a[r][p];
    a[r][q] = s * arp + c * arq;
    a[q][r] = a[r][q];

    // V' = V · G
    for row in v.iter_mut() {
        let vip = row[p];
        let viq = row[q];
        row[p] = c * vip - s * viq;
        row[q] = s * vip + c * viq;
    }
}
