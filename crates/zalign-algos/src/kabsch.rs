//! Kabsch algorithm for optimal rigid-body superposition
//!
//! Given two sets of corresponding 3D points, finds the rotation and
//! centroids that minimize RMSD when the movable set is mapped onto the
//! reference set as `(p - c_movable) · R + c_reference`.
//!
//! No reflection correction is applied: `R = U · Vᵀ` is used as it comes
//! out of the SVD of the cross-covariance matrix.

use lin_alg::f64::Vec3;

use crate::linalg::{centroid, cross_covariance, determinant, mat_mul, row_times_mat, svd3, Mat3};
use crate::AlignError;

/// Rigid transform mapping a movable point set onto a reference point set
#[derive(Debug, Clone)]
pub struct Superposition {
    /// 3×3 rotation, applied on the right of row vectors
    pub rotation: Mat3,
    /// Centroid of the movable points used for the fit
    pub centroid_movable: Vec3,
    /// Centroid of the reference points used for the fit
    pub centroid_reference: Vec3,
    /// Number of point pairs used for the fit
    pub n_atoms: usize,
}

impl Superposition {
    /// Map one point: `(p - c_movable) · R + c_reference`
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        row_times_mat(p - self.centroid_movable, &self.rotation) + self.centroid_reference
    }

    /// Map every point of a set, returning the new positions
    pub fn transform_points(&self, points: &[Vec3]) -> Vec<Vec3> {
        points.iter().map(|&p| self.transform_point(p)).collect()
    }

    /// Determinant of the rotation (+1 proper, -1 improper)
    pub fn determinant(&self) -> f64 {
        determinant(&self.rotation)
    }

    /// Whether the rotation is proper (no mirror component)
    pub fn is_proper_rotation(&self) -> bool {
        self.determinant() > 0.0
    }
}

/// Compute the superposition of `movable` onto `reference`.
///
/// Both slices must have the same, non-zero length and be matched row by
/// row.
pub fn kabsch(movable: &[Vec3], reference: &[Vec3]) -> Result<Superposition, AlignError> {
    let n = movable.len();
    if n != reference.len() {
        return Err(AlignError::LengthMismatch(n, reference.len()));
    }

    // 1. Centroids
    let (Some(centroid_movable), Some(centroid_reference)) =
        (centroid(movable), centroid(reference))
    else {
        return Err(AlignError::DegenerateInput);
    };

    // 2. Center both sets
    let centered_movable: Vec<Vec3> = movable.iter().map(|&p| p - centroid_movable).collect();
    let centered_reference: Vec<Vec3> = reference.iter().map(|&q| q - centroid_reference).collect();

    // 3. Cross-covariance H = P'ᵀ · Q'
    let h = cross_covariance(&centered_movable, &centered_reference);

    // 4. H = U · D · Vᵀ
    let svd = svd3(&h);

    // 5. R = (V · Uᵀ)ᵀ = U · Vᵀ
    let rotation = mat_mul(&svd.u, &svd.vt);

    log::debug!(
        "Kabsch fit on {} pairs: centroids ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3}), singular values {:?}",
        n,
        centroid_movable.x,
        centroid_movable.y,
        centroid_movable.z,
        centroid_reference.x,
        centroid_reference.y,
        centroid_reference.z,
        svd.s
    );
    if determinant(&rotation) < 0.0 {
        log::warn!("Superposition contains a reflection (det(R) < 0); point sets may be mirror images");
    }

    Ok(Superposition {
        rotation,
        centroid_movable,
        centroid_reference,
        n_atoms: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{is_orthogonal, transpose};

    fn tetrahedron() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]
    }

    fn max_deviation(a: &[Vec3], b: &[Vec3]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(p, q)| {
                let d = *p - *q;
                d.x.abs().max(d.y.abs()).max(d.z.abs())
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_identity_case() {
        let points = tetrahedron();
        let result = kabsch(&points, &points).unwrap();
        assert!(is_orthogonal(&result.rotation, 1e-12));
        assert!(max_deviation(&result.transform_points(&points), &points) < 1e-12);
        assert_eq!(result.n_atoms, 4);
    }

    #[test]
    fn test_pure_translation() {
        let source = tetrahedron();
        let target: Vec<Vec3> = source.iter().map(|&p| p + Vec3::new(5.0, 3.0, 1.0)).collect();
        let result = kabsch(&source, &target).unwrap();
        assert!((result.centroid_reference.x - result.centroid_movable.x - 5.0).abs() < 1e-12);
        assert!(max_deviation(&result.transform_points(&source), &target) < 1e-10);
    }

    #[test]
    fn test_known_rotation() {
        // 90° about z, column-vector form q = Rz · p
        let source = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.5),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let target: Vec<Vec3> = source.iter().map(|p| Vec3::new(-p.y, p.x, p.z)).collect();
        let result = kabsch(&source, &target).unwrap();

        // Row-vector form is Rzᵀ
        let expected = [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        for i in 0..3 {
            for j in 0..3 {
                assert!((result.rotation[i][j] - expected[i][j]).abs() < 1e-9);
            }
        }
        assert!(result.is_proper_rotation());
        assert!(max_deviation(&result.transform_points(&source), &target) < 1e-9);
    }

    #[test]
    fn test_transpose_is_inverse() {
        let source = tetrahedron();
        let target: Vec<Vec3> = source.iter().map(|p| Vec3::new(p.z, p.x, p.y)).collect();
        let result = kabsch(&source, &target).unwrap();
        let product = mat_mul(&result.rotation, &transpose(&result.rotation));
        assert!(is_orthogonal(&result.rotation, 1e-9));
        for i in 0..3 {
            assert!((product[i][i] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mirror_image_gives_improper_rotation() {
        let source = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.3, -0.7, 2.0),
        ];
        let target: Vec<Vec3> = source.iter().map(|p| Vec3::new(p.x, p.y, -p.z)).collect();
        let result = kabsch(&source, &target).unwrap();

        assert!(!result.is_proper_rotation());
        assert!((result.determinant() + 1.0).abs() < 1e-9);
        assert!(max_deviation(&result.transform_points(&source), &target) < 1e-9);
    }

    #[test]
    fn test_length_mismatch() {
        let a = vec![Vec3::new(0.0, 0.0, 0.0); 5];
        let b = vec![Vec3::new(0.0, 0.0, 0.0); 4];
        assert_eq!(kabsch(&a, &b).unwrap_err(), AlignError::LengthMismatch(5, 4));
    }

    #[test]
    fn test_empty_is_degenerate() {
        assert_eq!(kabsch(&[], &[]).unwrap_err(), AlignError::DegenerateInput);
    }

    #[test]
    fn test_single_point() {
        let a = [Vec3::new(1.0, 2.0, 3.0)];
        let b = [Vec3::new(-1.0, 0.0, 4.0)];
        let result = kabsch(&a, &b).unwrap();
        assert!(is_orthogonal(&result.rotation, 1e-12));
        assert!(max_deviation(&result.transform_points(&a), &b) < 1e-12);
    }
}
