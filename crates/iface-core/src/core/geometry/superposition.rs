use nalgebra::{Matrix3, Point3, Rotation3, SVD, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SuperpositionError {
    #[error("Coordinate sets must have the same length ({reference} vs {mobile} points)")]
    LengthMismatch { reference: usize, mobile: usize },
    #[error("Cannot superimpose empty coordinate sets")]
    Empty,
    #[error("Singular value decomposition failed to produce {0}")]
    DecompositionFailed(&'static str),
}

/// Rigid-body transform that maps mobile coordinates onto the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
    /// Root-mean-square deviation after applying the transform, in Angstroms.
    pub rmsd: f64,
}

impl Superposition {
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.rotation * point + self.translation
    }
}

/// A least-squares rigid superposition service.
///
/// Given two equal-length, positionally paired coordinate lists, implementors
/// find the rotation and translation of `mobile` minimizing the squared
/// distance to `reference`.
pub trait Superimposer {
    fn superimpose(
        &self,
        reference: &[Point3<f64>],
        mobile: &[Point3<f64>],
    ) -> Result<Superposition, SuperpositionError>;
}

/// Kabsch superposition via singular value decomposition of the cross-covariance matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct KabschSuperimposer;

impl Superimposer for KabschSuperimposer {
    fn superimpose(
        &self,
        reference: &[Point3<f64>],
        mobile: &[Point3<f64>],
    ) -> Result<Superposition, SuperpositionError> {
        if reference.len() != mobile.len() {
            return Err(SuperpositionError::LengthMismatch {
                reference: reference.len(),
                mobile: mobile.len(),
            });
        }
        if reference.is_empty() {
            return Err(SuperpositionError::Empty);
        }

        let reference_centroid = centroid(reference);
        let mobile_centroid = centroid(mobile);

        let mut covariance = Matrix3::<f64>::zeros();
        for (r, m) in reference.iter().zip(mobile) {
            covariance += (m - mobile_centroid) * (r - reference_centroid).transpose();
        }

        let svd = SVD::new(covariance, true, true);
        let u = svd.u.ok_or(SuperpositionError::DecompositionFailed("U"))?;
        let v_t = svd
            .v_t
            .ok_or(SuperpositionError::DecompositionFailed("V^T"))?;

        // Flip the axis of the smallest singular value if the result would be a reflection.
        let mut correction = Matrix3::<f64>::identity();
        if (v_t.transpose() * u.transpose()).determinant() < 0.0 {
            let smallest = svd.singular_values.imin();
            correction[(smallest, smallest)] = -1.0;
        }

        let rotation =
            Rotation3::from_matrix_unchecked(v_t.transpose() * correction * u.transpose());
        let translation = reference_centroid.coords - rotation * mobile_centroid.coords;

        let squared_sum: f64 = reference
            .iter()
            .zip(mobile)
            .map(|(r, m)| (rotation * m + translation - r).norm_squared())
            .sum();
        let rmsd = (squared_sum / reference.len() as f64).sqrt();

        Ok(Superposition {
            rotation,
            translation,
            rmsd,
        })
    }
}

fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}
