use super::radii::RadiiTable;
use crate::core::models::ids::AtomId;
use crate::core::models::residue::ResidueKind;
use crate::core::models::system::MolecularSystem;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Point3, Vector3};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_SPHERE_POINTS: usize = 100;

#[derive(Debug, Error)]
pub enum SasaError {
    #[error("Surface area calculation exceeded its time limit of {limit:?}")]
    TimedOut { limit: Duration },
    #[error("No van der Waals radius known for element '{element}' (atom '{atom}')")]
    UnknownElement { atom: String, element: String },
    #[error("Invalid calculator setting: {0}")]
    InvalidSetting(String),
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid surface area record in '{path}' at line {line}: {message}")]
    InvalidRecord {
        path: String,
        line: u64,
        message: String,
    },
}

/// An accessible-surface-area service.
///
/// Implementors annotate atoms of the given system with `Atom::sasa`. Atoms the
/// service does not cover are left as `None`; a failed computation is reported
/// as an error and never as a zero area.
pub trait SurfaceAreaCalculator {
    fn annotate(&self, system: &mut MolecularSystem) -> Result<(), SasaError>;
}

/// Shrake-Rupley numerical surface area.
///
/// Each atom is inflated by the probe radius and sampled with `n_points`
/// test points; the exposed area is the fraction of points not buried inside
/// any neighboring inflated sphere. Hydrogens are not part of the
/// calculation, and hetero/water residues only when `include_hetero` is set.
#[derive(Debug, Clone)]
pub struct ShrakeRupley {
    pub probe_radius: f64,
    pub n_points: usize,
    pub radii: RadiiTable,
    pub timeout: Option<Duration>,
    pub include_hetero: bool,
}

impl Default for ShrakeRupley {
    fn default() -> Self {
        Self {
            probe_radius: DEFAULT_PROBE_RADIUS,
            n_points: DEFAULT_SPHERE_POINTS,
            radii: RadiiTable::default(),
            timeout: None,
            include_hetero: false,
        }
    }
}

struct SurfaceAtom {
    id: AtomId,
    center: Point3<f64>,
    radius: f64,
}

impl ShrakeRupley {
    fn collect_atoms(&self, system: &MolecularSystem) -> Result<Vec<SurfaceAtom>, SasaError> {
        let mut atoms = Vec::new();
        for (id, atom) in system.atoms_iter() {
            if atom.is_hydrogen() {
                continue;
            }
            let kind = system
                .residue(atom.residue_id)
                .map(|r| r.kind)
                .unwrap_or(ResidueKind::Hetero);
            if kind != ResidueKind::Standard && !self.include_hetero {
                continue;
            }
            let vdw = self
                .radii
                .radius(&atom.element)
                .ok_or_else(|| SasaError::UnknownElement {
                    atom: atom.name.clone(),
                    element: atom.element.clone(),
                })?;
            atoms.push(SurfaceAtom {
                id,
                center: atom.position,
                radius: vdw + self.probe_radius,
            });
        }
        Ok(atoms)
    }
}

impl SurfaceAreaCalculator for ShrakeRupley {
    #[instrument(skip_all, name = "shrake_rupley")]
    fn annotate(&self, system: &mut MolecularSystem) -> Result<(), SasaError> {
        if self.n_points == 0 {
            return Err(SasaError::InvalidSetting(
                "sphere point count must be positive".to_string(),
            ));
        }
        if !self.probe_radius.is_finite() || self.probe_radius < 0.0 {
            return Err(SasaError::InvalidSetting(format!(
                "probe radius must be non-negative, got {}",
                self.probe_radius
            )));
        }

        let started = Instant::now();
        let atoms = self.collect_atoms(system)?;
        for (_, atom) in system.atoms_iter_mut() {
            atom.sasa = None;
        }
        if atoms.is_empty() {
            debug!("No atoms eligible for surface calculation.");
            return Ok(());
        }

        let sphere = golden_spiral(self.n_points);
        let positions: Vec<[f64; 3]> = atoms
            .iter()
            .map(|a| [a.center.x, a.center.y, a.center.z])
            .collect();
        let tree: KdTree<f64, 3> = (&positions).into();
        let max_radius = atoms.iter().map(|a| a.radius).fold(0.0, f64::max);

        let mut areas = Vec::with_capacity(atoms.len());
        for (index, atom) in atoms.iter().enumerate() {
            if let Some(limit) = self.timeout {
                if started.elapsed() >= limit {
                    return Err(SasaError::TimedOut { limit });
                }
            }

            let reach = atom.radius + max_radius;
            let neighbors: Vec<&SurfaceAtom> = tree
                .within_unsorted::<SquaredEuclidean>(&positions[index], reach * reach)
                .into_iter()
                .map(|n| n.item as usize)
                .filter(|&j| j != index)
                .map(|j| &atoms[j])
                .filter(|other| {
                    let limit = atom.radius + other.radius;
                    (other.center - atom.center).norm_squared() < limit * limit
                })
                .collect();

            let exposed = sphere
                .iter()
                .map(|direction| atom.center + direction * atom.radius)
                .filter(|point| {
                    neighbors
                        .iter()
                        .all(|other| (point - other.center).norm_squared() >= other.radius * other.radius)
                })
                .count();

            let full = 4.0 * std::f64::consts::PI * atom.radius * atom.radius;
            areas.push(full * exposed as f64 / sphere.len() as f64);
        }

        for (atom, area) in atoms.iter().zip(areas) {
            if let Some(target) = system.atom_mut(atom.id) {
                target.sasa = Some(area);
            }
        }
        debug!(atoms = atoms.len(), "Annotated solvent-accessible surface area.");
        Ok(())
    }
}

/// Quasi-uniform unit vectors on a sphere (golden-section spiral).
fn golden_spiral(n: usize) -> Vec<Vector3<f64>> {
    let increment = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|k| {
            let y = 1.0 - (2.0 * k as f64 + 1.0) / n as f64;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = k as f64 * increment;
            Vector3::new(phi.cos() * r, y, phi.sin() * r)
        })
        .collect()
}
