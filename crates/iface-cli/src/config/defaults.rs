use ifacepp::core::search::DEFAULT_CONTACT_CUTOFF;
use ifacepp::core::surface::sasa::{DEFAULT_PROBE_RADIUS, DEFAULT_SPHERE_POINTS};

pub struct DefaultsConfig {
    pub contact_cutoff: f64,
    pub heavy_atoms_only: bool,
    pub include_hetero_contacts: bool,
    pub probe_radius: f64,
    pub sphere_points: usize,
    pub include_hetero_sasa: bool,
    pub skip_sequence_check: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            contact_cutoff: DEFAULT_CONTACT_CUTOFF,
            heavy_atoms_only: true,
            include_hetero_contacts: false,
            probe_radius: DEFAULT_PROBE_RADIUS,
            sphere_points: DEFAULT_SPHERE_POINTS,
            include_hetero_sasa: false,
            skip_sequence_check: false,
        }
    }
}
