use crossbridge::core::models::config::CrossbridgeKind;
use crossbridge::core::models::lattice::GridSpec;

pub struct DefaultsConfig {
    pub kind: CrossbridgeKind,
    pub output_dir: String,
    pub trials: usize,
    pub seed: u64,
    pub grid: GridSpec,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            kind: CrossbridgeKind::FourSpring,
            output_dir: "data".to_string(),
            trials: 10,
            seed: 0,
            grid: GridSpec::default(),
        }
    }
}
