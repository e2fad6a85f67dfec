use crate::core::constants::PhysicalConstants;
use crate::core::kinetics::RateCalibration;
use crate::core::models::config::{CrossbridgeConfig, CrossbridgeKind, ModelIdentity};
use crate::core::models::grid::{Grid, GridValues};
use crate::core::models::lattice::{AxisRange, GridSpec};
use itertools::Itertools;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info, warn};

const METADATA_FILE: &str = "meta.toml";
const RESERVED_NAMES: [&str; 9] = [
    "kind",
    "config",
    "constants",
    "calibration",
    "grid",
    "d10",
    "modified",
    "grids",
    "scalars",
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to serialize store metadata: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("No stored crossbridge data found at '{path}'")]
    NotFound { path: String },
    #[error("Stored data is for a {found} crossbridge, expected {expected}")]
    KindMismatch {
        expected: CrossbridgeKind,
        found: CrossbridgeKind,
    },
    #[error("Property '{0}' is not stored")]
    UnknownProperty(String),
    #[error("'{0}' is reserved for store metadata")]
    Reserved(String),
    #[error("'{0}' is not a valid property name (use letters, digits, '_' or '-')")]
    InvalidName(String),
    #[error(
        "Grid '{name}' is {rows}x{cols} but the store holds {expected_rows}x{expected_cols} grids"
    )]
    ShapeMismatch {
        name: String,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
    #[error("Stored grid '{path}' is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum GridLayout {
    Scalar,
    Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StoreMetadata {
    kind: CrossbridgeKind,
    modified: u64,
    config: CrossbridgeConfig,
    constants: PhysicalConstants,
    calibration: RateCalibration,
    grid: GridSpec,
    d10: AxisRange,
    #[serde(default)]
    scalars: BTreeMap<String, f64>,
    #[serde(default)]
    grids: BTreeMap<String, GridLayout>,
}

impl StoreMetadata {
    fn fresh(kind: CrossbridgeKind, identity: ModelIdentity, grid: GridSpec) -> Self {
        Self {
            kind,
            config: identity.springs,
            constants: identity.constants,
            calibration: identity.calibration,
            grid,
            d10: grid.lattice.to_d10(),
            modified: now(),
            scalars: BTreeMap::new(),
            grids: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ScalarRecord {
    row: usize,
    col: usize,
    axial_offset: f64,
    lattice_spacing: f64,
    value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct VectorRecord {
    row: usize,
    col: usize,
    axial_offset: f64,
    lattice_spacing: f64,
    fx: f64,
    fy: f64,
}

/// Persistent set of named property grids for one crossbridge variant.
///
/// Lives in `<root>/<n>spring/`: a `meta.toml` describing the configuration and grid
/// ranges the data was computed for, plus one long-format CSV per grid. Changes stay
/// in memory until [`GridStore::save`].
#[derive(Debug)]
pub struct GridStore {
    dir: PathBuf,
    meta: StoreMetadata,
    grids: BTreeMap<String, GridValues>,
}

impl GridStore {
    pub fn directory_for(root: &Path, kind: CrossbridgeKind) -> PathBuf {
        root.join(format!("{}spring", kind.spring_count()))
    }

    /// Opens the store for writing results computed with `identity` over `grid`.
    ///
    /// A missing store is created. An existing store computed for different springs,
    /// physical constants, rate calibration or ranges is discarded.
    pub fn open(
        root: &Path,
        kind: CrossbridgeKind,
        identity: &ModelIdentity,
        grid: &GridSpec,
    ) -> Result<Self, StoreError> {
        let dir = Self::directory_for(root, kind);
        let meta_path = dir.join(METADATA_FILE);

        if !meta_path.exists() {
            info!(
                "No stored data at {:?}, creating a new {} store.",
                dir, kind
            );
            let mut store = Self {
                dir,
                meta: StoreMetadata::fresh(kind, *identity, *grid),
                grids: BTreeMap::new(),
            };
            store.save()?;
            return Ok(store);
        }

        let mut store = Self::load(dir, kind)?;
        let stored = store.identity();
        let reason = if stored.springs != identity.springs {
            Some("Crossbridge configuration")
        } else if stored.constants != identity.constants {
            Some("Physical constants")
        } else if stored.calibration != identity.calibration {
            Some("Rate calibration")
        } else if store.meta.grid != *grid {
            Some("Grid ranges")
        } else {
            None
        };
        if let Some(changed) = reason {
            warn!("{} changed, discarding previously stored grids.", changed);
            store.trash(kind, *identity, *grid)?;
        }
        Ok(store)
    }

    /// Opens a store for reading only what was saved before.
    pub fn open_existing(root: &Path, kind: CrossbridgeKind) -> Result<Self, StoreError> {
        let dir = Self::directory_for(root, kind);
        if !dir.join(METADATA_FILE).exists() {
            return Err(StoreError::NotFound {
                path: dir.to_string_lossy().to_string(),
            });
        }
        Self::load(dir, kind)
    }

    fn load(dir: PathBuf, kind: CrossbridgeKind) -> Result<Self, StoreError> {
        let meta_path = dir.join(METADATA_FILE);
        let content = std::fs::read_to_string(&meta_path).map_err(|e| StoreError::Io {
            path: path_string(&meta_path),
            source: e,
        })?;
        let meta: StoreMetadata = toml::from_str(&content).map_err(|e| StoreError::Toml {
            path: path_string(&meta_path),
            source: e,
        })?;
        if meta.kind != kind {
            return Err(StoreError::KindMismatch {
                expected: kind,
                found: meta.kind,
            });
        }

        let rows = meta.grid.rows();
        let cols = meta.grid.cols();
        let mut grids = BTreeMap::new();
        for (name, layout) in &meta.grids {
            let path = dir.join(format!("{}.csv", name));
            let values = match layout {
                GridLayout::Scalar => read_scalar_grid(&path, rows, cols)?,
                GridLayout::Vector => read_vector_grid(&path, rows, cols)?,
            };
            grids.insert(name.clone(), values);
        }
        debug!("Loaded {} stored grid(s) from {:?}", grids.len(), dir);

        Ok(Self { dir, meta, grids })
    }

    fn trash(
        &mut self,
        kind: CrossbridgeKind,
        identity: ModelIdentity,
        grid: GridSpec,
    ) -> Result<(), StoreError> {
        for name in self.meta.grids.keys() {
            let path = self.grid_path(name);
            if path.exists() {
                std::fs::remove_file(&path).map_err(|e| StoreError::Io {
                    path: path_string(&path),
                    source: e,
                })?;
            }
        }
        self.grids.clear();
        self.meta = StoreMetadata::fresh(kind, identity, grid);
        self.save()
    }

    pub fn directory(&self) -> &Path {
        &self.dir
    }

    pub fn kind(&self) -> CrossbridgeKind {
        self.meta.kind
    }

    pub fn config(&self) -> &CrossbridgeConfig {
        &self.meta.config
    }

    pub fn identity(&self) -> ModelIdentity {
        ModelIdentity {
            springs: self.meta.config,
            constants: self.meta.constants,
            calibration: self.meta.calibration,
        }
    }

    pub fn grid_spec(&self) -> &GridSpec {
        &self.meta.grid
    }

    pub fn d10_range(&self) -> &AxisRange {
        &self.meta.d10
    }

    /// Names of everything stored, grids and scalars alike, sorted.
    pub fn list(&self) -> Vec<&str> {
        self.grids
            .keys()
            .chain(self.meta.scalars.keys())
            .map(String::as_str)
            .sorted_unstable()
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<&GridValues, StoreError> {
        self.grids
            .get(name)
            .ok_or_else(|| StoreError::UnknownProperty(name.to_string()))
    }

    pub fn scalar(&self, name: &str) -> Result<f64, StoreError> {
        self.meta
            .scalars
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::UnknownProperty(name.to_string()))
    }

    pub fn write(&mut self, name: &str, values: GridValues) -> Result<(), StoreError> {
        validate_name(name)?;
        let expected_rows = self.meta.grid.rows();
        let expected_cols = self.meta.grid.cols();
        if values.rows() != expected_rows || values.cols() != expected_cols {
            return Err(StoreError::ShapeMismatch {
                name: name.to_string(),
                rows: values.rows(),
                cols: values.cols(),
                expected_rows,
                expected_cols,
            });
        }
        let layout = if values.is_vector() {
            GridLayout::Vector
        } else {
            GridLayout::Scalar
        };
        self.meta.scalars.remove(name);
        self.meta.grids.insert(name.to_string(), layout);
        self.grids.insert(name.to_string(), values);
        Ok(())
    }

    pub fn write_scalar(&mut self, name: &str, value: f64) -> Result<(), StoreError> {
        validate_name(name)?;
        self.meta.grids.remove(name);
        self.grids.remove(name);
        self.meta.scalars.insert(name.to_string(), value);
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            path: path_string(&self.dir),
            source: e,
        })?;

        for (name, values) in &self.grids {
            let path = self.grid_path(name);
            match values {
                GridValues::Scalar(grid) => write_scalar_grid(&path, grid, &self.meta.grid)?,
                GridValues::Vector(grid) => write_vector_grid(&path, grid, &self.meta.grid)?,
            }
        }

        self.meta.modified = now();
        let meta_path = self.dir.join(METADATA_FILE);
        let content = toml::to_string(&self.meta)?;
        std::fs::write(&meta_path, content).map_err(|e| StoreError::Io {
            path: path_string(&meta_path),
            source: e,
        })?;
        info!("Saved {} grid(s) to {:?}", self.grids.len(), self.dir);
        Ok(())
    }

    fn grid_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if RESERVED_NAMES.contains(&name) {
        return Err(StoreError::Reserved(name.to_string()));
    }
    let well_formed = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !well_formed {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> StoreError + '_ {
    move |e| StoreError::Csv {
        path: path_string(path),
        source: e,
    }
}

fn write_scalar_grid(path: &Path, grid: &Grid<f64>, spec: &GridSpec) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error(path))?;
    for (row, col, &value) in grid.indexed() {
        let head = spec.head_location(row, col);
        writer
            .serialize(ScalarRecord {
                row,
                col,
                axial_offset: head.x,
                lattice_spacing: head.y,
                value,
            })
            .map_err(csv_error(path))?;
    }
    writer.flush().map_err(|e| StoreError::Io {
        path: path_string(path),
        source: e,
    })
}

fn write_vector_grid(
    path: &Path,
    grid: &Grid<Vector2<f64>>,
    spec: &GridSpec,
) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error(path))?;
    for (row, col, value) in grid.indexed() {
        let head = spec.head_location(row, col);
        writer
            .serialize(VectorRecord {
                row,
                col,
                axial_offset: head.x,
                lattice_spacing: head.y,
                fx: value.x,
                fy: value.y,
            })
            .map_err(csv_error(path))?;
    }
    writer.flush().map_err(|e| StoreError::Io {
        path: path_string(path),
        source: e,
    })
}

fn read_scalar_grid(path: &Path, rows: usize, cols: usize) -> Result<GridValues, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error(path))?;
    let mut cells = vec![None; rows * cols];
    for result in reader.deserialize::<ScalarRecord>() {
        let record = result.map_err(csv_error(path))?;
        place(path, &mut cells, rows, cols, record.row, record.col, record.value)?;
    }
    assemble(path, rows, cols, cells).map(GridValues::Scalar)
}

fn read_vector_grid(path: &Path, rows: usize, cols: usize) -> Result<GridValues, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error(path))?;
    let mut cells = vec![None; rows * cols];
    for result in reader.deserialize::<VectorRecord>() {
        let record = result.map_err(csv_error(path))?;
        let value = Vector2::new(record.fx, record.fy);
        place(path, &mut cells, rows, cols, record.row, record.col, value)?;
    }
    assemble(path, rows, cols, cells).map(GridValues::Vector)
}

fn place<T>(
    path: &Path,
    cells: &mut [Option<T>],
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
    value: T,
) -> Result<(), StoreError> {
    if row >= rows || col >= cols {
        return Err(StoreError::Corrupt {
            path: path_string(path),
            reason: format!("cell ({}, {}) lies outside a {}x{} grid", row, col, rows, cols),
        });
    }
    cells[row * cols + col] = Some(value);
    Ok(())
}

fn assemble<T>(
    path: &Path,
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
) -> Result<Grid<T>, StoreError> {
    let missing = cells.iter().filter(|c| c.is_none()).count();
    if missing > 0 {
        return Err(StoreError::Corrupt {
            path: path_string(path),
            reason: format!("{} of {} cells are missing", missing, rows * cols),
        });
    }
    let data = cells.into_iter().flatten().collect();
    Grid::from_vec(rows, cols, data).ok_or_else(|| StoreError::Corrupt {
        path: path_string(path),
        reason: "cell count does not match grid shape".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn small_grid() -> GridSpec {
        GridSpec::new(AxisRange::new(0.0, 3.0, 1.0), AxisRange::new(10.0, 12.0, 1.0)).unwrap()
    }

    fn energies() -> GridValues {
        GridValues::Scalar(Grid::from_fn(2, 3, |row, col| (row * 3 + col) as f64 * 0.5))
    }

    fn forces() -> GridValues {
        GridValues::Vector(Grid::from_fn(2, 3, |row, col| {
            Vector2::new(row as f64, -(col as f64))
        }))
    }

    #[test]
    fn open_creates_store_directory_with_metadata() {
        let root = tempdir().unwrap();
        let config = ModelIdentity::reference(CrossbridgeKind::FourSpring);
        let store =
            GridStore::open(root.path(), CrossbridgeKind::FourSpring, &config, &small_grid())
                .unwrap();
        assert!(store.directory().ends_with("4spring"));
        assert!(store.directory().join(METADATA_FILE).exists());
        assert!(store.list().is_empty());
        assert_eq!(store.d10_range(), &small_grid().lattice.to_d10());
    }

    #[test]
    fn saved_grids_are_read_back_exactly() {
        let root = tempdir().unwrap();
        let config = ModelIdentity::reference(CrossbridgeKind::FourSpring);
        let grid = small_grid();
        let mut store =
            GridStore::open(root.path(), CrossbridgeKind::FourSpring, &config, &grid).unwrap();
        store.write("energy", energies()).unwrap();
        store.write("force1", forces()).unwrap();
        store.write_scalar("trials", 10.0).unwrap();
        store.save().unwrap();

        let reopened = GridStore::open_existing(root.path(), CrossbridgeKind::FourSpring).unwrap();
        assert_eq!(reopened.list(), vec!["energy", "force1", "trials"]);
        assert_eq!(reopened.get("energy").unwrap(), &energies());
        assert_eq!(reopened.get("force1").unwrap(), &forces());
        assert_eq!(reopened.scalar("trials").unwrap(), 10.0);
        assert_eq!(reopened.identity(), config);
        assert_eq!(reopened.config(), &config.springs);
    }

    #[test]
    fn nan_sentinels_survive_a_save() {
        let root = tempdir().unwrap();
        let config = ModelIdentity::reference(CrossbridgeKind::TwoSpring);
        let grid = small_grid();
        let mut store =
            GridStore::open(root.path(), CrossbridgeKind::TwoSpring, &config, &grid).unwrap();
        let with_gap = GridValues::Scalar(Grid::from_fn(2, 3, |row, col| {
            if row == 1 && col == 1 { f64::NAN } else { 1.0 }
        }));
        store.write("r23", with_gap).unwrap();
        store.save().unwrap();

        let reopened = GridStore::open_existing(root.path(), CrossbridgeKind::TwoSpring).unwrap();
        assert_eq!(reopened.get("r23").unwrap().nan_count(), 1);
    }

    #[test]
    fn changed_config_discards_stored_grids() {
        let root = tempdir().unwrap();
        let config = ModelIdentity::reference(CrossbridgeKind::FourSpring);
        let grid = small_grid();
        let mut store =
            GridStore::open(root.path(), CrossbridgeKind::FourSpring, &config, &grid).unwrap();
        store.write("energy", energies()).unwrap();
        store.save().unwrap();
        let csv_path = store.directory().join("energy.csv");
        assert!(csv_path.exists());

        let mut altered = config;
        altered.springs.neck_length.stiffness = 11.0;
        let store =
            GridStore::open(root.path(), CrossbridgeKind::FourSpring, &altered, &grid).unwrap();
        assert!(store.list().is_empty());
        assert!(!csv_path.exists());
        assert_eq!(store.identity(), altered);
    }

    #[test]
    fn changed_constants_or_calibration_discard_stored_grids() {
        let root = tempdir().unwrap();
        let identity = ModelIdentity::reference(CrossbridgeKind::FourSpring);
        let grid = small_grid();

        let mut warmer = identity;
        warmer.constants.temperature = 310.0;
        let mut floored = identity;
        floored.calibration.r31_floor = 5.0;

        for altered in [warmer, floored] {
            let mut store =
                GridStore::open(root.path(), CrossbridgeKind::FourSpring, &identity, &grid)
                    .unwrap();
            store.write("r31", energies()).unwrap();
            store.save().unwrap();

            let mut store =
                GridStore::open(root.path(), CrossbridgeKind::FourSpring, &altered, &grid)
                    .unwrap();
            assert!(store.list().is_empty());
            store.write("r23", energies()).unwrap();
            store.save().unwrap();

            let reopened =
                GridStore::open_existing(root.path(), CrossbridgeKind::FourSpring).unwrap();
            assert_eq!(reopened.list(), vec!["r23"]);
            assert_eq!(reopened.identity(), altered);
        }
    }

    #[test]
    fn changed_ranges_discard_stored_grids() {
        let root = tempdir().unwrap();
        let config = ModelIdentity::reference(CrossbridgeKind::FourSpring);
        let mut store =
            GridStore::open(root.path(), CrossbridgeKind::FourSpring, &config, &small_grid())
                .unwrap();
        store.write("energy", energies()).unwrap();
        store.save().unwrap();

        let wider =
            GridSpec::new(AxisRange::new(0.0, 4.0, 1.0), AxisRange::new(10.0, 12.0, 1.0)).unwrap();
        let store =
            GridStore::open(root.path(), CrossbridgeKind::FourSpring, &config, &wider).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn matching_config_keeps_stored_grids() {
        let root = tempdir().unwrap();
        let config = ModelIdentity::reference(CrossbridgeKind::OneSpring);
        let grid = small_grid();
        let mut store =
            GridStore::open(root.path(), CrossbridgeKind::OneSpring, &config, &grid).unwrap();
        store.write("energy", energies()).unwrap();
        store.save().unwrap();

        let store =
            GridStore::open(root.path(), CrossbridgeKind::OneSpring, &config, &grid).unwrap();
        assert_eq!(store.list(), vec!["energy"]);
    }

    #[test]
    fn open_existing_fails_when_nothing_was_stored() {
        let root = tempdir().unwrap();
        let result = GridStore::open_existing(root.path(), CrossbridgeKind::FourSpring);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn reserved_and_malformed_names_are_rejected() {
        let root = tempdir().unwrap();
        let mut store = GridStore::open(
            root.path(),
            CrossbridgeKind::FourSpring,
            &ModelIdentity::reference(CrossbridgeKind::FourSpring),
            &small_grid(),
        )
        .unwrap();
        assert!(matches!(
            store.write("config", energies()),
            Err(StoreError::Reserved(_))
        ));
        assert!(matches!(
            store.write_scalar("calibration", 1.0),
            Err(StoreError::Reserved(_))
        ));
        assert!(matches!(
            store.write("../escape", energies()),
            Err(StoreError::InvalidName(_))
        ));
        assert!(matches!(
            store.write_scalar("", 1.0),
            Err(StoreError::InvalidName(_))
        ));
    }

    #[test]
    fn wrongly_shaped_grid_is_rejected() {
        let root = tempdir().unwrap();
        let mut store = GridStore::open(
            root.path(),
            CrossbridgeKind::FourSpring,
            &ModelIdentity::reference(CrossbridgeKind::FourSpring),
            &small_grid(),
        )
        .unwrap();
        let wrong = GridValues::Scalar(Grid::from_fn(3, 3, |_, _| 0.0));
        assert!(matches!(
            store.write("energy", wrong),
            Err(StoreError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn unknown_property_lookup_fails() {
        let root = tempdir().unwrap();
        let store = GridStore::open(
            root.path(),
            CrossbridgeKind::FourSpring,
            &ModelIdentity::reference(CrossbridgeKind::FourSpring),
            &small_grid(),
        )
        .unwrap();
        assert!(matches!(
            store.get("r99"),
            Err(StoreError::UnknownProperty(_))
        ));
        assert!(matches!(
            store.scalar("trials"),
            Err(StoreError::UnknownProperty(_))
        ));
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let root = tempdir().unwrap();
        GridStore::open(
            root.path(),
            CrossbridgeKind::TwoSpring,
            &ModelIdentity::reference(CrossbridgeKind::TwoSpring),
            &small_grid(),
        )
        .unwrap();
        let meta = GridStore::directory_for(root.path(), CrossbridgeKind::TwoSpring)
            .join(METADATA_FILE);
        let four_dir = GridStore::directory_for(root.path(), CrossbridgeKind::FourSpring);
        fs::create_dir_all(&four_dir).unwrap();
        fs::copy(&meta, four_dir.join(METADATA_FILE)).unwrap();

        let result = GridStore::open_existing(root.path(), CrossbridgeKind::FourSpring);
        assert!(matches!(
            result,
            Err(StoreError::KindMismatch {
                expected: CrossbridgeKind::FourSpring,
                found: CrossbridgeKind::TwoSpring
            })
        ));
    }

    #[test]
    fn truncated_csv_is_reported_as_corrupt() {
        let root = tempdir().unwrap();
        let config = ModelIdentity::reference(CrossbridgeKind::FourSpring);
        let mut store =
            GridStore::open(root.path(), CrossbridgeKind::FourSpring, &config, &small_grid())
                .unwrap();
        store.write("energy", energies()).unwrap();
        store.save().unwrap();
        let csv_path = store.directory().join("energy.csv");
        let content = fs::read_to_string(&csv_path).unwrap();
        let truncated: Vec<&str> = content.lines().take(3).collect();
        fs::write(&csv_path, truncated.join("\n")).unwrap();

        let result = GridStore::open_existing(root.path(), CrossbridgeKind::FourSpring);
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
