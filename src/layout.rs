use std::path::Path;
use std::path::PathBuf;

pub const DATA_DIR: &str = "data";
pub const SCRIPTS_DIR: &str = "scripts";
pub const DATABASE_FILE: &str = "books.db";
pub const SETUP_SCRIPT: &str = "01-setup-database.sql";
pub const SEED_SCRIPT: &str = "02-seed-data.sql";

/// Where a setup run reads its scripts from and writes its database to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub data_dir: PathBuf,
    pub scripts_dir: PathBuf,
}

impl Layout {
    /// The default `data/` and `scripts/` directories under `base`.
    pub fn new(base: &Path) -> Self {
        Self::resolve(base, Path::new(DATA_DIR), Path::new(SCRIPTS_DIR))
    }

    /// Resolves `data_dir` and `scripts_dir` against `base`. Absolute paths are kept as given.
    pub fn resolve(base: &Path, data_dir: &Path, scripts_dir: &Path) -> Self {
        Self {
            data_dir: base.join(data_dir),
            scripts_dir: base.join(scripts_dir),
        }
    }

    pub fn database(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn setup_script(&self) -> PathBuf {
        self.scripts_dir.join(SETUP_SCRIPT)
    }

    pub fn seed_script(&self) -> PathBuf {
        self.scripts_dir.join(SEED_SCRIPT)
    }
}
