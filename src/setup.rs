use crate::assets::ensure_directory;
use crate::assets::read_text_asset;
use crate::database::Database;
use crate::database::TableSummary;
use crate::error::Result;
use crate::layout::Layout;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

/// State of the database after a successful run.
#[derive(Debug)]
pub struct Summary {
    pub database: PathBuf,
    pub tables: Vec<TableSummary>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.database.display())?;

        for table in &self.tables {
            writeln!(f, "  {table}")?;
        }

        Ok(())
    }
}

/// Provisions the database described by `layout`: creates the data directory, then runs the
/// setup script followed by the seed script against the database file.
///
/// Both scripts are read before the database is opened, so a missing script never leaves a
/// database file behind. A failure part way through leaves whatever the scripts already did.
pub fn run(layout: &Layout) -> Result<Summary> {
    let db_path = layout.database();
    debug!(?layout, "resolved layout");

    ensure_directory(&layout.data_dir)?;

    println!("Setting up database at {}", db_path.display());

    let setup_sql = read_text_asset(&layout.setup_script())?;
    let seed_sql = read_text_asset(&layout.seed_script())?;

    let db = Database::open(&db_path)?;

    println!("Creating tables...");
    db.execute_batch("setup", &setup_sql)?;

    println!("Seeding data...");
    db.execute_batch("seed", &seed_sql)?;

    db.commit()?;

    let database = db.path().to_path_buf();
    let tables = db.tables();

    db.close()?;

    println!("Database setup complete!");

    Ok(summarize(database, tables))
}

/// A failed table listing is logged and leaves the summary without tables.
fn summarize(database: PathBuf, tables: Result<Vec<TableSummary>>) -> Summary {
    let tables = tables.unwrap_or_else(|e| {
        warn!(error = %e, "couldn't list tables");
        vec![]
    });

    Summary { database, tables }
}
