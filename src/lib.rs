//! Provisions the local books database: creates the data directory, then runs the setup and
//! seed SQL scripts against `books.db`.

mod assets;
mod database;
mod error;
mod layout;
mod setup;

pub use assets::ensure_directory;
pub use assets::read_text_asset;
pub use database::Database;
pub use database::TableSummary;
pub use error::Error;
pub use error::Result;
pub use layout::Layout;
pub use layout::DATABASE_FILE;
pub use layout::DATA_DIR;
pub use layout::SCRIPTS_DIR;
pub use layout::SEED_SCRIPT;
pub use layout::SETUP_SCRIPT;
pub use setup::run;
pub use setup::Summary;
