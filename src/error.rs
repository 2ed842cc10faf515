use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't create directory {}", path.display())]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("SQL script not found: {}", path.display())]
    AssetMissing { path: PathBuf },

    #[error("couldn't read SQL script {}", path.display())]
    AssetUnreadable { path: PathBuf, source: io::Error },

    #[error("couldn't open database {}", path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("{batch} script failed at statement {index}{}", statement_suffix(.statement))]
    Batch {
        batch: String,
        index: usize,
        statement: Option<String>,
        source: rusqlite::Error,
    },

    #[error("couldn't commit changes")]
    Commit(#[source] rusqlite::Error),

    #[error("couldn't close database")]
    Close(#[source] rusqlite::Error),

    #[error("couldn't query database")]
    Query(#[from] rusqlite::Error),
}

fn statement_suffix(statement: &Option<String>) -> String {
    match statement {
        Some(sql) => format!(": {}", sql.trim()),
        None => String::new(),
    }
}
