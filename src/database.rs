use crate::error::Error;
use crate::error::Result;
use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::Batch;
use rusqlite::Connection;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub rows: u64,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let noun = if self.rows == 1 { "row" } else { "rows" };
        write!(f, "{}: {} {noun}", self.name, self.rows)
    }
}

impl Database {
    /// Opens the database file at `path`, creating an empty one if it doesn't exist. The parent
    /// directory has to exist already.
    pub fn open(path: &Path) -> Result<Self> {
        let open_err = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open(path).map_err(open_err)?;

        let journal_mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(open_err)?;

        debug!(path = %path.display(), journal_mode = %journal_mode, "opened database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Executes each statement of `sql` in order, stopping at the first one which fails. Rows
    /// returned by a statement are discarded. `name` identifies the batch in errors.
    pub fn execute_batch(&self, name: &str, sql: &str) -> Result<()> {
        let mut batch = Batch::new(&self.conn, sql);
        let mut index = 0;

        let batch_err = |index, statement, source| Error::Batch {
            batch: name.to_string(),
            index,
            statement,
            source,
        };

        loop {
            index += 1;

            let mut stmt = match batch.next() {
                Ok(Some(stmt)) => stmt,
                Ok(None) => break,
                Err(e) => return Err(batch_err(index, None, e)),
            };

            let text = stmt.expanded_sql();

            let result = stmt.query([]).and_then(|mut rows| {
                while rows.next()?.is_some() {}
                Ok(())
            });

            if let Err(e) = result {
                return Err(batch_err(index, text, e));
            }
        }

        debug!(batch = name, statements = index - 1, "executed batch");

        Ok(())
    }

    /// Makes every change durable. Statements outside an explicit transaction are committed as
    /// they run, so this only has work to do when a batch left a transaction open.
    pub fn commit(&self) -> Result<()> {
        if !self.conn.is_autocommit() {
            debug!("committing open transaction");
            self.conn.execute_batch("COMMIT").map_err(Error::Commit)?;
        }

        Ok(())
    }

    /// User tables in the database, ordered by name, with their row counts.
    pub fn tables(&self) -> Result<Vec<TableSummary>> {
        let mut stmt = self.conn.prepare(
            "
            SELECT name
            FROM sqlite_schema
            WHERE type = 'table' AND substr(name, 1, 7) != 'sqlite_'
            ORDER BY name
            ",
        )?;

        let iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let names: Result<Vec<String>, rusqlite::Error> = iter.collect();

        let mut tables = vec![];
        for name in names? {
            let rows: u64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM \"{}\"", name.replace('"', "\"\"")),
                [],
                |row| row.get(0),
            )?;

            tables.push(TableSummary { name, rows });
        }

        Ok(tables)
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Close(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (Database, TempDir) {
        let tmp = TempDir::new().unwrap();
        let db = Database::open(&tmp.path().join("books.db")).unwrap();

        (db, tmp)
    }

    #[test]
    fn open_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.db");

        let db = Database::open(&path).unwrap();

        assert!(path.is_file());
        assert_eq!(db.path(), path.as_path());
        db.close().unwrap();
    }

    #[test]
    fn open_without_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data").join("books.db");

        let err = Database::open(&path).err().unwrap();

        assert!(matches!(err, Error::Open { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn open_enables_wal_without_foreign_keys() {
        let (db, _tmp) = open_temp();

        let journal_mode: String = db
            .conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        let foreign_keys: bool = db
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(journal_mode, "wal");
        assert!(!foreign_keys);
    }

    #[test]
    fn batch_runs_in_order() {
        let (db, _tmp) = open_temp();

        db.execute_batch(
            "setup",
            "
            CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT);
            INSERT INTO books (title) VALUES ('Dune');
            UPDATE books SET title = title || ' Messiah';
            ",
        )
        .unwrap();

        let title: String = db
            .conn
            .query_row("SELECT title FROM books", [], |row| row.get(0))
            .unwrap();
        assert_eq!(title, "Dune Messiah");
    }

    #[test]
    fn batch_with_rows_and_comments() {
        let (db, _tmp) = open_temp();

        db.execute_batch(
            "setup",
            "
            -- pragmas return rows
            PRAGMA user_version = 3;
            PRAGMA user_version;
            SELECT 1;
            -- trailing comment
            ",
        )
        .unwrap();

        let version: u32 = db
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 3);
    }

    #[test]
    fn empty_batch() {
        let (db, _tmp) = open_temp();

        db.execute_batch("seed", "").unwrap();
        db.execute_batch("seed", "  \n-- nothing here\n").unwrap();
    }

    #[test]
    fn batch_stops_at_failing_statement() {
        let (db, _tmp) = open_temp();

        let err = db
            .execute_batch(
                "seed",
                "
                CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT NOT NULL);
                INSERT INTO books (title) VALUES (NULL);
                INSERT INTO books (title) VALUES ('never');
                ",
            )
            .unwrap_err();

        match err {
            Error::Batch {
                batch,
                index,
                statement,
                ..
            } => {
                assert_eq!(batch, "seed");
                assert_eq!(index, 2);
                assert!(statement.unwrap().contains("VALUES (NULL)"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let count: u32 = db
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn batch_syntax_error_has_no_statement() {
        let (db, _tmp) = open_temp();

        let err = db
            .execute_batch("setup", "CREATE TABLE a (x); CREAT TABLE b (y);")
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Batch {
                index: 2,
                statement: None,
                ..
            }
        ));
        assert_eq!(db.tables().unwrap().len(), 1);
    }

    #[test]
    fn commit_closes_open_transaction() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.db");

        let db = Database::open(&path).unwrap();
        db.execute_batch(
            "seed",
            "
            CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT);
            BEGIN;
            INSERT INTO books (title) VALUES ('Dune');
            ",
        )
        .unwrap();
        assert!(!db.conn.is_autocommit());

        db.commit().unwrap();
        assert!(db.conn.is_autocommit());
        db.close().unwrap();

        let db = Database::open(&path).unwrap();
        assert_eq!(
            db.tables().unwrap(),
            vec![TableSummary {
                name: "books".to_string(),
                rows: 1
            }]
        );
    }

    #[test]
    fn commit_in_autocommit_mode() {
        let (db, _tmp) = open_temp();

        db.commit().unwrap();
    }

    #[test]
    fn tables_skip_internal_tables() {
        let (db, _tmp) = open_temp();

        db.execute_batch(
            "setup",
            "
            CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, email TEXT);
            CREATE TABLE \"odd \"\"name\" (x);
            CREATE TABLE sqliteXlog (x);
            INSERT INTO users (email) VALUES ('a@example.com'), ('b@example.com');
            ",
        )
        .unwrap();

        let tables = db.tables().unwrap();

        assert_eq!(
            tables,
            vec![
                TableSummary {
                    name: "odd \"name".to_string(),
                    rows: 0
                },
                TableSummary {
                    name: "sqliteXlog".to_string(),
                    rows: 0
                },
                TableSummary {
                    name: "users".to_string(),
                    rows: 2
                },
            ]
        );
        assert_eq!(tables[2].to_string(), "users: 2 rows");
    }
}
