//! SQLite-backed contact store
//!
//! Each operation is a single statement, atomic on its own. Substring
//! matching uses LIKE, which is case-insensitive for ASCII; `%` and `_`
//! in a query act as LIKE wildcards.

use crate::core::error::Result;
use crate::store::{Contact, ContactStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Contact store over a SQLite database file
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at the given path, creating it (and the contacts
    /// table) if missing
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                phone TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }
}

/// LIKE pattern matching any value containing the query
fn contains_pattern(query: &str) -> String {
    format!("%{}%", query)
}

impl ContactStore for SqliteStore {
    fn create(&self, name: &str, phone: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO contacts (name, phone) VALUES (?1, ?2)",
            params![name, phone],
        )?;
        Ok(())
    }

    fn read_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                "SELECT name, phone FROM contacts WHERE name LIKE ?1 ORDER BY id LIMIT 1",
                params![contains_pattern(name)],
                |row| {
                    Ok(Contact {
                        name: row.get(0)?,
                        phone: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(contact)
    }

    fn read_by_phone(&self, phone: &str) -> Result<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                "SELECT name, phone FROM contacts WHERE phone LIKE ?1 ORDER BY id LIMIT 1",
                params![contains_pattern(phone)],
                |row| {
                    Ok(Contact {
                        name: row.get(0)?,
                        phone: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(contact)
    }

    fn read_all(&self) -> Result<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, phone FROM contacts ORDER BY id")?;
        let contacts = stmt
            .query_map([], |row| {
                Ok(Contact {
                    name: row.get(0)?,
                    phone: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn update(&self, name: &str, phone: &str) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE contacts SET phone = ?1 WHERE name LIKE ?2",
            params![phone, contains_pattern(name)],
        )?;
        Ok(rows)
    }

    fn delete(&self, name: &str) -> Result<usize> {
        let rows = self.conn.execute(
            "DELETE FROM contacts WHERE name LIKE ?1",
            params![contains_pattern(name)],
        )?;
        Ok(rows)
    }
}
