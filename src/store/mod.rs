//! Contact persistence
//!
//! The interpreter treats storage as an external collaborator behind the
//! ContactStore trait; the SQLite implementation lives in sqlite.rs.

pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::core::error::Result;

/// One phone book entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// CRUD surface of the phone book
///
/// Lookups and mutations keyed by name or phone match on substrings, so
/// "Joanna" finds a stored "Joanna Smith". Update and delete report how
/// many records the pattern touched; a query matching several contacts
/// touches all of them.
pub trait ContactStore {
    /// Insert a new contact
    fn create(&self, name: &str, phone: &str) -> Result<()>;

    /// First contact whose name contains the query, if any
    fn read_by_name(&self, name: &str) -> Result<Option<Contact>>;

    /// First contact whose phone number contains the query, if any
    fn read_by_phone(&self, phone: &str) -> Result<Option<Contact>>;

    /// Every contact, in insertion order
    fn read_all(&self) -> Result<Vec<Contact>>;

    /// Set the phone number of every contact whose name contains the
    /// query; returns the number of records changed
    fn update(&self, name: &str, phone: &str) -> Result<usize>;

    /// Remove every contact whose name contains the query; returns the
    /// number of records removed
    fn delete(&self, name: &str) -> Result<usize>;
}
