//! Map an accepted intent proposal to exactly one store operation
//!
//! The dispatch table is exhaustive over ContactAction. A proposal that
//! names a known action but is missing a required field is not executable
//! and gets the "couldn't understand" reply without touching the store.
//! Store faults are logged and reported as a generic failure line.

use crate::core::error::Result;
use crate::llm::extractor::{ContactAction, IntentProposal};
use crate::store::{Contact, ContactStore};

/// Reply when the action is unknown or a required field is missing
pub const MSG_NOT_UNDERSTOOD: &str = "I couldn't understand that command. Please try again.";

/// Reply when the store itself fails
pub const MSG_STORE_FAILURE: &str =
    "An error occurred while accessing the phone book. Please try again.";

/// Reply for a listing over an empty store
pub const MSG_EMPTY_BOOK: &str = "Phone book is empty";

/// Executes accepted proposals against a contact store
pub struct ActionDispatcher;

impl ActionDispatcher {
    /// Execute an accepted proposal, producing the reply text
    ///
    /// Performs exactly one store call for an executable proposal and none
    /// otherwise. Never returns an error; failures become reply text.
    pub fn dispatch<S: ContactStore>(store: &S, proposal: &IntentProposal) -> String {
        if !proposal.is_executable() {
            return MSG_NOT_UNDERSTOOD.to_string();
        }

        let name = proposal.name.as_deref();
        let phone = proposal.phone.as_deref();

        let result = match (proposal.action, name, phone) {
            (ContactAction::Add, Some(name), Some(phone)) => Self::add(store, name, phone),
            (ContactAction::Get, Some(name), _) => Self::get(store, name),
            (ContactAction::GetByPhone, _, Some(phone)) => Self::get_by_phone(store, phone),
            (ContactAction::List, _, _) => Self::list(store),
            (ContactAction::Update, Some(name), Some(phone)) => Self::update(store, name, phone),
            (ContactAction::Delete, Some(name), _) => Self::delete(store, name),
            // is_executable() rules these out
            _ => return MSG_NOT_UNDERSTOOD.to_string(),
        };

        result.unwrap_or_else(|e| {
            tracing::error!("store operation failed: {}", e);
            MSG_STORE_FAILURE.to_string()
        })
    }

    fn add<S: ContactStore>(store: &S, name: &str, phone: &str) -> Result<String> {
        store.create(name, phone)?;
        Ok(format!("Added {} with phone number {}", name, phone))
    }

    fn get<S: ContactStore>(store: &S, name: &str) -> Result<String> {
        Ok(match store.read_by_name(name)? {
            Some(contact) => format!("{}'s phone number is {}", name, contact.phone),
            None => not_found(name),
        })
    }

    fn get_by_phone<S: ContactStore>(store: &S, phone: &str) -> Result<String> {
        Ok(match store.read_by_phone(phone)? {
            Some(contact) => format!("The number {} belongs to {}", phone, contact.name),
            None => format!("No contact found with phone number {}", phone),
        })
    }

    fn list<S: ContactStore>(store: &S) -> Result<String> {
        Ok(render_phone_book(&store.read_all()?))
    }

    fn update<S: ContactStore>(store: &S, name: &str, phone: &str) -> Result<String> {
        let rows = store.update(name, phone)?;
        if rows > 1 {
            tracing::warn!("update pattern {:?} changed {} contacts", name, rows);
        }
        Ok(if rows > 0 {
            format!("Updated {}'s phone number to {}", name, phone)
        } else {
            not_found(name)
        })
    }

    fn delete<S: ContactStore>(store: &S, name: &str) -> Result<String> {
        let rows = store.delete(name)?;
        if rows > 1 {
            tracing::warn!("delete pattern {:?} removed {} contacts", name, rows);
        }
        Ok(if rows > 0 {
            format!("Deleted contact for {}", name)
        } else {
            not_found(name)
        })
    }
}

/// Miss reply shared by the name-keyed operations
fn not_found(name: &str) -> String {
    format!("No contact found for {}", name)
}

/// Render the full book, one "name: phone" line per contact
pub fn render_phone_book(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return MSG_EMPTY_BOOK.to_string();
    }

    let mut out = String::from("Phone Book:\n");
    for contact in contacts {
        out.push_str(&contact.name);
        out.push_str(": ");
        out.push_str(&contact.phone);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BookError;
    use crate::store::SqliteStore;

    fn proposal(
        action: ContactAction,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> IntentProposal {
        IntentProposal {
            action,
            name: name.map(String::from),
            phone: phone.map(String::from),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_add() {
        let store = SqliteStore::open_in_memory().unwrap();
        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::Add, Some("John"), Some("123456789")),
        );
        assert_eq!(reply, "Added John with phone number 123456789");
        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_get_hit_and_miss() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("Joanna Smith", "222333444").unwrap();

        let reply =
            ActionDispatcher::dispatch(&store, &proposal(ContactAction::Get, Some("Joanna"), None));
        assert_eq!(reply, "Joanna's phone number is 222333444");

        let reply =
            ActionDispatcher::dispatch(&store, &proposal(ContactAction::Get, Some("Zzz"), None));
        assert_eq!(reply, "No contact found for Zzz");
    }

    #[test]
    fn test_get_by_phone_hit_and_miss() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("Joanna", "222333444").unwrap();

        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::GetByPhone, None, Some("222333444")),
        );
        assert_eq!(reply, "The number 222333444 belongs to Joanna");

        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::GetByPhone, None, Some("999")),
        );
        assert_eq!(reply, "No contact found with phone number 999");
    }

    #[test]
    fn test_list() {
        let store = SqliteStore::open_in_memory().unwrap();
        let list = proposal(ContactAction::List, None, None);

        assert_eq!(ActionDispatcher::dispatch(&store, &list), MSG_EMPTY_BOOK);

        store.create("John", "123").unwrap();
        store.create("Joanna", "456").unwrap();
        assert_eq!(
            ActionDispatcher::dispatch(&store, &list),
            "Phone Book:\nJohn: 123\nJoanna: 456\n"
        );
    }

    #[test]
    fn test_update_hit_and_miss() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("John", "123").unwrap();

        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::Update, Some("John"), Some("987654321")),
        );
        assert_eq!(reply, "Updated John's phone number to 987654321");
        assert_eq!(store.read_by_name("John").unwrap().unwrap().phone, "987654321");

        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::Update, Some("Nobody"), Some("000")),
        );
        assert_eq!(reply, "No contact found for Nobody");
    }

    #[test]
    fn test_delete_hit_and_miss() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("Alex", "555").unwrap();

        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::Delete, Some("Alex"), None),
        );
        assert_eq!(reply, "Deleted contact for Alex");

        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::Delete, Some("Alex"), None),
        );
        assert_eq!(reply, "No contact found for Alex");
    }

    #[test]
    fn test_unknown_action_not_dispatched() {
        let store = SqliteStore::open_in_memory().unwrap();
        let reply = ActionDispatcher::dispatch(
            &store,
            &proposal(ContactAction::Unknown, Some("John"), Some("123")),
        );
        assert_eq!(reply, MSG_NOT_UNDERSTOOD);
    }

    #[test]
    fn test_missing_required_fields_not_dispatched() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("John", "123").unwrap();

        for p in [
            proposal(ContactAction::Add, Some("John"), None),
            proposal(ContactAction::Add, None, Some("123")),
            proposal(ContactAction::Get, None, None),
            proposal(ContactAction::GetByPhone, None, None),
            proposal(ContactAction::Update, Some("John"), None),
            proposal(ContactAction::Delete, None, None),
        ] {
            assert_eq!(ActionDispatcher::dispatch(&store, &p), MSG_NOT_UNDERSTOOD);
        }

        // The store was never touched beyond the seed row
        assert_eq!(store.read_all().unwrap().len(), 1);
        assert_eq!(store.read_by_name("John").unwrap().unwrap().phone, "123");
    }

    #[test]
    fn test_store_fault_becomes_generic_failure() {
        struct FailingStore;

        impl ContactStore for FailingStore {
            fn create(&self, _: &str, _: &str) -> Result<()> {
                Err(BookError::StoreError(rusqlite::Error::QueryReturnedNoRows))
            }
            fn read_by_name(&self, _: &str) -> Result<Option<Contact>> {
                Err(BookError::StoreError(rusqlite::Error::QueryReturnedNoRows))
            }
            fn read_by_phone(&self, _: &str) -> Result<Option<Contact>> {
                Err(BookError::StoreError(rusqlite::Error::QueryReturnedNoRows))
            }
            fn read_all(&self) -> Result<Vec<Contact>> {
                Err(BookError::StoreError(rusqlite::Error::QueryReturnedNoRows))
            }
            fn update(&self, _: &str, _: &str) -> Result<usize> {
                Err(BookError::StoreError(rusqlite::Error::QueryReturnedNoRows))
            }
            fn delete(&self, _: &str) -> Result<usize> {
                Err(BookError::StoreError(rusqlite::Error::QueryReturnedNoRows))
            }
        }

        let reply = ActionDispatcher::dispatch(
            &FailingStore,
            &proposal(ContactAction::Add, Some("John"), Some("123")),
        );
        assert_eq!(reply, MSG_STORE_FAILURE);

        let reply =
            ActionDispatcher::dispatch(&FailingStore, &proposal(ContactAction::List, None, None));
        assert_eq!(reply, MSG_STORE_FAILURE);
    }

    #[test]
    fn test_render_phone_book() {
        assert_eq!(render_phone_book(&[]), MSG_EMPTY_BOOK);

        let contacts = vec![
            Contact {
                name: "John".into(),
                phone: "123".into(),
            },
            Contact {
                name: "Joanna".into(),
                phone: "456".into(),
            },
        ];
        assert_eq!(
            render_phone_book(&contacts),
            "Phone Book:\nJohn: 123\nJoanna: 456\n"
        );
    }
}
