//! Contact domain model and address book collection.
//!
//! # Responsibility
//! - Define the contact record and its field validation rules.
//! - Keep the address book unique by contact name.
//!
//! # Invariants
//! - Contact names are compared case-insensitively for identity.
//! - `AddressBook::add` validates fields before any mutation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{3,15}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validation failure for a single contact field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    InvalidPhone(String),
    InvalidEmail(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name cannot be empty"),
            Self::InvalidPhone(value) => {
                write!(f, "invalid phone `{value}`; expected 3-15 digits")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email `{value}`"),
        }
    }
}

impl Error for ContactValidationError {}

/// Address book mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressBookError {
    Validation(ContactValidationError),
    DuplicateContact(String),
    ContactNotFound(String),
}

impl Display for AddressBookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateContact(name) => write!(f, "duplicate contact: {name}"),
            Self::ContactNotFound(name) => write!(f, "contact not found: {name}"),
        }
    }
}

impl Error for AddressBookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for AddressBookError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One person in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Checks field rules that the JSON schema alone cannot express.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if !PHONE_RE.is_match(self.phone.trim()) {
            return Err(ContactValidationError::InvalidPhone(self.phone.clone()));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Identity comparison used by the uniqueness invariant.
    pub fn is_same(&self, other: &Contact) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

/// Unique-by-name contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    contacts: Vec<Contact>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contacts
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(name))
    }

    pub fn add(&mut self, contact: Contact) -> Result<(), AddressBookError> {
        contact.validate()?;
        if self.contains(&contact.name) {
            return Err(AddressBookError::DuplicateContact(contact.name));
        }
        self.contacts.push(contact);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Contact, AddressBookError> {
        let position = self
            .contacts
            .iter()
            .position(|existing| existing.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AddressBookError::ContactNotFound(name.to_string()))?;
        Ok(self.contacts.remove(position))
    }

    /// Checks collection invariants after deserialization.
    pub fn verify(&self) -> Result<(), String> {
        for (index, contact) in self.contacts.iter().enumerate() {
            contact
                .validate()
                .map_err(|err| format!("contact at index {index}: {err}"))?;
            let duplicated = self.contacts[..index]
                .iter()
                .any(|earlier| earlier.is_same(contact));
            if duplicated {
                return Err(format!("duplicate contact: {}", contact.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressBook, AddressBookError, Contact, ContactValidationError};

    fn alice() -> Contact {
        Contact::new("Alice Pauline", "94351253", "alice@example.com", "123 Jurong West")
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let mut contact = alice();
        contact.phone = "12".to_string();
        assert!(matches!(
            contact.validate(),
            Err(ContactValidationError::InvalidPhone(_))
        ));

        let mut contact = alice();
        contact.email = "not-an-email".to_string();
        assert!(matches!(
            contact.validate(),
            Err(ContactValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn add_rejects_duplicate_by_case_insensitive_name() {
        let mut book = AddressBook::new();
        book.add(alice()).expect("first add should succeed");

        let mut shouting = alice();
        shouting.name = "ALICE PAULINE".to_string();
        let err = book.add(shouting).expect_err("duplicate should be rejected");
        assert!(matches!(err, AddressBookError::DuplicateContact(_)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn remove_missing_contact_reports_not_found() {
        let mut book = AddressBook::new();
        let err = book.remove("Nobody").expect_err("remove should fail");
        assert!(matches!(err, AddressBookError::ContactNotFound(_)));
    }

    #[test]
    fn verify_rejects_duplicates_in_deserialized_data() {
        let json = r#"{"contacts":[
            {"name":"A B","phone":"91234567","email":"a@b.co","address":"x"},
            {"name":"a b","phone":"98765432","email":"b@a.co","address":"y"}
        ]}"#;
        let book: AddressBook = serde_json::from_str(json).expect("schema should parse");
        assert!(book.verify().is_err());
    }
}
