//! Biographical profile model and list.
//!
//! # Invariants
//! - Profiles are unique by case-insensitive name.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Profile list mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileListError {
    EmptyName,
    DuplicateProfile(String),
    ProfileNotFound(String),
}

impl Display for ProfileListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "profile name cannot be empty"),
            Self::DuplicateProfile(name) => write!(f, "duplicate profile: {name}"),
            Self::ProfileNotFound(name) => write!(f, "profile not found: {name}"),
        }
    }
}

impl Error for ProfileListError {}

/// One biographical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Free-form self description.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl Profile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            medical_conditions: Vec::new(),
            goals: Vec::new(),
        }
    }

    pub fn is_same(&self, other: &Profile) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

/// Unique-by-name profile collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileList {
    profiles: Vec<Profile>,
}

impl ProfileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(name))
    }

    pub fn add(&mut self, profile: Profile) -> Result<(), ProfileListError> {
        if profile.name.trim().is_empty() {
            return Err(ProfileListError::EmptyName);
        }
        if self.contains(&profile.name) {
            return Err(ProfileListError::DuplicateProfile(profile.name));
        }
        self.profiles.push(profile);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Profile, ProfileListError> {
        let position = self
            .profiles
            .iter()
            .position(|existing| existing.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ProfileListError::ProfileNotFound(name.to_string()))?;
        Ok(self.profiles.remove(position))
    }

    /// Checks collection invariants after deserialization.
    pub fn verify(&self) -> Result<(), String> {
        for (index, profile) in self.profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(format!("profile at index {index} has an empty name"));
            }
            let duplicated = self.profiles[..index]
                .iter()
                .any(|earlier| earlier.is_same(profile));
            if duplicated {
                return Err(format!("duplicate profile: {}", profile.name));
            }
        }
        Ok(())
    }
}
