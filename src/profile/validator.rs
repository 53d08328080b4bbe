//! Profile validation
//!
//! Element and profile validators currently apply no rules; they return an
//! empty collection so callers can already wire up error reporting.

use std::collections::BTreeMap;
use std::fmt;

use super::{LayoutElement, Profile};

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The target window is missing or unusable
    TargetWindow,
    /// The clipping area is outside the target
    Area,
}

/// One validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validation failures keyed by layout element index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<usize, ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Record the failure of an element, replacing any earlier one
    pub fn add(&mut self, index: usize, error: ValidationError) {
        self.errors.insert(index, error);
    }

    pub fn get(&self, index: usize) -> Option<&ValidationError> {
        self.errors.get(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ValidationError)> {
        self.errors.iter().map(|(index, error)| (*index, error))
    }

    /// Merge another collection; its entries replace ours on equal indices
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }
}

/// Validate a single layout element
pub fn validate_layout_element(_index: usize, _element: &LayoutElement) -> ValidationErrors {
    ValidationErrors::new()
}

/// Validate every element of a profile
pub fn validate_profile(profile: &Profile) -> ValidationErrors {
    let mut result = ValidationErrors::new();
    for (index, element) in profile.elements.iter().enumerate() {
        result.extend(validate_layout_element(index, element));
    }
    if !result.is_empty() {
        log::debug!("Profile '{}' has {} invalid element(s)", profile.name, result.len());
    }
    result
}
