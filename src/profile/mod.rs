//! Profile model as far as validation needs it
//!
//! Loading and saving profiles is the host's business; this module only
//! carries the shape that validators inspect.

pub mod validator;

pub use validator::{
    validate_layout_element, validate_profile, ValidationError, ValidationErrorKind,
    ValidationErrors,
};

use crate::types::Rectangle;

/// One capture region placed on the output layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutElement {
    /// Native handle of the captured window, 0 for the desktop
    pub target_window: u64,
    /// Area of the target window to capture
    pub clipping: Rectangle,
    /// Placement on the output image, in 0.0..=1.0 units
    pub bound_left: f64,
    pub bound_top: f64,
    pub bound_right: f64,
    pub bound_bottom: f64,
}

impl LayoutElement {
    /// Element covering the whole output
    pub fn full(target_window: u64, clipping: Rectangle) -> Self {
        Self {
            target_window,
            clipping,
            bound_left: 0.0,
            bound_top: 0.0,
            bound_right: 1.0,
            bound_bottom: 1.0,
        }
    }
}

/// A named set of layout elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub name: String,
    pub elements: Vec<LayoutElement>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: LayoutElement) -> Self {
        self.elements.push(element);
        self
    }
}
