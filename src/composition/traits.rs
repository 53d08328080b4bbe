//! Traits for desktop composition control

use crate::error::CompositionResult;

/// Requested composition change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionAction {
    Enable,
    Disable,
}

impl CompositionAction {
    /// Action that leads to the given state
    pub fn towards(enabled: bool) -> Self {
        if enabled {
            CompositionAction::Enable
        } else {
            CompositionAction::Disable
        }
    }

    pub fn is_enable(&self) -> bool {
        matches!(self, CompositionAction::Enable)
    }
}

/// OS-wide visual composition primitive
///
/// `is_enabled` and `set_enabled` must only be called when `is_supported`
/// returns true.
pub trait CompositionControl: Send {
    /// Check if composition can be queried and toggled on this system
    fn is_supported(&self) -> bool;

    /// Query the current composition state
    fn is_enabled(&self) -> CompositionResult<bool>;

    /// Change the composition state
    fn set_enabled(&self, action: CompositionAction) -> CompositionResult<()>;

    /// Get the implementation name
    fn implementation_name(&self) -> String;
}
