//! Save, toggle and restore the desktop composition state around a session

use super::traits::{CompositionAction, CompositionControl};
use super::Compositor;
use crate::error::{CompositionError, CompositionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    Uninitialized,
    /// `None` when the startup state could not be read
    Tracking { baseline: Option<bool> },
}

/// Guard over the OS-wide composition flag
///
/// Lifecycle is `save_startup_state`, any number of `turn_on`/`turn_off`,
/// then `restore_startup_state`. On platforms where composition cannot be
/// controlled every call is a no-op and the primitive is never touched.
/// Only one guard per process should drive the real compositor.
pub struct CompositionGuard {
    control: Box<dyn CompositionControl>,
    state: GuardState,
}

impl CompositionGuard {
    pub fn new(control: Box<dyn CompositionControl>) -> Self {
        Self {
            control,
            state: GuardState::Uninitialized,
        }
    }

    /// Guard over the platform compositor
    pub fn system() -> Self {
        Self::new(Compositor::new())
    }

    pub fn is_supported(&self) -> bool {
        self.control.is_supported()
    }

    /// Whether `save_startup_state` has run
    pub fn is_initialized(&self) -> bool {
        self.state != GuardState::Uninitialized
    }

    /// State recorded at startup, if saved and readable
    pub fn baseline(&self) -> Option<bool> {
        match self.state {
            GuardState::Uninitialized => None,
            GuardState::Tracking { baseline } => baseline,
        }
    }

    /// Composition may be changed only if it was on when the session started
    pub fn can_modify(&self) -> bool {
        self.is_supported() && self.baseline() == Some(true)
    }

    /// Query the live composition state
    pub fn is_enabled(&self) -> CompositionResult<bool> {
        if !self.is_supported() {
            return Err(CompositionError::Unsupported);
        }
        self.control.is_enabled()
    }

    /// Remember the current composition state as the startup baseline
    ///
    /// Unsupported platforms record "off". A failed query records an
    /// unknown baseline: `can_modify` stays false and restore leaves the
    /// desktop alone.
    pub fn save_startup_state(&mut self) {
        let baseline = if !self.is_supported() {
            Some(false)
        } else {
            match self.control.is_enabled() {
                Ok(enabled) => Some(enabled),
                Err(e) => {
                    log::warn!("Could not read startup composition state: {}", e);
                    None
                }
            }
        };

        log::debug!(
            "Composition startup state saved ({}): {}",
            self.control.implementation_name(),
            match baseline {
                Some(true) => "on",
                Some(false) => "off",
                None => "unknown",
            }
        );
        self.state = GuardState::Tracking { baseline };
    }

    pub fn turn_on(&self) -> CompositionResult<()> {
        self.apply(true)
    }

    pub fn turn_off(&self) -> CompositionResult<()> {
        self.apply(false)
    }

    /// Put composition back to the startup baseline
    pub fn restore_startup_state(&self) -> CompositionResult<()> {
        if !self.is_supported() {
            return Ok(());
        }
        match self.state {
            GuardState::Uninitialized => Err(CompositionError::NotInitialized),
            GuardState::Tracking { baseline } => match baseline {
                Some(enabled) => self.apply(enabled),
                None => {
                    log::warn!("Startup composition state unknown, leaving it unchanged");
                    Ok(())
                }
            },
        }
    }

    fn apply(&self, enabled: bool) -> CompositionResult<()> {
        if !self.is_supported() {
            return Ok(());
        }
        if !self.is_initialized() {
            return Err(CompositionError::NotInitialized);
        }

        if self.control.is_enabled()? == enabled {
            return Ok(());
        }

        log::info!("Turning composition {}", if enabled { "on" } else { "off" });
        self.control.set_enabled(CompositionAction::towards(enabled))
    }
}

impl std::fmt::Debug for CompositionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositionGuard")
            .field("implementation", &self.control.implementation_name())
            .field("state", &self.state)
            .finish()
    }
}
