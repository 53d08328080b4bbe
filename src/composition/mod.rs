//! Desktop composition control with platform-specific implementations

pub mod guard;
pub mod traits;

#[cfg(target_os = "windows")]
pub mod dwm;

pub use guard::CompositionGuard;
pub use traits::{CompositionAction, CompositionControl};

use crate::error::{CompositionError, CompositionResult};

/// Platform-specific composition control factory
pub struct Compositor;

impl Compositor {
    /// Create the composition control for the current platform
    pub fn new() -> Box<dyn CompositionControl> {
        #[cfg(target_os = "windows")]
        {
            Box::new(dwm::DwmCompositor::new())
        }

        #[cfg(not(target_os = "windows"))]
        {
            Box::new(UnsupportedCompositor)
        }
    }

    /// Check whether the current platform supports composition control
    pub fn is_supported() -> bool {
        Self::new().is_supported()
    }
}

/// Composition control for platforms without a toggleable compositor
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedCompositor;

impl CompositionControl for UnsupportedCompositor {
    fn is_supported(&self) -> bool {
        false
    }

    fn is_enabled(&self) -> CompositionResult<bool> {
        Err(CompositionError::Unsupported)
    }

    fn set_enabled(&self, _action: CompositionAction) -> CompositionResult<()> {
        Err(CompositionError::Unsupported)
    }

    fn implementation_name(&self) -> String {
        "Unsupported".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_compositor_refuses_calls() {
        let control = UnsupportedCompositor;
        assert!(!control.is_supported());
        assert!(matches!(control.is_enabled(), Err(CompositionError::Unsupported)));
        assert!(matches!(
            control.set_enabled(CompositionAction::Disable),
            Err(CompositionError::Unsupported)
        ));
    }

    #[test]
    fn test_action_towards() {
        assert_eq!(CompositionAction::towards(true), CompositionAction::Enable);
        assert_eq!(CompositionAction::towards(false), CompositionAction::Disable);
        assert!(!CompositionAction::Disable.is_enable());
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_platform_compositor_unsupported_off_windows() {
        assert!(!Compositor::is_supported());
        assert_eq!(Compositor::new().implementation_name(), "Unsupported");
    }
}
