//! Desktop Window Manager composition control (Windows Vista+)

use once_cell::sync::Lazy;
use windows::Win32::Graphics::Dwm::{
    DwmEnableComposition, DwmIsCompositionEnabled, DWM_EC_DISABLECOMPOSITION,
    DWM_EC_ENABLECOMPOSITION,
};
use windows::Win32::System::SystemInformation::{GetVersionExW, OSVERSIONINFOW};

use super::traits::{CompositionAction, CompositionControl};
use crate::error::{CompositionError, CompositionResult};

/// First NT major version shipping dwmapi.dll
const MIN_MAJOR_VERSION: u32 = 6;

static DWM_AVAILABLE: Lazy<bool> = Lazy::new(|| match os_major_version() {
    Some(major) => major >= MIN_MAJOR_VERSION,
    None => {
        log::warn!("Could not determine Windows version, disabling DWM control");
        false
    }
});

fn os_major_version() -> Option<u32> {
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    unsafe { GetVersionExW(&mut info) }.ok()?;
    Some(info.dwMajorVersion)
}

/// DWM-backed composition control
#[derive(Debug, Clone, Copy, Default)]
pub struct DwmCompositor;

impl DwmCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl CompositionControl for DwmCompositor {
    fn is_supported(&self) -> bool {
        *DWM_AVAILABLE
    }

    fn is_enabled(&self) -> CompositionResult<bool> {
        if !self.is_supported() {
            return Err(CompositionError::Unsupported);
        }
        let enabled = unsafe { DwmIsCompositionEnabled() }?;
        Ok(enabled.as_bool())
    }

    fn set_enabled(&self, action: CompositionAction) -> CompositionResult<()> {
        if !self.is_supported() {
            return Err(CompositionError::Unsupported);
        }
        let raw = match action {
            CompositionAction::Enable => DWM_EC_ENABLECOMPOSITION,
            CompositionAction::Disable => DWM_EC_DISABLECOMPOSITION,
        };
        unsafe { DwmEnableComposition(raw) }?;
        Ok(())
    }

    fn implementation_name(&self) -> String {
        "Desktop Window Manager".to_string()
    }
}
