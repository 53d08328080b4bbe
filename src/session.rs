//! Runtime state of an editing session

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::composition::{CompositionControl, CompositionGuard, Compositor};
use crate::directory::DirectoryTransport;
use crate::error::{SessionError, SessionResult};
use crate::registry::{RefreshOutcome, SourceRegistry};
use crate::types::{PixelFormat, RuntimeConfig, SampleParameters, INVALID_TIMESTAMP};

static CLOCK_ORIGIN: Lazy<Instant> = Lazy::new(Instant::now);

/// Monotonic, non-negative timestamp in microseconds since first use
pub fn current_timestamp() -> i64 {
    i64::try_from(CLOCK_ORIGIN.elapsed().as_micros()).unwrap_or(i64::MAX)
}

/// Session state behind the host's lock
pub type SharedSession = Arc<Mutex<SessionRuntimeState>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Created,
    Running,
    Finished,
}

/// Source registry, composition guard and profile bookkeeping of one session
///
/// Not internally synchronized. Hosts that touch it from several threads
/// wrap it with [`SessionRuntimeState::into_shared`].
#[derive(Debug)]
pub struct SessionRuntimeState {
    /// Full path of the profile being edited, empty while unsaved
    pub profile_path: String,
    /// Display name of the profile being edited
    pub profile_name: String,
    /// Last save time, `INVALID_TIMESTAMP` if never saved
    pub last_saved_timestamp: i64,
    /// Last apply time, `INVALID_TIMESTAMP` if never applied
    pub last_applied_timestamp: i64,
    registry: SourceRegistry,
    composition: CompositionGuard,
    phase: SessionPhase,
}

impl SessionRuntimeState {
    /// Create a session with default configuration and the platform compositor
    pub fn new() -> Self {
        Self::from_parts(RuntimeConfig::default(), Compositor::new())
    }

    /// Create a session with custom configuration
    pub fn with_config(config: RuntimeConfig) -> SessionResult<Self> {
        Self::with_compositor(config, Compositor::new())
    }

    /// Create a session driving the given composition control
    pub fn with_compositor(
        config: RuntimeConfig,
        control: Box<dyn CompositionControl>,
    ) -> SessionResult<Self> {
        config.validate().map_err(SessionError::InvalidConfiguration)?;
        Ok(Self::from_parts(config, control))
    }

    fn from_parts(config: RuntimeConfig, control: Box<dyn CompositionControl>) -> Self {
        Self {
            profile_path: String::new(),
            profile_name: String::new(),
            last_saved_timestamp: INVALID_TIMESTAMP,
            last_applied_timestamp: INVALID_TIMESTAMP,
            registry: SourceRegistry::new(config),
            composition: CompositionGuard::new(control),
            phase: SessionPhase::Created,
        }
    }

    /// Wrap the session in the lock hosts share between threads
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    //-------------------------------------------------------------------
    // Lifecycle

    /// Save the startup composition state; call once, before any toggle
    pub fn start(&mut self) -> SessionResult<()> {
        if self.phase != SessionPhase::Created {
            return Err(SessionError::AlreadyStarted);
        }
        self.composition.save_startup_state();
        self.phase = SessionPhase::Running;
        log::info!("Session started (composition supported: {})", self.composition.is_supported());
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Turn composition on or off for the rest of the session
    pub fn set_composition(&self, enabled: bool) -> SessionResult<()> {
        if !self.is_running() {
            return Err(SessionError::NotStarted);
        }
        if enabled {
            self.composition.turn_on()?;
        } else {
            self.composition.turn_off()?;
        }
        Ok(())
    }

    /// Restore the startup composition state; later calls do nothing
    pub fn shutdown(&mut self) -> SessionResult<()> {
        if !self.is_running() {
            return Ok(());
        }
        self.phase = SessionPhase::Finished;
        self.composition.restore_startup_state()?;
        log::info!("Session finished");
        Ok(())
    }

    //-------------------------------------------------------------------
    // Sources

    /// Poll the directory transport; failures leave everything unchanged
    pub fn refresh_sources(&mut self, transport: &mut dyn DirectoryTransport) -> RefreshOutcome {
        self.registry.refresh(transport)
    }

    pub fn select_source(&mut self, process_id: u32) -> SessionResult<()> {
        self.registry.select(process_id)?;
        Ok(())
    }

    pub fn current_process_id(&self) -> u32 {
        self.registry.current_process_id()
    }

    pub fn current_parameters(&self) -> SampleParameters {
        self.registry.current_parameters()
    }

    pub fn current_pixel_format(&self) -> PixelFormat {
        self.registry.current_pixel_format()
    }

    pub fn current_width(&self) -> u32 {
        self.registry.current_width()
    }

    pub fn current_height(&self) -> u32 {
        self.registry.current_height()
    }

    /// Process ID to label mapping for presentation
    pub fn entry_labels(&self) -> &BTreeMap<u32, String> {
        self.registry.labels()
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    //-------------------------------------------------------------------
    // Composition

    pub fn composition(&self) -> &CompositionGuard {
        &self.composition
    }

    /// Whether the UI may offer a composition toggle
    pub fn can_modify_composition(&self) -> bool {
        self.composition.can_modify()
    }

    //-------------------------------------------------------------------
    // Profile bookkeeping

    pub fn is_unsaved_profile(&self) -> bool {
        self.profile_path.is_empty()
    }

    pub fn mark_saved(&mut self, timestamp: i64) {
        self.last_saved_timestamp = timestamp;
    }

    pub fn mark_applied(&mut self, timestamp: i64) {
        self.last_applied_timestamp = timestamp;
    }

    pub fn has_been_saved(&self) -> bool {
        self.last_saved_timestamp != INVALID_TIMESTAMP
    }

    pub fn has_been_applied(&self) -> bool {
        self.last_applied_timestamp != INVALID_TIMESTAMP
    }
}

impl Default for SessionRuntimeState {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionRuntimeState {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("Failed to restore composition state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::UnsupportedCompositor;
    use crate::directory::{Directory, StaticDirectory};
    use crate::types::CaptureSource;

    fn session() -> SessionRuntimeState {
        SessionRuntimeState::with_compositor(
            RuntimeConfig::default(),
            Box::new(UnsupportedCompositor),
        )
        .unwrap()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = session();
        assert!(session.is_unsaved_profile());
        assert!(session.profile_name.is_empty());
        assert_eq!(session.last_saved_timestamp, -1);
        assert_eq!(session.last_applied_timestamp, -1);
        assert!(!session.has_been_saved());
        assert_eq!(session.current_process_id(), 0);
        assert_eq!(session.current_width(), 640);
        assert_eq!(session.current_height(), 480);
        assert_eq!(session.current_pixel_format(), PixelFormat::IYUV);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RuntimeConfig {
            fallback_width: 0,
            ..Default::default()
        };
        let result = SessionRuntimeState::with_compositor(config, Box::new(UnsupportedCompositor));
        assert!(matches!(result, Err(SessionError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_lifecycle_ordering() {
        let mut session = session();
        assert!(matches!(session.set_composition(false), Err(SessionError::NotStarted)));

        session.start().unwrap();
        assert!(matches!(session.start(), Err(SessionError::AlreadyStarted)));
        assert!(session.set_composition(false).is_ok());

        session.shutdown().unwrap();
        assert!(!session.is_running());
        assert!(session.shutdown().is_ok());
        assert!(matches!(session.set_composition(true), Err(SessionError::NotStarted)));
    }

    #[test]
    fn test_refresh_and_select() {
        let mut session = session();
        let mut transport = StaticDirectory::new(Directory::new(vec![
            CaptureSource::new(7, "app.exe", PixelFormat::IYUV, 640, 480, 30.0),
            CaptureSource::new(9, "obs.exe", PixelFormat::UYVY, 1280, 720, 60.0),
        ]));

        assert!(session.refresh_sources(&mut transport).is_refreshed());
        assert_eq!(session.current_process_id(), 7);

        session.select_source(9).unwrap();
        assert_eq!(session.current_width(), 1280);
        assert_eq!(session.entry_labels()[&9], "[9] obs.exe (UYVY 1280x720 60fps)");

        assert!(session.select_source(3).is_err());
        assert_eq!(session.current_process_id(), 9);
    }

    #[test]
    fn test_timestamps() {
        let mut session = session();
        let first = current_timestamp();
        assert!(first >= 0);

        session.mark_saved(first);
        session.mark_applied(current_timestamp());

        assert!(session.has_been_saved());
        assert!(session.has_been_applied());
        assert!(session.last_applied_timestamp >= session.last_saved_timestamp);
    }

    #[test]
    fn test_shared_session() {
        let shared = session().into_shared();
        shared.lock().profile_name = "Stream".to_string();
        assert_eq!(shared.lock().profile_name, "Stream");
    }
}
