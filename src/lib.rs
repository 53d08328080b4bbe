//! Capture Runtime Library
//!
//! Runtime state for a screen capture filter's control session: which
//! capture source is selected, the sample parameters it requests, and the
//! desktop composition state that is suspended during capture and restored
//! afterwards.
//!
//! # Example
//!
//! ```no_run
//! use capture_runtime::{
//!     CaptureSource, Directory, PixelFormat, SessionRuntimeState, StaticDirectory,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = SessionRuntimeState::new();
//! session.start()?;
//!
//! // Poll the directory published by the capture processes
//! let mut transport = StaticDirectory::new(Directory::new(vec![CaptureSource::new(
//!     7,
//!     "app.exe",
//!     PixelFormat::IYUV,
//!     640,
//!     480,
//!     30.0,
//! )]));
//! session.refresh_sources(&mut transport);
//!
//! if session.can_modify_composition() {
//!     session.set_composition(false)?;
//! }
//!
//! println!("{:?}", session.entry_labels());
//! session.shutdown()?;
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod composition;
pub mod directory;
pub mod error;
pub mod profile;
pub mod registry;
pub mod session;
pub mod types;

// Re-export main types
pub use composition::{
    CompositionAction, CompositionControl, CompositionGuard, Compositor, UnsupportedCompositor,
};
pub use directory::{Directory, DirectoryTransport, StaticDirectory};
pub use error::{
    CompositionError, CompositionResult, DirectoryError, DirectoryResult, RegistryError,
    RegistryResult, SessionError, SessionResult,
};
pub use profile::{
    validate_layout_element, validate_profile, LayoutElement, Profile, ValidationError,
    ValidationErrorKind, ValidationErrors,
};
pub use registry::{derive_label, RefreshOutcome, RegistrySnapshot, SourceRegistry};
pub use session::{current_timestamp, SessionRuntimeState, SharedSession};
pub use types::{
    CaptureSource, PixelFormat, Rectangle, RuntimeConfig, SampleParameters, SourceEntry,
    INVALID_PROCESS_ID, INVALID_TIMESTAMP,
};

/// Library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get library capabilities
pub fn capabilities() -> String {
    let mut caps = Vec::new();

    // Platform
    #[cfg(target_os = "windows")]
    caps.push("Windows");
    #[cfg(target_os = "macos")]
    caps.push("macOS");
    #[cfg(target_os = "linux")]
    caps.push("Linux");

    if Compositor::is_supported() {
        caps.push("Composition Control");
    }

    caps.join(", ")
}
