//! Reconciled set of capture sources and the current selection
//!
//! Every refresh builds a fresh [`RegistrySnapshot`] and swaps it in as one
//! value, so a reader holding a snapshot never sees a half-rebuilt mapping.
//! The selection is reconciled against the new snapshot in the same call.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::directory::{Directory, DirectoryTransport};
use crate::error::{RegistryError, RegistryResult};
use crate::types::{
    PixelFormat, RuntimeConfig, SampleParameters, SourceEntry, INVALID_PROCESS_ID,
};

/// Build the display label of an entry
///
/// `[<pid>] <name> (<format> <width>x<height> <fps>fps)`, with the frame rate
/// rounded half away from zero.
pub fn derive_label(entry: &SourceEntry) -> String {
    format!(
        "[{}] {} ({} {}x{} {:.0}fps)",
        entry.process_id,
        entry.process_name,
        entry.pixel_format.name(),
        entry.width,
        entry.height,
        entry.fps.round(),
    )
}

/// Immutable result of one refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySnapshot {
    entries: BTreeMap<u32, SourceEntry>,
    labels: BTreeMap<u32, String>,
}

impl RegistrySnapshot {
    /// Build a snapshot from a directory, skipping unused slots
    ///
    /// A process listed twice keeps its last record.
    pub fn from_directory(directory: &Directory) -> Self {
        let mut snapshot = Self::default();
        for source in directory.valid_sources() {
            let entry = SourceEntry::from(source);
            snapshot.labels.insert(entry.process_id, derive_label(&entry));
            snapshot.entries.insert(entry.process_id, entry);
        }
        snapshot
    }

    pub fn entries(&self) -> &BTreeMap<u32, SourceEntry> {
        &self.entries
    }

    pub fn labels(&self) -> &BTreeMap<u32, String> {
        &self.labels
    }

    pub fn get(&self, process_id: u32) -> Option<&SourceEntry> {
        self.entries.get(&process_id)
    }

    pub fn contains(&self, process_id: u32) -> bool {
        self.entries.contains_key(&process_id)
    }

    /// Lowest process ID, used when the selection has to move
    pub fn first_process_id(&self) -> Option<u32> {
        self.entries.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a refresh did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The registry was rebuilt from a new snapshot
    Refreshed {
        /// Number of sources now known
        sources: usize,
        /// Whether the current selection moved
        selection_changed: bool,
    },
    /// The transport failed; nothing changed
    Skipped,
}

impl RefreshOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, RefreshOutcome::Refreshed { .. })
    }
}

/// Known capture sources and the current selection
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    snapshot: Arc<RegistrySnapshot>,
    current_process_id: u32,
    config: RuntimeConfig,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl SourceRegistry {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            snapshot: Arc::new(RegistrySnapshot::default()),
            current_process_id: INVALID_PROCESS_ID,
            config,
        }
    }

    /// Poll the transport and rebuild the registry
    ///
    /// A failure in either transport step leaves entries, labels and the
    /// selection untouched; the next poll simply tries again.
    pub fn refresh(&mut self, transport: &mut dyn DirectoryTransport) -> RefreshOutcome {
        match transport.acquire() {
            Ok(directory) => self.replace_with(&directory),
            Err(e) => {
                log::debug!(
                    "Directory refresh skipped ({}): {}",
                    transport.implementation_name(),
                    e
                );
                RefreshOutcome::Skipped
            }
        }
    }

    /// Rebuild the registry from an already acquired directory
    pub fn replace_with(&mut self, directory: &Directory) -> RefreshOutcome {
        let snapshot = RegistrySnapshot::from_directory(directory);
        let previous = self.current_process_id;

        if !snapshot.contains(previous) {
            self.current_process_id = snapshot.first_process_id().unwrap_or(INVALID_PROCESS_ID);
            if previous != INVALID_PROCESS_ID {
                log::info!(
                    "Selected process {} left the directory, now {}",
                    previous,
                    self.current_process_id
                );
            }
        }

        let sources = snapshot.len();
        self.snapshot = Arc::new(snapshot);
        log::debug!("Directory refreshed: {} source(s)", sources);

        RefreshOutcome::Refreshed {
            sources,
            selection_changed: previous != self.current_process_id,
        }
    }

    /// Select a source by process ID
    pub fn select(&mut self, process_id: u32) -> RegistryResult<()> {
        if process_id == INVALID_PROCESS_ID {
            return Err(RegistryError::InvalidSelection);
        }
        if !self.snapshot.contains(process_id) {
            return Err(RegistryError::UnknownSource(process_id));
        }
        self.current_process_id = process_id;
        Ok(())
    }

    /// Currently selected process ID, 0 when nothing is selected
    pub fn current_process_id(&self) -> u32 {
        self.current_process_id
    }

    pub fn is_current_valid(&self) -> bool {
        self.current_process_id != INVALID_PROCESS_ID
    }

    /// Entry of the current selection
    pub fn current_entry(&self) -> Option<&SourceEntry> {
        if !self.is_current_valid() {
            return None;
        }
        match self.snapshot.get(self.current_process_id) {
            Some(entry) => Some(entry),
            None => unreachable!(
                "selected process {} is not in the registry",
                self.current_process_id
            ),
        }
    }

    /// Sample parameters of the current selection, or the configured fallback
    pub fn current_parameters(&self) -> SampleParameters {
        self.current_entry()
            .map(SourceEntry::parameters)
            .unwrap_or_else(|| self.config.fallback_parameters())
    }

    pub fn current_pixel_format(&self) -> PixelFormat {
        self.current_parameters().pixel_format
    }

    pub fn current_width(&self) -> u32 {
        self.current_parameters().width
    }

    pub fn current_height(&self) -> u32 {
        self.current_parameters().height
    }

    /// Process ID to label mapping for presentation
    pub fn labels(&self) -> &BTreeMap<u32, String> {
        self.snapshot.labels()
    }

    pub fn entries(&self) -> &BTreeMap<u32, SourceEntry> {
        self.snapshot.entries()
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}
