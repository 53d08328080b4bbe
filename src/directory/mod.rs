//! Capture-source directory: snapshots and the transports that produce them

pub mod memory;
pub mod traits;

pub use memory::StaticDirectory;
pub use traits::DirectoryTransport;

use crate::types::CaptureSource;

/// Point-in-time list of capture sources, in transport order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    entries: Vec<CaptureSource>,
}

impl Directory {
    pub fn new(entries: Vec<CaptureSource>) -> Self {
        Self { entries }
    }

    /// All records, including unused slots
    pub fn entries(&self) -> &[CaptureSource] {
        &self.entries
    }

    /// Records that describe a real process
    pub fn valid_sources(&self) -> impl Iterator<Item = &CaptureSource> {
        self.entries.iter().filter(|source| source.is_valid())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CaptureSource> for Directory {
    fn from_iter<I: IntoIterator<Item = CaptureSource>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelFormat;

    #[test]
    fn test_valid_sources_skips_empty_slots() {
        let directory: Directory = vec![
            CaptureSource::empty_slot(),
            CaptureSource::new(7, "app.exe", PixelFormat::IYUV, 640, 480, 30.0),
            CaptureSource::empty_slot(),
        ]
        .into_iter()
        .collect();

        assert_eq!(directory.len(), 3);
        let pids: Vec<u32> = directory.valid_sources().map(|s| s.process_id).collect();
        assert_eq!(pids, vec![7]);
    }
}
