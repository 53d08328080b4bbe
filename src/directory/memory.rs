//! In-memory directory transport

use super::{Directory, DirectoryTransport};
use crate::error::{DirectoryError, DirectoryResult};

/// Directory transport backed by a value the host replaces at will
///
/// Useful for hosts that receive directory updates by other means, and for
/// exercising failure paths: either step can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    directory: Directory,
    fail_init: bool,
    fail_read: bool,
    reads: u64,
}

impl StaticDirectory {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    /// Replace the published directory
    pub fn publish(&mut self, directory: Directory) {
        self.directory = directory;
    }

    /// Make `init_directory` fail until reset
    pub fn set_fail_init(&mut self, fail: bool) {
        self.fail_init = fail;
    }

    /// Make `get_directory` fail until reset
    pub fn set_fail_read(&mut self, fail: bool) {
        self.fail_read = fail;
    }

    /// Number of successful reads so far
    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl DirectoryTransport for StaticDirectory {
    fn init_directory(&mut self) -> DirectoryResult<()> {
        if self.fail_init {
            return Err(DirectoryError::InitFailed(
                "directory is not published".to_string(),
            ));
        }
        Ok(())
    }

    fn get_directory(&mut self) -> DirectoryResult<Directory> {
        if self.fail_read {
            return Err(DirectoryError::ReadFailed(
                "directory is locked".to_string(),
            ));
        }
        self.reads += 1;
        Ok(self.directory.clone())
    }

    fn implementation_name(&self) -> String {
        "In-memory directory".to_string()
    }
}
