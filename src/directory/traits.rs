//! Traits for capture-source directory transports

use super::Directory;
use crate::error::DirectoryResult;

/// Source of directory snapshots (shared memory, IPC, in-memory, ...)
///
/// Both steps may fail. A failure is reported to the caller, which decides
/// whether to keep its previous state; transports never clear anything on
/// their own.
pub trait DirectoryTransport {
    /// Open or attach to the directory
    fn init_directory(&mut self) -> DirectoryResult<()>;

    /// Read a point-in-time snapshot of the directory
    fn get_directory(&mut self) -> DirectoryResult<Directory>;

    /// Get the implementation name
    fn implementation_name(&self) -> String;

    /// Run both steps in order
    fn acquire(&mut self) -> DirectoryResult<Directory> {
        self.init_directory()?;
        self.get_directory()
    }
}
