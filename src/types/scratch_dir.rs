//! Owned handle to a temporary clone directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::instrument;

/// Uniquely named temporary directory owned by one analysis run.
///
/// The directory outlives this value unless [ScratchDir::release] is called;
/// the cleanup step guarantees exactly one release on every pipeline path.
#[derive(Debug)]
pub struct ScratchDir {
  path: PathBuf,
  released: bool,
}

impl ScratchDir {
  /// Creates a fresh temp directory with the given name prefix.
  #[instrument(level = "trace")]
  pub fn create(prefix: &str) -> io::Result<Self> {
    let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
    Ok(Self {
      path: dir.keep(),
      released: false,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn is_released(&self) -> bool {
    self.released
  }

  /// Removes the directory tree. Idempotent: repeated calls and an
  /// already-missing directory both succeed.
  #[instrument(level = "trace")]
  pub fn release(&mut self) -> io::Result<()> {
    if self.released {
      return Ok(());
    }
    match std::fs::remove_dir_all(&self.path) {
      Ok(()) => {
        self.released = true;
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        self.released = true;
        Ok(())
      }
      Err(e) => Err(e),
    }
  }
}
