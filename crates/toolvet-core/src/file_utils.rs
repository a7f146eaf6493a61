//! Bounded, symlink-refusing file reads for tool and config inputs.

use crate::diagnostics::ReadError;
use std::fs;
use std::path::Path;

/// Largest input file accepted (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a regular file as UTF-8, rejecting symlinks and oversized files.
pub fn safe_read_file(path: &Path) -> Result<String, ReadError> {
    let metadata = fs::symlink_metadata(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.file_type().is_symlink() {
        return Err(ReadError::Symlink {
            path: path.to_path_buf(),
        });
    }
    if !metadata.is_file() {
        return Err(ReadError::NotRegular {
            path: path.to_path_buf(),
        });
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(ReadError::TooBig {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
