use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum DocError {
    #[error("documentation file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read documentation file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("documentation file {} is empty", .path.display())]
    Empty { path: PathBuf },
}

/// Read the full text of the documentation file under validation.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_documentation(path: &Path) -> Result<String, DocError> {
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DocError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DocError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if contents.trim().is_empty() {
        return Err(DocError::Empty {
            path: path.to_path_buf(),
        });
    }
    debug!(doc_bytes = contents.len(), "read documentation");
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("architecture.adoc");
        fs::write(&path, "= Architecture\n\nThe auth-service issues tokens.\n").unwrap();

        let contents = read_documentation(&path).unwrap();
        assert!(contents.starts_with("= Architecture"));
        assert!(contents.contains("auth-service"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.adoc");

        let err = read_documentation(&path).unwrap_err();
        assert!(matches!(err, DocError::NotFound { .. }));
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("missing.adoc"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.adoc");
        fs::write(&path, "\n  \n").unwrap();

        assert!(matches!(read_documentation(&path), Err(DocError::Empty { .. })));
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_documentation(dir.path()), Err(DocError::Read { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.adoc");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(matches!(read_documentation(&path), Err(DocError::Read { .. })));
    }
}
