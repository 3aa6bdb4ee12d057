//! Local file checks run when a path is attached to a launch configuration.

use std::path::Path;

/// A path that was not found on the local filesystem.
///
/// Holds the path as the caller wrote it, without normalisation, so error
/// messages can echo it back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound(pub String);

/// Check that `path` exists right now.
///
/// I/O errors while probing (permission denied on a parent directory, for
/// instance) count as not found.
pub fn validate_path(path: &Path) -> Result<(), NotFound> {
    match path.try_exists() {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(NotFound(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_file_passes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(validate_path(file.path()), Ok(()));
    }

    #[test]
    fn test_missing_file_keeps_the_supplied_spelling() {
        let result = validate_path(Path::new("./fixtures/../fixtures/missing.gwbk"));
        assert_eq!(
            result,
            Err(NotFound("./fixtures/../fixtures/missing.gwbk".to_string()))
        );
    }
}
