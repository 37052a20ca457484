//! Shared helpers for kdlt commands.

use std::path::Path;

use kdl::KdlDocument;

use crate::error::{KdltError, Result};

/// Reads and parses one KDL file.
pub fn parse_file(path: &Path) -> Result<KdlDocument> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| KdltError::Validation(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(kdl::parse_str(&contents)?)
}

/// Reads one file without parsing it.
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| KdltError::Validation(format!("cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_missing_path() {
        let err = parse_file(Path::new("/does/not/exist.kdl")).unwrap_err();
        assert!(matches!(err, KdltError::Validation(_)));
    }
}
