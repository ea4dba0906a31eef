//! Directory probing that treats absence as an answer rather than an error.

use crate::error::Result;
use std::io::ErrorKind;
use std::path::Path;

/// The result of probing a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirProbe {
    /// Whether the path exists and is a directory.
    pub exists: bool,
    /// Entry names, sorted.
    pub contents: Vec<String>,
}

impl DirProbe {
    /// Entry names with the given extension (without the dot).
    pub fn with_extension<'a>(&'a self, ext: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.contents.iter().map(String::as_str).filter(move |name| {
            Path::new(name)
                .extension()
                .map(|e| e == ext)
                .unwrap_or(false)
        })
    }
}

/// List a directory.
///
/// A missing path (or a path that is not a directory) yields `exists = false`.
/// Any other I/O failure is returned.
pub fn probe<P: AsRef<Path>>(path: P) -> Result<DirProbe> {
    let path = path.as_ref();
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return Ok(DirProbe::default());
        }
        Err(e) => return Err(e.into()),
    };

    let mut contents = Vec::new();
    for entry in entries {
        let entry = entry?;
        contents.push(entry.file_name().to_string_lossy().to_string());
    }
    contents.sort();

    Ok(DirProbe {
        exists: true,
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackerError;

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let probed = probe(dir.path().join("nope")).unwrap();
        assert!(!probed.exists);
        assert!(probed.contents.is_empty());
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "hi").unwrap();

        let probed = probe(&file).unwrap();
        assert!(!probed.exists);

        let below_file = probe(file.join("child")).unwrap();
        assert!(!below_file.exists);
        assert!(below_file.contents.is_empty());
    }

    #[test]
    fn test_other_failures_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let result = probe(dir.path().join("bad\0name"));
        assert!(matches!(
            result,
            Err(PackerError::Io(ref e)) if e.kind() == ErrorKind::InvalidInput
        ));
    }

    #[test]
    fn test_sorted_contents() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.properties"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let probed = probe(dir.path()).unwrap();
        assert!(probed.exists);
        assert_eq!(probed.contents, vec!["a.png", "b.png", "c.properties"]);
        assert_eq!(
            probed.with_extension("png").collect::<Vec<_>>(),
            vec!["a.png", "b.png"]
        );
    }
}
