use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::upload::PredictError;

/// MIME type offered to the picker and attached to the uploaded part.
pub const PDF_MIME: &str = "application/pdf";

/// A file chosen by the user, held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Wraps bytes that are already in memory.
    ///
    /// # Example
    /// ```
    /// use pdfspam::SelectedFile;
    ///
    /// let file = SelectedFile::new("invoice.pdf", b"%PDF-1.4".to_vec());
    /// assert_eq!(file.name(), "invoice.pdf");
    /// assert!(file.looks_like_pdf());
    /// ```
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a file from disk. The stored name is the final path component.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PredictError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        log::debug!("Loaded {:?} ({} bytes)", path, bytes.len());
        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Advisory check mirroring the picker's `application/pdf` filter.
    /// Nothing is rejected on the strength of this; callers only warn.
    pub fn looks_like_pdf(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".pdf") || self.bytes.starts_with(b"%PDF-")
    }

    /// Hex SHA-256 of the file contents, used to correlate uploads in logs.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_hint_by_extension_or_magic() {
        assert!(SelectedFile::new("MAIL.PDF", vec![]).looks_like_pdf());
        assert!(SelectedFile::new("mail.bin", b"%PDF-1.7\n".to_vec()).looks_like_pdf());
        assert!(!SelectedFile::new("notes.txt", b"hello".to_vec()).looks_like_pdf());
    }

    #[test]
    fn test_fingerprint() {
        let file = SelectedFile::new("a.pdf", b"abc".to_vec());
        assert_eq!(
            file.fingerprint(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_from_path_keeps_file_name() -> Result<(), PredictError> {
        let dir = std::env::temp_dir().join("pdfspam-file-test");
        fs::create_dir_all(&dir)?;
        let path = dir.join("report.pdf");
        fs::write(&path, b"%PDF-1.4 test")?;

        let file = SelectedFile::from_path(&path)?;
        assert_eq!(file.name(), "report.pdf");
        assert_eq!(file.bytes(), b"%PDF-1.4 test");

        fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_from_missing_path() {
        let result = SelectedFile::from_path("/definitely/not/here.pdf");
        assert!(matches!(result, Err(PredictError::Io(_))));
    }
}
