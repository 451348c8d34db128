//! Resume file selection and validation.
//!
//! The service accepts PDF, DOC, DOCX, and TXT uploads. The extension
//! gate runs locally so an unsupported file never produces a request.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions accepted by the analysis service.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// A selected resume file, loaded into memory for upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    /// Path the file was loaded from.
    #[allow(dead_code)] // Kept for diagnostics and future display use
    pub path: PathBuf,
    /// File name sent as the multipart filename.
    pub name: String,
    /// Raw contents.
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Select a resume file: validate the extension, then load it.
    pub fn open(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .with_context(|| format!("Invalid file name: {}", path.display()))?;

        if !allowed_extension(&name) {
            anyhow::bail!(
                "Unsupported file type '{}'. Please use PDF, DOC, DOCX, or TXT.",
                name
            );
        }

        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read resume file: {}", path.display()))?;

        if bytes.is_empty() {
            anyhow::bail!("Resume file is empty: {}", path.display());
        }

        debug!("Selected resume {} ({} bytes)", name, bytes.len());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            bytes,
        })
    }

    /// File size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size formatted for display, matching the upload widget ("12.3 KB").
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.bytes.len() as f64 / 1024.0)
    }
}

/// Check a file name against the allowed extension set.
///
/// The extension is the substring after the last '.', compared
/// case-insensitively. Names without a dot are rejected.
pub fn allowed_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_allowed_extensions() {
        assert!(allowed_extension("resume.pdf"));
        assert!(allowed_extension("resume.doc"));
        assert!(allowed_extension("resume.docx"));
        assert!(allowed_extension("resume.txt"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert!(allowed_extension("R.PDF"));
        assert!(allowed_extension("resume.Docx"));
        assert!(allowed_extension("RESUME.TXT"));
    }

    #[test]
    fn test_rejected_extensions() {
        assert!(!allowed_extension("r.exe"));
        assert!(!allowed_extension("resume.pdf.zip"));
        assert!(!allowed_extension("resume"));
        assert!(!allowed_extension(""));
    }

    #[test]
    fn test_last_extension_wins() {
        // Only the substring after the last dot counts.
        assert!(allowed_extension("resume.exe.pdf"));
        assert!(!allowed_extension("resume.txt.bak"));
    }

    #[test]
    fn test_open_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Jane Doe - Software Engineer").unwrap();

        let resume = ResumeFile::open(&path).unwrap();
        assert_eq!(resume.name, "resume.txt");
        assert!(resume.size() > 0);
        assert!(resume.display_size().ends_with("KB"));
    }

    #[test]
    fn test_open_rejects_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.exe");
        std::fs::write(&path, b"MZ").unwrap();

        let err = ResumeFile::open(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_open_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"").unwrap();

        assert!(ResumeFile::open(&path).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        assert!(ResumeFile::open(Path::new("/nonexistent/resume.pdf")).is_err());
    }
}
