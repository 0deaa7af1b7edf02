// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Candidate file model (UI-agnostic).

use std::path::{Path, PathBuf};

/// A file the user picked or dropped but has not transferred yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub size_bytes: u64,
    /// Declared MIME type; may be empty or wrong, so it is only one of two acceptance signals.
    pub mime_type: String,
    /// Where the bytes live, when the host gave us a path.
    pub source: Option<PathBuf>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.source = Some(path);
        self
    }

    /// De-duplication key: two candidates with the same name and size are the same file.
    pub fn identity(&self) -> (&str, u64) {
        (&self.name, self.size_bytes)
    }

    /// Lowercased text after the last dot, if the name has one.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Lowercased MIME essence without parameters (`audio/mpeg; foo=bar` -> `audio/mpeg`).
    pub fn mime_essence(&self) -> String {
        self.mime_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase()
    }

    /// Build a candidate from a filesystem path by reading its metadata.
    ///
    /// `declared_mime` wins over the extension-based guess when non-empty.
    pub fn from_path(path: &Path, declared_mime: Option<&str>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let meta = path
            .metadata()
            .with_context(|| format!("Failed to read file metadata: {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime = match declared_mime.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => guess_mime(path),
        };
        Ok(Self::new(name, meta.len(), mime).with_source(path.to_path_buf()))
    }
}

/// File handle as supplied by the host (drop event or picker), before metadata is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFileHandle {
    pub name: String,
    pub path: Option<PathBuf>,
    /// Declared MIME type; empty when the host gave none.
    pub mime: String,
    /// Known size, e.g. when the bytes were delivered in memory.
    pub size_bytes: Option<u64>,
}

impl RawFileHandle {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path: Some(path),
            mime: String::new(),
            size_bytes: None,
        }
    }

    /// Display name, falling back to the path when the host gave none.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        self.path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed file".to_string())
    }

    /// Resolve into a candidate, reading filesystem metadata when the size is unknown.
    pub fn resolve(self) -> anyhow::Result<CandidateFile> {
        match (self.size_bytes, self.path) {
            (Some(size), path) => {
                let mime = if self.mime.is_empty() {
                    guess_mime(path.as_deref().unwrap_or(Path::new(&self.name)))
                } else {
                    self.mime
                };
                let file = CandidateFile::new(self.name, size, mime);
                Ok(match path {
                    Some(p) => file.with_source(p),
                    None => file,
                })
            }
            (None, Some(path)) => {
                let mut file = CandidateFile::from_path(&path, Some(&self.mime))?;
                if !self.name.is_empty() {
                    file.name = self.name;
                }
                Ok(file)
            }
            (None, None) => anyhow::bail!("File has neither a path nor contents"),
        }
    }
}

/// Guess a MIME type from the path extension; empty when unknown.
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn extension_is_lowercased_and_optional() {
        assert_eq!(
            CandidateFile::new("Deposition.MP3", 1, "").extension(),
            Some("mp3".into())
        );
        assert_eq!(CandidateFile::new("README", 1, "").extension(), None);
        assert_eq!(CandidateFile::new("trailing.", 1, "").extension(), None);
    }

    #[test]
    fn mime_essence_strips_parameters() {
        let file = CandidateFile::new("a.ogg", 1, "Audio/OGG; codecs=opus");
        assert_eq!(file.mime_essence(), "audio/ogg");
    }

    #[test]
    fn from_path_reads_size_and_guesses_mime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hearing.wav");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let candidate = CandidateFile::from_path(&path, None).unwrap();

        assert_eq!(candidate.name, "hearing.wav");
        assert_eq!(candidate.size_bytes, 2048);
        assert!(candidate.mime_type.contains("wav"));
        assert_eq!(candidate.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn from_path_prefers_declared_mime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip.bin");
        fs::write(&path, b"x").unwrap();

        let candidate = CandidateFile::from_path(&path, Some("video/mp4")).unwrap();

        assert_eq!(candidate.mime_type, "video/mp4");
    }

    #[test]
    fn raw_handle_with_in_memory_size_guesses_mime_from_name() {
        let handle = RawFileHandle {
            name: "memo.mp3".into(),
            path: None,
            mime: String::new(),
            size_bytes: Some(42),
        };

        let file = handle.resolve().unwrap();

        assert_eq!(file.size_bytes, 42);
        assert_eq!(file.mime_type, "audio/mpeg");
        assert!(file.source.is_none());
    }

    #[test]
    fn raw_handle_from_path_reads_metadata() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("call.flac");
        fs::write(&path, vec![1u8; 64]).unwrap();

        let file = RawFileHandle::from_path(path).resolve().unwrap();

        assert_eq!(file.name, "call.flac");
        assert_eq!(file.size_bytes, 64);
    }

    #[test]
    fn raw_handle_without_path_or_size_fails() {
        let handle = RawFileHandle {
            name: "ghost.mp3".into(),
            path: None,
            mime: String::new(),
            size_bytes: None,
        };
        assert!(handle.resolve().is_err());
    }

    #[test]
    fn from_path_errors_for_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(CandidateFile::from_path(&tmp.path().join("gone.mp3"), None).is_err());
    }
}
