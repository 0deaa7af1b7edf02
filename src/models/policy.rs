// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! File acceptance policy: size limits and type allow-lists.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::models::candidate::CandidateFile;

const MIB: u64 = 1024 * 1024;

const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "m4a", "flac", "ogg", "wma", "aiff", "amr", "aac", "mp4", "avi", "mov", "wmv",
    "flv", "mkv", "webm", "3gp", "asf",
];

const DEFAULT_MIME_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/m4a",
    "audio/flac",
    "audio/ogg",
    "audio/wma",
    "audio/aiff",
    "audio/amr",
    "audio/aac",
    "video/mp4",
    "video/avi",
    "video/quicktime",
    "video/x-msvideo",
    "video/x-ms-wmv",
    "video/x-flv",
    "video/x-matroska",
    "video/webm",
    "video/3gpp",
    "video/x-ms-asf",
];

/// Limits and allow-lists applied to every candidate. Not mutated at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub max_file_size_bytes: u64,
    pub max_total_size_bytes: u64,
    pub allowed_extensions: BTreeSet<String>,
    pub allowed_mime_types: BTreeSet<String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 500 * MIB,
            max_total_size_bytes: 2048 * MIB,
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            allowed_mime_types: DEFAULT_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ValidationPolicy {
    /// Lowercase and trim the allow-lists, dropping blank entries; extensions also lose a leading dot.
    pub fn normalized(self) -> Self {
        fn norm(set: BTreeSet<String>, strip: fn(&str) -> &str) -> BTreeSet<String> {
            set.into_iter()
                .map(|s| strip(s.trim()).to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        }
        Self {
            allowed_extensions: norm(self.allowed_extensions, |s| s.trim_start_matches('.')),
            allowed_mime_types: norm(self.allowed_mime_types, |s| s),
            ..self
        }
    }

    /// True when either the extension or the declared MIME type is allowed.
    pub fn allows_type(&self, file: &CandidateFile) -> bool {
        let ext_ok = file
            .extension()
            .is_some_and(|ext| self.allowed_extensions.contains(&ext));
        ext_ok || self.allowed_mime_types.contains(&file.mime_essence())
    }

    pub fn within_file_limit(&self, file: &CandidateFile) -> bool {
        file.size_bytes <= self.max_file_size_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_by_extension_even_with_unreliable_mime() {
        let policy = ValidationPolicy::default();
        let file = CandidateFile::new("call.M4A", 10, "application/octet-stream");
        assert!(policy.allows_type(&file));
    }

    #[test]
    fn accepts_by_mime_when_extension_unknown() {
        let policy = ValidationPolicy::default();
        let file = CandidateFile::new("recording", 10, "audio/mpeg");
        assert!(policy.allows_type(&file));
    }

    #[test]
    fn rejects_documents() {
        let policy = ValidationPolicy::default();
        let file = CandidateFile::new("notes.pdf", 10, "application/pdf");
        assert!(!policy.allows_type(&file));
    }

    #[test]
    fn file_limit_is_inclusive() {
        let policy = ValidationPolicy {
            max_file_size_bytes: 100,
            ..Default::default()
        };
        assert!(policy.within_file_limit(&CandidateFile::new("a.mp3", 100, "")));
        assert!(!policy.within_file_limit(&CandidateFile::new("a.mp3", 101, "")));
    }

    #[test]
    fn normalized_leaves_mime_types_unstripped() {
        let policy = ValidationPolicy {
            allowed_mime_types: [".Audio/MPEG"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
        .normalized();

        assert!(policy.allowed_mime_types.contains(".audio/mpeg"));
        assert!(!policy.allowed_mime_types.contains("audio/mpeg"));
    }

    #[test]
    fn normalized_lowercases_and_strips_dots() {
        let policy = ValidationPolicy {
            allowed_extensions: [".MP3", " Wav ", ""].iter().map(|s| s.to_string()).collect(),
            allowed_mime_types: ["Audio/MPEG"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
        .normalized();

        assert_eq!(
            policy.allowed_extensions.iter().collect::<Vec<_>>(),
            vec!["mp3", "wav"]
        );
        assert!(policy.allowed_mime_types.contains("audio/mpeg"));
    }
}
