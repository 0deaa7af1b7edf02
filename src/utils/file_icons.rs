// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Phosphor file-icon mapping for media candidates.
//!
//! Prefers the MIME type and falls back to the extension, since browsers and
//! file managers often report media with an empty or generic type.

/// Return a Phosphor icon for the given MIME type and lowercase extension.
pub fn icon_for(mime: &str, ext: Option<&str>) -> &'static str {
    if mime.starts_with("audio/") {
        return egui_phosphor::regular::FILE_AUDIO;
    }
    if mime.starts_with("video/") {
        return egui_phosphor::regular::FILE_VIDEO;
    }
    match ext {
        Some("mp3" | "wav" | "m4a" | "flac" | "ogg" | "wma" | "aiff" | "amr" | "aac") => {
            egui_phosphor::regular::FILE_AUDIO
        }
        Some("mp4" | "avi" | "mov" | "wmv" | "flv" | "mkv" | "webm" | "3gp" | "asf") => {
            egui_phosphor::regular::FILE_VIDEO
        }
        _ => egui_phosphor::regular::FILE,
    }
}
