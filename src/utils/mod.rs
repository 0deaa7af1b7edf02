// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod file_icons;
pub mod format;

/// Select a Phosphor icon for the given MIME/extension.
pub use file_icons::icon_for;
/// Human-readable duration (`m:ss` / `h:mm:ss`).
pub use format::format_duration;
/// Human-readable byte size with binary units.
pub use format::format_file_size;
