// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Typed error kinds surfaced by selection, form validation, and submission.
//!
//! All of these are recoverable by the user. They are collected and shown as
//! notifications instead of interrupting the running application.

use thiserror::Error;

use crate::models::form::FormField;

/// Reasons a candidate file is refused, or a selection edit fails.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("File type not supported. Please upload audio or video files only.")]
    UnsupportedType,

    #[error("File size exceeds the {} limit", crate::utils::format_file_size(*.limit))]
    FileTooLarge { size: u64, limit: u64 },

    #[error("File is already selected")]
    DuplicateFile,

    #[error(
        "Batch would bring the total to {}, above the {} limit",
        crate::utils::format_file_size(*.attempted),
        crate::utils::format_file_size(*.limit)
    )]
    TotalSizeExceeded { attempted: u64, limit: u64 },

    /// Caller and selection disagree on the list; points at a UI sync bug.
    #[error("No file at position {index} (selection has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Problems that keep the upload form from being submitted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{} is required.", .0.label())]
    MissingRequiredField(FormField),

    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,

    #[error("Please enter a valid phone number.")]
    InvalidPhoneFormat,

    #[error("Estimated duration must be a positive number of minutes.")]
    InvalidEstimatedMinutes,

    #[error("Please confirm: {0}")]
    AcknowledgementMissing(String),

    #[error("Please select at least one file to upload.")]
    NoFilesSelected,
}

/// Failure modes of a submission hand-off.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Upload cancelled.")]
    Cancelled,

    #[error("Upload failed: {0}")]
    Transport(String),
}
