// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: selection control, form validation, and submission.

pub mod selection;
pub mod submit;
pub mod validation;
