// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components that render state and report interactions as messages.

pub mod notification;
pub mod selection;
pub mod upload_form;
