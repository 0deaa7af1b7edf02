// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types shared between the controller, the MVU kernel, and the UI.

pub mod candidate;
pub mod form;
pub mod notification;
pub mod policy;
pub mod pricing;
