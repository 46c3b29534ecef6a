// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A script is an ordered sequence of scenes; scenes own ordered lines;
//! lines own ordered choices. Ownership is strictly tree-shaped, with no
//! back-references or shared ownership.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod script;

pub use script::{Choice, Line, Scene, Script};
