// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Durable persistence for scripts.
//!
//! A [`ScriptFolder`] keeps one snapshot document (`scenes` + `timestamp`)
//! per folder; [`Autosave`] coalesces bursts of edits into one deferred
//! write per quiet interval.

pub mod script_folder;

pub use script_folder::{Autosave, ScriptFolder, Snapshot, StoreError, WriteDurability};
