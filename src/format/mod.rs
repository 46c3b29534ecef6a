// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serialization of scripts: the positional tag stream consumed by the
//! downstream runtime, and the JSON backup codec.

pub mod backup;
pub mod positional;

pub use backup::{decode_backup, encode_backup, BackupParseError};
pub use positional::export_positional;
