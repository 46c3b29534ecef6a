// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for scripts.
//!
//! Operations are applied with optimistic concurrency (revision checks) and
//! produce a minimal delta that callers can use to refresh derived state.
//! Every operation leaves the structural invariants intact: scene ids stay
//! contiguous `1..=N` in array order, a scene never ends up without lines,
//! and `no_choice` stays coupled to the emptiness of `choices`.

use std::collections::HashSet;
use std::fmt;

use crate::model::{Choice, Line, Scene, Script};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    InsertScene {
        index: Option<usize>,
    },
    RemoveScene {
        index: usize,
    },
    UpdateScene {
        index: usize,
        patch: ScenePatch,
    },
    ToggleCollapse {
        index: usize,
    },
    InsertLine {
        scene_index: usize,
        after_line_index: Option<usize>,
    },
    RemoveLine {
        scene_index: usize,
        line_index: usize,
    },
    UpdateLine {
        scene_index: usize,
        line_index: usize,
        patch: LinePatch,
    },
    InsertChoice {
        scene_index: usize,
        line_index: usize,
    },
    RemoveChoice {
        scene_index: usize,
        line_index: usize,
        choice_index: usize,
    },
    UpdateChoice {
        scene_index: usize,
        line_index: usize,
        choice_index: usize,
        patch: ChoicePatch,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenePatch {
    pub name: Option<String>,
    pub collapsed: Option<bool>,
}

/// Field update for a line.
///
/// `no_choice: Some(true)` clears all choices as a side effect;
/// `Some(false)` only sticks while the line has choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePatch {
    pub name: Option<String>,
    pub mood: Option<String>,
    pub content: Option<String>,
    pub func: Option<String>,
    pub no_choice: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoicePatch {
    pub text: Option<String>,
    pub func: Option<String>,
}

/// Positional reference to an entity as of the end of an applied batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    Scene { scene: usize },
    Line { scene: usize, line: usize },
    Choice { scene: usize, line: usize, choice: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which entities changed as the result of applying
/// ops.
///
/// This is intentionally coarse: it reports only added/removed/updated
/// positional [`EntityRef`]s. Scene renumbering after insert/remove is
/// reported as updates to the shifted scenes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<EntityRef>,
    removed: HashSet<EntityRef>,
    updated: HashSet<EntityRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, entity_ref: EntityRef) {
        self.removed.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.added.insert(entity_ref);
    }

    fn record_removed(&mut self, entity_ref: EntityRef) {
        self.added.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.removed.insert(entity_ref);
    }

    fn record_updated(&mut self, entity_ref: EntityRef) {
        if self.added.contains(&entity_ref) || self.removed.contains(&entity_ref) {
            return;
        }
        self.updated.insert(entity_ref);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

/// Applies `ops` in order against `script`.
///
/// The batch is atomic: on any error the script is left untouched. A
/// successful non-empty batch bumps the revision exactly once.
pub fn apply_ops(
    script: &mut Script,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = script.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: Delta::default() });
    }

    let mut scenes = script.scenes().to_vec();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut scenes, op, &mut delta)?;
    }

    *script.scenes_mut() = scenes;
    script.bump_rev();
    let new_rev = script.rev();

    Ok(ApplyResult { new_rev, applied: ops.len(), delta: delta.finish() })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Scene,
    Line,
    Choice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    IndexOutOfBounds { kind: EntityKind, index: usize, len: usize },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { base_rev, current_rev } => {
                write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})")
            }
            Self::IndexOutOfBounds { kind, index, len } => {
                write!(f, "index out of bounds ({kind:?}, index={index}, len={len})")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

// Extracted op-application implementation for script mutations.
include!("ops_impl.rs");
