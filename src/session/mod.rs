// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edit session: turns user-facing commands into op batches.
//!
//! The session owns the live script, the creation-default policy for "add"
//! commands, the confirmation gate in front of destructive commands, and the
//! scene-name focus machine. It never talks to serializers or storage; both
//! read the script on demand.

use crate::format::backup::{decode_backup, BackupParseError};
use crate::model::Script;
use crate::ops::{
    apply_ops, ApplyError, ApplyResult, ChoicePatch, EntityKind, LinePatch, Op, ScenePatch,
};

pub const SCENE_DELETE_PROMPT: &str =
    "정말로 이 씬을 삭제하시겠습니까? 모든 대사와 선택지가 함께 삭제됩니다.";
pub const LINE_DELETE_PROMPT: &str = "정말로 이 대사를 삭제하시겠습니까?";
pub const CLEAR_PROMPT: &str =
    "정말로 모든 저장된 데이터를 삭제하시겠습니까? 이 작업은 되돌릴 수 없습니다.";

/// Answers yes/no questions for destructive commands.
///
/// The session asks before removing scenes or lines and before clearing the
/// script; a declined prompt turns the command into a no-op.
pub trait ConfirmPrompt {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Outcome of a confirmation-gated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Applied(T),
    Declined,
}

/// Scene-name focus machine.
///
/// `EditingName` is entered by an explicit start-edit command and left either
/// by confirmation or by an external dismiss (e.g. focus moving elsewhere in
/// the host shell). The index tracks scene inserts/removes so it never
/// dangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameFocus {
    #[default]
    Viewing,
    EditingName {
        scene_index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditSession {
    script: Script,
    focus: NameFocus,
}

impl EditSession {
    pub fn new(script: Script) -> Self {
        Self { script, focus: NameFocus::Viewing }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn into_script(self) -> Script {
        self.script
    }

    pub fn rev(&self) -> u64 {
        self.script.rev()
    }

    pub fn focus(&self) -> NameFocus {
        self.focus
    }

    fn apply(&mut self, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
        let base_rev = self.script.rev();
        apply_ops(&mut self.script, base_rev, ops)
    }

    /// Appends a scene with the creation defaults (one blank line, "씬 N").
    pub fn add_scene(&mut self) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::InsertScene { index: None }])
    }

    pub fn insert_scene(&mut self, index: usize) -> Result<ApplyResult, ApplyError> {
        let result = self.apply(&[Op::InsertScene { index: Some(index) }])?;
        if let NameFocus::EditingName { scene_index } = self.focus {
            if index <= scene_index {
                self.focus = NameFocus::EditingName { scene_index: scene_index + 1 };
            }
        }
        Ok(result)
    }

    pub fn remove_scene(
        &mut self,
        index: usize,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Gated<ApplyResult>, ApplyError> {
        if !prompt.confirm(SCENE_DELETE_PROMPT) {
            return Ok(Gated::Declined);
        }

        let result = self.apply(&[Op::RemoveScene { index }])?;
        if let NameFocus::EditingName { scene_index } = self.focus {
            if scene_index == index {
                self.focus = NameFocus::Viewing;
            } else if scene_index > index {
                self.focus = NameFocus::EditingName { scene_index: scene_index - 1 };
            }
        }
        Ok(Gated::Applied(result))
    }

    pub fn update_scene(
        &mut self,
        index: usize,
        patch: ScenePatch,
    ) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::UpdateScene { index, patch }])
    }

    pub fn toggle_collapse(&mut self, index: usize) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::ToggleCollapse { index }])
    }

    /// Appends a blank line, or inserts one immediately after
    /// `after_line_index`.
    pub fn add_line(
        &mut self,
        scene_index: usize,
        after_line_index: Option<usize>,
    ) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::InsertLine { scene_index, after_line_index }])
    }

    pub fn remove_line(
        &mut self,
        scene_index: usize,
        line_index: usize,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Gated<ApplyResult>, ApplyError> {
        if !prompt.confirm(LINE_DELETE_PROMPT) {
            return Ok(Gated::Declined);
        }
        Ok(Gated::Applied(self.apply(&[Op::RemoveLine { scene_index, line_index }])?))
    }

    pub fn update_line(
        &mut self,
        scene_index: usize,
        line_index: usize,
        patch: LinePatch,
    ) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::UpdateLine { scene_index, line_index, patch }])
    }

    pub fn add_choice(
        &mut self,
        scene_index: usize,
        line_index: usize,
    ) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::InsertChoice { scene_index, line_index }])
    }

    pub fn remove_choice(
        &mut self,
        scene_index: usize,
        line_index: usize,
        choice_index: usize,
    ) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::RemoveChoice { scene_index, line_index, choice_index }])
    }

    pub fn update_choice(
        &mut self,
        scene_index: usize,
        line_index: usize,
        choice_index: usize,
        patch: ChoicePatch,
    ) -> Result<ApplyResult, ApplyError> {
        self.apply(&[Op::UpdateChoice { scene_index, line_index, choice_index, patch }])
    }

    pub fn start_name_edit(&mut self, scene_index: usize) -> Result<(), ApplyError> {
        if scene_index >= self.script.scenes().len() {
            return Err(ApplyError::IndexOutOfBounds {
                kind: EntityKind::Scene,
                index: scene_index,
                len: self.script.scenes().len(),
            });
        }
        self.focus = NameFocus::EditingName { scene_index };
        Ok(())
    }

    pub fn confirm_name_edit(&mut self) {
        self.focus = NameFocus::Viewing;
    }

    /// External dismiss (focus left the name field without confirmation).
    pub fn dismiss_name_edit(&mut self) {
        self.focus = NameFocus::Viewing;
    }

    /// Replaces the script from a backup payload. On parse failure the
    /// current script and focus are left untouched.
    pub fn import_backup(&mut self, text: &str) -> Result<(), BackupParseError> {
        let script = decode_backup(text)?;
        self.script = script;
        self.focus = NameFocus::Viewing;
        Ok(())
    }

    /// Resets to an empty script after confirmation.
    pub fn clear_script(&mut self, prompt: &mut dyn ConfirmPrompt) -> Gated<()> {
        if !prompt.confirm(CLEAR_PROMPT) {
            return Gated::Declined;
        }
        self.script = Script::new();
        self.focus = NameFocus::Viewing;
        Gated::Applied(())
    }
}
