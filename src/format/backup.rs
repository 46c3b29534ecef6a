// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON backup codec.
//!
//! The backup payload is a plain JSON array of scene records, field-for-field
//! the in-memory shape (`noChoice` keeps its wire spelling). Decoding is
//! strict about shape and leaves the caller's current script untouched on
//! failure; positional invariants (scene ids, non-empty lines, the
//! `noChoice`/`choices` coupling) are re-established rather than trusted.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Choice, Line, Scene, Script};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SceneJson {
    pub(crate) id: u32,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) lines: Vec<LineJson>,
    #[serde(default)]
    pub(crate) collapsed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LineJson {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) mood: String,
    #[serde(default)]
    pub(crate) content: String,
    #[serde(default)]
    pub(crate) func: String,
    #[serde(default)]
    pub(crate) choices: Vec<ChoiceJson>,
    #[serde(default, rename = "noChoice")]
    pub(crate) no_choice: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChoiceJson {
    #[serde(default)]
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) func: String,
}

pub(crate) fn scenes_to_json(script: &Script) -> Vec<SceneJson> {
    script
        .scenes()
        .iter()
        .map(|scene| SceneJson {
            id: scene.id(),
            name: scene.name().to_owned(),
            lines: scene
                .lines()
                .iter()
                .map(|line| LineJson {
                    name: line.name().to_owned(),
                    mood: line.mood().to_owned(),
                    content: line.content().to_owned(),
                    func: line.func().to_owned(),
                    choices: line
                        .choices()
                        .iter()
                        .map(|choice| ChoiceJson {
                            text: choice.text().to_owned(),
                            func: choice.func().to_owned(),
                        })
                        .collect(),
                    no_choice: line.no_choice(),
                })
                .collect(),
            collapsed: scene.collapsed(),
        })
        .collect()
}

pub(crate) fn script_from_json(scenes_json: Vec<SceneJson>) -> Script {
    let mut script = Script::new();

    for scene_json in scenes_json {
        let mut scene = Scene::new(scene_json.id, scene_json.name);
        scene.set_collapsed(scene_json.collapsed);
        scene.lines_mut().clear();

        for line_json in scene_json.lines {
            let mut line = Line::new();
            line.set_name(line_json.name);
            line.set_mood(line_json.mood);
            line.set_content(line_json.content);
            line.set_func(line_json.func);

            // `noChoice` is reconciled against the choices that actually
            // arrived, not the flag in the payload.
            for choice_json in line_json.choices {
                let mut choice = Choice::new();
                choice.set_text(choice_json.text);
                choice.set_func(choice_json.func);
                line.push_choice(choice);
            }

            scene.lines_mut().push(line);
        }

        if scene.lines().is_empty() {
            scene.lines_mut().push(Line::new());
        }

        script.scenes_mut().push(scene);
    }

    script.renumber_scenes();
    script
}

/// Serialize a script to the backup payload (pretty-printed JSON array of
/// scene records).
pub fn encode_backup(script: &Script) -> String {
    serde_json::to_string_pretty(&scenes_to_json(script)).expect("scene records serialize to JSON")
}

/// Parse a backup payload into a script.
///
/// Fails on malformed JSON or on any record that is not scene-shaped; the
/// caller's current script is never touched. Scene ids are reassigned
/// `1..=N` and a scene with no lines receives one blank line, matching the
/// model's own guarantees.
pub fn decode_backup(text: &str) -> Result<Script, BackupParseError> {
    let scenes_json =
        serde_json::from_str::<Vec<SceneJson>>(text).map_err(|source| BackupParseError { source })?;
    Ok(script_from_json(scenes_json))
}

/// Conventional backup filename for a given date. The date is informational
/// only; importing does not interpret it.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("script_backup_{}.json", date.format("%Y-%m-%d"))
}

#[derive(Debug)]
pub struct BackupParseError {
    source: serde_json::Error,
}

impl fmt::Display for BackupParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid backup payload: {}", self.source)
    }
}

impl std::error::Error for BackupParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
