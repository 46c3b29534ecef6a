// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use calliope::model::{Choice, Line, Scene, Script};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("calliope_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    LargeLongContent,
}

/// Deterministic script of the requested shape.
///
/// - `Small`: 2 scenes x 4 lines, one branching line.
/// - `Medium`: 20 scenes x 10 lines, every third line branches twice.
/// - `LargeLongContent`: 80 scenes x 20 lines with long content and three
///   choices on every fourth line.
pub fn script(case: Case) -> Script {
    let (scene_count, line_count, long_content) = match case {
        Case::Small => (2, 4, false),
        Case::Medium => (20, 10, false),
        Case::LargeLongContent => (80, 20, true),
    };

    let mut script = Script::new();
    for scene_index in 0..scene_count {
        let mut scene = Scene::new(scene_index as u32 + 1, format!("씬 {}", scene_index + 1));
        scene.lines_mut().clear();

        for line_index in 0..line_count {
            let mut line = Line::new();
            line.set_name(format!("speaker_{:02}", line_index % 5));
            if line_index % 2 == 0 {
                line.set_mood("기쁨");
            }
            let content = if long_content {
                format!(
                    "bench line {scene_index:03}/{line_index:03} {}",
                    "긴 대사 내용 ".repeat(12)
                )
            } else {
                format!("bench line {scene_index:03}/{line_index:03}")
            };
            line.set_content(content);
            line.set_func(format!("ev_{scene_index:03}_{line_index:03}"));

            let branches = match case {
                Case::Small => usize::from(scene_index == 0 && line_index == 1) * 2,
                Case::Medium => {
                    if line_index % 3 == 0 {
                        2
                    } else {
                        0
                    }
                }
                Case::LargeLongContent => {
                    if line_index % 4 == 0 {
                        3
                    } else {
                        0
                    }
                }
            };
            for choice_index in 0..branches {
                let mut choice = Choice::new();
                choice.set_text(format!("선택지 {choice_index}"));
                choice.set_func(format!("ev_ch_{scene_index:03}_{line_index:03}_{choice_index}"));
                line.push_choice(choice);
            }

            scene.lines_mut().push(line);
        }

        script.scenes_mut().push(scene);
    }

    script
}
