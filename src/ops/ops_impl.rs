// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Op-application implementation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(
    scenes: &mut Vec<Scene>,
    op: &Op,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        Op::InsertScene { index } => {
            let insert_at = match index {
                None => scenes.len(),
                Some(index) => {
                    if *index > scenes.len() {
                        return Err(ApplyError::IndexOutOfBounds {
                            kind: EntityKind::Scene,
                            index: *index,
                            len: scenes.len(),
                        });
                    }
                    *index
                }
            };

            scenes.insert(insert_at, Scene::new(0, default_scene_name(insert_at + 1)));
            renumber(scenes);

            delta.record_added(EntityRef::Scene { scene: insert_at });
            for scene in insert_at + 1..scenes.len() {
                delta.record_updated(EntityRef::Scene { scene });
            }
            Ok(())
        }
        Op::RemoveScene { index } => {
            if *index >= scenes.len() {
                return Err(ApplyError::IndexOutOfBounds {
                    kind: EntityKind::Scene,
                    index: *index,
                    len: scenes.len(),
                });
            }

            scenes.remove(*index);
            renumber(scenes);

            delta.record_removed(EntityRef::Scene { scene: *index });
            for scene in *index..scenes.len() {
                delta.record_updated(EntityRef::Scene { scene });
            }
            Ok(())
        }
        Op::UpdateScene { index, patch } => {
            let scene = scene_at(scenes, *index)?;
            if let Some(name) = &patch.name {
                scene.set_name(name.clone());
            }
            if let Some(collapsed) = patch.collapsed {
                scene.set_collapsed(collapsed);
            }
            delta.record_updated(EntityRef::Scene { scene: *index });
            Ok(())
        }
        Op::ToggleCollapse { index } => {
            let scene = scene_at(scenes, *index)?;
            let collapsed = scene.collapsed();
            scene.set_collapsed(!collapsed);
            delta.record_updated(EntityRef::Scene { scene: *index });
            Ok(())
        }
        Op::InsertLine { scene_index, after_line_index } => {
            let scene = scene_at(scenes, *scene_index)?;
            let insert_at = match after_line_index {
                None => scene.lines().len(),
                Some(after) => {
                    if *after >= scene.lines().len() {
                        return Err(ApplyError::IndexOutOfBounds {
                            kind: EntityKind::Line,
                            index: *after,
                            len: scene.lines().len(),
                        });
                    }
                    after + 1
                }
            };

            scene.lines_mut().insert(insert_at, Line::new());
            delta.record_added(EntityRef::Line { scene: *scene_index, line: insert_at });
            Ok(())
        }
        Op::RemoveLine { scene_index, line_index } => {
            let scene = scene_at(scenes, *scene_index)?;
            if *line_index >= scene.lines().len() {
                return Err(ApplyError::IndexOutOfBounds {
                    kind: EntityKind::Line,
                    index: *line_index,
                    len: scene.lines().len(),
                });
            }

            scene.lines_mut().remove(*line_index);
            delta.record_removed(EntityRef::Line { scene: *scene_index, line: *line_index });

            // A scene never goes without lines.
            if scene.lines().is_empty() {
                scene.lines_mut().push(Line::new());
                delta.record_added(EntityRef::Line { scene: *scene_index, line: 0 });
            }
            Ok(())
        }
        Op::UpdateLine { scene_index, line_index, patch } => {
            let line = line_at(scenes, *scene_index, *line_index)?;
            if let Some(name) = &patch.name {
                line.set_name(name.clone());
            }
            if let Some(mood) = &patch.mood {
                line.set_mood(mood.clone());
            }
            if let Some(content) = &patch.content {
                line.set_content(content.clone());
            }
            if let Some(func) = &patch.func {
                line.set_func(func.clone());
            }
            if let Some(no_choice) = patch.no_choice {
                line.set_no_choice(no_choice);
            }
            delta.record_updated(EntityRef::Line { scene: *scene_index, line: *line_index });
            Ok(())
        }
        Op::InsertChoice { scene_index, line_index } => {
            let line = line_at(scenes, *scene_index, *line_index)?;
            line.push_choice(Choice::new());
            delta.record_added(EntityRef::Choice {
                scene: *scene_index,
                line: *line_index,
                choice: line.choices().len() - 1,
            });
            delta.record_updated(EntityRef::Line { scene: *scene_index, line: *line_index });
            Ok(())
        }
        Op::RemoveChoice { scene_index, line_index, choice_index } => {
            let line = line_at(scenes, *scene_index, *line_index)?;
            if *choice_index >= line.choices().len() {
                return Err(ApplyError::IndexOutOfBounds {
                    kind: EntityKind::Choice,
                    index: *choice_index,
                    len: line.choices().len(),
                });
            }

            line.remove_choice(*choice_index);
            delta.record_removed(EntityRef::Choice {
                scene: *scene_index,
                line: *line_index,
                choice: *choice_index,
            });
            delta.record_updated(EntityRef::Line { scene: *scene_index, line: *line_index });
            Ok(())
        }
        Op::UpdateChoice { scene_index, line_index, choice_index, patch } => {
            let line = line_at(scenes, *scene_index, *line_index)?;
            let choices_len = line.choices().len();
            let Some(choice) = line.choice_mut(*choice_index) else {
                return Err(ApplyError::IndexOutOfBounds {
                    kind: EntityKind::Choice,
                    index: *choice_index,
                    len: choices_len,
                });
            };

            if let Some(text) = &patch.text {
                choice.set_text(text.clone());
            }
            if let Some(func) = &patch.func {
                choice.set_func(func.clone());
            }
            delta.record_updated(EntityRef::Choice {
                scene: *scene_index,
                line: *line_index,
                choice: *choice_index,
            });
            Ok(())
        }
    }
}

fn scene_at(scenes: &mut [Scene], index: usize) -> Result<&mut Scene, ApplyError> {
    let len = scenes.len();
    scenes
        .get_mut(index)
        .ok_or(ApplyError::IndexOutOfBounds { kind: EntityKind::Scene, index, len })
}

fn line_at(
    scenes: &mut [Scene],
    scene_index: usize,
    line_index: usize,
) -> Result<&mut Line, ApplyError> {
    let scene = scene_at(scenes, scene_index)?;
    let len = scene.lines().len();
    scene
        .line_mut(line_index)
        .ok_or(ApplyError::IndexOutOfBounds { kind: EntityKind::Line, index: line_index, len })
}

fn renumber(scenes: &mut [Scene]) {
    for (index, scene) in scenes.iter_mut().enumerate() {
        scene.set_id(index as u32 + 1);
    }
}

fn default_scene_name(position: usize) -> String {
    format!("씬 {position}")
}
