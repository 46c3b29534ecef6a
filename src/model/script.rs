// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// A branch option attached to a [`Line`]: display text plus an opaque
/// function-hook reference interpreted by the downstream runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Choice {
    text: String,
    func: String,
}

impl Choice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    pub fn set_func(&mut self, func: impl Into<String>) {
        self.func = func.into();
    }
}

/// A single dialogue beat: speaker name, mood tag, text content, an opaque
/// function hook, and optional branching choices.
///
/// `no_choice` and `choices` are coupled: `no_choice` is `true` exactly when
/// `choices` is empty. All choice mutation goes through methods on `Line` so
/// the coupling holds in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    name: String,
    mood: String,
    content: String,
    func: String,
    choices: Vec<Choice>,
    no_choice: bool,
}

impl Line {
    /// A blank line with no choices.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            mood: String::new(),
            content: String::new(),
            func: String::new(),
            choices: Vec::new(),
            no_choice: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn set_mood(&mut self, mood: impl Into<String>) {
        self.mood = mood.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    pub fn set_func(&mut self, func: impl Into<String>) {
        self.func = func.into();
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn choice_mut(&mut self, index: usize) -> Option<&mut Choice> {
        self.choices.get_mut(index)
    }

    pub fn no_choice(&self) -> bool {
        self.no_choice
    }

    /// Appends a choice and clears `no_choice`.
    pub fn push_choice(&mut self, choice: Choice) {
        self.choices.push(choice);
        self.no_choice = false;
    }

    /// Removes the choice at `index`; re-asserts `no_choice` when the last
    /// choice goes away. The index must be in bounds.
    pub fn remove_choice(&mut self, index: usize) -> Choice {
        let choice = self.choices.remove(index);
        if self.choices.is_empty() {
            self.no_choice = true;
        }
        choice
    }

    /// Sets the `no_choice` flag while keeping it coupled to `choices`.
    ///
    /// Setting `true` clears all choices. Setting `false` only sticks while
    /// choices exist; on a line without choices the flag stays `true`.
    pub fn set_no_choice(&mut self, no_choice: bool) {
        if no_choice {
            self.choices.clear();
            self.no_choice = true;
        } else if !self.choices.is_empty() {
            self.no_choice = false;
        }
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level ordered unit of the script, containing dialogue lines.
///
/// `id` is positional, not stable identity: ids are reassigned `1..=N` in
/// array order after every scene insert/remove. `collapsed` is display-only
/// state and never affects serialized output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    id: u32,
    name: String,
    lines: Vec<Line>,
    collapsed: bool,
}

impl Scene {
    /// A scene always starts with one blank line.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lines: vec![Line::new()],
            collapsed: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<Line> {
        &mut self.lines
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }
}

/// The whole dialogue document: an ordered sequence of scenes plus a
/// revision counter used for optimistic concurrency in `ops::apply_ops`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    scenes: Vec<Scene>,
    rev: u64,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut Vec<Scene> {
        &mut self.scenes
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scene_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    /// Reassigns scene ids `1..=N` in array order.
    pub fn renumber_scenes(&mut self) {
        for (index, scene) in self.scenes.iter_mut().enumerate() {
            scene.set_id(index as u32 + 1);
        }
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}
