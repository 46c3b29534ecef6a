// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::{Choice, Line, Script};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSearchMode {
    Substring,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHit<'a> {
    pub scene_index: usize,
    pub line_index: usize,
    pub line: &'a Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceHit<'a> {
    pub scene_index: usize,
    pub line_index: usize,
    pub choice_index: usize,
    pub choice: &'a Choice,
}

/// Search line content across all scenes, in document order.
pub fn line_search<'a>(
    script: &'a Script,
    needle: &str,
    mode: TextSearchMode,
    case_insensitive: bool,
) -> Result<Vec<LineHit<'a>>, regex::Error> {
    let matcher = Matcher::new(needle, mode, case_insensitive)?;

    let mut hits = Vec::new();
    for (scene_index, scene) in script.scenes().iter().enumerate() {
        for (line_index, line) in scene.lines().iter().enumerate() {
            if matcher.is_match(line.content()) {
                hits.push(LineHit { scene_index, line_index, line });
            }
        }
    }
    Ok(hits)
}

/// Search choice display text across all scenes, in document order.
pub fn choice_search<'a>(
    script: &'a Script,
    needle: &str,
    mode: TextSearchMode,
    case_insensitive: bool,
) -> Result<Vec<ChoiceHit<'a>>, regex::Error> {
    let matcher = Matcher::new(needle, mode, case_insensitive)?;

    let mut hits = Vec::new();
    for (scene_index, scene) in script.scenes().iter().enumerate() {
        for (line_index, line) in scene.lines().iter().enumerate() {
            for (choice_index, choice) in line.choices().iter().enumerate() {
                if matcher.is_match(choice.text()) {
                    hits.push(ChoiceHit { scene_index, line_index, choice_index, choice });
                }
            }
        }
    }
    Ok(hits)
}

enum Matcher {
    Substring { needle: String, case_insensitive: bool },
    Regex(regex::Regex),
}

impl Matcher {
    fn new(
        needle: &str,
        mode: TextSearchMode,
        case_insensitive: bool,
    ) -> Result<Self, regex::Error> {
        match mode {
            TextSearchMode::Substring => {
                let needle =
                    if case_insensitive { needle.to_lowercase() } else { needle.to_owned() };
                Ok(Self::Substring { needle, case_insensitive })
            }
            TextSearchMode::Regex => {
                let regex =
                    RegexBuilder::new(needle).case_insensitive(case_insensitive).build()?;
                Ok(Self::Regex(regex))
            }
        }
    }

    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Substring { needle, case_insensitive } => {
                if *case_insensitive {
                    haystack.to_lowercase().contains(needle)
                } else {
                    haystack.contains(needle)
                }
            }
            Self::Regex(regex) => regex.is_match(haystack),
        }
    }
}
