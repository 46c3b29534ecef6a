// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Line, Scene, Script};

/// Mood label substituted when a line's mood is blank or whitespace-only.
/// The substitution happens at serialization time only; the stored value is
/// left untouched.
const DEFAULT_MOOD_LABEL: &str = "기본";

/// Export a script to the positional tag stream.
///
/// Export is stable/deterministic:
/// - Identical script content yields byte-identical output.
/// - Display-only state (`collapsed`) is excluded.
/// - Line and choice tags are keyed by 1-based position (`<1>`, `<ch2>`),
///   not by attributes; each scene is prefixed with a `<n>` line count and
///   scenes are joined with a single newline. There is no root element.
///
/// Field content is emitted verbatim, without escaping. Content containing
/// `<` or `>` makes the stream ambiguous to the downstream parser; this
/// matches the consumer's existing contract and is intentionally not
/// corrected here.
pub fn export_positional(script: &Script) -> String {
    let mut out = String::new();

    for (scene_index, scene) in script.scenes().iter().enumerate() {
        if scene_index > 0 {
            out.push('\n');
        }
        write_scene(&mut out, scene);
    }

    out
}

fn write_scene(out: &mut String, scene: &Scene) {
    let mut count_buf = itoa::Buffer::new();
    out.push_str("<n>");
    out.push_str(count_buf.format(scene.lines().len()));
    out.push_str("</n>");

    for (index, line) in scene.lines().iter().enumerate() {
        write_line(out, index + 1, line);
    }
}

fn write_line(out: &mut String, position: usize, line: &Line) {
    let mut position_buf = itoa::Buffer::new();
    let position_tag = position_buf.format(position);

    out.push('<');
    out.push_str(position_tag);
    out.push('>');

    push_wrapped(out, "name", line.name());

    let mood = if line.mood().trim().is_empty() { DEFAULT_MOOD_LABEL } else { line.mood() };
    push_wrapped(out, "mood", mood);

    push_wrapped(out, "talkCont", line.content());
    push_wrapped(out, "func", line.func());

    out.push_str("<chs>");
    if !line.no_choice() {
        let mut count_buf = itoa::Buffer::new();
        out.push_str("<n>");
        out.push_str(count_buf.format(line.choices().len()));
        out.push_str("</n>");

        for (index, choice) in line.choices().iter().enumerate() {
            let mut choice_buf = itoa::Buffer::new();
            let choice_tag = choice_buf.format(index + 1);

            out.push_str("<ch");
            out.push_str(choice_tag);
            out.push('>');
            push_wrapped(out, "chCont", choice.text());
            push_wrapped(out, "func", choice.func());
            out.push_str("</ch");
            out.push_str(choice_tag);
            out.push('>');
        }
    }
    out.push_str("</chs>");

    out.push_str("</");
    out.push_str(position_tag);
    out.push('>');
}

fn push_wrapped(out: &mut String, tag: &str, value: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(value);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
