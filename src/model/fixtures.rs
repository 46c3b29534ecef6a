// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::script::{Choice, Line, Scene, Script};

fn line(name: &str, mood: &str, content: &str, func: &str) -> Line {
    let mut line = Line::new();
    line.set_name(name);
    line.set_mood(mood);
    line.set_content(content);
    line.set_func(func);
    line
}

fn choice(text: &str, func: &str) -> Choice {
    let mut choice = Choice::new();
    choice.set_text(text);
    choice.set_func(func);
    choice
}

/// Two scenes, one branching line. Small enough to eyeball in test failures.
pub(crate) fn script_small_branching() -> Script {
    let mut script = Script::new();

    let mut intro = Scene::new(1, "씬 1");
    intro.lines_mut().clear();
    intro.lines_mut().push(line("하나", "기쁨", "어서 와.", "ev_greet"));
    let mut ask = line("하나", "", "뭐부터 할까?", "");
    ask.push_choice(choice("상점으로 간다", "ev_shop"));
    ask.push_choice(choice("광장으로 간다", "ev_plaza"));
    intro.lines_mut().push(ask);

    let mut shop = Scene::new(2, "씬 2");
    shop.lines_mut().clear();
    shop.lines_mut().push(line("점원", "놀람", "오늘은 일찍 왔네요.", ""));

    script.scenes_mut().push(intro);
    script.scenes_mut().push(shop);
    script
}
