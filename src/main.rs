// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Calliope CLI entrypoint.
//!
//! Works against a script folder holding one snapshot. `--export` prints the
//! positional tag stream to stdout for the downstream runtime; `--backup`,
//! `--import` and `--clear` manage the JSON backup/restore cycle.

use std::error::Error;
use std::io;
use std::io::Write;

use tracing_subscriber::EnvFilter;

use calliope::format::backup::{backup_file_name, encode_backup};
use calliope::format::positional::export_positional;
use calliope::model::Script;
use calliope::ops::{ChoicePatch, LinePatch};
use calliope::session::{ConfirmPrompt, EditSession, Gated};
use calliope::store::{Autosave, ScriptFolder, WriteDurability};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<script-dir>] [--durable-writes]\n  {program} [<script-dir>] [--durable-writes] --export\n  {program} [<script-dir>] [--durable-writes] --backup\n  {program} [<script-dir>] [--durable-writes] --import <file>\n  {program} [<script-dir>] [--durable-writes] --clear\n  {program} --demo --export\n\nWithout an action flag, prints a short summary of the stored script.\nIf script-dir is omitted, the current working directory is used.\n--demo uses a built-in demo script and cannot be combined with script-dir.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    export: bool,
    backup: bool,
    import: Option<String>,
    clear: bool,
    demo: bool,
    script_dir: Option<String>,
    durable_writes: bool,
}

impl CliOptions {
    fn action_count(&self) -> usize {
        usize::from(self.export)
            + usize::from(self.backup)
            + usize::from(self.import.is_some())
            + usize::from(self.clear)
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--export" => {
                if options.export {
                    return Err(());
                }
                options.export = true;
            }
            "--backup" => {
                if options.backup {
                    return Err(());
                }
                options.backup = true;
            }
            "--import" => {
                if options.import.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.import = Some(file);
            }
            "--clear" => {
                if options.clear {
                    return Err(());
                }
                options.clear = true;
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.script_dir.is_some() {
                    return Err(());
                }
                options.script_dir = Some(arg);
            }
        }
    }

    if options.action_count() > 1 {
        return Err(());
    }

    if options.demo && options.script_dir.is_some() {
        return Err(());
    }

    // The demo script lives in memory only; stateful actions need a folder.
    if options.demo && (options.backup || options.import.is_some() || options.clear) {
        return Err(());
    }

    Ok(options)
}

struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}

/// Small built-in script, assembled through the session so the demo goes
/// through the same command path as real edits.
fn demo_script() -> Script {
    let mut session = EditSession::default();

    session.add_scene().expect("add scene");
    session
        .update_line(0, 0, LinePatch {
            name: Some("하나".to_owned()),
            mood: Some("기쁨".to_owned()),
            content: Some("어서 와. 오늘은 어디로 갈까?".to_owned()),
            func: Some("ev_greet".to_owned()),
            ..LinePatch::default()
        })
        .expect("update line");
    session.add_line(0, None).expect("add line");
    session
        .update_line(0, 1, LinePatch {
            name: Some("하나".to_owned()),
            content: Some("골라 봐.".to_owned()),
            ..LinePatch::default()
        })
        .expect("update line");
    session.add_choice(0, 1).expect("add choice");
    session
        .update_choice(0, 1, 0, ChoicePatch {
            text: Some("상점으로 간다".to_owned()),
            func: Some("ev_shop".to_owned()),
        })
        .expect("update choice");
    session.add_choice(0, 1).expect("add choice");
    session
        .update_choice(0, 1, 1, ChoicePatch {
            text: Some("광장으로 간다".to_owned()),
            func: Some("ev_plaza".to_owned()),
        })
        .expect("update choice");

    session.add_scene().expect("add scene");
    session
        .update_line(1, 0, LinePatch {
            name: Some("점원".to_owned()),
            mood: Some("놀람".to_owned()),
            content: Some("오늘은 일찍 왔네요.".to_owned()),
            ..LinePatch::default()
        })
        .expect("update line");

    session.into_script()
}

fn print_summary(script: &Script, last_saved: Option<&str>) {
    let line_count: usize = script.scenes().iter().map(|scene| scene.lines().len()).sum();
    let choice_count: usize = script
        .scenes()
        .iter()
        .flat_map(|scene| scene.lines())
        .map(|line| line.choices().len())
        .sum();

    println!(
        "{} scene(s), {} line(s), {} choice(s)",
        script.scenes().len(),
        line_count,
        choice_count
    );
    match last_saved {
        Some(timestamp) => println!("last saved: {timestamp}"),
        None => println!("last saved: never"),
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();

        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "calliope".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.demo {
            let script = demo_script();
            if options.export {
                println!("{}", export_positional(&script));
            } else {
                print_summary(&script, None);
            }
            return Ok(());
        }

        let dir = options.script_dir.unwrap_or_else(|| ".".to_owned());
        let folder = if options.durable_writes {
            ScriptFolder::new(dir).with_durability(WriteDurability::Durable)
        } else {
            ScriptFolder::new(dir)
        };

        if options.export {
            let script = folder.load_or_init_script()?;
            println!("{}", export_positional(&script));
            return Ok(());
        }

        if options.backup {
            let script = folder.load_or_init_script()?;
            let path = folder.root().join(backup_file_name(chrono::Local::now().date_naive()));
            std::fs::write(&path, encode_backup(&script))
                .map_err(|err| format!("cannot write backup to {path:?}: {err}"))?;
            println!("backup written to {}", path.display());
            return Ok(());
        }

        if let Some(file) = &options.import {
            let payload = std::fs::read_to_string(file)
                .map_err(|err| format!("cannot read backup from {file}: {err}"))?;

            let mut session = EditSession::new(folder.load_or_init_script()?);
            session.import_backup(&payload)?;

            let autosave = Autosave::new(folder.clone());
            autosave.schedule(session.script());
            autosave.flush();

            println!("imported {} scene(s) from {file}", session.script().scenes().len());
            return Ok(());
        }

        if options.clear {
            let mut session = EditSession::new(folder.load_or_init_script()?);
            match session.clear_script(&mut StdinConfirm) {
                Gated::Applied(()) => {
                    folder.clear_snapshot()?;
                    println!("stored script cleared");
                }
                Gated::Declined => println!("aborted"),
            }
            return Ok(());
        }

        let snapshot = folder.load_snapshot()?;
        match snapshot {
            Some(snapshot) => print_summary(&snapshot.script, Some(&snapshot.timestamp)),
            None => print_summary(&Script::new(), None),
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("calliope: {err}");
        std::process::exit(1);
    }
}
