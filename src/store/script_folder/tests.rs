// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{Autosave, ScriptFolder, StoreError, WriteDurability};
use crate::model::fixtures::script_small_branching;
use crate::model::{Scene, Script};
use crate::ops::{apply_ops, Op};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("calliope-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct ScriptFolderTestCtx {
    _tmp: TempDir,
    folder: ScriptFolder,
}

impl ScriptFolderTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let folder = ScriptFolder::new(tmp.path().join("my-script"));
        Self { _tmp: tmp, folder }
    }
}

#[fixture]
fn ctx() -> ScriptFolderTestCtx {
    ScriptFolderTestCtx::new("script-folder")
}

#[rstest]
fn save_and_load_round_trip_preserves_script(ctx: ScriptFolderTestCtx) {
    let script = script_small_branching();

    ctx.folder.save_script(&script).unwrap();
    let snapshot = ctx.folder.load_snapshot().unwrap().expect("snapshot");

    assert_eq!(snapshot.script.scenes(), script.scenes());
    assert!(!snapshot.timestamp.is_empty());
}

#[rstest]
fn snapshot_document_wraps_scenes_and_timestamp(ctx: ScriptFolderTestCtx) {
    ctx.folder.save_script(&script_small_branching()).unwrap();

    let raw = std::fs::read_to_string(ctx.folder.snapshot_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(value["scenes"].is_array());
    assert!(value["timestamp"].is_string());
    assert_eq!(value["scenes"][0]["id"], 1);
}

#[rstest]
fn load_snapshot_returns_none_when_folder_is_empty(ctx: ScriptFolderTestCtx) {
    assert_eq!(ctx.folder.load_snapshot().unwrap(), None);
}

#[rstest]
fn load_or_init_script_defaults_to_empty_script(ctx: ScriptFolderTestCtx) {
    let script = ctx.folder.load_or_init_script().unwrap();
    assert!(script.scenes().is_empty());
}

#[rstest]
fn load_snapshot_surfaces_json_errors(ctx: ScriptFolderTestCtx) {
    std::fs::create_dir_all(ctx.folder.root()).unwrap();
    std::fs::write(ctx.folder.snapshot_path(), "{not json").unwrap();

    let err = ctx.folder.load_snapshot().unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
}

#[rstest]
fn clear_snapshot_removes_the_file_and_tolerates_absence(ctx: ScriptFolderTestCtx) {
    ctx.folder.save_script(&Script::new()).unwrap();
    assert!(ctx.folder.snapshot_path().is_file());

    ctx.folder.clear_snapshot().unwrap();
    assert!(!ctx.folder.snapshot_path().exists());

    ctx.folder.clear_snapshot().unwrap();
}

#[rstest]
fn save_leaves_no_temp_files_behind(ctx: ScriptFolderTestCtx) {
    ctx.folder.save_script(&script_small_branching()).unwrap();

    let leftovers = std::fs::read_dir(ctx.folder.root())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".calliope.tmp."))
        .count();
    assert_eq!(leftovers, 0);
}

#[rstest]
fn durable_writes_produce_the_same_snapshot(ctx: ScriptFolderTestCtx) {
    let folder = ctx.folder.clone().with_durability(WriteDurability::Durable);
    let script = script_small_branching();

    folder.save_script(&script).unwrap();
    let snapshot = folder.load_snapshot().unwrap().expect("snapshot");
    assert_eq!(snapshot.script.scenes(), script.scenes());
}

#[rstest]
fn autosave_burst_coalesces_to_the_latest_state(ctx: ScriptFolderTestCtx) {
    let autosave = Autosave::with_quiet_period(ctx.folder.clone(), Duration::from_millis(200));

    let mut script = Script::new();
    let mut rev = 0;
    for _ in 0..5 {
        rev = apply_ops(&mut script, rev, &[Op::InsertScene { index: None }]).unwrap().new_rev;
        autosave.schedule(&script);
    }

    autosave.flush();

    let snapshot = ctx.folder.load_snapshot().unwrap().expect("snapshot");
    assert_eq!(snapshot.script.scenes().len(), 5);
}

#[rstest]
fn autosave_fires_on_its_own_after_the_quiet_period(ctx: ScriptFolderTestCtx) {
    let autosave = Autosave::with_quiet_period(ctx.folder.clone(), Duration::from_millis(20));

    let mut script = Script::new();
    script.scenes_mut().push(Scene::new(1, "씬 1"));
    autosave.schedule(&script);

    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    loop {
        if ctx.folder.snapshot_path().is_file() {
            break;
        }
        assert!(std::time::Instant::now() < deadline, "autosave never fired");
        std::thread::sleep(Duration::from_millis(10));
    }

    let snapshot = ctx.folder.load_snapshot().unwrap().expect("snapshot");
    assert_eq!(snapshot.script.scenes().len(), 1);
}

#[rstest]
fn autosave_reschedule_replaces_the_pending_write(ctx: ScriptFolderTestCtx) {
    let autosave = Autosave::with_quiet_period(ctx.folder.clone(), Duration::from_millis(500));

    let mut stale = Script::new();
    stale.scenes_mut().push(Scene::new(1, "버린 씬"));
    autosave.schedule(&stale);

    let mut fresh = Script::new();
    fresh.scenes_mut().push(Scene::new(1, "최신 씬"));
    autosave.schedule(&fresh);

    autosave.flush();

    let snapshot = ctx.folder.load_snapshot().unwrap().expect("snapshot");
    assert_eq!(snapshot.script.scenes().len(), 1);
    assert_eq!(snapshot.script.scenes()[0].name(), "최신 씬");
}
