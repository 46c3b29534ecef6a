// SPDX-FileCopyrightText: 2026 Calliope Authors
// SPDX-License-Identifier: LicenseRef-Calliope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Calliope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::format::backup::{scenes_to_json, script_from_json, SceneJson};
use crate::model::Script;

const SNAPSHOT_FILENAME: &str = "calliope-script.json";

/// Quiet period before a scheduled autosave fires. Any schedule call inside
/// the window cancels and replaces the pending write.
const AUTOSAVE_QUIET_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// - Additionally fsyncs the file (and the directory on Unix) before
    ///   reporting success.
    Durable,
}

/// What `load_snapshot` returns: the script plus the human-readable
/// timestamp recorded at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub script: Script,
    pub timestamp: String,
}

/// One folder holding one script snapshot.
#[derive(Debug, Clone)]
pub struct ScriptFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl ScriptFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILENAME)
    }

    /// Writes the snapshot, stamping the current local time.
    pub fn save_script(&self, script: &Script) -> Result<(), StoreError> {
        self.save_script_with_timestamp(script, now_timestamp())
    }

    fn save_script_with_timestamp(
        &self,
        script: &Script,
        timestamp: String,
    ) -> Result<(), StoreError> {
        let path = self.snapshot_path();
        let snapshot = SnapshotJson { scenes: scenes_to_json(script), timestamp };
        let mut contents = serde_json::to_vec_pretty(&snapshot)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;
        contents.push(b'\n');
        write_atomic_in_root(&self.root, &path, &contents, self.durability)
    }

    /// Reads the snapshot back, or `None` when the folder holds none yet.
    pub fn load_snapshot(&self) -> Result<Option<Snapshot>, StoreError> {
        let path = self.snapshot_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let snapshot = serde_json::from_str::<SnapshotJson>(&contents)
            .map_err(|source| StoreError::Json { path, source })?;

        Ok(Some(Snapshot {
            script: script_from_json(snapshot.scenes),
            timestamp: snapshot.timestamp,
        }))
    }

    pub fn load_or_init_script(&self) -> Result<Script, StoreError> {
        Ok(self.load_snapshot()?.map(|snapshot| snapshot.script).unwrap_or_default())
    }

    /// Removes the snapshot; removing a snapshot that never existed is fine.
    pub fn clear_snapshot(&self) -> Result<(), StoreError> {
        let path = self.snapshot_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[derive(Debug)]
struct PendingSave {
    script: Script,
    deadline: Instant,
}

#[derive(Debug, Default)]
struct AutosaveState {
    pending: Option<PendingSave>,
    in_flight: bool,
    shutdown: bool,
}

#[derive(Debug)]
struct AutosaveInner {
    folder: ScriptFolder,
    quiet_period: Duration,
    state: Mutex<AutosaveState>,
    cv: Condvar,
}

/// Coalescing deferred writer.
///
/// Each `schedule` cancels the pending write (if any) and re-arms the quiet
/// period with the latest script, so a burst of edits produces exactly one
/// durable write capturing the state at the moment the task fires. Write
/// failures are logged and dropped; the next edit reschedules naturally.
#[derive(Debug)]
pub struct Autosave {
    inner: Arc<AutosaveInner>,
}

impl Autosave {
    pub fn new(folder: ScriptFolder) -> Self {
        Self::with_quiet_period(folder, AUTOSAVE_QUIET_PERIOD)
    }

    pub fn with_quiet_period(folder: ScriptFolder, quiet_period: Duration) -> Self {
        let inner = Arc::new(AutosaveInner {
            folder,
            quiet_period,
            state: Mutex::new(AutosaveState::default()),
            cv: Condvar::new(),
        });

        std::thread::Builder::new()
            .name("calliope-autosave".to_owned())
            .spawn({
                let inner = inner.clone();
                move || run_worker(inner)
            })
            .expect("spawn autosave worker thread");

        Self { inner }
    }

    /// Cancels any pending write and schedules a new one for `script`.
    pub fn schedule(&self, script: &Script) {
        let mut state = self.inner.state.lock().expect("autosave lock poisoned");
        state.pending = Some(PendingSave {
            script: script.clone(),
            deadline: Instant::now() + self.inner.quiet_period,
        });
        self.inner.cv.notify_all();
    }

    /// Forces the pending write (if any) to fire now and waits for it.
    pub fn flush(&self) {
        let mut state = self.inner.state.lock().expect("autosave lock poisoned");
        if let Some(pending) = state.pending.as_mut() {
            pending.deadline = Instant::now();
        }
        self.inner.cv.notify_all();

        while state.pending.is_some() || state.in_flight {
            state = self.inner.cv.wait(state).expect("autosave cv poisoned");
        }
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        // Let the worker drain the pending write, then exit.
        let mut state = self.inner.state.lock().expect("autosave lock poisoned");
        state.shutdown = true;
        self.inner.cv.notify_all();
    }
}

fn run_worker(inner: Arc<AutosaveInner>) {
    loop {
        let script = {
            let mut state = inner.state.lock().expect("autosave lock poisoned");

            loop {
                match &state.pending {
                    Some(pending) => {
                        let now = Instant::now();
                        if now >= pending.deadline {
                            let pending = state.pending.take().expect("pending save");
                            state.in_flight = true;
                            break pending.script;
                        }
                        let wait = pending.deadline - now;
                        state = inner
                            .cv
                            .wait_timeout(state, wait)
                            .expect("autosave cv poisoned")
                            .0;
                    }
                    None => {
                        if state.shutdown {
                            return;
                        }
                        state = inner.cv.wait(state).expect("autosave cv poisoned");
                    }
                }
            }
        };

        if let Err(err) = inner.folder.save_script(&script) {
            tracing::warn!(error = %err, "autosave write failed; next edit will retry");
        }

        let mut state = inner.state.lock().expect("autosave lock poisoned");
        state.in_flight = false;
        inner.cv.notify_all();
    }
}

include!("script_folder/helpers.rs");

#[cfg(test)]
mod tests;
