//! Build orchestration
//!
//! Owns the single in-flight packaging process: launches it, streams and
//! classifies its output, reports the terminal result, and services
//! cancellation by killing the process tree before cleaning up partial
//! output. At most one build is active at a time; there is no queue.

use crate::classify::{classify_line, extract_progress};
use crate::command::BuildRequest;
use crate::events::{
    build_failed_message, BuildEvent, BUILD_CANCELLED_MESSAGE, BUILD_SUCCESS_MESSAGE,
};
use crate::process::{kill_process_tree, spawn_build};
use brokkr_core::utils::dir_is_writable;
use brokkr_core::LogLevel;
use camino::Utf8PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Lifecycle states of a build
///
/// `Launching -> Running` happens on successful spawn; `Cancelled` is the
/// only transition driven by the caller rather than the process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Launching,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl BuildState {
    /// Terminal states release the build slot
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BuildState::Succeeded | BuildState::Failed | BuildState::Cancelled
        )
    }
}

struct ActiveBuild {
    pid: u32,
    output_dir: Utf8PathBuf,
    state: Arc<Mutex<BuildState>>,
    cancelled: Arc<AtomicBool>,
    supervisor: JoinHandle<()>,
}

/// Drives the external packaging tool, one build at a time
pub struct PluginBuilder {
    events: UnboundedSender<BuildEvent>,
    active: Option<ActiveBuild>,
}

impl PluginBuilder {
    /// Create a builder publishing events to the given channel
    pub fn new(events: UnboundedSender<BuildEvent>) -> Self {
        Self {
            events,
            active: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> BuildState {
        match &self.active {
            Some(build) => *build.state.lock().expect("build state lock poisoned"),
            None => BuildState::Idle,
        }
    }

    /// True while a launched process has not reached a terminal state
    pub fn is_running(&self) -> bool {
        let state = self.state();
        state != BuildState::Idle && !state.is_terminal()
    }

    fn emit_log(&self, level: LogLevel, message: impl Into<String>) {
        let _ = self.events.send(BuildEvent::Log {
            level,
            message: message.into(),
        });
    }

    /// Start a build
    ///
    /// Preconditions are checked in order, each reported as a distinct
    /// ERROR event before returning false: the descriptor must exist, the
    /// output directory must be creatable under a writable parent, and
    /// the command line must be constructible. The `Started` event is
    /// emitted synchronously before the process spawns; true means the
    /// process was launched (not that it finished).
    pub fn start_build(&mut self, request: BuildRequest) -> bool {
        if self.is_running() {
            self.emit_log(LogLevel::Error, "A build is already in progress");
            return false;
        }

        if !request.descriptor_path.exists() {
            self.emit_log(
                LogLevel::Error,
                format!("Plugin file not found: {}", request.descriptor_path),
            );
            return false;
        }

        let Some(parent) = request.output_dir.parent() else {
            self.emit_log(
                LogLevel::Error,
                format!("Invalid output directory: {}", request.output_dir),
            );
            return false;
        };
        if !dir_is_writable(parent) {
            self.emit_log(
                LogLevel::Error,
                format!("No permission to create directory in: {}", parent),
            );
            return false;
        }
        if let Err(e) = std::fs::create_dir_all(&request.output_dir) {
            self.emit_log(
                LogLevel::Error,
                format!("Failed to create output directory: {}", e),
            );
            return false;
        }

        let command = match request.command_line() {
            Ok(command) => command,
            Err(e) => {
                self.emit_log(LogLevel::Error, e.to_string());
                return false;
            }
        };
        if let Ok(text) = request.command_text() {
            self.emit_log(LogLevel::Info, format!("Build command: {}", text));
        }

        // Started precedes both the spawn and any output event
        let _ = self.events.send(BuildEvent::Started);

        let state = Arc::new(Mutex::new(BuildState::Launching));
        let cancelled = Arc::new(AtomicBool::new(false));

        let mut child = match spawn_build(&command[0], &command[1..]) {
            Ok(child) => child,
            Err(e) => {
                let message = format!("Failed to start build process: {}", e);
                self.emit_log(LogLevel::Error, message.clone());
                let _ = self.events.send(BuildEvent::Finished {
                    success: false,
                    exit_code: None,
                    message,
                });
                return false;
            }
        };

        let pid = child.id().unwrap_or(0);
        *state.lock().expect("build state lock poisoned") = BuildState::Running;
        debug!("Build process launched with pid {}", pid);

        let events = self.events.clone();
        let state_task = state.clone();
        let cancelled_task = cancelled.clone();

        let supervisor = tokio::spawn(async move {
            let stdout_task = child.stdout.take().map(|out| {
                let events = events.clone();
                tokio::spawn(async move {
                    let mut lines = BufReader::new(out).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let _ = events.send(BuildEvent::Log {
                            level: classify_line(line),
                            message: line.to_string(),
                        });
                        if let Some(percent) = extract_progress(line) {
                            let _ = events.send(BuildEvent::Progress { percent });
                        }
                    }
                })
            });

            let stderr_task = child.stderr.take().map(|err| {
                let events = events.clone();
                tokio::spawn(async move {
                    let mut lines = BufReader::new(err).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let _ = events.send(BuildEvent::Log {
                            level: LogLevel::Error,
                            message: line.to_string(),
                        });
                    }
                })
            });

            let status = child.wait().await;

            // Both streams must drain before the terminal event
            if let Some(task) = stdout_task {
                let _ = task.await;
            }
            if let Some(task) = stderr_task {
                let _ = task.await;
            }

            // The cancel path owns the terminal transition once the flag
            // is set; check-and-set shares the state lock to keep the two
            // paths mutually exclusive.
            {
                let mut state = state_task.lock().expect("build state lock poisoned");
                if cancelled_task.load(Ordering::SeqCst) {
                    return;
                }
                *state = match &status {
                    Ok(status) if status.success() => BuildState::Succeeded,
                    _ => BuildState::Failed,
                };
            }

            match status {
                Ok(status) if status.success() => {
                    let _ = events.send(BuildEvent::Log {
                        level: LogLevel::Success,
                        message: BUILD_SUCCESS_MESSAGE.to_string(),
                    });
                    let _ = events.send(BuildEvent::Finished {
                        success: true,
                        exit_code: Some(0),
                        message: BUILD_SUCCESS_MESSAGE.to_string(),
                    });
                }
                Ok(status) => {
                    let message = build_failed_message(status.code());
                    let _ = events.send(BuildEvent::Log {
                        level: LogLevel::Error,
                        message: message.clone(),
                    });
                    let _ = events.send(BuildEvent::Finished {
                        success: false,
                        exit_code: status.code(),
                        message,
                    });
                }
                Err(e) => {
                    let message = format!("Failed to wait for build process: {}", e);
                    let _ = events.send(BuildEvent::Finished {
                        success: false,
                        exit_code: None,
                        message,
                    });
                }
            }
        });

        self.active = Some(ActiveBuild {
            pid,
            output_dir: request.output_dir,
            state,
            cancelled,
            supervisor,
        });
        true
    }

    /// Cancel the in-flight build
    ///
    /// Kills the full process tree and waits for the termination commands
    /// to finish, then removes whatever partial output exists (failure is
    /// a warning, not fatal), then emits the cancellation event. Returns
    /// false when no build is active; that is a no-op, not an error.
    pub async fn cancel_build(&mut self) -> bool {
        let Some(build) = self.active.take() else {
            return false;
        };

        {
            let mut state = build.state.lock().expect("build state lock poisoned");
            if state.is_terminal() {
                return false;
            }
            build.cancelled.store(true, Ordering::SeqCst);
            *state = BuildState::Cancelled;
        }

        // Tree first, cleanup second: removing a directory still held
        // open by a child fails on Windows
        kill_process_tree(build.pid).await;
        let _ = build.supervisor.await;

        if build.output_dir.exists() {
            match std::fs::remove_dir_all(&build.output_dir) {
                Ok(()) => self.emit_log(
                    LogLevel::Success,
                    format!("Successfully removed folder: {}", build.output_dir),
                ),
                Err(e) => {
                    self.emit_log(LogLevel::Warning, format!("Failed to remove folder: {}", e))
                }
            }
        }

        self.emit_log(LogLevel::Warning, BUILD_CANCELLED_MESSAGE);
        let _ = self.events.send(BuildEvent::Finished {
            success: false,
            exit_code: None,
            message: BUILD_CANCELLED_MESSAGE.to_string(),
        });
        true
    }
}
