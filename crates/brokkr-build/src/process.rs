//! Process spawning and tree termination
//!
//! The packaging tool spawns its own build-tool subprocesses, so
//! cancellation must reach the whole tree, not just the direct child.
//! Termination goes through the platform's kill utility and completes
//! before the caller is allowed to touch the output directory.

use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::warn;

/// Build-tool images swept after the tree kill; the packaging tool can
/// detach these from its own process tree
#[cfg(windows)]
const BUILD_TOOL_IMAGES: &[&str] = &["UnrealBuildTool.exe", "UBT.exe"];

/// Spawn the packaging tool with captured output streams
///
/// On Unix the child is placed in its own process group so a group
/// signal reaches every descendant.
pub fn spawn_build(program: &str, args: &[String]) -> std::io::Result<Child> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    #[cfg(unix)]
    cmd.process_group(0);

    cmd.spawn()
}

/// Forcibly terminate a spawned process and all of its descendants
///
/// Blocks until the termination commands themselves complete; failures
/// are logged, not propagated, since the process may already be gone.
pub async fn kill_process_tree(pid: u32) {
    #[cfg(windows)]
    {
        let result = Command::new("taskkill")
            .args(["/F", "/PID", &pid.to_string(), "/T"])
            .output()
            .await;
        if let Err(e) = result {
            warn!("taskkill failed for pid {}: {}", pid, e);
        }

        for image in BUILD_TOOL_IMAGES {
            let _ = Command::new("taskkill")
                .args(["/F", "/IM", image])
                .output()
                .await;
        }
    }

    #[cfg(unix)]
    {
        // The child was spawned as its own process-group leader, so the
        // group id equals its pid
        let result = Command::new("kill")
            .args(["-9", &format!("-{}", pid)])
            .output()
            .await;
        if let Err(e) = result {
            warn!("Failed to run kill for pid {}: {}", pid, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_and_kill_group() {
        let mut child = spawn_build("/bin/sh", &["-c".to_string(), "sleep 30".to_string()])
            .expect("spawn sh");
        let pid = child.id().expect("child pid");

        kill_process_tree(pid).await;

        let status = child.wait().await.expect("wait");
        assert!(!status.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_kill_missing_pid_does_not_panic() {
        // A pid that certainly has no process group; the kill command
        // reports failure and we swallow it
        kill_process_tree(0x3FFF_FFFE).await;
    }
}
