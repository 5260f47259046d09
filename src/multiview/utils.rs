// Helper functions shared by commands

use std::net::UdpSocket;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

use super::models::SystemInfo;

/// Run command and capture output with timeout (shared utility).
/// A child still running when the timeout fires is killed.
pub async fn run_output_with_timeout(
    program: &str,
    args: Vec<String>,
    timeout_secs: u64,
) -> Result<std::process::Output, String> {
    let mut child = TokioCommand::new(program)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to run {}: {}", program, e))?;

    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    // Drain the pipes concurrently so the child never blocks on a full buffer.
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(pipe) = stdout_pipe.as_mut() {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(pipe) = stderr_pipe.as_mut() {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });

    match timeout(Duration::from_secs(timeout_secs), child.wait()).await {
        Ok(status) => {
            let status = status.map_err(|e| format!("Failed to run {}: {}", program, e))?;
            let stdout = stdout_task.await.unwrap_or_default();
            let stderr = stderr_task.await.unwrap_or_default();
            Ok(std::process::Output {
                status,
                stdout,
                stderr,
            })
        }
        Err(_) => {
            // Reap the still-running child before reporting the timeout.
            let _ = child.kill().await;
            stdout_task.abort();
            stderr_task.abort();
            Err(format!("Timed out after {}s", timeout_secs))
        }
    }
}

/// Resolve the machine hostname via the `hostname` binary.
async fn detect_hostname() -> Option<String> {
    let output = run_output_with_timeout("hostname", Vec::new(), 2).await.ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Detect the primary local IPv4 address with a UDP connect probe.
/// Connecting a UDP socket sends no traffic; it only selects a route.
fn detect_local_ips() -> Vec<String> {
    let mut ips = Vec::new();
    if let Ok(socket) = UdpSocket::bind("0.0.0.0:0") {
        if socket.connect("8.8.8.8:80").is_ok() {
            if let Ok(addr) = socket.local_addr() {
                ips.push(addr.ip().to_string());
            }
        }
    }
    ips
}

/// Collect hostname and local addresses for UI display.
/// Errors degrade to a placeholder hostname and an empty address list.
pub async fn get_system_info_report() -> SystemInfo {
    let hostname = match detect_hostname().await {
        Some(name) => name,
        None => {
            eprintln!("[SystemInfo] Could not resolve hostname");
            "Error getting hostname".to_string()
        }
    };

    SystemInfo {
        hostname,
        ip_addresses: detect_local_ips(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_on_slow_command() {
        let result = run_output_with_timeout("sleep", vec!["5".to_string()], 1).await;
        assert!(result.unwrap_err().contains("Timed out"));
    }

    #[tokio::test]
    async fn test_timed_out_child_is_killed() {
        let marker = std::env::temp_dir().join(format!("mv-timeout-{}", std::process::id()));
        let _ = std::fs::remove_file(&marker);
        let script = format!("sleep 2 && touch {}", marker.display());
        let result = run_output_with_timeout("sh", vec!["-c".into(), script], 1).await;
        assert!(result.unwrap_err().contains("Timed out"));

        // Had the shell survived the kill, the marker would appear here.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let result = run_output_with_timeout("definitely-not-a-real-binary", Vec::new(), 1).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_report_always_produces_hostname() {
        let info = get_system_info_report().await;
        assert!(!info.hostname.is_empty());
    }
}
