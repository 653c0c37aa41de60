use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{trace, warn};

use super::{VerificationOracle, VerificationOutcome, decode_payload};
use crate::errors::{EmailFinderError, Result};

/// Oracle that runs a local verifier binary as `<program> <email>` and reads
/// the JSON reply from stdout.
#[derive(Debug, Clone)]
pub struct CliOracle {
    program: PathBuf,
    timeout: Duration,
}

impl CliOracle {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl VerificationOracle for CliOracle {
    fn transport(&self) -> &'static str {
        "cli"
    }

    async fn verify(&self, email: &str) -> Result<VerificationOutcome> {
        trace!(email, program = %self.program.display(), "verifying via CLI");

        let child = Command::new(&self.program)
            .arg(email)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EmailFinderError::oracle_transport(self.transport(), email, e))?;

        // On timeout the child is dropped with the future and killed.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(out)) => out,
            Ok(Err(e)) => {
                return Err(EmailFinderError::oracle_transport(self.transport(), email, e));
            }
            Err(_) => {
                warn!(email, timeout_ms = self.timeout.as_millis() as u64, "verifier timed out");
                return Ok(VerificationOutcome::unknown(email));
            }
        };

        if !output.status.success() {
            warn!(
                email,
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "verifier exited unsuccessfully"
            );
            return Ok(VerificationOutcome::unknown(email));
        }

        match decode_payload(self.transport(), email, &output.stdout) {
            Ok(reply) => Ok(reply.into_outcome(email)),
            Err(e) => {
                warn!(email, error = %e, "undecodable verifier output");
                Ok(VerificationOutcome::unknown(email))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::oracle::Reachability;
    use std::io::Write;
    use once_cell::sync::Lazy;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    // Serializes script writes and spawns so a concurrent fork never holds a
    // write handle to a script being exec'd (ETXTBSY).
    static SPAWN_LOCK: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

    fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "#!/bin/sh\n{body}").unwrap();
        drop(f);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_echoing_verifier() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = TempDir::new().unwrap();
        let path = script(
            &dir,
            "check",
            r#"printf '{"input":"%s","is_reachable":"safe","smtp":{"is_deliverable":true},"syntax":{"is_valid_syntax":true},"mx":{"accepts_mail":true}}' "$1""#,
        );
        let oracle = CliOracle::new(&path, Duration::from_secs(5));
        let outcome = oracle.verify("john@acme.com").await.unwrap();
        assert_eq!(outcome.email, "john@acme.com");
        assert_eq!(outcome.reachability, Reachability::Safe);
        assert!(outcome.deliverable);
    }

    #[tokio::test]
    async fn test_array_output() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = TempDir::new().unwrap();
        let path = script(&dir, "check", r#"echo '[{"is_reachable":"invalid"}]'"#);
        let oracle = CliOracle::new(&path, Duration::from_secs(5));
        let outcome = oracle.verify("a@b.com").await.unwrap();
        assert_eq!(outcome.reachability, Reachability::Invalid);
    }

    #[tokio::test]
    async fn test_slow_verifier_is_unknown() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = TempDir::new().unwrap();
        let path = script(&dir, "check", "sleep 5\necho '{\"is_reachable\":\"safe\"}'");
        let oracle = CliOracle::new(&path, Duration::from_millis(200));
        let started = std::time::Instant::now();
        let outcome = oracle.verify("a@b.com").await.unwrap();
        assert_eq!(outcome.reachability, Reachability::Unknown);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_unknown() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = TempDir::new().unwrap();
        let path = script(&dir, "check", "echo oops >&2\nexit 3");
        let oracle = CliOracle::new(&path, Duration::from_secs(5));
        let outcome = oracle.verify("a@b.com").await.unwrap();
        assert_eq!(outcome, VerificationOutcome::unknown("a@b.com"));
    }

    #[tokio::test]
    async fn test_garbage_output_is_unknown() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = TempDir::new().unwrap();
        let path = script(&dir, "check", "echo hello");
        let oracle = CliOracle::new(&path, Duration::from_secs(5));
        let outcome = oracle.verify("a@b.com").await.unwrap();
        assert_eq!(outcome.reachability, Reachability::Unknown);
    }

    #[tokio::test]
    async fn test_missing_binary_is_error() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = TempDir::new().unwrap();
        let oracle = CliOracle::new(dir.path().join("does-not-exist"), Duration::from_secs(1));
        let err = oracle.verify("a@b.com").await.unwrap_err();
        assert!(matches!(err, EmailFinderError::OracleTransport { .. }), "{err}");
    }
}
