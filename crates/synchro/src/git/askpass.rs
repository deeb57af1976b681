//! `GIT_ASKPASS` credential helper.
//!
//! git prompts for HTTP credentials interactively; in an unattended sync
//! run that would hang. The helper script written here answers the
//! `Username`/`Password` prompts from environment variables set on each
//! git invocation, so credentials never appear on the command line or in
//! remote URLs.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use tokio::process::Command;

use super::GitError;
use crate::platform::Credentials;

const ASKPASS_SCRIPT: &str = r#"#!/bin/sh
case "$1" in
    [Uu]sername*) printf '%s\n' "$GIT_USERNAME" ;;
    [Pp]assword*) printf '%s\n' "$GIT_PASSWORD" ;;
    *) exit 1 ;;
esac
"#;

/// A generated askpass helper plus the credentials it answers with.
///
/// The script lives in a private temp directory that is removed when the
/// value is dropped.
pub struct Askpass {
    // Held for its Drop; the script must outlive every git invocation.
    _dir: TempDir,
    script: PathBuf,
    username: String,
    password: String,
}

impl Askpass {
    /// Write the helper script for `credentials`.
    ///
    /// Returns `Ok(None)` when no credential material is present
    /// (anonymous access needs no helper).
    pub fn new(credentials: &Credentials) -> Result<Option<Self>, GitError> {
        if !credentials.is_present() {
            return Ok(None);
        }

        let dir = TempDir::new()?;
        let script = dir.path().join("askpass.sh");

        let mut file = std::fs::File::create(&script)?;
        file.write_all(ASKPASS_SCRIPT.as_bytes())?;
        file.flush()?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o700))?;
        }

        let username = credentials.login.clone().unwrap_or_default();
        // A bare token authenticates as both username and password.
        let password = credentials
            .secret
            .clone()
            .or_else(|| credentials.login.clone())
            .unwrap_or_default();

        Ok(Some(Self {
            _dir: dir,
            script,
            username,
            password,
        }))
    }

    /// Wire the helper into a git invocation.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env("GIT_ASKPASS", &self.script)
            .env("GIT_USERNAME", &self.username)
            .env("GIT_PASSWORD", &self.password);
    }
}
