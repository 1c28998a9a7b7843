//! Operating system collaborators for the final pipeline stages.
//!
//! The driver never shells out for permission bits or execution; it goes
//! through these two seams, so tests can substitute recording fakes.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Grants execute permission on a generated script.
pub trait PermissionSetter {
    fn set_executable(&self, path: &Path) -> io::Result<()>;
}

/// Runs a generated script as a child process, blocking until it exits.
pub trait ProcessRunner {
    fn run(&self, script: &Path) -> io::Result<ExitStatus>;
}

/// Permission setter backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPermissions;

impl PermissionSetter for SystemPermissions {
    #[cfg(unix)]
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        std::fs::set_permissions(path, perms)
    }

    #[cfg(not(unix))]
    fn set_executable(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Runner that spawns the script directly with inherited standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, script: &Path) -> io::Result<ExitStatus> {
        Command::new(invocation_path(script)).status()
    }
}

/// A bare file name would go through PATH lookup instead of the working
/// directory; qualify it so the script is executed in place.
fn invocation_path(script: &Path) -> PathBuf {
    if script.is_relative() && script.components().count() == 1 {
        Path::new(".").join(script)
    } else {
        script.to_path_buf()
    }
}
