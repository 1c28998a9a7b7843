//! Pipeline driver for the kiln build runner.
//!
//! Turns a build manifest into a running compiler invocation in five
//! strictly ordered stages: load the build spec, render the command, persist it
//! as a script, grant execute permission, and spawn the script. Each stage
//! has its own error variant so callers can tell configuration failures
//! from filesystem and launch failures.

mod error;
mod exec;

pub use error::{DriverError, Result};
pub use exec::{PermissionSetter, ProcessRunner, SystemPermissions, SystemRunner};

use kiln_build::{BuildSpec, CompileCommand};
use std::path::Path;
use std::process::ExitStatus;
use tracing::debug;

/// Drives a build description through script generation and execution.
pub struct Driver<P = SystemPermissions, R = SystemRunner> {
    permissions: P,
    runner: R,
}

impl Driver {
    /// Create a driver backed by the real filesystem and process spawner.
    pub fn new() -> Self {
        Self {
            permissions: SystemPermissions,
            runner: SystemRunner,
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PermissionSetter, R: ProcessRunner> Driver<P, R> {
    /// Create a driver with explicit collaborators.
    pub fn with_collaborators(permissions: P, runner: R) -> Self {
        Self {
            permissions,
            runner,
        }
    }

    /// Load and deserialize the build manifest.
    pub fn load_spec(&self, manifest: &Path) -> Result<BuildSpec> {
        let spec = BuildSpec::from_file(manifest)?;
        debug!(manifest = %manifest.display(), sources = spec.source_count(), "loaded build spec");
        Ok(spec)
    }

    /// Persist the command as a script, truncating any previous content.
    pub fn write_script(&self, script: &Path, command: &CompileCommand) -> Result<()> {
        std::fs::write(script, command.script_text()).map_err(|source| {
            DriverError::WriteScript {
                path: script.to_path_buf(),
                source,
            }
        })?;
        debug!(script = %script.display(), "wrote build script");
        Ok(())
    }

    /// Grant execute permission on the script.
    pub fn make_executable(&self, script: &Path) -> Result<()> {
        self.permissions
            .set_executable(script)
            .map_err(|source| DriverError::Permission {
                path: script.to_path_buf(),
                source,
            })
    }

    /// Spawn the script and block until it exits.
    ///
    /// A nonzero exit status is a successful return value; only a failure
    /// to spawn at all is an error.
    pub fn run_script(&self, script: &Path) -> Result<ExitStatus> {
        let status = self
            .runner
            .run(script)
            .map_err(|source| DriverError::Launch {
                path: script.to_path_buf(),
                source,
            })?;
        debug!(code = ?status.code(), "build script finished");
        Ok(status)
    }

    /// The whole pipeline: load, render, echo, persist, permit, execute.
    ///
    /// The assembled command is echoed to stdout before the script is
    /// written.
    pub fn generate_and_run(&self, manifest: &Path, script: &Path) -> Result<ExitStatus> {
        let spec = self.load_spec(manifest)?;
        let command = CompileCommand::from_spec(&spec);
        println!("{}", command);

        self.write_script(script, &command)?;
        self.make_executable(script)?;
        self.run_script(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::os::unix::process::ExitStatusExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingPermissions {
        granted: RefCell<Vec<PathBuf>>,
    }

    impl PermissionSetter for RecordingPermissions {
        fn set_executable(&self, path: &Path) -> io::Result<()> {
            self.granted.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct RecordingRunner {
        launched: RefCell<Vec<PathBuf>>,
        raw_status: i32,
    }

    impl RecordingRunner {
        fn exiting_with(raw_status: i32) -> Self {
            Self {
                launched: RefCell::new(Vec::new()),
                raw_status,
            }
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, script: &Path) -> io::Result<ExitStatus> {
            self.launched.borrow_mut().push(script.to_path_buf());
            Ok(ExitStatus::from_raw(self.raw_status))
        }
    }

    fn write_manifest(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("compile_command.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_generate_and_run_happy_path() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(
            &dir,
            r#"{"main": "a.c", "programs": ["b.c"], "modules": ["c.c", "d.c"], "output": "app"}"#,
        );
        let script = dir.path().join("compile.sh");

        let driver =
            Driver::with_collaborators(RecordingPermissions::default(), RecordingRunner::exiting_with(0));
        let status = driver.generate_and_run(&manifest, &script).unwrap();

        assert!(status.success());
        assert_eq!(
            std::fs::read_to_string(&script).unwrap(),
            "#!/bin/bash\n\na.c b.c c.c d.c  -o app"
        );
        assert_eq!(*driver.permissions.granted.borrow(), vec![script.clone()]);
        assert_eq!(*driver.runner.launched.borrow(), vec![script]);
    }

    #[test]
    fn test_compiler_failure_is_a_status_not_an_error() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(
            &dir,
            r#"{"main": "a.c", "programs": [], "modules": [], "output": "app"}"#,
        );
        let script = dir.path().join("compile.sh");

        // raw wait status 256 == exit code 1
        let driver =
            Driver::with_collaborators(RecordingPermissions::default(), RecordingRunner::exiting_with(256));
        let status = driver.generate_and_run(&manifest, &script).unwrap();

        assert!(!status.success());
        assert_eq!(status.code(), Some(1));
    }

    #[test]
    fn test_missing_output_fails_before_script_exists() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(&dir, r#"{"main": "a.c", "programs": [], "modules": []}"#);
        let script = dir.path().join("compile.sh");

        let driver =
            Driver::with_collaborators(RecordingPermissions::default(), RecordingRunner::exiting_with(0));
        let err = driver.generate_and_run(&manifest, &script).unwrap_err();

        assert!(matches!(err, DriverError::Config(_)));
        assert!(err.to_string().contains("output"));
        assert!(!script.exists());
        assert!(driver.runner.launched.borrow().is_empty());
    }

    #[test]
    fn test_rerun_overwrites_previous_script() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("compile.sh");
        let driver =
            Driver::with_collaborators(RecordingPermissions::default(), RecordingRunner::exiting_with(0));

        let first = write_manifest(
            &dir,
            r#"{"main": "old_entry.c", "programs": ["legacy.c"], "modules": [], "output": "old"}"#,
        );
        driver.generate_and_run(&first, &script).unwrap();

        let second = write_manifest(
            &dir,
            r#"{"main": "new.c", "programs": [], "modules": [], "output": "fresh"}"#,
        );
        driver.generate_and_run(&second, &script).unwrap();

        let body = std::fs::read_to_string(&script).unwrap();
        assert_eq!(body, "#!/bin/bash\n\nnew.c  -o fresh");
        assert!(!body.contains("legacy.c"));
    }

    #[test]
    fn test_launch_failure_maps_to_launch_variant() {
        struct FailingRunner;

        impl ProcessRunner for FailingRunner {
            fn run(&self, _script: &Path) -> io::Result<ExitStatus> {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            }
        }

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("compile.sh");
        std::fs::write(&script, "#!/bin/bash\n\ntrue").unwrap();

        let driver = Driver::with_collaborators(RecordingPermissions::default(), FailingRunner);
        let err = driver.run_script(&script).unwrap_err();

        assert!(matches!(err, DriverError::Launch { .. }));
    }
}
