//! Invocation of the external `ticcmd` tool.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Raw stdout captured from the tool. Empty in dry-run mode.
pub type Output = Vec<u8>;

#[derive(Debug, thiserror::Error)]
pub enum ExternalToolError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Something that can execute one `ticcmd` invocation given its arguments.
pub trait CommandRunner {
    fn run(&mut self, args: &[String]) -> Result<Output, ExternalToolError>;
}

/// Runs the `ticcmd` executable, or only logs the command line when in
/// dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicCmd {
    program: PathBuf,
    serial: Option<String>,
    dry_run: bool,
}

impl Default for TicCmd {
    fn default() -> Self {
        TicCmd::new("ticcmd")
    }
}

impl TicCmd {
    pub fn new<P: AsRef<Path>>(program: P) -> TicCmd {
        TicCmd {
            program: program.as_ref().to_path_buf(),
            serial: None,
            dry_run: false,
        }
    }

    /// Same as [`TicCmd::default`] but never spawns anything.
    pub fn dry_run() -> TicCmd {
        TicCmd::default().with_dry_run(true)
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> TicCmd {
        self.dry_run = dry_run;
        self
    }

    /// Addresses a specific Tic by serial number (`-d <serial>`).
    pub fn with_serial<S: Into<String>>(mut self, serial: S) -> TicCmd {
        self.serial = Some(serial.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn full_args(&self, args: &[String]) -> Vec<String> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(serial) = &self.serial {
            full.push("-d".to_string());
            full.push(serial.clone());
        }
        full.extend_from_slice(args);
        full
    }

    fn command_line(&self, args: &[String]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl CommandRunner for TicCmd {
    fn run(&mut self, args: &[String]) -> Result<Output, ExternalToolError> {
        let args = self.full_args(args);
        let command = self.command_line(&args);
        debug!(dry_run = self.dry_run, "{command}");

        if self.dry_run {
            return Ok(Output::new());
        }

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| ExternalToolError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExternalToolError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dry_run_returns_empty_output() {
        let mut runner = TicCmd::new("/nonexistent/ticcmd").with_dry_run(true);
        let output = runner.run(&args(&["--energize"])).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn serial_goes_before_the_command() {
        let runner = TicCmd::default().with_serial("00123456");
        assert_eq!(
            runner.full_args(&args(&["--position", "200"])),
            ["-d", "00123456", "--position", "200"]
        );
        assert_eq!(
            runner.command_line(&runner.full_args(&args(&["--reset"]))),
            "ticcmd -d 00123456 --reset"
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn dry_run_logs_the_full_command_line() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .finish();

        let mut runner = TicCmd::new("ticcmd").with_serial("42").with_dry_run(true);
        let output = tracing::subscriber::with_default(subscriber, || {
            runner.run(&args(&["--position", "200"]))
        })
        .unwrap();
        assert!(output.is_empty());

        let logged = logs.contents();
        let line = logged
            .lines()
            .find(|line| line.contains("ticcmd -d 42 --position 200"))
            .unwrap_or_else(|| panic!("command line not logged: {logged:?}"));
        assert!(line.contains("DEBUG"), "wrong level: {line}");
    }

    #[cfg(unix)]
    #[test]
    fn live_run_captures_stdout() {
        let mut runner = TicCmd::new("echo");
        let output = runner.run(&args(&["--status", "--full"])).unwrap();
        assert_eq!(output, b"--status --full\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_an_error() {
        let mut runner = TicCmd::new("false");
        let err = runner.run(&args(&["--energize"])).unwrap_err();
        match err {
            ExternalToolError::Failed { command, status, .. } => {
                assert_eq!(command, "false --energize");
                assert!(!status.success());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_an_error() {
        let mut runner = TicCmd::new("ticcmd-that-is-not-installed-anywhere");
        let err = runner.run(&args(&["--energize"])).unwrap_err();
        assert!(matches!(err, ExternalToolError::Spawn { .. }));
    }
}
