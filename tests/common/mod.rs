#![allow(dead_code)]

use pololu_tic::{CommandRunner, ExternalToolError, Output};
use std::io;

/// Records every invocation instead of running `ticcmd`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<Vec<String>>,
    /// Fail any invocation whose first argument is this flag.
    pub fail_on: Option<&'static str>,
    pub reply: Vec<u8>,
}

impl RecordingRunner {
    pub fn failing_on(flag: &'static str) -> RecordingRunner {
        RecordingRunner {
            fail_on: Some(flag),
            ..Default::default()
        }
    }

    /// Each call rendered as its space-joined argument list.
    pub fn lines(&self) -> Vec<String> {
        self.calls.iter().map(|call| call.join(" ")).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, args: &[String]) -> Result<Output, ExternalToolError> {
        self.calls.push(args.to_vec());
        if self.fail_on.is_some() && args.first().map(String::as_str) == self.fail_on {
            return Err(ExternalToolError::Spawn {
                program: "ticcmd".to_string(),
                source: io::Error::new(io::ErrorKind::Other, "simulated failure"),
            });
        }
        Ok(self.reply.clone())
    }
}
