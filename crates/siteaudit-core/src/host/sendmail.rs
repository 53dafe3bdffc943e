//! Mail delivery through a local `sendmail` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::HostError;
use crate::host::{HostResult, Mailer, Message};

pub const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";

/// Pipes each message to `<program> -t -i`, letting the binary read the
/// recipients from the headers.
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    program: PathBuf,
}

impl SendmailTransport {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SENDMAIL)
    }
}

/// Formats a message as RFC 5322 text with LF line endings, the form
/// `sendmail -t` expects on stdin.
pub fn format_message(message: &Message) -> String {
    let mut out = String::new();
    out.push_str(&format!("To: {}\n", sanitize_header(&message.to)));
    out.push_str(&format!("Subject: {}\n", sanitize_header(&message.subject)));
    for (name, value) in &message.headers {
        out.push_str(&format!("{}: {}\n", sanitize_header(name), sanitize_header(value)));
    }
    out.push('\n');
    out.push_str(&message.body);
    if !message.body.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Header values must stay on one line.
fn sanitize_header(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

impl Mailer for SendmailTransport {
    fn send(&self, message: &Message) -> HostResult<()> {
        tracing::info!(program = %self.program.display(), to = %message.to, "dispatching report");

        let mut child = Command::new(&self.program)
            .args(["-t", "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                HostError::Transport(format!("cannot run {}: {e}", self.program.display()))
            })?;

        // stdin is fed from its own thread so a transport that fills the
        // stderr pipe before reading its input cannot deadlock the send.
        let stdin = child.stdin.take();
        let text = format_message(message);
        let (written, output) = std::thread::scope(|s| {
            let writer = s.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (written, output)
        });

        let output = output?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HostError::Transport(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| HostError::Transport(format!("failed to write message: {e}")))
    }
}
