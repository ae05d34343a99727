// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-buffered redirection of a byte stream into the build log.

use jb_core::LogSink;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Turns raw output bytes into prefixed log lines.
///
/// Bytes are buffered until a newline arrives; each complete line is logged
/// as `<prefix><line>`. Bytes after the last newline stay buffered, and are
/// dropped if the redirector is dropped before another newline arrives.
pub struct LogRedirector {
    prefix: String,
    line: Vec<u8>,
    sink: Arc<dyn LogSink>,
}

impl LogRedirector {
    pub fn new(prefix: impl Into<String>, sink: Arc<dyn LogSink>) -> Self {
        Self { prefix: prefix.into(), line: Vec::new(), sink }
    }

    /// Redirector for container output of the named job.
    pub fn for_job(job_name: &str, sink: Arc<dyn LogSink>) -> Self {
        Self::new(format!("DOCKER {} | ", job_name), sink)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Bytes received since the last newline.
    pub fn pending(&self) -> &[u8] {
        &self.line
    }

    /// Consume a chunk of output, logging every line it completes.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if b == b'\n' {
                self.emit();
            } else {
                self.line.push(b);
            }
        }
    }

    /// The accumulated bytes are logged as they are, `\r` included.
    fn emit(&mut self) {
        let text = String::from_utf8_lossy(&self.line);
        self.sink.line(&format!("{}{}", self.prefix, text));
        self.line.clear();
    }
}

impl io::Write for LogRedirector {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.feed(buf);
        Ok(buf.len())
    }

    /// Partial lines are not forced out.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Drain `reader` into `redirector` until end of stream.
pub async fn pump<R>(mut reader: R, mut redirector: LogRedirector) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            if !redirector.pending().is_empty() {
                tracing::trace!(
                    prefix = redirector.prefix(),
                    bytes = redirector.pending().len(),
                    "dropping unterminated output line"
                );
            }
            return Ok(());
        }
        redirector.feed(&buf[..n]);
    }
}

#[cfg(test)]
#[path = "log_redirect_tests.rs"]
mod tests;
