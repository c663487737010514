use indicatif::MultiProgress;
use std::fmt::Display;
use std::io::{self, stderr, Write};
use tracing_subscriber::fmt::MakeWriter;

/// Owns the progress bars drawn on stderr and makes sure nothing else that is
/// printed (user messages on stdout, log lines on stderr) tears through them.
#[derive(Clone)]
pub struct Terminal {
    multi_progress: MultiProgress,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
        }
    }

    /// The progress bar container downloads should attach to.
    pub fn multi_progress(&self) -> MultiProgress {
        self.multi_progress.clone()
    }

    /// Print one line of command output to stdout.
    pub fn println(&self, line: impl Display) {
        self.multi_progress.suspend(|| println!("{line}"));
    }

    /// Writer for the `tracing` fmt layer.
    pub fn log_writer(&self) -> LogWriter {
        LogWriter {
            multi_progress: self.multi_progress.clone(),
        }
    }
}

/// Writes log output to stderr while the progress bars are hidden.
#[derive(Clone)]
pub struct LogWriter {
    multi_progress: MultiProgress,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi_progress.suspend(|| stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.multi_progress.suspend(|| stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.multi_progress.suspend(|| stderr().flush())
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
