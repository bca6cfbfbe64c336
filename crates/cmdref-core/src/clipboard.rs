use crate::error::Error;
use std::io::Write;
use tracing::{debug, warn};

/// Destination for the "copy command" action.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), Error>;
}

/// Sink that writes the copied text, newline terminated, to any writer.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ClipboardSink for WriterSink<W> {
    fn write_text(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Hand `text` to `sink` verbatim. Failures are logged and reported as
/// `false`; they never propagate to the caller.
pub fn copy_text(sink: &mut dyn ClipboardSink, text: &str) -> bool {
    match sink.write_text(text) {
        Ok(()) => {
            debug!("Copied {} bytes", text.len());
            true
        }
        Err(err) => {
            warn!("Failed to copy text: {}", err);
            false
        }
    }
}
