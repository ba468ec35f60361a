//! Output sink for the `print` and `println` builtins.
//!
//! - `Stdout`: the default for programs run by a driver.
//! - `Buffer`: captures output for tests and embedders.
//! - `Silent`: discards output.
//!
//! Enum dispatch keeps the hot print path free of vtable calls.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes straight to the process's stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn write(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not a program error.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

/// Accumulates output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    /// Write `text` as-is.
    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout(h) => h.write(text),
            Self::Buffer(h) => h.write(text),
            Self::Silent => {}
        }
    }

    /// Write `text` followed by a newline.
    pub fn println(&self, text: &str) {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.print(&line);
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between the interpreter and whoever reads the
/// captured output.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
