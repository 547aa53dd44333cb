//! Colored terminal output for workflow phases
//!
//! Provides consistent, colored CLI output for phase events

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager. Quiet mode shows errors only.
    pub fn new(quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
        }
    }

    fn emit(&self, marker: &str, color: Color, bold: bool, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        let _ = write!(&mut buffer, "{}", marker);
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.emit("✓", Color::Green, true, message);
    }

    /// Print a notice: something the user should see but nothing went wrong
    pub fn notice(&self, message: &str) {
        self.emit("ℹ", Color::Cyan, false, message);
    }

    /// Print a progress message for a step that is starting
    pub fn progress(&self, message: &str) {
        self.emit("⋯", Color::Magenta, false, message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.emit("⚠", Color::Yellow, true, message);
    }

    /// Print an error message (always shown)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || bufwtr.print(&buffer).is_err()
        {
            eprintln!("✗ {}", message);
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer);
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = writeln!(&mut buffer, "═══ {} ═══", title);
        let _ = buffer.reset();
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {}", message);
        let _ = self.bufwtr.print(&buffer);
    }
}
