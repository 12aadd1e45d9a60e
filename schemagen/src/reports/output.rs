//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe what to output through these methods; implementations
/// decide how it looks.
pub trait Output {
    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render a file that was added or changed.
    fn added_item(&mut self, text: &str);

    /// Render a file that was left as is.
    fn unchanged_item(&mut self, text: &str);

    fn warning(&mut self, msg: &str);

    fn error(&mut self, msg: &str);

    /// Render a separator with a label.
    fn divider(&mut self, label: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Writes to stdout, with warnings and errors on stderr.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn unchanged_item(&mut self, text: &str) {
        println!("  = {}", text);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {}", msg);
    }

    fn divider(&mut self, label: &str) {
        println!("── {} ──", label);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}
