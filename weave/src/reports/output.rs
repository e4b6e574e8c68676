//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    fn title(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn list_item(&mut self, text: &str);

    /// An item that was created, e.g. a written file.
    fn added_item(&mut self, text: &str);

    /// An item left as it was, e.g. a user-owned file that already existed.
    fn kept_item(&mut self, text: &str);

    fn error_item(&mut self, text: &str);

    fn warning(&mut self, msg: &str);

    /// Separator with a label.
    fn divider(&mut self, label: &str);

    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain text on stdout; warnings go to stderr.
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
    fn title(&mut self, text: &str) {
        println!("{}", text);
        println!("{}", "=".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn kept_item(&mut self, text: &str) {
        println!("  = {}", text);
    }

    fn error_item(&mut self, text: &str) {
        println!("  ! {}", text);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
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

/// Records every call as a line, for asserting on rendered reports.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl RecordingOutput {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn title(&mut self, text: &str) {
        self.lines.push(format!("# {text}"));
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("- {text}"));
    }

    fn added_item(&mut self, text: &str) {
        self.lines.push(format!("+ {text}"));
    }

    fn kept_item(&mut self, text: &str) {
        self.lines.push(format!("= {text}"));
    }

    fn error_item(&mut self, text: &str) {
        self.lines.push(format!("! {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {msg}"));
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("-- {label} --"));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
