//! Where reports are rendered.

/// Sink for report lines.
///
/// Reports call the semantic methods; an implementation only has to decide
/// where a finished line goes.
pub trait Output {
    /// Emit one finished line. Every other method ends up here.
    fn line(&mut self, text: &str);

    /// Start a section with a heading.
    fn section(&mut self, name: &str) {
        self.line(&format!("{name}:"));
    }

    /// A bullet item under the current section.
    fn list_item(&mut self, text: &str) {
        self.line(&format!("  - {text}"));
    }

    /// A file that was created or replaced.
    fn added_item(&mut self, text: &str) {
        self.line(&format!("  + {text}"));
    }

    /// A labelled separator, used around previewed file content.
    fn divider(&mut self, label: &str) {
        self.line(&format!("── {label} ──"));
    }

    /// Text printed as is, without a marker or indentation.
    fn preformatted(&mut self, text: &str) {
        self.line(text);
    }

    /// An empty line.
    fn newline(&mut self) {
        self.line("");
    }
}

/// Something a command prints once it has finished its work.
pub trait Report {
    /// Write the report to `out`.
    fn render(&self, out: &mut dyn Output);
}

/// Prints to stdout.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Keeps every line, for asserting on reports.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordedOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordedOutput {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
