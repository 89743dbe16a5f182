//! Line-oriented builder for generated PHP source.

use super::Indent;

/// Accumulates lines of code at a tracked indentation level.
///
/// ```
/// use fieldsmith_codegen::builder::CodeBuilder;
///
/// let mut code = CodeBuilder::php();
/// code.push_line("function boot() {")
///     .push_indent()
///     .push_line("do_action( 'booted' );")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(code.build(), "function boot() {\n    do_action( 'booted' );\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// A builder using PSR-12 indentation.
    pub fn php() -> Self {
        Self::new(Indent::PHP)
    }

    /// Append `s` on a new line at the current level.
    ///
    /// Only the first line of a multi-line string is indented; continuation
    /// lines are expected to carry their own indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(&self.indent.repeat(self.level));
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Append an empty line. Blank lines never carry indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Indent every following line one more level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    /// Go back one level. Stays at zero.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Take the assembled source.
    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::php()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_follow_level() {
        let mut code = CodeBuilder::php();
        code.push_line("if ( $ready ) {")
            .push_indent()
            .push_line("boot();")
            .push_dedent()
            .push_line("}");

        assert_eq!(code.build(), "if ( $ready ) {\n    boot();\n}\n");
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut code = CodeBuilder::php();
        code.push_indent()
            .push_line("one();")
            .push_blank()
            .push_line("two();");

        assert_eq!(code.build(), "    one();\n\n    two();\n");
    }

    #[test]
    fn test_multi_line_string_indents_first_line_only() {
        let mut code = CodeBuilder::php();
        code.push_indent().push_line("call( [\n        1\n    ] );");

        assert_eq!(code.build(), "    call( [\n        1\n    ] );\n");
    }

    #[test]
    fn test_tab_indent() {
        let mut code = CodeBuilder::new(Indent::Tab);
        code.push_indent().push_indent().push_line("x();");

        assert_eq!(code.build(), "\t\tx();\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut code = CodeBuilder::php();
        code.push_dedent().push_dedent();
        assert_eq!(code.level(), 0);
    }
}
