/// One level of indentation in generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// PSR-12 uses four spaces.
    pub const PHP: Self = Self::Spaces(4);

    const SPACES: &'static str = "        ";

    /// One level as a string. Space widths above eight are capped at eight.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Spaces(width) => &Self::SPACES[..usize::from(width.min(8))],
            Self::Tab => "\t",
        }
    }

    pub fn repeat(&self, level: usize) -> String {
        self.as_str().repeat(level)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::PHP
    }
}
