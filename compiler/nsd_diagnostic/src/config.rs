//! Rendering options.


/// Width at which the expected-symbol list wraps.
pub const DEFAULT_WRAP_WIDTH: usize = 100;

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// The expected-symbol list starts a new line once it gets longer
    /// than this.
    pub wrap_width: usize,
    /// Truncate the expected-symbol list to this many characters,
    /// ellipsis included.
    pub max_width: Option<usize>,
    pub colors: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            wrap_width: DEFAULT_WRAP_WIDTH,
            max_width: None,
            colors: false,
        }
    }
}

impl DiagnosticConfig {
    #[must_use]
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode, is_tty: bool) -> Self {
        self.colors = mode.should_use_colors(is_tty);
        self
    }
}
