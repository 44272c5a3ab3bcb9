//! Configuration options for the conversion run

/// Conversion configuration options
///
/// The output format itself is fixed (4-space indented XML, `smes` root);
/// the knobs here only control console behavior.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Spaces per indentation level in the output document
    pub indent_size: usize,
    /// Show a progress spinner on stderr while scanning
    pub progress: bool,
    /// Suppress non-error console output
    pub quiet: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            indent_size: 4,
            progress: true,
            quiet: false,
        }
    }
}

impl ConvertConfig {
    /// Configuration for library use and tests: no console output
    pub fn silent() -> Self {
        Self {
            progress: false,
            quiet: true,
            ..Self::default()
        }
    }
}
