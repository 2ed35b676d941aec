//! Rendering and export options.

/// Options for the interactive renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Character bound of the raw-text preview used as fault fallback
    pub preview_chars: usize,

    /// Include side-data slots (roster, personas, ICP) in the tree
    pub include_side_data: bool,

    /// Collect rendering statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback preview bound in characters.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Enable or disable side-data slots in the tree.
    pub fn with_side_data(mut self, include: bool) -> Self {
        self.include_side_data = include;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preview_chars: 600,
            include_side_data: true,
            collect_stats: false,
        }
    }
}

/// Options for the static HTML exporter.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Product name used in the artifact title and filename
    pub product: String,

    /// File extension of the exported artifact
    pub extension: String,

    /// Include side-data sections in the artifact
    pub include_side_data: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the product name.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// Enable or disable side-data sections.
    pub fn with_side_data(mut self, include: bool) -> Self {
        self.include_side_data = include;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            product: "Boardroom".to_string(),
            extension: "html".to_string(),
            include_side_data: true,
        }
    }
}
