//! Configuration of the model check

/// Default maximum number of triangles in a passing asset
pub const DEFAULT_TRIANGLE_LIMIT: usize = 100_000;

/// Settings for [`crate::check_model`] and the alignment idempotence test
///
/// # Example
///
/// ```
/// use eyewear_qa::QaConfig;
///
/// let config = QaConfig::new()
///     .with_triangle_limit(20_000)
///     .with_strict_origins(true);
/// assert_eq!(config.triangle_limit(), 20_000);
/// assert!(config.check_uv_maps());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QaConfig {
    triangle_limit: usize,
    check_uv_maps: bool,
    check_materials: bool,
    strict_origins: bool,
    tolerance: f64,
}

impl QaConfig {
    /// Default settings: 100 000 triangles, UV and material checks on,
    /// root-only origin rule, exact comparisons
    pub fn new() -> Self {
        Self {
            triangle_limit: DEFAULT_TRIANGLE_LIMIT,
            check_uv_maps: true,
            check_materials: true,
            strict_origins: false,
            tolerance: 0.0,
        }
    }

    /// Set the maximum triangle count; counts above it fail
    pub fn with_triangle_limit(mut self, limit: usize) -> Self {
        self.triangle_limit = limit;
        self
    }

    /// Enable or disable the UV channel count check
    pub fn with_uv_check(mut self, enabled: bool) -> Self {
        self.check_uv_maps = enabled;
        self
    }

    /// Enable or disable the material count check
    pub fn with_material_check(mut self, enabled: bool) -> Self {
        self.check_materials = enabled;
        self
    }

    /// Require every non-temple node, not only the root, at its local origin
    pub fn with_strict_origins(mut self, strict: bool) -> Self {
        self.strict_origins = strict;
        self
    }

    /// Per-component absolute tolerance for scale and location comparisons.
    ///
    /// Negative values are treated as zero.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Maximum triangle count
    pub fn triangle_limit(&self) -> usize {
        self.triangle_limit
    }

    /// Whether UV channels are counted
    pub fn check_uv_maps(&self) -> bool {
        self.check_uv_maps
    }

    /// Whether materials are counted
    pub fn check_materials(&self) -> bool {
        self.check_materials
    }

    /// Whether the strict origin rule is on
    pub fn strict_origins(&self) -> bool {
        self.strict_origins
    }

    /// Comparison tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self::new()
    }
}
