//! Configuration of the optimizer chain.

/// Selects which passes a [`ChainOptimizer`](crate::ChainOptimizer) runs.
///
/// Every pass is enabled by default.
///
/// # Example
///
/// ```rust
/// use search_condition_optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::builder()
///     .with_values_to_range(false)
///     .with_compare_normalization(false)
///     .build();
///
/// assert!(config.duplicate_removal);
/// assert!(!config.values_to_range);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Remove duplicate values of every kind.
    pub duplicate_removal: bool,
    /// Turn runs of consecutive discrete values into ranges.
    pub values_to_range: bool,
    /// Remove covered ranges and values and merge connected ranges.
    pub range_optimization: bool,
    /// Remove strict comparisons covered by an inclusive one.
    pub compare_normalization: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            duplicate_removal: true,
            values_to_range: true,
            range_optimization: true,
            compare_normalization: true,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new builder for OptimizerConfig.
    pub fn builder() -> OptimizerConfigBuilder {
        OptimizerConfigBuilder::default()
    }

    /// A configuration with every pass disabled.
    pub fn none() -> Self {
        Self {
            duplicate_removal: false,
            values_to_range: false,
            range_optimization: false,
            compare_normalization: false,
        }
    }
}

/// Builder for OptimizerConfig.
#[derive(Debug, Clone, Default)]
pub struct OptimizerConfigBuilder {
    config: OptimizerConfig,
}

impl OptimizerConfigBuilder {
    /// Enables or disables duplicate removal.
    pub fn with_duplicate_removal(mut self, enabled: bool) -> Self {
        self.config.duplicate_removal = enabled;
        self
    }

    /// Enables or disables conversion of value runs to ranges.
    pub fn with_values_to_range(mut self, enabled: bool) -> Self {
        self.config.values_to_range = enabled;
        self
    }

    /// Enables or disables range optimization.
    pub fn with_range_optimization(mut self, enabled: bool) -> Self {
        self.config.range_optimization = enabled;
        self
    }

    /// Enables or disables comparison normalization.
    pub fn with_compare_normalization(mut self, enabled: bool) -> Self {
        self.config.compare_normalization = enabled;
        self
    }

    /// Builds the OptimizerConfig.
    pub fn build(self) -> OptimizerConfig {
        self.config
    }
}
