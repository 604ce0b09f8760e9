use sprig_path::{FillRule, Path};

/// Parameters applied to nodes created by a [`Scene`](crate::Scene).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct SceneOptions {
    /// Flattening quality of the paths of new shapes. The tolerance is its inverse.
    ///
    /// Default value: `Path::DEFAULT_QUALITY`.
    pub default_quality: f64,

    /// Fill rule of new shapes.
    ///
    /// Default value: `EvenOdd`.
    pub default_fill_rule: FillRule,
}

impl SceneOptions {
    pub const DEFAULT: Self = SceneOptions {
        default_quality: Path::DEFAULT_QUALITY,
        default_fill_rule: FillRule::EvenOdd,
    };

    #[inline]
    pub fn with_default_quality(mut self, quality: f64) -> Self {
        self.default_quality = quality;
        self
    }

    #[inline]
    pub fn with_default_fill_rule(mut self, rule: FillRule) -> Self {
        self.default_fill_rule = rule;
        self
    }
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
