//! Flux display banding

/// Coarse classification of a flux value for UI indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluxBand {
    /// Not enough light
    Low,
    /// Comfortable range
    Medium,
    /// Too much light
    High,
}

impl FluxBand {
    /// Band for a flux value (low below 40, medium up to 60, high above)
    #[must_use]
    pub fn classify(value: f64) -> Self {
        if value < 40.0 {
            Self::Low
        } else if value <= 60.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}
