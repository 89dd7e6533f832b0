//! The four bodies of the three-body universe
//!
//! Radii are the contract's sun radii; the planet radius is a display choice.

/// Body identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun0,
    Sun1,
    Sun2,
    Planet,
}

impl Body {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun0 => "ORTA",
            Self::Sun1 => "BÖYÜK",
            Self::Sun2 => "BALACA",
            Self::Planet => "EV",
        }
    }

    /// Radius in simulation units
    pub fn radius(&self) -> f64 {
        match self {
            Self::Sun0 => 0.89,
            Self::Sun1 => 1.36,
            Self::Sun2 => 0.61,
            Self::Planet => 0.03,
        }
    }

    pub fn is_sun(&self) -> bool {
        !matches!(self, Self::Planet)
    }

    pub fn all() -> &'static [Body] {
        &[Self::Sun0, Self::Sun1, Self::Sun2, Self::Planet]
    }
}
