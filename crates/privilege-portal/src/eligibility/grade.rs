use serde::{Deserialize, Serialize};

/// Letter grades recognised by the institution's grade scale.
///
/// The scale is closed: any symbol outside it scores `0.0` when compared, so
/// unknown grades always sit below the lowest recognised grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
}

impl LetterGrade {
    pub const fn ordered() -> [Self; 5] {
        [Self::A, Self::BPlus, Self::B, Self::CPlus, Self::C]
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "A" => Some(Self::A),
            "B+" => Some(Self::BPlus),
            "B" => Some(Self::B),
            "C+" => Some(Self::CPlus),
            "C" => Some(Self::C),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
        }
    }

    pub const fn points(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::BPlus => 3.5,
            Self::B => 3.0,
            Self::CPlus => 2.5,
            Self::C => 2.0,
        }
    }
}

/// Numeric value of a raw grade symbol; anything off the scale is worth nothing.
pub fn grade_points(symbol: &str) -> f64 {
    LetterGrade::from_symbol(symbol)
        .map(LetterGrade::points)
        .unwrap_or(0.0)
}
