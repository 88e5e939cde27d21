use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Letter grade derived from a percentage.
///
/// Bands are inclusive on their lower bound and evaluated top-down, so
/// `90.0` is `A+` while `89.999` is `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    F,
}

const BANDS: [(f64, Grade); 6] = [
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::BPlus),
    (60.0, Grade::B),
    (50.0, Grade::CPlus),
    (40.0, Grade::C),
];

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        BANDS
            .iter()
            .find(|(lower, _)| percentage >= *lower)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_boundaries_are_inclusive() {
        assert_eq!(Grade::from_percentage(90.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(80.0), Grade::A);
        assert_eq!(Grade::from_percentage(70.0), Grade::BPlus);
        assert_eq!(Grade::from_percentage(60.0), Grade::B);
        assert_eq!(Grade::from_percentage(50.0), Grade::CPlus);
        assert_eq!(Grade::from_percentage(40.0), Grade::C);
    }

    #[test]
    fn test_just_below_boundary_drops_a_band() {
        assert_eq!(Grade::from_percentage(89.999), Grade::A);
        assert_eq!(Grade::from_percentage(39.99), Grade::F);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(Grade::from_percentage(100.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(0.0), Grade::F);
        assert_eq!(Grade::from_percentage(-5.0), Grade::F);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let mut previous = Grade::F;
        for p in 0..=100 {
            let grade = Grade::from_percentage(p as f64);
            // Better grades sort first.
            assert!(grade <= previous);
            previous = grade;
        }
    }

    #[test]
    fn test_display_and_serde_agree() {
        for grade in [Grade::APlus, Grade::A, Grade::BPlus, Grade::B, Grade::CPlus, Grade::C, Grade::F] {
            let json = serde_json::to_string(&grade).unwrap();
            assert_eq!(json, format!("\"{}\"", grade));
        }
    }
}
