//! Stylization options picked on the upload form.

use std::fmt;
use std::str::FromStr;

use crate::error::StudioError;

/// Square output dimension requested from the images API.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputSize {
    /// 512x512
    Small,
    /// 768x768
    Medium,
    /// 1024x1024
    #[default]
    Large,
}

impl OutputSize {
    /// Every size the form offers, smallest first.
    pub const ALL: [OutputSize; 3] = [OutputSize::Small, OutputSize::Medium, OutputSize::Large];

    /// Edge length in pixels.
    pub fn pixels(self) -> u16 {
        match self {
            OutputSize::Small => 512,
            OutputSize::Medium => 768,
            OutputSize::Large => 1024,
        }
    }

    /// The `WxH` form the images API expects.
    pub fn dimensions(self) -> String {
        let px = self.pixels();
        format!("{px}x{px}")
    }

    /// Reads the `size` form field. Missing or blank means the default.
    pub fn from_form(value: Option<&str>) -> Result<Self, StudioError> {
        match value.map(str::trim).filter(|value| !value.is_empty()) {
            None => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for OutputSize {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.pixels().to_string() == s.trim())
            .ok_or_else(|| StudioError::BadRequest(format!("Unsupported size: {s}")))
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// How hard the plush look is pushed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StyleStrength {
    /// Subtle
    Low,
    /// Moderate
    #[default]
    Medium,
    /// Heavy knit and stitch texture
    High,
}

impl StyleStrength {
    /// Every level the form offers.
    pub const ALL: [StyleStrength; 3] = [
        StyleStrength::Low,
        StyleStrength::Medium,
        StyleStrength::High,
    ];

    /// Form value for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleStrength::Low => "low",
            StyleStrength::Medium => "medium",
            StyleStrength::High => "high",
        }
    }

    /// Label shown on the form.
    pub fn label(self) -> &'static str {
        match self {
            StyleStrength::Low => "Low",
            StyleStrength::Medium => "Medium",
            StyleStrength::High => "High",
        }
    }
}

/// Never fails, anything but the exact form values is medium.
impl From<&str> for StyleStrength {
    fn from(value: &str) -> Self {
        match value {
            "low" => StyleStrength::Low,
            "high" => StyleStrength::High,
            _ => StyleStrength::Medium,
        }
    }
}

impl fmt::Display for StyleStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The form's `diorama` value, only the literal `true` turns it on.
pub fn parse_diorama(value: Option<&str>) -> bool {
    value == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_defaults_to_1024() {
        assert_eq!(OutputSize::from_form(None).unwrap(), OutputSize::Large);
        assert_eq!(OutputSize::from_form(Some("")).unwrap(), OutputSize::Large);
        assert_eq!(OutputSize::default().dimensions(), "1024x1024");
    }

    #[test]
    fn size_parses_known_values() {
        assert_eq!(OutputSize::from_form(Some("512")).unwrap(), OutputSize::Small);
        assert_eq!(OutputSize::from_form(Some("768")).unwrap().dimensions(), "768x768");
        assert_eq!(OutputSize::Medium.to_string(), "768");
    }

    #[test]
    fn size_rejects_unknown_values() {
        let err = OutputSize::from_form(Some("2048")).unwrap_err();
        assert!(matches!(err, StudioError::BadRequest(ref msg) if msg == "Unsupported size: 2048"));
        assert!("1024x1024".parse::<OutputSize>().is_err());
    }

    #[test]
    fn strength_falls_back_to_medium() {
        assert_eq!(StyleStrength::from("low"), StyleStrength::Low);
        assert_eq!(StyleStrength::from("high"), StyleStrength::High);
        assert_eq!(StyleStrength::from("medium"), StyleStrength::Medium);
        assert_eq!(StyleStrength::from("extreme"), StyleStrength::Medium);
        assert_eq!(StyleStrength::from(""), StyleStrength::Medium);
    }

    #[test]
    fn strength_match_is_exact() {
        assert_eq!(StyleStrength::from("HIGH"), StyleStrength::Medium);
        assert_eq!(StyleStrength::from("Low"), StyleStrength::Medium);
        assert_eq!(StyleStrength::from(" low "), StyleStrength::Medium);
        assert_eq!(StyleStrength::from("high "), StyleStrength::Medium);
    }

    #[test]
    fn diorama_needs_literal_true() {
        assert!(parse_diorama(Some("true")));
        assert!(!parse_diorama(Some("false")));
        assert!(!parse_diorama(Some("on")));
        assert!(!parse_diorama(None));
    }
}
