//! Skin classification vocabulary.
//!
//! `SkinType` and `IssueTag` are closed enums. The analysis engine emits
//! canonical kebab-case strings; adapters parse them at the boundary so the
//! routine rules can test exact set membership instead of matching
//! substrings in free text.

use serde::{Deserialize, Serialize};

/// Broad skin type classification produced by the analysis step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkinType {
    /// Balanced sebum production.
    #[default]
    Normal,
    /// Low sebum, prone to tightness and flaking.
    Dry,
    /// High sebum across the whole face.
    Oily,
    /// Oily T-zone with dry or normal cheeks.
    Combination,
    /// Reactive skin prone to irritation.
    Sensitive,
}

impl SkinType {
    /// Returns the canonical string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use backend::domain::SkinType;
    /// assert_eq!(SkinType::Combination.as_str(), "combination");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Dry => "dry",
            Self::Oily => "oily",
            Self::Combination => "combination",
            Self::Sensitive => "sensitive",
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown skin type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSkinTypeError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseSkinTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown skin type: {}", self.input)
    }
}

impl std::error::Error for ParseSkinTypeError {}

impl std::str::FromStr for SkinType {
    type Err = ParseSkinTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "dry" => Ok(Self::Dry),
            "oily" => Ok(Self::Oily),
            "combination" => Ok(Self::Combination),
            "sensitive" => Ok(Self::Sensitive),
            _ => Err(ParseSkinTypeError {
                input: s.to_owned(),
            }),
        }
    }
}

/// A detected skin concern.
///
/// The vocabulary is closed; the routine rules match tags by equality, so a
/// hypothetical future tag such as `dry-eye` can never trip the dryness
/// rule the way substring matching would allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueTag {
    /// Comedones and inflammatory breakouts.
    Acne,
    /// Loss of elasticity and firmness.
    Aging,
    /// Fine lines and wrinkles.
    Wrinkles,
    /// Dehydrated or flaking skin.
    Dryness,
    /// Excess sebum.
    Oiliness,
    /// Post-inflammatory marks and uneven tone.
    Hyperpigmentation,
    /// Diffuse redness or flushing.
    Redness,
    /// Reactivity to actives and fragrance.
    Sensitivity,
    /// Rough or bumpy surface texture.
    UnevenTexture,
    /// Periorbital darkness.
    DarkCircles,
    /// Visibly enlarged pores.
    LargePores,
    /// Lacklustre, tired-looking skin.
    Dullness,
}

impl IssueTag {
    /// Returns the canonical kebab-case string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acne => "acne",
            Self::Aging => "aging",
            Self::Wrinkles => "wrinkles",
            Self::Dryness => "dryness",
            Self::Oiliness => "oiliness",
            Self::Hyperpigmentation => "hyperpigmentation",
            Self::Redness => "redness",
            Self::Sensitivity => "sensitivity",
            Self::UnevenTexture => "uneven-texture",
            Self::DarkCircles => "dark-circles",
            Self::LargePores => "large-pores",
            Self::Dullness => "dullness",
        }
    }
}

impl std::fmt::Display for IssueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown issue tag string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssueTagError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseIssueTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown issue tag: {}", self.input)
    }
}

impl std::error::Error for ParseIssueTagError {}

impl std::str::FromStr for IssueTag {
    type Err = ParseIssueTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "acne" => Ok(Self::Acne),
            "aging" => Ok(Self::Aging),
            "wrinkles" => Ok(Self::Wrinkles),
            "dryness" => Ok(Self::Dryness),
            "oiliness" => Ok(Self::Oiliness),
            "hyperpigmentation" => Ok(Self::Hyperpigmentation),
            "redness" => Ok(Self::Redness),
            "sensitivity" => Ok(Self::Sensitivity),
            "uneven-texture" => Ok(Self::UnevenTexture),
            "dark-circles" => Ok(Self::DarkCircles),
            "large-pores" => Ok(Self::LargePores),
            "dullness" => Ok(Self::Dullness),
            _ => Err(ParseIssueTagError {
                input: s.to_owned(),
            }),
        }
    }
}
