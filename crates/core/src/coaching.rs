//! Rule table that turns delivery signals into coaching suggestions.
//!
//! Rules are evaluated top-down and the first match wins, so exactly one
//! primary bundle is picked per analysis. The tone/word-choice mismatch
//! check runs independently and may append one more suggestion.

use crate::emotion::EmotionLabel;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const HAPPY_CONFIDENCE_FLOOR: u8 = 80;
pub const LOW_CONFIDENCE_CEILING: u8 = 50;

pub const HARSH_WORDS: [&str; 5] = ["bad", "ugly", "terrible", "hate", "worst"];

pub const MISMATCH_SUGGESTION: &str =
    "Your tone was upbeat, but the word choices were harsh — aim to align both for better impact.";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Bundle {
    LiftWarmth,
    ModulateEnergy,
    AddInflection,
    ExaggerateVariation,
    KeepPracticing,
}

impl Bundle {
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Self::LiftWarmth => &[
                "Your tone feels low — try lifting the pitch slightly to bring more warmth.",
                "Even if the words are positive, a brighter tone helps convey enthusiasm.",
            ],
            Self::ModulateEnergy => &[
                "Nice energy! Try modulating your tone even more for emphasis in key moments.",
                "Experiment with subtle emotional shifts as you speak for more depth.",
            ],
            Self::AddInflection => &[
                "Add inflection to break a monotone pattern — especially at the ends of sentences.",
                "Highlight your message by stressing emotionally important words.",
            ],
            Self::ExaggerateVariation => &[
                "Try exaggerating vocal ups and downs when reading to unlock more expression.",
                "Slow down slightly and stretch certain words to vary your delivery.",
            ],
            Self::KeepPracticing => {
                &["Keep practicing tone variation — you’re building a solid base."]
            }
        }
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub bundle: Bundle,
    pub applies: fn(&EmotionLabel, u8) -> bool,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("bundle", &self.bundle).finish()
    }
}

fn sounds_sad(dominant: &EmotionLabel, _confidence: u8) -> bool {
    dominant.mentions("sadness")
}

fn sounds_confidently_happy(dominant: &EmotionLabel, confidence: u8) -> bool {
    dominant.mentions("happiness") && confidence >= HAPPY_CONFIDENCE_FLOOR
}

fn sounds_flat(dominant: &EmotionLabel, _confidence: u8) -> bool {
    dominant.mentions("neutral")
}

fn low_confidence(_dominant: &EmotionLabel, confidence: u8) -> bool {
    confidence < LOW_CONFIDENCE_CEILING
}

fn always(_dominant: &EmotionLabel, _confidence: u8) -> bool {
    true
}

/// Primary rules in priority order.
pub const RULES: [Rule; 5] = [
    Rule {
        bundle: Bundle::LiftWarmth,
        applies: sounds_sad,
    },
    Rule {
        bundle: Bundle::ModulateEnergy,
        applies: sounds_confidently_happy,
    },
    Rule {
        bundle: Bundle::AddInflection,
        applies: sounds_flat,
    },
    Rule {
        bundle: Bundle::ExaggerateVariation,
        applies: low_confidence,
    },
    Rule {
        bundle: Bundle::KeepPracticing,
        applies: always,
    },
];

/// How harsh words are found in the transcript.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HarshWordMatch {
    /// Anywhere in the lowercased transcript; `"badge"` contains `"bad"`.
    #[default]
    Substring,
    /// Whole whitespace-delimited lowercase tokens only.
    Token,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoachingError {
    #[error("unknown harsh word match mode: {0}")]
    UnknownMatchMode(String),
}

impl FromStr for HarshWordMatch {
    type Err = CoachingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "token" => Ok(Self::Token),
            _ => Err(CoachingError::UnknownMatchMode(s.to_owned())),
        }
    }
}

pub fn select_bundle(dominant: &EmotionLabel, confidence: u8) -> Bundle {
    RULES
        .iter()
        .find(|rule| (rule.applies)(dominant, confidence))
        .map(|rule| rule.bundle)
        .unwrap_or(Bundle::KeepPracticing)
}

/// Upbeat delivery paired with harsh wording. Only ever true for happiness.
pub fn has_tone_mismatch(dominant: &EmotionLabel, transcript: &str, mode: HarshWordMatch) -> bool {
    if !dominant.mentions("happiness") {
        return false;
    }
    let lowered = transcript.to_lowercase();
    match mode {
        HarshWordMatch::Substring => HARSH_WORDS.iter().any(|w| lowered.contains(w)),
        HarshWordMatch::Token => lowered
            .split_whitespace()
            .any(|token| HARSH_WORDS.contains(&token)),
    }
}

pub fn generate_suggestions(
    dominant: &EmotionLabel,
    confidence: u8,
    transcript: &str,
) -> Vec<String> {
    generate_suggestions_with(dominant, confidence, transcript, HarshWordMatch::default())
}

pub fn generate_suggestions_with(
    dominant: &EmotionLabel,
    confidence: u8,
    transcript: &str,
    mode: HarshWordMatch,
) -> Vec<String> {
    let bundle = select_bundle(dominant, confidence);
    let mut suggestions: Vec<String> = bundle
        .suggestions()
        .iter()
        .map(|s| (*s).to_owned())
        .collect();

    if has_tone_mismatch(dominant, transcript, mode) {
        suggestions.push(MISMATCH_SUGGESTION.to_owned());
    }

    tracing::debug!(
        dominant = dominant.name(),
        confidence,
        ?bundle,
        count = suggestions.len(),
        "suggestions selected"
    );
    suggestions
}
