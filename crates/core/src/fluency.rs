use serde::{Deserialize, Serialize};

/// Hesitation words counted against fluency.
///
/// Matching is exact per whitespace token, so `"you know"` can never match
/// and `"um,"` does not count as `"um"`.
pub const FILLER_WORDS: [&str; 8] = [
    "um",
    "uh",
    "like",
    "you know",
    "so",
    "actually",
    "basically",
    "literally",
];

pub const NEEDS_WORK_RATIO: f64 = 0.06;
pub const FEW_SLIPPED_RATIO: f64 = 0.03;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FluencyMetrics {
    pub filler_count: usize,
    pub total_words: usize,
    pub ratio: f64,
}

impl FluencyMetrics {
    pub fn band(&self) -> FluencyBand {
        FluencyBand::from_ratio(self.ratio)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FluencyBand {
    NeedsWork,
    FewSlipped,
    Fluent,
}

impl FluencyBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > NEEDS_WORK_RATIO {
            Self::NeedsWork
        } else if ratio > FEW_SLIPPED_RATIO {
            Self::FewSlipped
        } else {
            Self::Fluent
        }
    }
}

pub fn analyze_fluency(transcript: &str) -> FluencyMetrics {
    let lowered = transcript.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let total_words = words.len();
    let filler_count = words
        .iter()
        .filter(|word| FILLER_WORDS.contains(*word))
        .count();
    let ratio = if total_words > 0 {
        filler_count as f64 / total_words as f64
    } else {
        0.0
    };

    FluencyMetrics {
        filler_count,
        total_words,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript_has_zero_ratio() {
        let m = analyze_fluency("");
        assert_eq!(m.total_words, 0);
        assert_eq!(m.filler_count, 0);
        assert_eq!(m.ratio, 0.0);

        let m = analyze_fluency("   \n\t ");
        assert_eq!(m.total_words, 0);
        assert_eq!(m.ratio, 0.0);
    }

    #[test]
    fn counts_fillers_case_insensitively() {
        let m = analyze_fluency("Um I was LIKE basically there so yeah");
        assert_eq!(m.total_words, 8);
        assert_eq!(m.filler_count, 4);
        assert_eq!(m.ratio, 4.0 / 8.0);
    }

    #[test]
    fn punctuation_blocks_a_match() {
        let m = analyze_fluency("um, well uh.");
        assert_eq!(m.total_words, 3);
        assert_eq!(m.filler_count, 0);
    }

    #[test]
    fn multi_word_filler_never_matches() {
        let m = analyze_fluency("you know what you know");
        assert_eq!(m.filler_count, 0);
        assert_eq!(m.total_words, 5);
    }

    #[test]
    fn bands_are_ordered_high_to_low() {
        assert_eq!(FluencyBand::from_ratio(0.07), FluencyBand::NeedsWork);
        assert_eq!(FluencyBand::from_ratio(0.06), FluencyBand::FewSlipped);
        assert_eq!(FluencyBand::from_ratio(0.04), FluencyBand::FewSlipped);
        assert_eq!(FluencyBand::from_ratio(0.03), FluencyBand::Fluent);
        assert_eq!(FluencyBand::from_ratio(0.0), FluencyBand::Fluent);
    }
}
