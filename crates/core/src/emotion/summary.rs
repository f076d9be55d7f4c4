use crate::confidence::confidence_score;
use crate::emotion::{EmotionLabel, EmotionScore};
use serde::{Deserialize, Serialize};

/// Minimum probability for an emotion to count as meaningful.
pub const MEANINGFUL_THRESHOLD: f64 = 0.2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("no emotion scores to summarize")]
    InsufficientData,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmotionSummary {
    pub dominant_emotion: EmotionLabel,
    pub confidence_score: u8,
    /// Highest probability across all scores, meaningful or not.
    pub top_score: f64,
    pub meaningful_emotions: Vec<EmotionScore>,
}

pub fn summarize(scores: &[EmotionScore]) -> Result<EmotionSummary, SummaryError> {
    summarize_with_threshold(scores, MEANINGFUL_THRESHOLD)
}

/// Summarize classifier output.
///
/// Meaningful emotions keep the classifier's order. The dominant emotion is
/// the first meaningful entry, not the most probable one, and falls back to
/// neutral when nothing reaches the threshold.
pub fn summarize_with_threshold(
    scores: &[EmotionScore],
    threshold: f64,
) -> Result<EmotionSummary, SummaryError> {
    let top_score = scores
        .iter()
        .map(|s| s.probability)
        .reduce(f64::max)
        .ok_or(SummaryError::InsufficientData)?;

    let meaningful_emotions: Vec<EmotionScore> = scores
        .iter()
        .filter(|s| s.probability >= threshold)
        .cloned()
        .collect();

    let dominant_emotion = meaningful_emotions
        .first()
        .map(|s| s.label.clone())
        .unwrap_or(EmotionLabel::Neutral);

    Ok(EmotionSummary {
        dominant_emotion,
        confidence_score: confidence_score(top_score),
        top_score,
        meaningful_emotions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(code: &str, probability: f64) -> EmotionScore {
        EmotionScore::new(EmotionLabel::from_code(code), probability)
    }

    #[test]
    fn empty_scores_are_insufficient() {
        assert_eq!(summarize(&[]), Err(SummaryError::InsufficientData));
    }

    #[test]
    fn confidence_is_rounded_top_probability() {
        let summary = summarize(&[score("neu", 0.1), score("hap", 0.85)]).expect("non-empty");
        assert_eq!(summary.confidence_score, 85);
        assert_eq!(summary.top_score, 0.85);
    }

    #[test]
    fn dominant_is_first_meaningful_not_highest() {
        let scores = [score("sad", 0.3), score("ang", 0.1), score("hap", 0.6)];
        let summary = summarize(&scores).expect("non-empty");
        assert_eq!(summary.dominant_emotion, EmotionLabel::Sadness);
        assert_eq!(
            summary.meaningful_emotions,
            vec![score("sad", 0.3), score("hap", 0.6)]
        );
        assert_eq!(summary.confidence_score, 60);
    }

    #[test]
    fn threshold_is_inclusive() {
        let summary = summarize(&[score("fea", 0.2)]).expect("non-empty");
        assert_eq!(summary.meaningful_emotions.len(), 1);
        assert_eq!(summary.dominant_emotion, EmotionLabel::Fear);
    }

    #[test]
    fn nothing_meaningful_falls_back_to_neutral() {
        let scores = [score("ang", 0.19), score("sur", 0.15), score("dis", 0.1)];
        let summary = summarize(&scores).expect("non-empty");
        assert!(summary.meaningful_emotions.is_empty());
        assert_eq!(summary.dominant_emotion, EmotionLabel::Neutral);
        assert_eq!(summary.confidence_score, 19);
    }

    #[test]
    fn unknown_label_can_dominate() {
        let summary = summarize(&[score("calm", 0.7)]).expect("non-empty");
        assert_eq!(
            summary.dominant_emotion,
            EmotionLabel::Unknown("calm".to_owned())
        );
    }

    #[test]
    fn membership_is_monotonic_in_threshold() {
        let scores = [
            score("hap", 0.45),
            score("neu", 0.25),
            score("sad", 0.15),
            score("ang", 0.05),
        ];
        let mut previous = usize::MAX;
        for threshold in [0.0, 0.1, 0.2, 0.3, 0.5, 1.0] {
            let summary = summarize_with_threshold(&scores, threshold).expect("non-empty");
            let count = summary.meaningful_emotions.len();
            assert!(count <= previous, "threshold {threshold} added members");
            assert!(summary
                .meaningful_emotions
                .iter()
                .all(|s| s.probability >= threshold));
            previous = count;
        }
    }
}
