mod classifier;
mod summary;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use classifier::{
    EmotionClassifier, EmotionError, SidecarEmotionClassifier, StaticEmotionClassifier,
};
pub use summary::{
    summarize, summarize_with_threshold, EmotionSummary, SummaryError, MEANINGFUL_THRESHOLD,
};

/// Bar colour used for labels outside the known vocabulary.
pub const FALLBACK_COLOR: &str = "#60a5fa";

/// Emotion vocabulary of the audio classifier.
///
/// The classifier reports short codes (`hap`, `sad`, ...). Codes outside the
/// vocabulary are kept verbatim in [`EmotionLabel::Unknown`] so they still
/// show up in the report and chart, just without an emoji or colour.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", from = "String")]
pub enum EmotionLabel {
    Happiness,
    Sadness,
    Neutral,
    Anger,
    Fear,
    Disgust,
    Surprise,
    Unknown(String),
}

impl EmotionLabel {
    pub const KNOWN: [EmotionLabel; 7] = [
        EmotionLabel::Happiness,
        EmotionLabel::Sadness,
        EmotionLabel::Neutral,
        EmotionLabel::Anger,
        EmotionLabel::Fear,
        EmotionLabel::Disgust,
        EmotionLabel::Surprise,
    ];

    pub fn from_code(code: &str) -> Self {
        match code {
            "hap" => Self::Happiness,
            "sad" => Self::Sadness,
            "neu" => Self::Neutral,
            "ang" => Self::Anger,
            "fea" => Self::Fear,
            "dis" => Self::Disgust,
            "sur" => Self::Surprise,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Short code as emitted by the classifier.
    pub fn code(&self) -> &str {
        match self {
            Self::Happiness => "hap",
            Self::Sadness => "sad",
            Self::Neutral => "neu",
            Self::Anger => "ang",
            Self::Fear => "fea",
            Self::Disgust => "dis",
            Self::Surprise => "sur",
            Self::Unknown(code) => code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Happiness => "happiness",
            Self::Sadness => "sadness",
            Self::Neutral => "neutral",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Disgust => "disgust",
            Self::Surprise => "surprise",
            Self::Unknown(code) => code,
        }
    }

    pub fn emoji(&self) -> Option<&'static str> {
        match self {
            Self::Happiness => Some("😊"),
            Self::Sadness => Some("😔"),
            Self::Neutral => Some("😐"),
            Self::Anger => Some("😠"),
            Self::Fear => Some("😨"),
            Self::Disgust => Some("🤢"),
            Self::Surprise => Some("😮"),
            Self::Unknown(_) => None,
        }
    }

    /// Label as written in the coaching report, e.g. `😊 happiness`.
    pub fn display(&self) -> String {
        match self.emoji() {
            Some(emoji) => format!("{emoji} {}", self.name()),
            None => self.name().to_owned(),
        }
    }

    /// Label as drawn on the chart axis, e.g. `😊 Happy`.
    pub fn chart_label(&self) -> String {
        let word = match self {
            Self::Happiness => "Happy",
            Self::Sadness => "Sad",
            Self::Neutral => "Neutral",
            Self::Anger => "Angry",
            Self::Fear => "Fear",
            Self::Disgust => "Disgust",
            Self::Surprise => "Surprise",
            Self::Unknown(code) => return code.clone(),
        };
        match self.emoji() {
            Some(emoji) => format!("{emoji} {word}"),
            None => word.to_owned(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Happiness => "#facc15",
            Self::Sadness => "#60a5fa",
            Self::Neutral => "#a1a1aa",
            Self::Anger => "#ef4444",
            Self::Fear => "#818cf8",
            Self::Disgust => "#14b8a6",
            Self::Surprise => "#f472b6",
            Self::Unknown(_) => FALLBACK_COLOR,
        }
    }

    /// True when the label's name contains `emotion`.
    ///
    /// Coaching rules match on names rather than variants so that a
    /// pass-through code like `happiness_excited` still counts as happiness.
    pub fn mentions(&self, emotion: &str) -> bool {
        self.name().contains(emotion)
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<EmotionLabel> for String {
    fn from(label: EmotionLabel) -> Self {
        label.name().to_owned()
    }
}

/// Names win over codes, so a pass-through code spelled like a known name
/// (`Unknown("happiness")`) comes back as that emotion and gains its emoji
/// and color. Coaching is unaffected since rules match on names.
impl From<String> for EmotionLabel {
    fn from(value: String) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.name() == value)
            .cloned()
            .unwrap_or_else(|| Self::from_code(&value))
    }
}

/// One classifier entry as it appears on the wire: `{"label": "hap", "score": 0.85}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawEmotionScore {
    pub label: String,
    pub score: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmotionScore {
    pub label: EmotionLabel,
    pub probability: f64,
}

impl EmotionScore {
    pub fn new(label: EmotionLabel, probability: f64) -> Self {
        Self { label, probability }
    }
}

impl From<RawEmotionScore> for EmotionScore {
    fn from(raw: RawEmotionScore) -> Self {
        Self {
            label: EmotionLabel::from_code(&raw.label),
            probability: raw.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for label in EmotionLabel::KNOWN {
            assert_eq!(EmotionLabel::from_code(label.code()), label);
        }
    }

    #[test]
    fn unknown_code_passes_through() {
        let label = EmotionLabel::from_code("calm");
        assert_eq!(label, EmotionLabel::Unknown("calm".to_owned()));
        assert_eq!(label.display(), "calm");
        assert_eq!(label.chart_label(), "calm");
        assert_eq!(label.color(), FALLBACK_COLOR);
    }

    #[test]
    fn display_forms() {
        assert_eq!(EmotionLabel::Happiness.display(), "😊 happiness");
        assert_eq!(EmotionLabel::Anger.chart_label(), "😠 Angry");
        assert_eq!(EmotionLabel::Neutral.color(), "#a1a1aa");
    }

    #[test]
    fn mentions_matches_on_name() {
        assert!(EmotionLabel::Happiness.mentions("happiness"));
        assert!(EmotionLabel::from_code("happiness_excited").mentions("happiness"));
        assert!(!EmotionLabel::Surprise.mentions("happiness"));
    }

    #[test]
    fn raw_score_deserializes_from_classifier_json() {
        let raw: Vec<RawEmotionScore> =
            serde_json::from_str(r#"[{"label":"sad","score":0.4},{"label":"xyz","score":0.1}]"#)
                .expect("valid json");
        let scores: Vec<EmotionScore> = raw.into_iter().map(EmotionScore::from).collect();
        assert_eq!(scores[0], EmotionScore::new(EmotionLabel::Sadness, 0.4));
        assert_eq!(scores[1].label, EmotionLabel::Unknown("xyz".to_owned()));
    }

    #[test]
    fn label_serializes_as_name() {
        let json = serde_json::to_string(&EmotionLabel::Fear).expect("serialize");
        assert_eq!(json, r#""fear""#);
        let back: EmotionLabel = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, EmotionLabel::Fear);
    }

    #[test]
    fn unknown_label_spelled_as_known_name_reads_back_as_known() {
        let label = EmotionLabel::Unknown("happiness".to_owned());
        let json = serde_json::to_string(&label).expect("serialize");
        assert_eq!(json, r#""happiness""#);

        let back: EmotionLabel = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, EmotionLabel::Happiness);
        assert_eq!(back.display(), "😊 happiness");
        assert!(back.mentions("happiness") && label.mentions("happiness"));

        let calm: EmotionLabel = serde_json::from_str(r#""calm""#).expect("deserialize");
        assert_eq!(calm, EmotionLabel::Unknown("calm".to_owned()));
    }
}
