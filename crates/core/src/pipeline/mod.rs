use crate::asr::{AsrError, Transcriber};
use crate::audio::AudioClip;
use crate::chart::{chart_data, ChartSpec};
use crate::coaching::generate_suggestions_with;
use crate::config::CoachingConfig;
use crate::emotion::{
    summarize_with_threshold, EmotionClassifier, EmotionError, EmotionScore, EmotionSummary,
    SummaryError,
};
use crate::fluency::{analyze_fluency, FluencyMetrics};
use crate::report::{compose, CoachingReport};
use futures::TryFutureExt;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("no emotion scores to summarize")]
    InsufficientData,

    #[error("malformed transcript: {0}")]
    MalformedTranscript(String),

    #[error("transcription failed: {0}")]
    Transcription(#[source] AsrError),

    #[error("emotion classification failed: {0}")]
    Classification(#[from] EmotionError),
}

impl From<SummaryError> for AnalysisError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::InsufficientData => Self::InsufficientData,
        }
    }
}

impl From<AsrError> for AnalysisError {
    fn from(err: AsrError) -> Self {
        match err {
            AsrError::MalformedTranscript(reason) => Self::MalformedTranscript(reason),
            other => Self::Transcription(other),
        }
    }
}

/// Everything produced for one recording.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub transcript: String,
    pub summary: EmotionSummary,
    pub fluency: FluencyMetrics,
    pub chart: ChartSpec,
    pub report: CoachingReport,
}

/// Turn already-resolved collaborator output into an analysis.
pub fn synthesize(
    transcript: &str,
    scores: &[EmotionScore],
    config: &CoachingConfig,
) -> Result<Analysis, AnalysisError> {
    let summary = summarize_with_threshold(scores, config.meaningful_threshold.value())?;
    tracing::debug!(
        dominant = summary.dominant_emotion.name(),
        meaningful = summary.meaningful_emotions.len(),
        "emotions summarized"
    );

    let fluency = analyze_fluency(transcript);
    tracing::debug!(
        filler_count = fluency.filler_count,
        total_words = fluency.total_words,
        "fluency analyzed"
    );

    let suggestions = generate_suggestions_with(
        &summary.dominant_emotion,
        summary.confidence_score,
        transcript,
        config.harsh_word_match,
    );
    let report = compose(&summary, &fluency, transcript, suggestions);
    let chart = chart_data(scores);

    tracing::info!(
        confidence = summary.confidence_score,
        dominant = summary.dominant_emotion.name(),
        filler_ratio = fluency.ratio,
        suggestions = report.suggestions.len(),
        "analysis complete"
    );

    Ok(Analysis {
        transcript: transcript.to_owned(),
        summary,
        fluency,
        chart,
        report,
    })
}

/// Runs the transcription and classification collaborators for a recording
/// and synthesizes their output.
pub struct Coach<T, C> {
    pub transcriber: T,
    pub classifier: C,
    pub config: CoachingConfig,
}

impl<T, C> Coach<T, C>
where
    T: Transcriber,
    C: EmotionClassifier,
{
    pub fn new(transcriber: T, classifier: C, config: CoachingConfig) -> Self {
        Self {
            transcriber,
            classifier,
            config,
        }
    }

    pub async fn analyze(&self, clip: &AudioClip) -> Result<Analysis, AnalysisError> {
        let transcribe = self
            .transcriber
            .transcribe(clip)
            .err_into::<AnalysisError>();
        let classify = self.classifier.classify(clip).err_into::<AnalysisError>();

        let (transcript, scores) = match futures::future::try_join(transcribe, classify).await {
            Ok(outputs) => outputs,
            Err(e) => {
                tracing::warn!(error = %e, path = %clip.path.display(), "collaborator failed");
                return Err(e);
            }
        };

        synthesize(&transcript, &scores, &self.config)
    }
}
