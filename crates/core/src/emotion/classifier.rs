use crate::audio::AudioClip;
use crate::emotion::{EmotionScore, RawEmotionScore};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::PathBuf;

pub const SIDECAR_SUFFIX: &str = "emotions.json";

#[derive(thiserror::Error, Debug)]
pub enum EmotionError {
    #[error("failed to read classifier output {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid classifier output {}: {source}", .path.display())]
    InvalidOutput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Audio emotion classification, run by an external model.
///
/// Scores come back in the classifier's own order, which is not guaranteed
/// to be sorted by probability.
pub trait EmotionClassifier: Send + Sync {
    fn classify<'a>(
        &'a self,
        clip: &'a AudioClip,
    ) -> BoxFuture<'a, Result<Vec<EmotionScore>, EmotionError>>;
}

/// Reads classifier output saved next to the recording as a JSON array of
/// `{"label", "score"}` objects.
#[derive(Clone, Debug, Default)]
pub struct SidecarEmotionClassifier {
    path: Option<PathBuf>,
}

impl SidecarEmotionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from `path` instead of `<audio>.emotions.json`.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn resolve(&self, clip: &AudioClip) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| clip.sidecar(SIDECAR_SUFFIX))
    }
}

impl EmotionClassifier for SidecarEmotionClassifier {
    fn classify<'a>(
        &'a self,
        clip: &'a AudioClip,
    ) -> BoxFuture<'a, Result<Vec<EmotionScore>, EmotionError>> {
        async move {
            let path = self.resolve(clip);
            let raw = match std::fs::read(&path) {
                Ok(raw) => raw,
                Err(source) => return Err(EmotionError::Io { path, source }),
            };
            let entries: Vec<RawEmotionScore> = match serde_json::from_slice(&raw) {
                Ok(entries) => entries,
                Err(source) => return Err(EmotionError::InvalidOutput { path, source }),
            };
            tracing::debug!(
                path = %path.display(),
                entries = entries.len(),
                "classifier output loaded"
            );
            for entry in entries.iter().filter(|e| !(0.0..=1.0).contains(&e.score)) {
                tracing::warn!(
                    path = %path.display(),
                    label = %entry.label,
                    score = entry.score,
                    "classifier score outside [0, 1]"
                );
            }
            Ok(entries.into_iter().map(EmotionScore::from).collect())
        }
        .boxed()
    }
}

#[derive(Clone, Debug, Default)]
pub struct StaticEmotionClassifier {
    scores: Vec<EmotionScore>,
}

impl StaticEmotionClassifier {
    pub fn new(scores: Vec<EmotionScore>) -> Self {
        Self { scores }
    }
}

impl EmotionClassifier for StaticEmotionClassifier {
    fn classify<'a>(
        &'a self,
        _clip: &'a AudioClip,
    ) -> BoxFuture<'a, Result<Vec<EmotionScore>, EmotionError>> {
        async move { Ok(self.scores.clone()) }.boxed()
    }
}
