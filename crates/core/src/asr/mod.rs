mod sidecar;

use crate::audio::AudioClip;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::PathBuf;

pub use sidecar::{SidecarTranscriber, SIDECAR_SUFFIX};

#[derive(thiserror::Error, Debug)]
pub enum AsrError {
    #[error("failed to read transcript {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transcript is not valid text: {0}")]
    MalformedTranscript(String),
}

/// Speech-to-text, run by an external model. The text is taken as-is; no
/// timing or confidence metadata is consumed.
pub trait Transcriber: Send + Sync {
    fn transcribe<'a>(&'a self, clip: &'a AudioClip) -> BoxFuture<'a, Result<String, AsrError>>;
}

/// Decode raw transcriber output, rejecting bytes that are not UTF-8.
pub fn transcript_from_bytes(bytes: Vec<u8>) -> Result<String, AsrError> {
    String::from_utf8(bytes).map_err(|e| AsrError::MalformedTranscript(e.utf8_error().to_string()))
}

#[derive(Clone, Debug, Default)]
pub struct StaticTranscriber {
    text: String,
}

impl StaticTranscriber {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl Transcriber for StaticTranscriber {
    fn transcribe<'a>(&'a self, _clip: &'a AudioClip) -> BoxFuture<'a, Result<String, AsrError>> {
        async move { Ok(self.text.clone()) }.boxed()
    }
}
