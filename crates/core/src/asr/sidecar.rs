use crate::asr::{transcript_from_bytes, AsrError, Transcriber};
use crate::audio::AudioClip;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::PathBuf;

pub const SIDECAR_SUFFIX: &str = "txt";

/// Reads a transcript saved next to the recording (`<audio>.txt`).
#[derive(Clone, Debug, Default)]
pub struct SidecarTranscriber {
    path: Option<PathBuf>,
}

impl SidecarTranscriber {
    pub fn new() -> Self {
        Self::default()
    }

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

impl Transcriber for SidecarTranscriber {
    fn transcribe<'a>(&'a self, clip: &'a AudioClip) -> BoxFuture<'a, Result<String, AsrError>> {
        async move {
            let path = self.resolve(clip);
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(source) => return Err(AsrError::Io { path, source }),
            };
            let text = transcript_from_bytes(bytes)?;
            tracing::debug!(path = %path.display(), chars = text.len(), "transcript loaded");
            Ok(text)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_transcript_next_to_audio() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("take.wav.txt"), "This was the worst day ever")
            .expect("write");

        let clip = AudioClip::from_path(dir.path().join("take.wav"));
        let text = futures::executor::block_on(SidecarTranscriber::new().transcribe(&clip))
            .expect("transcribe");
        assert_eq!(text, "This was the worst day ever");
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.txt");
        std::fs::write(&path, "").expect("write");

        let clip = AudioClip::from_path(dir.path().join("take.wav"));
        let text =
            futures::executor::block_on(SidecarTranscriber::with_path(&path).transcribe(&clip))
                .expect("transcribe");
        assert!(text.is_empty());
    }

    #[test]
    fn non_utf8_sidecar_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("take.wav.txt"), [0xc3, 0x28]).expect("write");

        let clip = AudioClip::from_path(dir.path().join("take.wav"));
        let err = futures::executor::block_on(SidecarTranscriber::new().transcribe(&clip))
            .expect_err("malformed");
        assert!(matches!(err, AsrError::MalformedTranscript(_)));
    }
}
