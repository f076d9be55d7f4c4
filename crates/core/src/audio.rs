use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    time::Duration,
};
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

/// The uploaded recording handed to the transcription and classification
/// collaborators.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AudioClip {
    pub path: PathBuf,
    /// `None` when the clip was not opened.
    pub format: Option<AudioFormat>,
    pub duration: Duration,
}

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("audio file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("no audio track in file")]
    NoAudioTrack,

    #[error("audio track has no sample rate")]
    MissingSampleRate,
}

impl AudioClip {
    /// Wrap a path without opening it.
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            format: None,
            duration: Duration::ZERO,
        }
    }

    /// Open the recording and read its format from the container headers.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AudioError::NotFound(path.to_path_buf()),
            _ => AudioError::Io(e),
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let opened = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        let track = opened
            .format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(AudioError::NoAudioTrack)?;
        let params = &track.codec_params;

        let sample_rate = params.sample_rate.ok_or(AudioError::MissingSampleRate)?;
        let channels = params.channels.map(|c| c.count() as u16).unwrap_or(1);
        let duration = params
            .n_frames
            .map(|frames| duration_from_frames(sample_rate, frames))
            .unwrap_or_default();

        tracing::debug!(
            path = %path.display(),
            sample_rate,
            channels,
            duration_ms = duration.as_millis() as u64,
            "audio opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            format: Some(AudioFormat {
                sample_rate,
                channels,
            }),
            duration,
        })
    }

    /// Path of a file stored next to the recording: `take.wav` + `txt` gives
    /// `take.wav.txt`.
    pub fn sidecar(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}

fn duration_from_frames(sample_rate_hz: u32, frames: u64) -> Duration {
    if sample_rate_hz == 0 {
        return Duration::ZERO;
    }
    let micros = (u128::from(frames) * 1_000_000u128) / u128::from(sample_rate_hz);
    Duration::from_micros(micros.min(u128::from(u64::MAX)) as u64)
}
