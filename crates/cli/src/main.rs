#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use persona_coach_core::asr::SidecarTranscriber;
use persona_coach_core::audio::AudioClip;
use persona_coach_core::coaching::HarshWordMatch;
use persona_coach_core::config::{
    resolve_harsh_word_match, resolve_threshold, AppConfig, CoachingConfig, OutputFormat, StdEnv,
    DEFAULT_LOG_LEVEL, ENV_HARSH_WORD_MATCH, ENV_MEANINGFUL_THRESHOLD,
};
use persona_coach_core::emotion::SidecarEmotionClassifier;
use persona_coach_core::pipeline::{Analysis, Coach};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "persona-coach")]
#[command(about = "Coaching report for a voice recording (tone, fluency, next moves)")]
struct Args {
    /// Recording to analyze. Transcript and emotion scores are read from
    /// `<AUDIO>.txt` and `<AUDIO>.emotions.json` unless given explicitly.
    audio: PathBuf,

    #[arg(long)]
    transcript: Option<PathBuf>,

    #[arg(long)]
    emotions: Option<PathBuf>,

    #[arg(long, default_value = "markdown")]
    format: OutputFormat,

    #[arg(long)]
    meaningful_threshold: Option<f64>,

    #[arg(long)]
    harsh_word_match: Option<HarshWordMatch>,

    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let cfg = build_config(args, &env)?;

    tracing::info!(
        audio = %cfg.audio.display(),
        output = %cfg.output,
        meaningful_threshold = cfg.coaching.meaningful_threshold.value(),
        "config loaded"
    );

    run(cfg).await
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let (clip, analysis) = analyze_recording(&cfg).await?;
    print!("{}", render(&clip, &analysis, cfg.output)?);
    Ok(())
}

async fn analyze_recording(cfg: &AppConfig) -> anyhow::Result<(AudioClip, Analysis)> {
    let clip = AudioClip::open(&cfg.audio)
        .with_context(|| format!("cannot open recording {}", cfg.audio.display()))?;

    let transcriber = match &cfg.transcript {
        Some(path) => SidecarTranscriber::with_path(path),
        None => SidecarTranscriber::new(),
    };
    let classifier = match &cfg.emotions {
        Some(path) => SidecarEmotionClassifier::with_path(path),
        None => SidecarEmotionClassifier::new(),
    };

    let coach = Coach::new(transcriber, classifier, cfg.coaching);
    let analysis = coach.analyze(&clip).await.context("analysis failed")?;
    Ok((clip, analysis))
}

fn render(clip: &AudioClip, analysis: &Analysis, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(analysis.report.to_string()),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "audio": clip,
                "analysis": analysis,
            });
            let mut text = serde_json::to_string_pretty(&out)?;
            text.push('\n');
            Ok(text)
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(
    args: Args,
    env: &impl persona_coach_core::config::Env,
) -> anyhow::Result<AppConfig> {
    let meaningful_threshold =
        resolve_threshold(args.meaningful_threshold, ENV_MEANINGFUL_THRESHOLD, env)?;
    let harsh_word_match =
        resolve_harsh_word_match(args.harsh_word_match, ENV_HARSH_WORD_MATCH, env)?;

    Ok(AppConfig {
        audio: args.audio,
        transcript: args.transcript,
        emotions: args.emotions,
        output: args.format,
        coaching: CoachingConfig {
            meaningful_threshold,
            harsh_word_match,
        },
    })
}
