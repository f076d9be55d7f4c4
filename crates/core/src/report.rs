use crate::emotion::EmotionSummary;
use crate::fluency::{FluencyBand, FluencyMetrics, FEW_SLIPPED_RATIO};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top probability at which delivery counts as confident.
pub const STRONG_TOP_SCORE: f64 = 0.75;

const NOT_EXPRESSIVE: &str =
    "- Your tone wasn’t clearly expressive. Try reading with a bit more emphasis or emotion.";
const STRENGTH_CONFIDENT: &str = "- Confident tone and smooth delivery — keep it up!";
const STRENGTH_ON_TRACK: &str = "- You’re on track. Keep refining tone and pacing.";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CoachingReport {
    pub transcript: String,
    pub confidence_score: u8,
    pub emotion_summary_text: String,
    pub fluency_text: String,
    pub strengths_text: String,
    pub suggestions: Vec<String>,
}

fn band_message(band: FluencyBand) -> &'static str {
    match band {
        FluencyBand::NeedsWork => {
            "- Try pausing instead of using fillers — it builds stronger presence."
        }
        FluencyBand::FewSlipped => {
            "- A few slipped in. Practice holding space with silence instead."
        }
        FluencyBand::Fluent => "- Great fluency — you stayed focused and controlled.",
    }
}

fn emotion_summary_text(summary: &EmotionSummary) -> String {
    if summary.meaningful_emotions.is_empty() {
        return NOT_EXPRESSIVE.to_owned();
    }
    let shown = summary
        .meaningful_emotions
        .iter()
        .map(|s| format!("**{}** ({:.2})", s.label.display(), s.probability))
        .collect::<Vec<_>>()
        .join(", ");
    format!("- Emotionally, your voice showed: {shown}")
}

fn fluency_text(fluency: &FluencyMetrics) -> String {
    format!(
        "- You used **{}** hesitation phrases out of **{}** words.\n{}",
        fluency.filler_count,
        fluency.total_words,
        band_message(fluency.band())
    )
}

fn strengths_text(summary: &EmotionSummary, fluency: &FluencyMetrics) -> &'static str {
    if summary.top_score >= STRONG_TOP_SCORE && fluency.ratio < FEW_SLIPPED_RATIO {
        STRENGTH_CONFIDENT
    } else {
        STRENGTH_ON_TRACK
    }
}

/// Assemble the report. Pure; list markup for suggestions is applied when
/// rendering, not here.
pub fn compose(
    summary: &EmotionSummary,
    fluency: &FluencyMetrics,
    transcript: &str,
    suggestions: Vec<String>,
) -> CoachingReport {
    CoachingReport {
        transcript: transcript.to_owned(),
        confidence_score: summary.confidence_score,
        emotion_summary_text: emotion_summary_text(summary),
        fluency_text: fluency_text(fluency),
        strengths_text: strengths_text(summary, fluency).to_owned(),
        suggestions,
    }
}

impl CoachingReport {
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }

    /// Suggestions as a bullet list, each item on its own `- ` line.
    pub fn suggestions_markdown(&self) -> String {
        self.suggestions
            .iter()
            .map(|s| format!("\n- {s}"))
            .collect()
    }
}

impl fmt::Display for CoachingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "## 📝 **Your PersonaCoach Report**\n---\n\n")?;
        writeln!(f, "### 🗒️ **What You Said:**")?;
        write!(f, "> _{}_\n\n", self.transcript.trim())?;
        writeln!(f, "### 🎯 **Tone Strength:**")?;
        write!(
            f,
            "- Your tone scored **{}/100** in clarity.\n\n",
            self.confidence_score
        )?;
        writeln!(f, "### 🗣️ **Emotion & Delivery:**")?;
        writeln!(f, "{}", self.emotion_summary_text)?;
        writeln!(f, "\n### 💬 **Pausing Style (e.g., 'um', 'like', 'you know'):**")?;
        writeln!(f, "{}", self.fluency_text)?;
        writeln!(f, "\n### ✅ **What You're Doing Well:**")?;
        writeln!(f, "{}", self.strengths_text)?;
        writeln!(f, "\n### 🧭 **Next Moves:**")?;
        writeln!(f, "{}", self.suggestions_markdown())
    }
}
