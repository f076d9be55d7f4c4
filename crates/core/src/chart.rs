//! Display-ready data for the emotion bar chart.
//!
//! Drawing is left to whatever renders the chart; this module only decides
//! labels, colours, ordering and axis range.

use crate::emotion::EmotionScore;
use serde::{Deserialize, Serialize};

pub const CHART_TITLE: &str = "🎭 Emotion Confidence Scores";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub probability: f64,
    pub color: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_range: (f64, f64),
    /// Top to bottom, in classifier order.
    pub bars: Vec<ChartBar>,
}

/// One bar per score, unfiltered.
pub fn chart_data(scores: &[EmotionScore]) -> ChartSpec {
    let bars = scores
        .iter()
        .map(|s| ChartBar {
            label: s.label.chart_label(),
            probability: s.probability,
            color: s.label.color().to_owned(),
        })
        .collect();

    ChartSpec {
        title: CHART_TITLE.to_owned(),
        x_range: (0.0, 1.0),
        bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::{EmotionLabel, FALLBACK_COLOR};

    #[test]
    fn keeps_every_score_in_order() {
        let scores = [
            EmotionScore::new(EmotionLabel::Neutral, 0.05),
            EmotionScore::new(EmotionLabel::Happiness, 0.9),
            EmotionScore::new(EmotionLabel::from_code("xyz"), 0.05),
        ];
        let chart = chart_data(&scores);
        assert_eq!(chart.title, CHART_TITLE);
        assert_eq!(chart.x_range, (0.0, 1.0));
        assert_eq!(
            chart.bars,
            vec![
                ChartBar {
                    label: "😐 Neutral".to_owned(),
                    probability: 0.05,
                    color: "#a1a1aa".to_owned(),
                },
                ChartBar {
                    label: "😊 Happy".to_owned(),
                    probability: 0.9,
                    color: "#facc15".to_owned(),
                },
                ChartBar {
                    label: "xyz".to_owned(),
                    probability: 0.05,
                    color: FALLBACK_COLOR.to_owned(),
                },
            ]
        );
    }

    #[test]
    fn empty_scores_give_empty_chart() {
        assert!(chart_data(&[]).bars.is_empty());
    }
}
