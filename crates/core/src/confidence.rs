//! Maps the classifier's top probability to a 0-100 clarity score.

/// `round(100 * probability)`, with the probability clamped to `[0, 1]`.
pub fn confidence_score(top_probability: f64) -> u8 {
    let clamped = if top_probability.is_nan() {
        0.0
    } else {
        top_probability.clamp(0.0, 1.0)
    };
    (clamped * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(confidence_score(0.85), 85);
        assert_eq!(confidence_score(0.5), 50);
        assert_eq!(confidence_score(0.794), 79);
        assert_eq!(confidence_score(0.796), 80);
    }

    #[test]
    fn stays_within_bounds() {
        assert_eq!(confidence_score(0.0), 0);
        assert_eq!(confidence_score(1.0), 100);
        assert_eq!(confidence_score(1.7), 100);
        assert_eq!(confidence_score(-0.2), 0);
        assert_eq!(confidence_score(f64::NAN), 0);
    }
}
