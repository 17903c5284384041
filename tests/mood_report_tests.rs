// Tests for the analysis result consumer: mood tier cut points, summary
// formatting and the independence of the crisis advisory.

use voice_checkin::{AnalysisResult, CheckinReport, MoodScore, MoodTier, CRISIS_ADVISORY};

fn result(overall: f32, positive: u32, negative: u32, crisis: bool) -> AnalysisResult {
    AnalysisResult {
        transcript: "had a long day but the walk helped".to_string(),
        mood_score: MoodScore {
            overall,
            positive,
            negative,
            neutral: 0,
        },
        crisis_detected: crisis,
    }
}

#[test]
fn test_tier_cut_points() {
    assert_eq!(MoodTier::from_overall(4.2), MoodTier::Positive);
    assert_eq!(MoodTier::from_overall(4.0), MoodTier::Positive);
    assert_eq!(MoodTier::from_overall(3.9), MoodTier::Neutral);
    assert_eq!(MoodTier::from_overall(3.0), MoodTier::Neutral);
    assert_eq!(MoodTier::from_overall(2.5), MoodTier::Low);
    assert_eq!(MoodTier::from_overall(2.0), MoodTier::Low);
    assert_eq!(MoodTier::from_overall(1.9), MoodTier::Critical);
    assert_eq!(MoodTier::from_overall(0.0), MoodTier::Critical);
}

#[test]
fn test_report_summary_format() {
    let report = CheckinReport::from_result(&result(4.2, 3, 1, false));

    assert_eq!(report.tier, MoodTier::Positive);
    assert!(report
        .summary
        .starts_with("had a long day but the walk helped"));
    assert!(report.summary.contains("Mood Analysis: 4.2/5"));
    assert!(report.summary.contains("Positive: 3 | Negative: 1"));
    assert!(report.advisory.is_none());
}

#[test]
fn test_crisis_advisory_fires_independently_of_tier() {
    // Crisis language with a positive mood score still raises the advisory.
    let report = CheckinReport::from_result(&result(4.5, 5, 0, true));

    assert_eq!(report.tier, MoodTier::Positive);
    assert_eq!(report.advisory.as_deref(), Some(CRISIS_ADVISORY));
    // The advisory is additive; the mood summary is still produced.
    assert!(report.summary.contains("Mood Analysis: 4.5/5"));
}

#[test]
fn test_crisis_advisory_with_critical_tier() {
    let report = CheckinReport::from_result(&result(1.2, 0, 6, true));

    assert_eq!(report.tier, MoodTier::Critical);
    assert_eq!(report.advisory.as_deref(), Some(CRISIS_ADVISORY));
}

#[test]
fn test_tier_labels() {
    assert_eq!(MoodTier::Positive.label(), "positive");
    assert_eq!(MoodTier::Neutral.label(), "neutral");
    assert_eq!(MoodTier::Low.label(), "low");
    assert_eq!(MoodTier::Critical.label(), "critical");
}
