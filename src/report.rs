//! Consumes an analysis result and turns it into something the UI layer
//! can show: a discrete mood tier, a formatted summary and, independently,
//! a crisis advisory.

use serde::{Deserialize, Serialize};

use crate::remote::AnalysisResult;

/// High-priority warning shown whenever the service flags crisis language,
/// regardless of the mood tier.
pub const CRISIS_ADVISORY: &str = "Crisis keywords detected. If you need help, please reach out \
     to someone you trust or contact a mental health professional.";

/// Discrete display tier for an overall mood score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTier {
    Positive,
    Neutral,
    Low,
    Critical,
}

impl MoodTier {
    /// Cut points as observed in the service's scoring scale.
    pub fn from_overall(overall: f32) -> Self {
        if overall >= 4.0 {
            Self::Positive
        } else if overall >= 3.0 {
            Self::Neutral
        } else if overall >= 2.0 {
            Self::Low
        } else {
            Self::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Low => "low",
            Self::Critical => "critical",
        }
    }
}

/// User-facing rendering of one check-in's analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinReport {
    pub transcript: String,
    pub tier: MoodTier,
    pub summary: String,
    /// Present iff the service detected crisis language; additive to the
    /// mood summary, never a replacement for it.
    pub advisory: Option<String>,
}

impl CheckinReport {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let tier = MoodTier::from_overall(result.mood_score.overall);

        let summary = format!(
            "{}\n\nMood Analysis: {:.1}/5\nPositive: {} | Negative: {}",
            result.transcript,
            result.mood_score.overall,
            result.mood_score.positive,
            result.mood_score.negative
        );

        let advisory = result
            .crisis_detected
            .then(|| CRISIS_ADVISORY.to_string());

        Self {
            transcript: result.transcript.clone(),
            tier,
            summary,
            advisory,
        }
    }
}
