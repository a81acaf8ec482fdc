use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How undefined coefficients are labelled in reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpretationMode {
    /// Undefined coefficients get their own category.
    #[default]
    Explicit,
    /// Undefined coefficients fall through to "Strong Negative", as the
    /// historical reports did.
    Legacy,
}

impl FromStr for InterpretationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "explicit" => Ok(Self::Explicit),
            "legacy" => Ok(Self::Legacy),
            _ => anyhow::bail!(
                "Invalid INTERPRETATION_MODE: {}. Must be 'explicit' or 'legacy'",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpretation {
    StrongPositive,
    ModeratePositive,
    Weak,
    ModerateNegative,
    StrongNegative,
    Undefined,
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrongPositive => write!(f, "Strong Positive"),
            Self::ModeratePositive => write!(f, "Moderate Positive"),
            Self::Weak => write!(f, "Weak/No Correlation"),
            Self::ModerateNegative => write!(f, "Moderate Negative"),
            Self::StrongNegative => write!(f, "Strong Negative"),
            Self::Undefined => write!(f, "Insufficient Data"),
        }
    }
}

impl Interpretation {
    /// Classify a coefficient. Bands are evaluated top-down:
    /// `> 0.7`, `> 0.3`, `>= -0.3`, `< -0.3`.
    pub fn classify(coefficient: Option<f64>, mode: InterpretationMode) -> Self {
        let fallback = match mode {
            InterpretationMode::Explicit => Self::Undefined,
            InterpretationMode::Legacy => Self::StrongNegative,
        };

        match coefficient {
            Some(x) if x > 0.7 => Self::StrongPositive,
            Some(x) if x > 0.3 => Self::ModeratePositive,
            Some(x) if x >= -0.3 => Self::Weak,
            Some(x) if x < -0.3 => Self::ModerateNegative,
            _ => fallback,
        }
    }
}

/// One aligned trading day: mean headline sentiment against that day's return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRow {
    pub date: NaiveDate,
    #[serde(rename = "Avg_Daily_Sentiment")]
    pub avg_daily_sentiment: f64,
    #[serde(rename = "Daily_Return")]
    pub daily_return: f64,
    #[serde(rename = "Article_Count")]
    pub article_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub entity_id: String,
    pub coefficient: Option<f64>,
    pub sample_size: usize,
    pub interpretation: Interpretation,
    /// Set when the coefficient could not be computed from the sample.
    pub low_confidence: bool,
}

impl CorrelationResult {
    pub fn new(
        entity_id: &str,
        coefficient: Option<f64>,
        sample_size: usize,
        mode: InterpretationMode,
    ) -> Self {
        let coefficient = coefficient.filter(|c| c.is_finite());
        Self {
            entity_id: entity_id.to_string(),
            coefficient,
            sample_size,
            interpretation: Interpretation::classify(coefficient, mode),
            low_confidence: coefficient.is_none(),
        }
    }

    /// Result recorded for an entity that could not be analyzed.
    pub fn undefined(entity_id: &str, mode: InterpretationMode) -> Self {
        Self::new(entity_id, None, 0, mode)
    }
}

/// Record counts at each stage of the alignment pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub records_in: usize,
    pub unparsed_dates: usize,
    pub unaligned: usize,
    pub sentiment_days: usize,
    pub joined_days: usize,
}
