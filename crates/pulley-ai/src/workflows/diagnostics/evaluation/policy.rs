use std::fmt;

use serde::Serialize;

/// Confidence attached to every prediction; fixed by the heuristic, not derived from input.
pub const CONFIDENCE_SCORE: f64 = 0.85;

const BASE_LIFESPAN_DAYS: u32 = 365;

/// Accumulated failure risk in hundredths of probability.
///
/// Increments are summed exactly so boundary sums (0.35 + 0.35) land on the
/// documented thresholds instead of a float one ulp above or below them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RiskScore(u16);

impl RiskScore {
    /// The engine never reports certainty of failure.
    pub const CEILING: RiskScore = RiskScore(95);

    pub fn capped(raw_hundredths: u16) -> Self {
        Self(raw_hundredths.min(Self::CEILING.0))
    }

    pub fn hundredths(self) -> u16 {
        self.0
    }

    pub fn probability(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    fn remaining(self) -> u16 {
        100 - self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceUrgency {
    Routine,
    Soon,
    Urgent,
    Immediate,
}

impl MaintenanceUrgency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Routine => "Routine",
            Self::Soon => "Soon",
            Self::Urgent => "Urgent",
            Self::Immediate => "Immediate",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MaintenanceUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict lower bounds (hundredths), highest tier first.
const RISK_TIERS: [(u16, RiskLevel); 3] = [
    (70, RiskLevel::Critical),
    (50, RiskLevel::High),
    (30, RiskLevel::Medium),
];

const URGENCY_TIERS: [(u16, MaintenanceUrgency); 3] = [
    (70, MaintenanceUrgency::Immediate),
    (50, MaintenanceUrgency::Urgent),
    (30, MaintenanceUrgency::Soon),
];

fn classify<T: Copy>(score: RiskScore, tiers: &[(u16, T)], floor: T) -> T {
    tiers
        .iter()
        .find(|(above, _)| score.hundredths() > *above)
        .map(|(_, tier)| *tier)
        .unwrap_or(floor)
}

pub fn risk_level(score: RiskScore) -> RiskLevel {
    classify(score, &RISK_TIERS, RiskLevel::Low)
}

pub fn maintenance_urgency(score: RiskScore) -> MaintenanceUrgency {
    classify(score, &URGENCY_TIERS, MaintenanceUrgency::Routine)
}

/// `round(365 × (1 − p))`, halves rounded up.
///
/// Computed in exact hundredths, so p = 0.90 gives 37 days. A float evaluation
/// lands on 36.4999… and rounds to 36; the exact result is the intended one.
pub fn estimated_lifespan_days(score: RiskScore) -> u32 {
    let scaled = BASE_LIFESPAN_DAYS * u32::from(score.remaining());
    (scaled + 50) / 100
}

/// `round((1 − p) × 100)`; always within 5..=100 because of the ceiling.
pub fn health_score(score: RiskScore) -> u8 {
    // remaining() is at most 100
    score.remaining() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionStatus {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Stable,
    Increasing,
    Decreasing,
}

impl ConditionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Increasing => "Increasing",
            Self::Decreasing => "Decreasing",
        }
    }
}

/// Temperature status from the raw reading, independent of the accumulated score.
pub fn temperature_status(temperature: f64) -> ConditionStatus {
    if temperature > 60.0 {
        ConditionStatus::Critical
    } else if temperature > 50.0 {
        ConditionStatus::Warning
    } else {
        ConditionStatus::Normal
    }
}
