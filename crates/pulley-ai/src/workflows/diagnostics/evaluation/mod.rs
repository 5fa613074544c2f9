mod policy;
mod rules;

pub use policy::{
    ConditionStatus, MaintenanceUrgency, RiskLevel, RiskScore, Trend, CONFIDENCE_SCORE,
};
pub use rules::{Guard, Reading, Rule, RuleHit, RULES};

use super::domain::Inspection;
use serde::{Serialize, Serializer};

/// Stateless evaluator applying the scoring table to an inspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticEngine;

impl DiagnosticEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn rules(&self) -> &'static [Rule] {
        RULES
    }

    /// Total over every inspection, including an empty one.
    pub fn evaluate(&self, inspection: &Inspection) -> Prediction {
        let findings = rules::apply_rules(inspection, RULES);
        let score = findings.score;

        let temperature_status = match inspection.temperature {
            Some(temperature) => Signal::Observed(policy::temperature_status(temperature)),
            None => Signal::NotComputed,
        };

        Prediction {
            failure_probability: score.probability(),
            risk_level: policy::risk_level(score),
            maintenance_urgency: policy::maintenance_urgency(score),
            estimated_lifespan_days: policy::estimated_lifespan_days(score),
            health_score: policy::health_score(score),
            confidence_score: CONFIDENCE_SCORE,
            critical_factors: findings.critical_factors,
            recommended_actions: findings.recommended_actions,
            potential_failure_modes: findings.potential_failure_modes,
            temperature_analysis: ConditionAnalysis {
                status: temperature_status,
                trend: Signal::NotComputed,
            },
            vibration_analysis: ConditionAnalysis::not_computed(),
            triggered_rules: findings.hits,
        }
    }

    /// Evaluates each inspection independently; output order matches input order.
    pub fn evaluate_batch(&self, inspections: &[Inspection]) -> Vec<Prediction> {
        inspections
            .iter()
            .map(|inspection| self.evaluate(inspection))
            .collect()
    }
}

pub fn evaluate(inspection: &Inspection) -> Prediction {
    DiagnosticEngine.evaluate(inspection)
}

/// A derived value that may still be waiting on an upstream data source.
///
/// Trends need inspection history and vibration status needs a vibration
/// reading; neither is modelled yet, so both stay `NotComputed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal<T> {
    Observed(T),
    NotComputed,
}

impl<T: Copy> Signal<T> {
    pub fn observed(self) -> Option<T> {
        match self {
            Signal::Observed(value) => Some(value),
            Signal::NotComputed => None,
        }
    }

    pub fn or_baseline(self, baseline: T) -> T {
        self.observed().unwrap_or(baseline)
    }

    pub fn is_computed(self) -> bool {
        matches!(self, Signal::Observed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionAnalysis {
    pub status: Signal<ConditionStatus>,
    pub trend: Signal<Trend>,
}

impl ConditionAnalysis {
    pub fn not_computed() -> Self {
        Self {
            status: Signal::NotComputed,
            trend: Signal::NotComputed,
        }
    }

    /// Reported status; `normal` until a reading is available.
    pub fn status(&self) -> ConditionStatus {
        self.status.or_baseline(ConditionStatus::Normal)
    }

    /// Reported trend; `stable` until history is available.
    pub fn trend(&self) -> Trend {
        self.trend.or_baseline(Trend::Stable)
    }

    pub fn pending(&self) -> Vec<&'static str> {
        let mut pending = Vec::new();
        if !self.status.is_computed() {
            pending.push("status");
        }
        if !self.trend.is_computed() {
            pending.push("trend");
        }
        pending
    }
}

#[derive(Serialize)]
struct ConditionAnalysisView {
    status: ConditionStatus,
    trend: Trend,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pending: Vec<&'static str>,
}

impl Serialize for ConditionAnalysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ConditionAnalysisView {
            status: self.status(),
            trend: self.trend(),
            pending: self.pending(),
        }
        .serialize(serializer)
    }
}

/// Risk assessment for one inspection.
///
/// The three explanation lists are ordered by the scoring table but are not
/// parallel arrays: rules without a failure mode add only a factor and an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub failure_probability: f64,
    pub risk_level: RiskLevel,
    pub maintenance_urgency: MaintenanceUrgency,
    pub estimated_lifespan_days: u32,
    pub health_score: u8,
    pub confidence_score: f64,
    pub critical_factors: Vec<&'static str>,
    pub recommended_actions: Vec<&'static str>,
    pub potential_failure_modes: Vec<&'static str>,
    pub temperature_analysis: ConditionAnalysis,
    pub vibration_analysis: ConditionAnalysis,
    pub triggered_rules: Vec<RuleHit>,
}

impl Prediction {
    pub fn summary(&self) -> String {
        format!(
            "{} risk, {} maintenance ({:.0}% failure probability, ~{} days remaining)",
            self.risk_level.label(),
            self.maintenance_urgency.label().to_ascii_lowercase(),
            self.failure_probability * 100.0,
            self.estimated_lifespan_days
        )
    }
}
