use serde::Serialize;

use super::super::domain::{
    BearingCondition, BeltTracking, Inspection, LubricationStatus, SurfaceWear,
};
use super::policy::RiskScore;

/// Numeric reading a band guard is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Temperature,
    BearingTemperature,
    Speed,
    Tension,
}

impl Reading {
    pub fn of(self, inspection: &Inspection) -> Option<f64> {
        match self {
            Self::Temperature => inspection.temperature,
            Self::BearingTemperature => inspection.bearing_temperature,
            Self::Speed => inspection.speed,
            Self::Tension => inspection.tension,
        }
    }
}

/// Condition under which a rule fires. An unassessed field never satisfies a guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guard {
    /// `above < reading`, and `reading <= up_to` when an upper bound is set.
    Band {
        reading: Reading,
        above: f64,
        up_to: Option<f64>,
    },
    SurfaceWear(SurfaceWear),
    BeltTracking(BeltTracking),
    BearingCondition(BearingCondition),
    Lubrication(LubricationStatus),
}

impl Guard {
    pub fn holds(&self, inspection: &Inspection) -> bool {
        match *self {
            Guard::Band {
                reading,
                above,
                up_to,
            } => reading
                .of(inspection)
                .map(|value| value > above && up_to.map_or(true, |limit| value <= limit))
                .unwrap_or(false),
            Guard::SurfaceWear(expected) => inspection.surface_wear == Some(expected),
            Guard::BeltTracking(expected) => inspection.belt_tracking == Some(expected),
            Guard::BearingCondition(expected) => inspection.bearing_condition == Some(expected),
            Guard::Lubrication(expected) => inspection.lubrication_status == Some(expected),
        }
    }
}

/// One row of the scoring table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub key: &'static str,
    pub guard: Guard,
    /// Probability increment in hundredths.
    pub increment: u16,
    pub critical_factor: &'static str,
    pub action: Option<&'static str>,
    pub failure_mode: Option<&'static str>,
}

impl Rule {
    pub fn increment_probability(&self) -> f64 {
        f64::from(self.increment) / 100.0
    }
}

const fn band(reading: Reading, above: f64, up_to: Option<f64>) -> Guard {
    Guard::Band {
        reading,
        above,
        up_to,
    }
}

/// Scoring table in evaluation order. Explanation lists follow this order.
pub const RULES: &[Rule] = &[
    Rule {
        key: "temperature_high",
        guard: band(Reading::Temperature, 60.0, None),
        increment: 30,
        critical_factor: "High operating temperature",
        action: Some("Implement additional cooling measures"),
        failure_mode: Some("Thermal damage to bearings"),
    },
    Rule {
        key: "temperature_elevated",
        guard: band(Reading::Temperature, 50.0, Some(60.0)),
        increment: 15,
        critical_factor: "Elevated temperature",
        action: Some("Monitor temperature trends"),
        failure_mode: None,
    },
    Rule {
        key: "bearing_temperature_critical",
        guard: band(Reading::BearingTemperature, 70.0, None),
        increment: 35,
        critical_factor: "Critical bearing temperature",
        action: Some("Immediate bearing inspection required"),
        failure_mode: Some("Bearing seizure"),
    },
    Rule {
        key: "bearing_temperature_high",
        guard: band(Reading::BearingTemperature, 60.0, Some(70.0)),
        increment: 20,
        critical_factor: "High bearing temperature",
        action: Some("Check bearing lubrication"),
        failure_mode: None,
    },
    Rule {
        key: "speed_excessive",
        guard: band(Reading::Speed, 150.0, None),
        increment: 25,
        critical_factor: "Excessive speed",
        action: Some("Reduce operating speed"),
        failure_mode: Some("Mechanical wear acceleration"),
    },
    Rule {
        key: "tension_high",
        guard: band(Reading::Tension, 1500.0, None),
        increment: 30,
        critical_factor: "High belt tension",
        action: Some("Adjust belt tension"),
        failure_mode: Some("Belt stress failure"),
    },
    Rule {
        key: "surface_wear_severe",
        guard: Guard::SurfaceWear(SurfaceWear::Severe),
        increment: 40,
        critical_factor: "Severe surface wear",
        action: Some("Schedule pulley replacement"),
        failure_mode: Some("Surface degradation"),
    },
    Rule {
        key: "surface_wear_moderate",
        guard: Guard::SurfaceWear(SurfaceWear::Moderate),
        increment: 20,
        critical_factor: "Moderate surface wear",
        action: Some("Increase inspection frequency"),
        failure_mode: None,
    },
    Rule {
        key: "belt_misalignment",
        guard: Guard::BeltTracking(BeltTracking::SignificantOffset),
        increment: 35,
        critical_factor: "Significant belt misalignment",
        action: Some("Immediate belt alignment required"),
        failure_mode: Some("Uneven wear pattern"),
    },
    Rule {
        key: "bearing_condition_poor",
        guard: Guard::BearingCondition(BearingCondition::Poor),
        increment: 40,
        critical_factor: "Poor bearing condition",
        action: Some("Replace bearings"),
        failure_mode: Some("Bearing failure"),
    },
    Rule {
        key: "lubrication_critical",
        guard: Guard::Lubrication(LubricationStatus::Critical),
        increment: 35,
        critical_factor: "Critical lubrication level",
        action: Some("Immediate lubrication required"),
        failure_mode: Some("Insufficient lubrication"),
    },
];

/// Audit entry for a rule that fired.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleHit {
    pub rule: &'static str,
    pub increment: f64,
}

/// Everything the rule pass produced for one inspection.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    pub score: RiskScore,
    pub hits: Vec<RuleHit>,
    pub critical_factors: Vec<&'static str>,
    pub recommended_actions: Vec<&'static str>,
    pub potential_failure_modes: Vec<&'static str>,
}

pub(crate) fn apply_rules(inspection: &Inspection, rules: &[Rule]) -> Findings {
    let mut findings = Findings::default();
    let mut raw_total: u16 = 0;

    for rule in rules.iter().filter(|rule| rule.guard.holds(inspection)) {
        raw_total = raw_total.saturating_add(rule.increment);
        findings.hits.push(RuleHit {
            rule: rule.key,
            increment: rule.increment_probability(),
        });
        findings.critical_factors.push(rule.critical_factor);
        if let Some(action) = rule.action {
            findings.recommended_actions.push(action);
        }
        if let Some(mode) = rule.failure_mode {
            findings.potential_failure_modes.push(mode);
        }
    }

    findings.score = RiskScore::capped(raw_total);
    findings
}
