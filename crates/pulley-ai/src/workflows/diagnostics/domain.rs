use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Measured and assessed conditions for one pulley at one point in time.
///
/// Every field is optional: `None` means the condition was not assessed and the
/// rules keyed on it are skipped, never evaluated against a default value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inspection {
    /// Ambient operating temperature in °C.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Bearing housing temperature in °C.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing_temperature: Option<f64>,
    /// Shaft speed in RPM.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Belt tension in N.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_wear: Option<SurfaceWear>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belt_tracking: Option<BeltTracking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing_condition: Option<BearingCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lubrication_status: Option<LubricationStatus>,
}

impl Inspection {
    /// Numeric readings paired with their wire names, in declaration order.
    pub fn numeric_readings(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("temperature", self.temperature),
            ("bearingTemperature", self.bearing_temperature),
            ("speed", self.speed),
            ("tension", self.tension),
        ]
    }

    /// Boundary check for callers accepting external input.
    ///
    /// Deserialisation already rejects unknown enum tokens; this catches
    /// numeric readings that parsed but are not real measurements.
    pub fn validate(&self) -> Result<(), InspectionError> {
        for (field, reading) in self.numeric_readings() {
            if let Some(value) = reading {
                if !value.is_finite() {
                    return Err(InspectionError::NonFiniteReading { field, value });
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Input contract violations detected before evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InspectionError {
    #[error("reading '{field}' must be a finite number, found {value}")]
    NonFiniteReading { field: &'static str, value: f64 },
    #[error("'{value}' is not a valid {kind} (expected one of: {expected})")]
    UnknownToken {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

fn parse_token<T: Copy>(
    raw: &str,
    kind: &'static str,
    variants: &[T],
    token: fn(T) -> &'static str,
) -> Result<T, InspectionError> {
    let needle = raw.trim().to_ascii_lowercase();
    variants
        .iter()
        .copied()
        .find(|variant| token(*variant) == needle)
        .ok_or_else(|| InspectionError::UnknownToken {
            kind,
            value: raw.to_string(),
            expected: variants
                .iter()
                .map(|variant| token(*variant))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceWear {
    None,
    Light,
    Moderate,
    Severe,
}

impl SurfaceWear {
    pub const fn ordered() -> [Self; 4] {
        [Self::None, Self::Light, Self::Moderate, Self::Severe]
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeltTracking {
    Centered,
    SlightOffset,
    SignificantOffset,
}

impl BeltTracking {
    pub const fn ordered() -> [Self; 3] {
        [Self::Centered, Self::SlightOffset, Self::SignificantOffset]
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Centered => "centered",
            Self::SlightOffset => "slight-offset",
            Self::SignificantOffset => "significant-offset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BearingCondition {
    Good,
    Fair,
    Poor,
}

impl BearingCondition {
    pub const fn ordered() -> [Self; 3] {
        [Self::Good, Self::Fair, Self::Poor]
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LubricationStatus {
    Adequate,
    Low,
    Critical,
}

impl LubricationStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Adequate, Self::Low, Self::Critical]
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Adequate => "adequate",
            Self::Low => "low",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for SurfaceWear {
    type Err = InspectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_token(raw, "surface wear", &Self::ordered(), Self::token)
    }
}

impl FromStr for BeltTracking {
    type Err = InspectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_token(raw, "belt tracking", &Self::ordered(), Self::token)
    }
}

impl FromStr for BearingCondition {
    type Err = InspectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_token(raw, "bearing condition", &Self::ordered(), Self::token)
    }
}

impl FromStr for LubricationStatus {
    type Err = InspectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_token(raw, "lubrication status", &Self::ordered(), Self::token)
    }
}

impl fmt::Display for SurfaceWear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for BeltTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for BearingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for LubricationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
