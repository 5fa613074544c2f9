use crate::infra::{seed_demo_pulleys, InMemoryRecordStore};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use pulley_ai::error::AppError;
use pulley_ai::workflows::diagnostics::{
    BearingCondition, BeltTracking, DiagnosticEngine, Inspection, InspectionImportError,
    InspectionImporter, LubricationStatus, Prediction, SurfaceWear,
};
use pulley_ai::workflows::records::{
    BeltAlignment, MaintenanceKind, ManualInspection, NoiseLevel, PulleyId, RecordService,
    VisualCondition,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// JSON file holding one inspection or an array of inspections
    #[arg(long, value_name = "FILE", conflicts_with_all = ["csv", "readings"])]
    pub(crate) json: Option<PathBuf>,
    /// CSV export with one inspection per row and camelCase headers
    #[arg(long, value_name = "FILE", conflicts_with = "readings")]
    pub(crate) csv: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) readings: ReadingArgs,
    /// Output format for the predictions
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub(crate) format: ReportFormat,
}

/// Single inspection entered on the command line; omitted flags are unassessed.
#[derive(Args, Debug, Default)]
#[group(id = "readings", multiple = true)]
pub(crate) struct ReadingArgs {
    /// Operating temperature (°C)
    #[arg(long)]
    pub(crate) temperature: Option<f64>,
    /// Bearing temperature (°C)
    #[arg(long)]
    pub(crate) bearing_temperature: Option<f64>,
    /// Rotational speed (RPM)
    #[arg(long)]
    pub(crate) speed: Option<f64>,
    /// Belt tension (N)
    #[arg(long)]
    pub(crate) tension: Option<f64>,
    /// none, light, moderate or severe
    #[arg(long)]
    pub(crate) surface_wear: Option<SurfaceWear>,
    /// centered, slight-offset or significant-offset
    #[arg(long)]
    pub(crate) belt_tracking: Option<BeltTracking>,
    /// good, fair or poor
    #[arg(long)]
    pub(crate) bearing_condition: Option<BearingCondition>,
    /// adequate, low or critical
    #[arg(long)]
    pub(crate) lubrication_status: Option<LubricationStatus>,
}

impl ReadingArgs {
    fn into_inspection(self) -> Inspection {
        Inspection {
            temperature: self.temperature,
            bearing_temperature: self.bearing_temperature,
            speed: self.speed,
            tension: self.tension,
            surface_wear: self.surface_wear,
            belt_tracking: self.belt_tracking,
            bearing_condition: self.bearing_condition,
            lubrication_status: self.lubrication_status,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date recorded on the sample inspections (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) inspection_date: Option<NaiveDate>,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        json,
        csv,
        readings,
        format,
    } = args;

    let inspections = load_inspections(json, csv, readings)?;
    let predictions = DiagnosticEngine::new().evaluate_batch(&inspections);

    match format {
        ReportFormat::Text => {
            for (index, prediction) in predictions.iter().enumerate() {
                let title = format!("Inspection {}", index + 1);
                println!("{}", render_prediction(&title, prediction));
            }
        }
        ReportFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&predictions).map_err(std::io::Error::from)?;
            println!("{rendered}");
        }
    }

    Ok(())
}

fn load_inspections(
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
    readings: ReadingArgs,
) -> Result<Vec<Inspection>, InspectionImportError> {
    match (json, csv) {
        (Some(path), _) => InspectionImporter::from_json_path(path),
        (None, Some(path)) => InspectionImporter::from_csv_path(path),
        (None, None) => {
            let inspection = readings.into_inspection();
            inspection
                .validate()
                .map_err(|source| InspectionImportError::Invalid { row: 1, source })?;
            Ok(vec![inspection])
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let inspection_date = args
        .inspection_date
        .unwrap_or_else(|| Local::now().date_naive());

    let service = RecordService::new(Arc::new(InMemoryRecordStore::default()));
    let pulleys = seed_demo_pulleys(&service, inspection_date)?;

    println!("Pulley inspection demo");
    println!(
        "Registered {} pulleys; sample inspections dated {}",
        pulleys.len(),
        inspection_date
    );

    for (pulley, submission) in pulleys.iter().zip(sample_submissions()) {
        let record = service.submit_inspection(ManualInspection {
            pulley_id: pulley.id.clone(),
            inspection_date,
            ..submission
        })?;

        let title = format!(
            "{} [{}] inspected by {}",
            pulley.name,
            pulley.status.label(),
            record.submission.inspector
        );
        println!("\n{}", render_prediction(&title, &record.prediction));
    }

    println!("\nMaintenance history");
    for log in service.maintenance_logs(None)? {
        let kind = match log.kind {
            MaintenanceKind::Routine => "routine",
            MaintenanceKind::Emergency => "emergency",
        };
        println!(
            "- {} | {} | {}: {} ({})",
            log.date, log.pulley_id, kind, log.description, log.technician
        );
    }

    Ok(())
}

/// Inspection forms for the demo fleet, in seeding order. Pulley id and date are filled in later.
fn sample_submissions() -> Vec<ManualInspection> {
    let form = |inspector: &str, readings: Inspection, notes: &str| ManualInspection {
        pulley_id: PulleyId(String::new()),
        inspection_date: NaiveDate::default(),
        inspector: inspector.to_string(),
        readings,
        humidity: Some(48.0),
        force: Some(620.0),
        visual_condition: None,
        noise_level: None,
        belt_alignment: None,
        notes: notes.to_string(),
    };

    vec![
        ManualInspection {
            visual_condition: Some(VisualCondition::Good),
            noise_level: Some(NoiseLevel::Normal),
            belt_alignment: Some(BeltAlignment::Aligned),
            ..form(
                "R. Okafor",
                Inspection {
                    temperature: Some(41.0),
                    bearing_temperature: Some(48.0),
                    speed: Some(120.0),
                    tension: Some(1100.0),
                    surface_wear: Some(SurfaceWear::Light),
                    belt_tracking: Some(BeltTracking::Centered),
                    bearing_condition: Some(BearingCondition::Good),
                    lubrication_status: Some(LubricationStatus::Adequate),
                },
                "No findings",
            )
        },
        ManualInspection {
            visual_condition: Some(VisualCondition::Fair),
            noise_level: Some(NoiseLevel::Concerning),
            belt_alignment: Some(BeltAlignment::SlightDeviation),
            ..form(
                "M. Duarte",
                Inspection {
                    temperature: Some(56.0),
                    bearing_temperature: Some(63.0),
                    speed: Some(140.0),
                    surface_wear: Some(SurfaceWear::Moderate),
                    belt_tracking: Some(BeltTracking::SlightOffset),
                    ..Inspection::default()
                },
                "Tension gauge unavailable; lagging shows grooving",
            )
        },
        ManualInspection {
            visual_condition: Some(VisualCondition::Poor),
            noise_level: Some(NoiseLevel::Critical),
            belt_alignment: Some(BeltAlignment::SevereDeviation),
            ..form(
                "J. Lindqvist",
                Inspection {
                    temperature: Some(68.0),
                    bearing_temperature: Some(77.0),
                    speed: Some(165.0),
                    tension: Some(1620.0),
                    surface_wear: Some(SurfaceWear::Severe),
                    belt_tracking: Some(BeltTracking::SignificantOffset),
                    bearing_condition: Some(BearingCondition::Poor),
                    lubrication_status: Some(LubricationStatus::Critical),
                },
                "Grinding from non-drive bearing",
            )
        },
    ]
}

pub(crate) fn render_prediction(title: &str, prediction: &Prediction) -> String {
    let mut lines = vec![
        title.to_string(),
        format!("  {}", prediction.summary()),
        format!(
            "  Health score {}/100 | confidence {:.0}%",
            prediction.health_score,
            prediction.confidence_score * 100.0
        ),
    ];

    for (label, analysis) in [
        ("Temperature", &prediction.temperature_analysis),
        ("Vibration", &prediction.vibration_analysis),
    ] {
        let pending = analysis.pending();
        let mut line = format!(
            "  {label}: {} (trend {})",
            analysis.status().label(),
            analysis.trend().label()
        );
        if !pending.is_empty() {
            line.push_str(&format!(" [not computed: {}]", pending.join(", ")));
        }
        lines.push(line);
    }

    for (heading, entries) in [
        ("Critical factors", &prediction.critical_factors),
        ("Recommended actions", &prediction.recommended_actions),
        ("Potential failure modes", &prediction.potential_failure_modes),
    ] {
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("  {heading}:"));
        lines.extend(entries.iter().map(|entry| format!("    - {entry}")));
    }

    lines.join("\n")
}
