//! Cost estimation from purchase and task history.
//!
//! An estimate projects the cost of upcoming work:
//!
//! ```text
//! materials = Σ forecast quantity x historical average unit cost
//! labor     = Σ historical average task hours x hourly rate
//! delivery  = historical average delivery cost per purchase
//! ```
//!
//! Estimates are never persisted. Forecast lines without history contribute
//! nothing and are reported back as unmatched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::derivation::round2;
use crate::error::CoreError;
use crate::reports::{group_task_durations, PurchaseCostRow, TaskSpanRow};
use crate::types::DbId;
use crate::validation::{ensure_non_negative, require_text};

// ---------------------------------------------------------------------------
// Confidence thresholds
// ---------------------------------------------------------------------------

/// Sample count at or above which confidence is "High".
pub const HIGH_CONFIDENCE_SAMPLES: i64 = 10;
/// Sample count at or above which confidence is "Medium" (below High).
pub const MEDIUM_CONFIDENCE_SAMPLES: i64 = 3;

/// Maximum number of forecast lines (materials + labor) per request.
pub const MAX_FORECAST_LINES: usize = 200;

// ---------------------------------------------------------------------------
// Confidence enum
// ---------------------------------------------------------------------------

/// Confidence level for an estimate, derived from the number of
/// historical samples behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateConfidence {
    None,
    Low,
    Medium,
    High,
}

impl EstimateConfidence {
    pub fn from_sample_count(count: i64) -> Self {
        if count >= HIGH_CONFIDENCE_SAMPLES {
            Self::High
        } else if count >= MEDIUM_CONFIDENCE_SAMPLES {
            Self::Medium
        } else if count > 0 {
            Self::Low
        } else {
            Self::None
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialForecast {
    pub material_description: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LaborForecast {
    pub task_name: String,
    pub hourly_rate: f64,
}

/// What to estimate. `project_id` narrows the history to one project;
/// `None` uses history from every project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateRequest {
    pub project_id: Option<DbId>,
    #[serde(default)]
    pub materials: Vec<MaterialForecast>,
    #[serde(default)]
    pub labor: Vec<LaborForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialLine {
    pub material_description: String,
    pub quantity: f64,
    pub average_unit_cost: f64,
    pub samples: i64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaborLine {
    pub task_name: String,
    pub hourly_rate: f64,
    pub average_hours: f64,
    pub samples: i64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub material_cost: f64,
    pub labor_cost: f64,
    pub delivery_cost: f64,
    pub total_cost: f64,
    pub materials: Vec<MaterialLine>,
    pub labor: Vec<LaborLine>,
    pub unmatched_materials: Vec<String>,
    pub unmatched_tasks: Vec<String>,
    pub confidence: EstimateConfidence,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject empty or oversized requests and negative quantities / rates.
pub fn validate_estimate_request(request: &EstimateRequest) -> Result<(), CoreError> {
    let lines = request.materials.len() + request.labor.len();
    if lines == 0 {
        return Err(CoreError::Validation(
            "Estimate needs at least one material or labor line.".to_string(),
        ));
    }
    if lines > MAX_FORECAST_LINES {
        return Err(CoreError::Validation(format!(
            "Estimate accepts at most {MAX_FORECAST_LINES} lines, got {lines}."
        )));
    }
    for m in &request.materials {
        require_text(&m.material_description, "material_description")?;
        ensure_non_negative(m.quantity, "quantity")?;
    }
    for l in &request.labor {
        require_text(&l.task_name, "task_name")?;
        ensure_non_negative(l.hourly_rate, "hourly_rate")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Estimation logic
// ---------------------------------------------------------------------------

fn match_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Build an estimate from historical purchases and task spans.
///
/// Materials are matched on description and tasks on name, both
/// case-insensitively. Aggregate confidence is the lowest confidence of any
/// matched line (or of the delivery history), so a single thinly-sampled
/// line pulls the whole estimate down.
pub fn estimate(
    request: &EstimateRequest,
    purchases: &[PurchaseCostRow],
    tasks: &[TaskSpanRow],
) -> Estimate {
    let mut unit_costs: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for p in purchases {
        let e = unit_costs
            .entry(match_key(&p.material_description))
            .or_insert((0, 0.0));
        e.0 += 1;
        e.1 += p.unit_cost;
    }

    let durations: BTreeMap<String, (i64, f64)> = group_task_durations(tasks)
        .into_iter()
        .map(|(name, stats)| (match_key(&name), stats))
        .collect();

    let mut confidences = Vec::new();
    let mut materials = Vec::new();
    let mut unmatched_materials = Vec::new();
    for m in &request.materials {
        match unit_costs.get(&match_key(&m.material_description)) {
            Some(&(samples, sum)) => {
                let average_unit_cost = sum / samples as f64;
                confidences.push(EstimateConfidence::from_sample_count(samples));
                materials.push(MaterialLine {
                    material_description: m.material_description.trim().to_string(),
                    quantity: m.quantity,
                    average_unit_cost: round2(average_unit_cost),
                    samples,
                    cost: m.quantity * average_unit_cost,
                });
            }
            None => unmatched_materials.push(m.material_description.trim().to_string()),
        }
    }

    let mut labor = Vec::new();
    let mut unmatched_tasks = Vec::new();
    for l in &request.labor {
        match durations.get(&match_key(&l.task_name)) {
            Some(&(samples, average_hours)) => {
                confidences.push(EstimateConfidence::from_sample_count(samples));
                labor.push(LaborLine {
                    task_name: l.task_name.trim().to_string(),
                    hourly_rate: l.hourly_rate,
                    average_hours: round2(average_hours),
                    samples,
                    cost: average_hours * l.hourly_rate,
                });
            }
            None => unmatched_tasks.push(l.task_name.trim().to_string()),
        }
    }

    let delivery_cost = if purchases.is_empty() {
        0.0
    } else {
        purchases.iter().map(|p| p.delivery_cost).sum::<f64>() / purchases.len() as f64
    };
    if !request.materials.is_empty() {
        confidences.push(EstimateConfidence::from_sample_count(purchases.len() as i64));
    }

    let material_cost: f64 = materials.iter().map(|l| l.cost).sum();
    let labor_cost: f64 = labor.iter().map(|l| l.cost).sum();

    for line in &mut materials {
        line.cost = round2(line.cost);
    }
    for line in &mut labor {
        line.cost = round2(line.cost);
    }

    Estimate {
        material_cost: round2(material_cost),
        labor_cost: round2(labor_cost),
        delivery_cost: round2(delivery_cost),
        total_cost: round2(material_cost + labor_cost + delivery_cost),
        materials,
        labor,
        unmatched_materials,
        unmatched_tasks,
        confidence: confidences
            .into_iter()
            .min()
            .unwrap_or(EstimateConfidence::None),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
