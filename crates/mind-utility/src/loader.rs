//! CSV action loader.
//!
//! # CSV format
//!
//! One row per consideration.  Rows with the same `action` are grouped into
//! one [`UtilityAction`]; actions keep the order in which their first row
//! appears.  The action-level columns (`kind` through `time_cost`) are read
//! from that first row.
//!
//! ```csv
//! action,kind,base_priority,energy_cost,time_cost,input,weight,min,max,curve,curve_a,curve_b
//! eat,survival,1.0,0.05,3,hunger,2.0,,,,,
//! sleep,rest,0.9,0,8,fatigue,2.0,0.3,1.0,quadratic,,
//! wander,exploration,0.3,0.02,1,,,,,,,
//! ```
//!
//! An empty `input` adds no consideration (an action that scores on base
//! priority alone).  Empty `weight`, `min` and `max` default to 1, 0 and 1.
//! `curve` is one of the names accepted by [`ResponseCurve::from_parts`].

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use mind_context::InputKind;

use crate::{ActionKind, Consideration, ResponseCurve, UtilityAction, UtilityError, UtilityResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ActionRecord {
    action:        String,
    kind:          String,
    base_priority: f32,
    energy_cost:   Option<f32>,
    time_cost:     Option<u64>,
    input:         Option<String>,
    weight:        Option<f32>,
    min:           Option<f32>,
    max:           Option<f32>,
    curve:         Option<String>,
    curve_a:       Option<f32>,
    curve_b:       Option<f32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load action templates from a CSV file.
pub fn load_actions_csv(path: impl AsRef<Path>) -> UtilityResult<Vec<UtilityAction>> {
    let file = std::fs::File::open(path)?;
    load_actions_reader(file)
}

/// Like [`load_actions_csv`] but accepts any `Read` source.
pub fn load_actions_reader<R: Read>(reader: R) -> UtilityResult<Vec<UtilityAction>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut actions: Vec<UtilityAction> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for (line, result) in csv_reader.deserialize::<ActionRecord>().enumerate() {
        let row = result.map_err(|e| UtilityError::Parse(e.to_string()))?;
        let slot = match index.get(&row.action) {
            Some(&i) => i,
            None => {
                let kind: ActionKind = row
                    .kind
                    .parse()
                    .map_err(|e| UtilityError::Parse(format!("row {}: {e}", line + 1)))?;
                let action = UtilityAction::new(row.action.clone(), kind, row.base_priority)
                    .with_costs(row.energy_cost.unwrap_or(0.0), row.time_cost.unwrap_or(0));
                index.insert(row.action.clone(), actions.len());
                actions.push(action);
                actions.len() - 1
            }
        };
        if let Some(c) = consideration(&row).map_err(|e| UtilityError::Parse(format!("row {}: {e}", line + 1)))? {
            actions[slot].considerations.push(c);
        }
    }

    Ok(actions)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn consideration(row: &ActionRecord) -> Result<Option<Consideration>, String> {
    let Some(input) = row.input.as_deref().filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let input: InputKind = input.parse()?;
    let curve = ResponseCurve::from_parts(row.curve.as_deref().unwrap_or(""), row.curve_a, row.curve_b)?;
    let weight = row.weight.unwrap_or(1.0);
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("weight {weight} is not a non-negative number"));
    }
    Ok(Some(Consideration {
        input,
        weight,
        min:    row.min.unwrap_or(0.0),
        max:    row.max.unwrap_or(1.0),
        curve,
    }))
}
