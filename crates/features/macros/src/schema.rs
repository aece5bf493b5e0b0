use crate::ops;
use revive_kernel::bridge::{Call, PushStep, Value, json};
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::records::{MacroRow, MacrosConfig};
use revive_kernel::sync::sanitize::{hotbar_key, non_negative};
use revive_kernel::sync::{Cadence, FeatureSchema};

/// A local edit to the macros panel.
#[derive(Debug, Clone, PartialEq)]
pub enum MacrosPatch {
    Enabled(bool),
    RunAlways(bool),
    Delay(f64),
    Duration(f64),
    Rows(Vec<MacroRow>),
    Row { index: usize, row: MacroRow },
    AddRow,
    RemoveRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MacrosGroup {
    Enabled,
    RunAlways,
    Delay,
    Duration,
    Rows,
}

#[derive(Debug, Default)]
pub struct MacrosSchema;

impl FeatureSchema for MacrosSchema {
    type View = MacrosConfig;
    type Patch = MacrosPatch;
    type Group = MacrosGroup;

    const FEATURE: FeatureId = FeatureId::Macros;

    fn snapshot(&self) -> Option<revive_kernel::bridge::Operation> {
        Some(ops::GET)
    }

    fn decode(&self, payload: Value) -> Option<MacrosConfig> {
        // Older hosts store a bare key list; rows win whenever the payload carries any.
        let has_rows = payload.get("rows").and_then(Value::as_array).is_some_and(|rows| !rows.is_empty());
        let legacy = payload.get("sequence").and_then(Value::as_array).filter(|_| !has_rows).cloned();
        let mut config: MacrosConfig = serde_json::from_value(payload).ok()?;
        if let Some(keys) = legacy {
            config.rows = keys
                .iter()
                .filter_map(Value::as_str)
                .map(|key| MacroRow { key: key.to_owned(), ..MacroRow::default() })
                .collect();
        }
        Some(config)
    }

    fn settle(&self, view: &mut MacrosConfig) {
        view.delay_s = non_negative(view.delay_s);
        view.duration_s = non_negative(view.duration_s);
        view.rows = sanitize_rows(std::mem::take(&mut view.rows));
    }

    fn apply(&self, view: &mut MacrosConfig, patch: MacrosPatch) -> Result<MacrosGroup, String> {
        let group = match patch {
            MacrosPatch::Enabled(enabled) => {
                view.enabled = enabled;
                MacrosGroup::Enabled
            },
            MacrosPatch::RunAlways(run_always) => {
                view.run_always = run_always;
                MacrosGroup::RunAlways
            },
            MacrosPatch::Delay(seconds) => {
                view.delay_s = non_negative(seconds);
                MacrosGroup::Delay
            },
            MacrosPatch::Duration(seconds) => {
                view.duration_s = non_negative(seconds);
                MacrosGroup::Duration
            },
            MacrosPatch::Rows(rows) => {
                view.rows = sanitize_rows(rows);
                MacrosGroup::Rows
            },
            MacrosPatch::Row { index, row } => {
                let slot = view.rows.get_mut(index).ok_or_else(|| format!("No macro row {}", index + 1))?;
                *slot = sanitize_row(row);
                MacrosGroup::Rows
            },
            MacrosPatch::AddRow => {
                view.rows.push(MacroRow::default());
                MacrosGroup::Rows
            },
            MacrosPatch::RemoveRow => {
                if view.rows.len() <= 1 {
                    return Err("At least one macro row is required".to_owned());
                }
                view.rows.pop();
                MacrosGroup::Rows
            },
        };
        Ok(group)
    }

    fn cadence(&self, group: MacrosGroup) -> Cadence {
        match group {
            MacrosGroup::Enabled | MacrosGroup::RunAlways => Cadence::Immediate,
            MacrosGroup::Delay | MacrosGroup::Duration | MacrosGroup::Rows => Cadence::Debounced,
        }
    }

    fn push(&self, view: &MacrosConfig, group: MacrosGroup) -> Vec<PushStep> {
        let step = match group {
            MacrosGroup::Enabled => PushStep::call("macros.enabled", ops::SET_ENABLED, vec![json!(view.enabled)]),
            MacrosGroup::RunAlways => {
                PushStep::call("macros.run_always", ops::SET_RUN_ALWAYS, vec![json!(view.run_always)])
            },
            MacrosGroup::Delay => PushStep::call("macros.delay", ops::SET_DELAY, vec![json!(view.delay_s)]),
            MacrosGroup::Duration => {
                PushStep::call("macros.duration", ops::SET_DURATION, vec![json!(view.duration_s)])
            },
            MacrosGroup::Rows => PushStep::call("macros.rows", ops::SET_ROWS, vec![json!(view.rows)])
                .or(vec![Call::new(ops::SET_SEQUENCE, vec![json!(view.sequence())])]),
        };
        vec![step]
    }
}

fn sanitize_row(row: MacroRow) -> MacroRow {
    MacroRow {
        key: hotbar_key(&row.key).unwrap_or_else(|| MacroRow::default().key),
        cast_s: non_negative(row.cast_s),
        repeat_s: non_negative(row.repeat_s),
    }
}

/// Sanitized rows; never empty.
fn sanitize_rows(rows: Vec<MacroRow>) -> Vec<MacroRow> {
    let rows: Vec<MacroRow> = rows.into_iter().map(sanitize_row).collect();
    if rows.is_empty() { vec![MacroRow::default()] } else { rows }
}
