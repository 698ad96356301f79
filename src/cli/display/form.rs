//! Form view rendered as a comfy-table.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use serde::Serialize;

use crate::cli::output::CommandOutput;
use crate::domain::models::{FormView, SlotView};

/// One row of the rendered form.
#[derive(Debug, Clone, Serialize)]
pub struct FormRow {
    /// Address the REPL accepts for this slot, e.g. `sub 1 2`.
    pub address: String,
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Serializable snapshot of a render pass.
#[derive(Debug, Clone, Serialize)]
pub struct FormOutput {
    pub phase: String,
    pub revision: u64,
    pub rows: Vec<FormRow>,
}

impl FormOutput {
    pub fn from_view(view: &FormView) -> Self {
        let mut rows = vec![row("goal".to_string(), &view.goal)];
        for (i, criterion) in view.criteria.iter().enumerate() {
            rows.push(row(format!("criterion {}", i + 1), &criterion.slot));
            for (j, sub) in criterion.sub_items.iter().enumerate() {
                rows.push(row(format!("sub {} {}", i + 1, j + 1), sub));
            }
        }

        Self {
            phase: view.phase.as_str().to_string(),
            revision: view.revision,
            rows,
        }
    }
}

fn row(address: String, slot: &SlotView) -> FormRow {
    FormRow {
        address,
        key: slot.key.to_string(),
        label: slot.label.clone(),
        value: slot.value.clone(),
    }
}

impl CommandOutput for FormOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                ["SLOT", "LABEL", "VALUE"]
                    .into_iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left)),
            );

        for row in &self.rows {
            let value = if row.value.is_empty() {
                style("(empty)").dim().to_string()
            } else {
                row.value.clone()
            };
            table.add_row(vec![
                Cell::new(&row.address),
                Cell::new(&row.label),
                Cell::new(value),
            ]);
        }

        let hint = match self.phase.as_str() {
            "collecting_goal" => "Enter a goal to start: `goal`",
            "collecting_criteria" => "Enter criteria first: `criterion <n>`, `add-criterion`",
            _ => "Fill sub-items with `sub <n> <m>`, grow with `add-sub <n>`, then `run`",
        };

        format!("{table}\n{}", style(hint).dim())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{render, FieldRegistry, SlotKey, SlotValues};

    #[test]
    fn test_rows_follow_render_order() {
        let mut registry = FieldRegistry::new();
        let mut values = SlotValues::new();
        values.set(SlotKey::Goal, "X");
        values.set(SlotKey::Criterion(0), "Cost");
        registry.grow_criterion_slots();

        let output = FormOutput::from_view(&render(&mut registry, &values));
        let addresses: Vec<&str> = output.rows.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(
            addresses,
            vec!["goal", "criterion 1", "sub 1 1", "criterion 2"]
        );
        assert_eq!(output.phase, "collecting_sub_items");
    }

    #[test]
    fn test_empty_goal_renders_goal_only() {
        let mut registry = FieldRegistry::new();
        let output = FormOutput::from_view(&render(&mut registry, &SlotValues::new()));
        assert_eq!(output.rows.len(), 1);
        assert!(output.to_human().contains("goal"));
    }
}
