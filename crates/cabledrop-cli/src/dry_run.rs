use crate::output::OutputWriter;
use serde::Serialize;

/// Represents a planned action in dry-run mode
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAction {
    pub action_type: ActionType,
    pub description: String,
    pub details: Vec<String>,
}

/// Types of actions that can be planned
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    ReadFile,
    GenerateDrops,
    WriteFile,
}

impl ActionType {
    fn label(&self) -> &'static str {
        match self {
            ActionType::ReadFile => "Read",
            ActionType::GenerateDrops => "Generate",
            ActionType::WriteFile => "Write",
        }
    }
}

impl PlannedAction {
    /// Create a new planned action
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        Self { action_type, description: description.into(), details: Vec::new() }
    }

    /// Add a detail to the planned action
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// Display planned actions in dry-run mode
pub fn display_planned_actions(output: &OutputWriter, actions: &[PlannedAction]) {
    if output.is_json() {
        let _ = output.result(serde_json::json!({
            "dry_run": true,
            "planned_actions": actions,
        }));
    } else {
        output.section("Planned Actions (Dry Run)");
        for (i, action) in actions.iter().enumerate() {
            let label = action.action_type.label();
            output.info(format!("{}. [{}] {}", i + 1, label, action.description));
            for detail in &action.details {
                output.kv(format!("     {}", detail_key(detail)), detail_value(detail));
            }
        }
        output.info("No files were written. Run without --dry-run to write the output.");
    }
}

fn detail_key(detail: &str) -> &str {
    detail.split_once(": ").map_or(detail, |(key, _)| key)
}

fn detail_value(detail: &str) -> &str {
    detail.split_once(": ").map_or("", |(_, value)| value)
}
