//! Cron trigger materialization
//!
//! Turns a cron job's stored task template into a live task appended to the
//! job's target column. The external scheduler decides *when* to fire; this
//! module only executes a single trigger.

use chrono::{DateTime, Utc};

use crate::model::Task;

/// Literal token replaced with the trigger date in titles and descriptions
pub const DATE_TOKEN: &str = "{{date}}";

/// Summary of a materialized task, with resolved ownership names
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSummary {
    pub task: Task,
    pub column_name: String,
    pub board_name: String,
    pub project_name: String,
}

/// Result of one trigger execution
///
/// `task_created` is false for a heartbeat-only run: a job without a target
/// column or template still records `last_run_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerOutcome {
    pub task_created: bool,
    pub task: Option<TriggerSummary>,
}

impl TriggerOutcome {
    pub fn heartbeat() -> Self {
        Self {
            task_created: false,
            task: None,
        }
    }

    pub fn created(summary: TriggerSummary) -> Self {
        Self {
            task_created: true,
            task: Some(summary),
        }
    }
}

/// Format a trigger timestamp as `"Mon D, YYYY"`, e.g. "Jan 5, 2025"
pub fn format_trigger_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Substitute the literal `{{date}}` token in a template field
pub fn render_template_field(field: &str, date: &str) -> String {
    field.replace(DATE_TOKEN, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_trigger_date_single_digit_day() {
        let at = Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(format_trigger_date(at), "Jan 5, 2025");
    }

    #[test]
    fn test_format_trigger_date_double_digit_day() {
        let at = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(format_trigger_date(at), "Dec 25, 2024");
    }

    #[test]
    fn test_render_replaces_every_token() {
        let rendered = render_template_field("Standup {{date}} ({{date}})", "Jan 5, 2025");
        assert_eq!(rendered, "Standup Jan 5, 2025 (Jan 5, 2025)");
    }

    #[test]
    fn test_render_without_token_is_unchanged() {
        assert_eq!(render_template_field("Weekly review", "Jan 5, 2025"), "Weekly review");
    }
}
