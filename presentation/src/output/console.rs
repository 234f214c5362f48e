//! Console output formatter for plans, results and discovery reports

use colored::Colorize;
use rollcall_application::DiscoveryReport;
use rollcall_domain::{ConfirmationLevel, InvocationPlan, InvocationResult, Roster};
use serde::Serialize;

/// Group label for planned agents that belong to no domain group.
const UNGROUPED: &str = "Other";

/// Formats rollcall output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete plan
    ///
    /// With `group_by_domain`, planned agents are listed under their
    /// title-cased domain groups; otherwise in plan order.
    pub fn format_plan(
        plan: &InvocationPlan,
        roster: &Roster,
        level: ConfirmationLevel,
        group_by_domain: bool,
    ) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Invocation Plan"));
        output.push('\n');
        output.push_str(&Self::plan_overview(plan, level));

        if plan.critical_agents_included {
            output.push_str(&format!("\n{}\n", "Critical agents included:".green().bold()));
            for id in plan.included_critical() {
                output.push_str(&format!("  * {}\n", roster.display_name(id)));
            }
        } else {
            output.push_str(&format!("\n{}\n", "MISSING CRITICAL AGENTS!".red().bold()));
            for id in &plan.missing_critical {
                output.push_str(&format!("  * {}\n", roster.display_name(id).red()));
            }
        }

        output.push_str(&Self::warnings(&plan.warnings));

        if group_by_domain {
            output.push_str(&Self::section_header("Agents by Domain"));
            for (group, members) in Self::grouped(plan, roster) {
                output.push_str(&format!("\n  {}\n", group.yellow().bold()));
                for id in members {
                    output.push_str(&format!("    * {}\n", roster.display_name(&id)));
                }
            }
        } else {
            output.push_str(&Self::section_header("Agents"));
            for id in &plan.agents_to_invoke {
                output.push_str(&format!("  * {}\n", roster.display_name(id)));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format counts, estimates and warnings only
    pub fn format_plan_summary(plan: &InvocationPlan, level: ConfirmationLevel) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n\n", "=== Invocation Plan ===".cyan().bold()));
        output.push_str(&Self::plan_overview(plan, level));
        output.push_str(&Self::warnings(&plan.warnings));
        output
    }

    /// Format a verification result
    pub fn format_result(result: &InvocationResult, roster: &Roster) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Invocation Result"));
        output.push('\n');

        if result.success {
            output.push_str(&format!("{}\n", "Invocation completed successfully".green().bold()));
        } else {
            output.push_str(&format!("{}\n", "Invocation completed with issues".red().bold()));
        }

        output.push_str(&format!("\n{}\n", "Statistics:".cyan().bold()));
        output.push_str(&format!("  * Planned: {} agents\n", result.planned_count()));
        output.push_str(&format!("  * Invoked: {} agents\n", result.agents_invoked.len()));
        output.push_str(&format!("  * Skipped: {} agents\n", result.agents_skipped.len()));
        output.push_str(&format!("  * Failed: {} agents\n", result.agents_failed.len()));
        output.push_str(&format!(
            "  * Completion: {:.1}%\n",
            result.completion_rate * 100.0
        ));

        output.push_str(&format!("\n{}\n", "Resources:".cyan().bold()));
        output.push_str(&format!(
            "  * Estimated time: {:.1} minutes\n",
            result.plan.estimated_time
        ));
        output.push_str(&format!("  * Actual time: {:.1} minutes\n", result.actual_time));
        output.push_str(&format!(
            "  * Estimated cost: ${:.2}\n",
            result.plan.estimated_cost
        ));
        output.push_str(&format!("  * Actual cost: ${:.2}\n", result.actual_cost));

        if !result.issues.is_empty() {
            output.push_str(&format!("\n{}\n", "Issues:".yellow().bold()));
            for issue in &result.issues {
                output.push_str(&format!("  * {}\n", issue));
            }
        }

        if !result.agents_skipped.is_empty() {
            output.push_str(&format!("\n{}\n", "Skipped Agents:".yellow().bold()));
            for id in &result.agents_skipped {
                output.push_str(&format!(
                    "  * {} (Priority: {})\n",
                    roster.display_name(id),
                    roster.priority_label(id)
                ));
            }
        }

        if !result.agents_failed.is_empty() {
            output.push_str(&format!("\n{}\n", "Failed Agents:".red().bold()));
            for id in &result.agents_failed {
                output.push_str(&format!("  * {}\n", roster.display_name(id)));
            }
        }

        if !result.agents_unplanned.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Not in plan:".dimmed(),
                result.agents_unplanned.join(", ")
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a discovery report
    pub fn format_discovery(report: &DiscoveryReport, base_path: &str) -> String {
        let roster = &report.roster;
        let mut output = String::new();

        output.push_str(&Self::header("Agent Discovery Report"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Base Path:".cyan().bold(), base_path));
        output.push_str(&format!(
            "{} {}\n",
            "Total Agents Found:".cyan().bold(),
            roster.len()
        ));
        output.push_str(&format!("Valid Agents: {}\n", roster.valid_count()));
        output.push_str(&format!(
            "Invalid Agents: {}\n",
            roster.len() - roster.valid_count()
        ));

        output.push_str(&Self::section_header("Discovered Agents"));
        for record in roster.records().filter(|r| r.valid) {
            output.push_str(&format!("  * {} ({})\n", record.display_name, record.id.dimmed()));
        }

        let invalid: Vec<_> = roster.records().filter(|r| !r.valid).collect();
        if !invalid.is_empty() {
            output.push_str(&format!("\n{}\n", "Invalid/Problem Agents:".yellow().bold()));
            for record in invalid {
                output.push_str(&format!(
                    "  * {}: {}\n",
                    record.id,
                    record.error.as_deref().unwrap_or("Unknown error")
                ));
            }
        }

        output.push_str(&Self::section_header("Validation Results"));
        if report.is_valid() {
            output.push_str(&format!("  {}\n", "All validation checks passed".green()));
        } else {
            for issue in &report.issues {
                let line = issue.to_string();
                if issue.is_critical() {
                    output.push_str(&format!("  * {}\n", line.red()));
                } else {
                    output.push_str(&format!("  * {}\n", line));
                }
            }
        }

        if report.has_critical_gaps() {
            output.push_str(&format!("\n{}\n", "CRITICAL AGENTS MISSING:".red().bold()));
            for id in &report.missing_critical {
                output.push_str(&format!("  * {}\n", id));
            }
            output.push_str("These agents are required for platform safety and compliance.\n");
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format any serializable value as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn plan_overview(plan: &InvocationPlan, level: ConfirmationLevel) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Request:".cyan().bold(), plan.request_text));
        output.push_str(&format!("{} {}\n", "Type:".cyan().bold(), plan.request_type));
        output.push_str(&format!(
            "{} {}\n",
            "Agents to invoke:".cyan().bold(),
            plan.agent_count()
        ));
        output.push_str(&format!(
            "{} {:.1} minutes\n",
            "Estimated time:".cyan().bold(),
            plan.estimated_time
        ));
        output.push_str(&format!(
            "{} ${:.2}\n",
            "Estimated cost:".cyan().bold(),
            plan.estimated_cost
        ));
        if level.is_required() {
            output.push_str(&format!(
                "{} {}\n",
                "Confirmation:".cyan().bold(),
                level.to_string().yellow()
            ));
        }
        output
    }

    fn warnings(warnings: &[String]) -> String {
        if warnings.is_empty() {
            return String::new();
        }
        let mut output = format!("\n{}\n", "Warnings:".yellow().bold());
        for warning in warnings {
            output.push_str(&format!("  {}\n", warning));
        }
        output
    }

    /// Planned agents by title-cased domain group, ungrouped agents last.
    fn grouped(plan: &InvocationPlan, roster: &Roster) -> Vec<(String, Vec<String>)> {
        let mut groups = roster.group_members(&plan.agents_to_invoke);
        let ungrouped: Vec<String> = plan
            .agents_to_invoke
            .iter()
            .filter(|id| !groups.iter().any(|(_, members)| members.contains(id)))
            .cloned()
            .collect();
        if !ungrouped.is_empty() {
            groups.push((UNGROUPED.to_string(), ungrouped));
        }
        groups
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_domain::{
        AgentRecord, AgentSelection, ExecutionReport, InvocationConfig, build_plan, verify,
    };

    fn roster() -> Roster {
        Roster::from_records([
            AgentRecord::new("ciso").with_priority("critical"),
            AgentRecord::new("privacy-engineer"),
            AgentRecord::new("devops"),
        ])
        .with_critical_agents(["ciso", "privacy-engineer"])
        .with_domain_group("security_team", ["ciso", "privacy-engineer"])
    }

    fn config() -> InvocationConfig {
        InvocationConfig::new().with_rule("custom", AgentSelection::agents(["ciso", "devops"]))
    }

    #[test]
    fn test_plan_lists_groups_and_missing_critical() {
        colored::control::set_override(false);
        let roster = roster();
        let plan = build_plan("something", &config(), &roster);
        let output =
            ConsoleFormatter::format_plan(&plan, &roster, ConfirmationLevel::None, true);

        assert!(output.contains("Agents to invoke: 2"));
        assert!(output.contains("MISSING CRITICAL AGENTS!"));
        assert!(output.contains("Privacy Engineer"));
        assert!(output.contains("CRITICAL agents missing: privacy-engineer"));
        assert!(output.contains("Security Team"));
        assert!(output.contains("Other"));
        assert!(!output.contains("Confirmation:"));
    }

    #[test]
    fn test_plan_without_grouping_lists_agents_in_plan_order() {
        colored::control::set_override(false);
        let roster = roster();
        let plan = build_plan("something", &config(), &roster);
        let output =
            ConsoleFormatter::format_plan(&plan, &roster, ConfirmationLevel::None, false);

        assert!(!output.contains("Agents by Domain"));
        assert!(!output.contains("Security Team"));
        let ciso = output.find("  * Ciso").unwrap();
        let devops = output.rfind("  * Devops").unwrap();
        assert!(ciso < devops);
    }

    #[test]
    fn test_result_lists_skipped_with_priority() {
        colored::control::set_override(false);
        let roster = roster();
        let config = config();
        let plan = build_plan("something", &config, &roster);
        let result = verify(&plan, &ExecutionReport::new(["devops"]), &config);
        let output = ConsoleFormatter::format_result(&result, &roster);

        assert!(output.contains("Invocation completed with issues"));
        assert!(output.contains("Completion: 50.0%"));
        assert!(output.contains("Ciso (Priority: critical)"));
        assert!(output.contains("Critical agents were skipped: ciso"));
    }

    #[test]
    fn test_summary_shows_confirmation_level() {
        colored::control::set_override(false);
        let roster = roster();
        let plan = build_plan("something", &config(), &roster);
        let output = ConsoleFormatter::format_plan_summary(&plan, ConfirmationLevel::Double);
        assert!(output.contains("Confirmation: double"));
        assert!(!output.contains("Agents by Domain"));
    }

    #[test]
    fn test_format_json_plan() {
        let roster = roster();
        let plan = build_plan("something", &config(), &roster);
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&plan)).unwrap();
        assert_eq!(value["request_type"], "custom");
        assert_eq!(value["agents_to_invoke"][1], "devops");
    }
}
