//! Diagnosis report: a summary line plus one card per criterion.

use console::style;
use serde::Serialize;

use crate::cli::display::colors::{colorize_tier, section_header};
use crate::cli::output::CommandOutput;
use crate::domain::models::DiagnosisReport;

/// Human and JSON rendering of a [`DiagnosisReport`].
#[derive(Debug, Serialize)]
pub struct ReportOutput<'a> {
    #[serde(flatten)]
    pub report: &'a DiagnosisReport,
}

impl<'a> ReportOutput<'a> {
    pub const fn new(report: &'a DiagnosisReport) -> Self {
        Self { report }
    }
}

/// `"{n} criteria / {m} sub-items total"`.
pub fn summary_line(report: &DiagnosisReport) -> String {
    format!(
        "{} criteria / {} sub-items total",
        report.criterion_count, report.sub_item_total
    )
}

impl CommandOutput for ReportOutput<'_> {
    fn to_human(&self) -> String {
        let report = self.report;
        let mut lines = vec![
            section_header("Diagnosis report"),
            format!("{} {}", style("Goal:").bold(), report.goal),
            format!("{} {}", style("Overall structure:").bold(), summary_line(report)),
        ];

        for diagnosis in &report.diagnoses {
            let tier = diagnosis.result.tier;
            lines.push(String::new());
            lines.push(format!(
                "{} {} {}",
                tier.icon(),
                style(&diagnosis.criterion).bold(),
                colorize_tier(tier)
            ));
            if !diagnosis.sub_items.is_empty() {
                lines.push(format!(
                    "   {}",
                    style(format!("[{}]", diagnosis.sub_items.join(", "))).dim()
                ));
            }
            for line in diagnosis.result.raw_text.lines() {
                lines.push(format!("   {line}"));
            }
        }

        let (good, caution, danger) = report.tier_counts();
        lines.push(String::new());
        lines.push(format!(
            "{} good, {} caution, {} danger",
            style(good).green(),
            style(caution).yellow(),
            style(danger).red()
        ));

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.report).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AttemptKind, CriterionDiagnosis, DiagnosisResult, Tier};
    use chrono::Utc;

    fn sample_report() -> DiagnosisReport {
        DiagnosisReport {
            goal: "X".into(),
            criterion_count: 2,
            sub_item_total: 2,
            diagnoses: vec![
                CriterionDiagnosis {
                    criterion: "Cost".into(),
                    sub_items: vec!["Price".into(), "Fees".into()],
                    kind: AttemptKind::Reply,
                    result: DiagnosisResult {
                        tier: Tier::Danger,
                        raw_text: "등급: 위험\n핵심진단: 중복".into(),
                    },
                },
                CriterionDiagnosis {
                    criterion: "Risk".into(),
                    sub_items: vec![],
                    kind: AttemptKind::Missing,
                    result: DiagnosisResult {
                        tier: Tier::Good,
                        raw_text: "No sub-items were entered.".into(),
                    },
                },
            ],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&sample_report()),
            "2 criteria / 2 sub-items total"
        );
    }

    #[test]
    fn test_human_output_has_cards() {
        console::set_colors_enabled(false);
        let report = sample_report();
        let human = ReportOutput::new(&report).to_human();

        assert!(human.contains("🚨 Cost DANGER"));
        assert!(human.contains("   [Price, Fees]"));
        assert!(human.contains("   핵심진단: 중복"));
        assert!(human.contains("✅ Risk GOOD"));
        assert!(human.contains("1 good, 0 caution, 1 danger"));
    }

    #[test]
    fn test_json_output() {
        let report = sample_report();
        let json = ReportOutput::new(&report).to_json();

        assert_eq!(json["criterion_count"], 2);
        assert_eq!(json["diagnoses"][0]["result"]["tier"], "danger");
        assert_eq!(json["diagnoses"][1]["kind"], "missing");
    }
}
