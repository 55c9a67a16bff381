//! Report formatting utilities for Sufra outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::{MenuHealthReport, Severity};

/// Render a menu health report as Markdown.
pub fn render_health_markdown(report: &MenuHealthReport, restaurant_label: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Menu Health: {restaurant_label}\n");
    let _ = writeln!(output, "Overall score: **{}/100**\n", report.score);

    let _ = writeln!(output, "## Breakdown");
    let breakdown = &report.breakdown;
    for (label, value) in [
        ("Photos", breakdown.photos),
        ("Descriptions", breakdown.descriptions),
        ("Translations", breakdown.translations),
        ("Tags", breakdown.tags),
        ("Structure", breakdown.structure),
        ("Performance", breakdown.performance),
    ] {
        let _ = writeln!(output, "- {label}: {value}/100");
    }
    let _ = writeln!(output);

    let metrics = &report.metrics;
    let _ = writeln!(output, "## Menu");
    let _ = writeln!(output, "- Items: {}", metrics.total_items);
    let _ = writeln!(output, "- Visible items: {}", metrics.visible_items);
    if metrics.categories.is_empty() {
        let _ = writeln!(output, "- Categories: none");
    } else {
        let _ = writeln!(output, "- Categories:");
        for usage in &metrics.categories {
            let name = if usage.name.is_empty() {
                "(unnamed)"
            } else {
                usage.name.as_str()
            };
            let _ = writeln!(output, "  - {name}: {} items", usage.item_count);
        }
    }
    let _ = writeln!(output);

    append_issues(&mut output, report);
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Short display label for a severity.
pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
    }
}

fn append_issues(output: &mut String, report: &MenuHealthReport) {
    if report.issues.is_empty() {
        let _ = writeln!(output, "## Issues\nNo issues found.");
        return;
    }
    let _ = writeln!(output, "## Issues");
    for issue in &report.issues {
        let _ = writeln!(
            output,
            "- [{}] **{}**: {}",
            severity_label(issue.severity),
            issue.title,
            issue.description
        );
        if let Some(hint) = &issue.hint {
            let _ = writeln!(output, "  - Hint: {hint}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{render_health_markdown, render_json};
    use crate::domain::{
        CategoryUsage, HealthBreakdown, MenuHealthIssue, MenuHealthReport, MenuMetrics, Severity,
    };

    fn sample_report() -> MenuHealthReport {
        MenuHealthReport {
            score: 72,
            breakdown: HealthBreakdown {
                photos: 50,
                descriptions: 100,
                translations: 80,
                tags: 60,
                structure: 100,
                performance: 40,
            },
            metrics: MenuMetrics {
                total_items: 10,
                items_with_images: 5,
                items_with_descriptions: 10,
                items_with_translations: 8,
                items_with_tags: 6,
                items_without_tags: 4,
                visible_items: 9,
                zero_view_visible_items: 5,
                categories: vec![CategoryUsage {
                    id: "mains".to_string(),
                    name: "Mains".to_string(),
                    item_count: 10,
                }],
            },
            issues: vec![MenuHealthIssue {
                id: "missing_images".to_string(),
                severity: Severity::High,
                title: "Items without photos".to_string(),
                description: "5 of 10 items have no photo.".to_string(),
                affected_count: Some(5),
                hint: Some("Add photos.".to_string()),
            }],
        }
    }

    #[test]
    fn renders_health_markdown() {
        let output = render_health_markdown(&sample_report(), "Beit Zaytoun");
        assert!(output.contains("# Menu Health: Beit Zaytoun"));
        assert!(output.contains("Overall score: **72/100**"));
        assert!(output.contains("- Photos: 50/100"));
        assert!(output.contains("- Mains: 10 items"));
        assert!(output.contains("[high] **Items without photos**"));
        assert!(output.contains("Hint: Add photos."));
    }

    #[test]
    fn clean_report_says_no_issues() {
        let mut report = sample_report();
        report.issues.clear();
        let output = render_health_markdown(&report, "Beit Zaytoun");
        assert!(output.contains("No issues found."));
    }

    #[test]
    fn renders_json_payload() {
        let json = render_json(&sample_report()).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["score"], 72);
        assert_eq!(parsed["breakdown"]["photos"], 50);
        assert_eq!(parsed["metrics"]["categories"][0]["itemCount"], 10);
        assert_eq!(parsed["issues"][0]["severity"], "high");
    }
}
