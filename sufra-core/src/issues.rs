//! Issue derivation rules for the menu health report.

use crate::domain::{MenuHealthIssue, MenuMetrics, Severity};
use crate::health::overloaded_categories;

/// Derive the ordered issue list from extracted metrics.
///
/// Rules fire independently and are emitted in evaluation order; the
/// list is never re-sorted by severity and never suppressed based on
/// the composite score.
pub fn derive_issues(metrics: &MenuMetrics) -> Vec<MenuHealthIssue> {
    let mut issues = Vec::new();

    let missing_images = metrics.total_items - metrics.items_with_images;
    if missing_images > 0 {
        issues.push(MenuHealthIssue {
            id: "missing_images".to_string(),
            severity: Severity::High,
            title: "Items without photos".to_string(),
            description: format!(
                "{missing_images} of {} items have no photo.",
                metrics.total_items
            ),
            affected_count: Some(missing_images),
            hint: Some(
                "Guests order items with photos far more often. Add a photo for every item."
                    .to_string(),
            ),
        });
    }

    let missing_descriptions = metrics.total_items - metrics.items_with_descriptions;
    if missing_descriptions > 0 {
        issues.push(MenuHealthIssue {
            id: "missing_descriptions".to_string(),
            severity: Severity::Medium,
            title: "Items without descriptions".to_string(),
            description: format!(
                "{missing_descriptions} of {} items have no English description.",
                metrics.total_items
            ),
            affected_count: Some(missing_descriptions),
            hint: Some(
                "A short line about ingredients or preparation helps guests decide.".to_string(),
            ),
        });
    }

    let missing_translations = metrics.total_items - metrics.items_with_translations;
    if missing_translations > 0 {
        issues.push(MenuHealthIssue {
            id: "missing_translations".to_string(),
            severity: Severity::Medium,
            title: "Incomplete Arabic translations".to_string(),
            description: format!(
                "{missing_translations} of {} items are missing an Arabic name or description.",
                metrics.total_items
            ),
            affected_count: Some(missing_translations),
            hint: Some(
                "Arabic-speaking guests see the English fallback until both fields are filled in."
                    .to_string(),
            ),
        });
    }

    if metrics.items_without_tags > 0 {
        issues.push(MenuHealthIssue {
            id: "missing_tags".to_string(),
            severity: Severity::Low,
            title: "Untagged items".to_string(),
            description: format!(
                "{} items carry no dietary or promotional tag.",
                metrics.items_without_tags
            ),
            affected_count: Some(metrics.items_without_tags),
            hint: Some(
                "Tags like vegetarian or spicy let guests filter the menu.".to_string(),
            ),
        });
    }

    let overloaded = overloaded_categories(metrics);
    if !overloaded.is_empty() || metrics.categories.len() <= 1 {
        let (severity, description, affected_count) = if overloaded.is_empty() {
            (
                Severity::Medium,
                "The whole menu sits in a single category. Splitting it into sections makes \
                 browsing easier."
                    .to_string(),
                None,
            )
        } else {
            let names: Vec<&str> = overloaded.iter().map(|usage| usage.name.as_str()).collect();
            (
                if overloaded.len() > 1 {
                    Severity::High
                } else {
                    Severity::Medium
                },
                format!(
                    "These categories hold too many items: {}. Consider splitting them up.",
                    names.join(", ")
                ),
                Some(overloaded.len()),
            )
        };
        issues.push(MenuHealthIssue {
            id: "overloaded_categories".to_string(),
            severity,
            title: "Unbalanced menu structure".to_string(),
            description,
            affected_count,
            hint: Some(
                "Aim for a handful of sections with up to 20 items each.".to_string(),
            ),
        });
    }

    if metrics.zero_view_visible_items > 0 {
        issues.push(MenuHealthIssue {
            id: "low_engagement_items".to_string(),
            severity: Severity::Low,
            title: "Items nobody is viewing".to_string(),
            description: format!(
                "{} visible items were not viewed in the last month.",
                metrics.zero_view_visible_items
            ),
            affected_count: Some(metrics.zero_view_visible_items),
            hint: Some(
                "Move them higher on the menu or mark them as popular to draw attention."
                    .to_string(),
            ),
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::derive_issues;
    use crate::domain::{CategoryUsage, MenuMetrics, Severity};

    fn metrics_with(categories: Vec<CategoryUsage>) -> MenuMetrics {
        MenuMetrics {
            total_items: 0,
            items_with_images: 0,
            items_with_descriptions: 0,
            items_with_translations: 0,
            items_with_tags: 0,
            items_without_tags: 0,
            visible_items: 0,
            zero_view_visible_items: 0,
            categories,
        }
    }

    fn usage(name: &str, item_count: usize) -> CategoryUsage {
        CategoryUsage {
            id: name.to_lowercase(),
            name: name.to_string(),
            item_count,
        }
    }

    #[test]
    fn complete_menu_with_sections_yields_no_issues() {
        let mut metrics = metrics_with(vec![usage("Mains", 5), usage("Drinks", 3)]);
        metrics.total_items = 8;
        metrics.items_with_images = 8;
        metrics.items_with_descriptions = 8;
        metrics.items_with_translations = 8;
        metrics.items_with_tags = 8;
        assert!(derive_issues(&metrics).is_empty());
    }

    #[test]
    fn missing_content_rules_report_item_counts() {
        let mut metrics = metrics_with(vec![usage("Mains", 4), usage("Drinks", 0)]);
        metrics.total_items = 4;
        metrics.items_with_images = 1;
        metrics.items_with_descriptions = 2;
        metrics.items_with_translations = 0;
        metrics.items_with_tags = 4;
        let issues = derive_issues(&metrics);
        let ids: Vec<&str> = issues.iter().map(|issue| issue.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["missing_images", "missing_descriptions", "missing_translations"]
        );
        assert_eq!(issues[0].affected_count, Some(3));
        assert_eq!(issues[0].severity, Severity::High);
        assert!(issues[0].description.contains("3 of 4"));
        assert_eq!(issues[2].affected_count, Some(4));
    }

    #[test]
    fn single_category_branch_uses_the_split_message() {
        let metrics = metrics_with(vec![usage("Everything", 5)]);
        let issues = derive_issues(&metrics);
        let structure = issues
            .iter()
            .find(|issue| issue.id == "overloaded_categories")
            .expect("structure issue");
        assert_eq!(structure.severity, Severity::Medium);
        assert_eq!(structure.affected_count, None);
        assert!(structure.description.contains("single category"));
    }

    #[test]
    fn overloaded_branch_names_categories_in_roster_order() {
        let metrics = metrics_with(vec![
            usage("Mains", 25),
            usage("Drinks", 3),
            usage("Desserts", 30),
        ]);
        let issues = derive_issues(&metrics);
        let structure = issues
            .iter()
            .find(|issue| issue.id == "overloaded_categories")
            .expect("structure issue");
        assert_eq!(structure.severity, Severity::High);
        assert_eq!(structure.affected_count, Some(2));
        assert!(structure.description.contains("Mains, Desserts"));
    }

    #[test]
    fn one_overloaded_category_is_medium_severity() {
        let metrics = metrics_with(vec![usage("Mains", 25), usage("Drinks", 3)]);
        let issues = derive_issues(&metrics);
        let structure = issues
            .iter()
            .find(|issue| issue.id == "overloaded_categories")
            .expect("structure issue");
        assert_eq!(structure.severity, Severity::Medium);
    }

    #[test]
    fn zero_view_items_fire_the_engagement_rule() {
        let mut metrics = metrics_with(vec![usage("Mains", 2), usage("Drinks", 1)]);
        metrics.total_items = 3;
        metrics.items_with_images = 3;
        metrics.items_with_descriptions = 3;
        metrics.items_with_translations = 3;
        metrics.items_with_tags = 3;
        metrics.visible_items = 3;
        metrics.zero_view_visible_items = 2;
        let issues = derive_issues(&metrics);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "low_engagement_items");
        assert_eq!(issues[0].severity, Severity::Low);
        assert_eq!(issues[0].affected_count, Some(2));
    }
}
