//! Metric extraction over a menu snapshot.

use std::collections::HashMap;

use crate::domain::{CategoryUsage, MenuMetrics};
use crate::source::MenuSnapshot;

/// Tally view events by item id.
pub fn view_counts(view_item_ids: &[String]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item_id in view_item_ids {
        *counts.entry(item_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// View counts ranked by count descending, ties broken by item id.
pub fn ranked_views(view_item_ids: &[String]) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = view_counts(view_item_ids).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Extract descriptive metrics from a snapshot.
///
/// No visibility filter is applied to the completeness counts; hidden
/// items still need photos and translations. The category roster keeps
/// category-fetch order and retains zero-item categories. Items with no
/// category are excluded from roster totals.
pub fn extract_metrics(snapshot: &MenuSnapshot) -> MenuMetrics {
    let items = &snapshot.items;
    let total_items = items.len();

    let items_with_images = items
        .iter()
        .filter(|item| item.image_url.as_deref().is_some_and(|url| !url.is_empty()))
        .count();
    let items_with_descriptions = items
        .iter()
        .filter(|item| has_text(item.description_en.as_deref()))
        .count();
    let items_with_translations = items
        .iter()
        .filter(|item| {
            has_text(item.name_ar.as_deref()) && has_text(item.description_ar.as_deref())
        })
        .count();
    let items_with_tags = items.iter().filter(|item| item.has_any_tag()).count();

    let categories: Vec<CategoryUsage> = snapshot
        .categories
        .iter()
        .map(|category| CategoryUsage {
            id: category.id.clone(),
            name: category.name_en.clone().unwrap_or_default(),
            item_count: items
                .iter()
                .filter(|item| item.category_id.as_deref() == Some(category.id.as_str()))
                .count(),
        })
        .collect();

    let views = view_counts(&snapshot.view_item_ids);
    let visible_items = items.iter().filter(|item| item.visible()).count();
    let zero_view_visible_items = items
        .iter()
        .filter(|item| item.visible() && views.get(&item.id).copied().unwrap_or(0) == 0)
        .count();

    MenuMetrics {
        total_items,
        items_with_images,
        items_with_descriptions,
        items_with_translations,
        items_with_tags,
        items_without_tags: total_items - items_with_tags,
        visible_items,
        zero_view_visible_items,
        categories,
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{extract_metrics, ranked_views, view_counts};
    use crate::domain::fixtures::{bare_item, category, complete_item};
    use crate::source::MenuSnapshot;

    fn snapshot_of(
        items: Vec<crate::domain::ItemRecord>,
        categories: Vec<crate::domain::CategoryRecord>,
        view_item_ids: Vec<&str>,
    ) -> MenuSnapshot {
        MenuSnapshot {
            items,
            categories,
            view_item_ids: view_item_ids.into_iter().map(String::from).collect(),
            dropped_events: 0,
            analytics_degraded: false,
        }
    }

    #[test]
    fn tag_counts_are_complementary() {
        let mut tagged = bare_item("a");
        tagged.is_spicy = true;
        let snapshot = snapshot_of(vec![tagged, bare_item("b"), bare_item("c")], vec![], vec![]);
        let metrics = extract_metrics(&snapshot);
        assert_eq!(metrics.items_with_tags, 1);
        assert_eq!(metrics.items_without_tags, 2);
        assert_eq!(
            metrics.items_with_tags + metrics.items_without_tags,
            metrics.total_items
        );
    }

    #[test]
    fn whitespace_descriptions_do_not_count() {
        let mut item = bare_item("a");
        item.description_en = Some("   ".to_string());
        item.name_ar = Some("طبق".to_string());
        item.description_ar = Some("\t".to_string());
        let snapshot = snapshot_of(vec![item], vec![], vec![]);
        let metrics = extract_metrics(&snapshot);
        assert_eq!(metrics.items_with_descriptions, 0);
        assert_eq!(metrics.items_with_translations, 0);
    }

    #[test]
    fn translation_requires_both_arabic_fields() {
        let mut name_only = bare_item("a");
        name_only.name_ar = Some("طبق".to_string());
        let mut description_only = bare_item("b");
        description_only.description_ar = Some("وصف".to_string());
        let snapshot = snapshot_of(
            vec![name_only, description_only, complete_item("c", "cat")],
            vec![],
            vec![],
        );
        let metrics = extract_metrics(&snapshot);
        assert_eq!(metrics.items_with_translations, 1);
    }

    #[test]
    fn roster_keeps_fetch_order_and_zero_item_categories() {
        let mut filed = bare_item("a");
        filed.category_id = Some("mains".to_string());
        let unfiled = bare_item("b");
        let snapshot = snapshot_of(
            vec![filed, unfiled],
            vec![
                category("desserts", "Desserts", 5),
                category("mains", "Mains", 1),
            ],
            vec![],
        );
        let metrics = extract_metrics(&snapshot);
        let roster: Vec<(&str, usize)> = metrics
            .categories
            .iter()
            .map(|usage| (usage.name.as_str(), usage.item_count))
            .collect();
        assert_eq!(roster, vec![("Desserts", 0), ("Mains", 1)]);
        let filed_total: usize = metrics.categories.iter().map(|usage| usage.item_count).sum();
        assert_eq!(filed_total, 1);
    }

    #[test]
    fn zero_view_count_ignores_hidden_items() {
        let mut hidden = bare_item("hidden");
        hidden.is_visible = Some(false);
        let viewed = bare_item("viewed");
        let unseen = bare_item("unseen");
        let snapshot = snapshot_of(vec![hidden, viewed, unseen], vec![], vec!["viewed"]);
        let metrics = extract_metrics(&snapshot);
        assert_eq!(metrics.visible_items, 2);
        assert_eq!(metrics.zero_view_visible_items, 1);
    }

    #[test]
    fn view_tally_keeps_events_for_unknown_items() {
        let counts = view_counts(&[
            "a".to_string(),
            "deleted".to_string(),
            "a".to_string(),
        ]);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("deleted"), Some(&1));
    }

    #[test]
    fn ranked_views_sort_by_count_then_id() {
        let ranked = ranked_views(&[
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(
            ranked,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 1),
                ("c".to_string(), 1),
            ]
        );
    }
}
