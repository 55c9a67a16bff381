//! Menu health scoring.

use crate::domain::{CategoryUsage, HealthBreakdown, MenuHealthReport, MenuMetrics};
use crate::issues::derive_issues;
use crate::metrics::extract_metrics;
use crate::source::MenuSnapshot;

/// A category holding more than this many items counts as overloaded.
pub const OVERLOADED_CATEGORY_LIMIT: usize = 20;

const WEIGHT_PHOTOS: f64 = 0.25;
const WEIGHT_DESCRIPTIONS: f64 = 0.20;
const WEIGHT_TRANSLATIONS: f64 = 0.15;
const WEIGHT_TAGS: f64 = 0.10;
const WEIGHT_STRUCTURE: f64 = 0.15;
const WEIGHT_PERFORMANCE: f64 = 0.15;

const SINGLE_CATEGORY_PENALTY: i32 = 40;
const OVERLOAD_PENALTY_PER_CATEGORY: i32 = 10;
const OVERLOAD_PENALTY_CAP: i32 = 40;

/// Compute the full menu health report for a snapshot.
///
/// Repeated calls over an unchanged snapshot return identical reports;
/// the computation holds no state between invocations.
pub fn calculate_menu_health(snapshot: &MenuSnapshot) -> MenuHealthReport {
    let metrics = extract_metrics(snapshot);
    let breakdown = compute_breakdown(&metrics);
    let issues = derive_issues(&metrics);
    MenuHealthReport {
        score: composite_score(&breakdown),
        breakdown,
        metrics,
        issues,
    }
}

/// Compute the six sub-scores from extracted metrics.
pub fn compute_breakdown(metrics: &MenuMetrics) -> HealthBreakdown {
    HealthBreakdown {
        photos: share(metrics.items_with_images, metrics.total_items, 0),
        descriptions: share(metrics.items_with_descriptions, metrics.total_items, 100),
        translations: share(metrics.items_with_translations, metrics.total_items, 100),
        tags: share(metrics.items_with_tags, metrics.total_items, 50),
        structure: structure_score(metrics),
        performance: performance_score(metrics),
    }
}

/// Blend the sub-scores into the composite 0-100 score.
pub fn composite_score(breakdown: &HealthBreakdown) -> u8 {
    let weighted = WEIGHT_PHOTOS * f64::from(breakdown.photos)
        + WEIGHT_DESCRIPTIONS * f64::from(breakdown.descriptions)
        + WEIGHT_TRANSLATIONS * f64::from(breakdown.translations)
        + WEIGHT_TAGS * f64::from(breakdown.tags)
        + WEIGHT_STRUCTURE * f64::from(breakdown.structure)
        + WEIGHT_PERFORMANCE * f64::from(breakdown.performance);
    clamp_score(weighted.round())
}

/// Roster entries holding more items than the overload limit, in roster order.
pub fn overloaded_categories(metrics: &MenuMetrics) -> Vec<&CategoryUsage> {
    metrics
        .categories
        .iter()
        .filter(|usage| usage.item_count > OVERLOADED_CATEGORY_LIMIT)
        .collect()
}

fn share(count: usize, total: usize, empty_default: u8) -> u8 {
    if total == 0 {
        return empty_default;
    }
    let percentage = 100.0 * count as f64 / total as f64;
    clamp_score(percentage.round())
}

fn structure_score(metrics: &MenuMetrics) -> u8 {
    let mut score: i32 = 100;
    if metrics.categories.len() <= 1 {
        score -= SINGLE_CATEGORY_PENALTY;
    }
    let overloaded = overloaded_categories(metrics).len() as i32;
    score -= (OVERLOAD_PENALTY_PER_CATEGORY * overloaded).min(OVERLOAD_PENALTY_CAP);
    score.clamp(0, 100) as u8
}

fn performance_score(metrics: &MenuMetrics) -> u8 {
    if metrics.visible_items == 0 {
        return 100;
    }
    let unseen_share =
        100.0 * metrics.zero_view_visible_items as f64 / metrics.visible_items as f64;
    clamp_score((100.0 - unseen_share).round())
}

fn clamp_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0) as u8
}
