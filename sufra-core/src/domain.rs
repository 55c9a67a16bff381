//! Domain entities for Sufra.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A menu item row as fetched for a single restaurant.
///
/// Every nullable column is carried as an `Option`; an absent string is
/// treated as empty and an absent visibility flag counts as visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Item identifier.
    pub id: String,
    /// Owning category identifier, if the item is filed under one.
    pub category_id: Option<String>,
    /// English item name.
    pub name_en: Option<String>,
    /// Arabic item name.
    pub name_ar: Option<String>,
    /// English description.
    pub description_en: Option<String>,
    /// Arabic description.
    pub description_ar: Option<String>,
    /// Price in minor currency units.
    pub price_minor: Option<i32>,
    /// Item photo URL.
    pub image_url: Option<String>,
    /// Whether the item is shown on the public menu. `None` counts as visible.
    pub is_visible: Option<bool>,
    /// "New" badge.
    pub is_new: bool,
    /// "Popular" badge.
    pub is_popular: bool,
    /// Spicy dietary tag.
    pub is_spicy: bool,
    /// Vegetarian dietary tag.
    pub is_vegetarian: bool,
    /// Vegan dietary tag.
    pub is_vegan: bool,
    /// Gluten-free dietary tag.
    pub is_gluten_free: bool,
    /// Display position within its category.
    pub sort_order: i32,
}

impl ItemRecord {
    /// Whether the item is shown on the public menu.
    pub fn visible(&self) -> bool {
        self.is_visible != Some(false)
    }

    /// Whether at least one of the six badge or dietary tags is set.
    pub fn has_any_tag(&self) -> bool {
        self.is_new
            || self.is_popular
            || self.is_spicy
            || self.is_vegetarian
            || self.is_vegan
            || self.is_gluten_free
    }
}

/// A menu category row as fetched for a single restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// Category identifier.
    pub id: String,
    /// English category name.
    pub name_en: Option<String>,
    /// Arabic category name.
    pub name_ar: Option<String>,
    /// Display position on the menu.
    pub sort_order: i32,
}

/// An item-view analytics event projected to the viewed item id.
///
/// Events recorded without an item reference carry `None` and are dropped
/// during snapshot assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemViewRecord {
    /// Viewed item identifier, if the event recorded one.
    pub item_id: Option<String>,
}

/// Severity of a menu health issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth fixing eventually.
    Low,
    /// Should be addressed soon.
    Medium,
    /// Actively hurting the menu.
    High,
}

/// A rule-triggered finding describing a specific menu deficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuHealthIssue {
    /// Stable identifier of the rule that fired.
    pub id: String,
    /// How urgent the finding is.
    pub severity: Severity,
    /// Short human-readable title.
    pub title: String,
    /// Description with embedded counts.
    pub description: String,
    /// Number of items or categories affected, where meaningful.
    pub affected_count: Option<usize>,
    /// Remediation suggestion.
    pub hint: Option<String>,
}

/// The six named sub-scores feeding the composite menu health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthBreakdown {
    /// Share of items with a photo.
    pub photos: u8,
    /// Share of items with an English description.
    pub descriptions: u8,
    /// Share of items with a complete Arabic translation.
    pub translations: u8,
    /// Share of items carrying at least one tag.
    pub tags: u8,
    /// Category organisation score.
    pub structure: u8,
    /// Share of visible items that were viewed within the window.
    pub performance: u8,
}

/// Per-category usage entry in the metrics roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    /// Category identifier.
    pub id: String,
    /// English category name, empty when unnamed.
    pub name: String,
    /// Number of items filed under this category.
    pub item_count: usize,
}

/// Descriptive counts backing the breakdown and issue rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuMetrics {
    /// Total fetched items, hidden ones included.
    pub total_items: usize,
    /// Items with a non-empty photo URL.
    pub items_with_images: usize,
    /// Items with a non-empty English description.
    pub items_with_descriptions: usize,
    /// Items with both an Arabic name and an Arabic description.
    pub items_with_translations: usize,
    /// Items carrying at least one tag.
    pub items_with_tags: usize,
    /// Items carrying no tag at all.
    pub items_without_tags: usize,
    /// Items shown on the public menu.
    pub visible_items: usize,
    /// Visible items with no recorded view in the window.
    pub zero_view_visible_items: usize,
    /// Category roster in fetch order, zero-item categories included.
    pub categories: Vec<CategoryUsage>,
}

/// A transient menu health report computed from a live snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuHealthReport {
    /// Composite health score, 0-100.
    pub score: u8,
    /// The six named sub-scores.
    pub breakdown: HealthBreakdown,
    /// Descriptive counts and the category roster.
    pub metrics: MenuMetrics,
    /// Rule findings in rule-evaluation order.
    pub issues: Vec<MenuHealthIssue>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{CategoryRecord, ItemRecord};

    /// An item with every nullable field absent and every tag unset.
    pub(crate) fn bare_item(id: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            category_id: None,
            name_en: None,
            name_ar: None,
            description_en: None,
            description_ar: None,
            price_minor: None,
            image_url: None,
            is_visible: None,
            is_new: false,
            is_popular: false,
            is_spicy: false,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
            sort_order: 0,
        }
    }

    /// A fully filled-out item: photo, descriptions, translation, one tag.
    pub(crate) fn complete_item(id: &str, category_id: &str) -> ItemRecord {
        ItemRecord {
            category_id: Some(category_id.to_string()),
            name_en: Some(format!("Dish {id}")),
            name_ar: Some("طبق".to_string()),
            description_en: Some("Slow-cooked with saffron rice.".to_string()),
            description_ar: Some("مطبوخ ببطء مع أرز الزعفران.".to_string()),
            price_minor: Some(4500),
            image_url: Some(format!("https://cdn.sufra.menu/{id}.jpg")),
            is_visible: Some(true),
            is_popular: true,
            ..bare_item(id)
        }
    }

    pub(crate) fn category(id: &str, name_en: &str, sort_order: i32) -> CategoryRecord {
        CategoryRecord {
            id: id.to_string(),
            name_en: Some(name_en.to_string()),
            name_ar: None,
            sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Severity;
    use super::fixtures::bare_item;

    #[test]
    fn absent_visibility_counts_as_visible() {
        let mut item = bare_item("a");
        assert!(item.visible());
        item.is_visible = Some(true);
        assert!(item.visible());
        item.is_visible = Some(false);
        assert!(!item.visible());
    }

    #[test]
    fn any_single_tag_marks_the_item_tagged() {
        let mut item = bare_item("a");
        assert!(!item.has_any_tag());
        item.is_gluten_free = true;
        assert!(item.has_any_tag());
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::High).expect("json");
        assert_eq!(json, "\"high\"");
    }
}
