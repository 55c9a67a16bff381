//! Public menu composition.
//!
//! Builds the bilingual payload served at the QR-friendly public menu
//! URL. Hidden items are excluded everywhere; categories keep their
//! sort order and are retained even when all of their items are hidden.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CategoryRecord, ItemRecord};

/// Restaurant profile shown on the public menu and microsite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    /// Restaurant identifier.
    pub id: String,
    /// URL slug for the public menu.
    pub slug: String,
    /// English restaurant name.
    pub name_en: String,
    /// Arabic restaurant name.
    pub name_ar: Option<String>,
    /// English tagline for the microsite header.
    pub tagline_en: Option<String>,
    /// Arabic tagline for the microsite header.
    pub tagline_ar: Option<String>,
    /// ISO currency code used for price display.
    pub currency: String,
}

/// A branch listed on the microsite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    /// Branch identifier.
    pub id: String,
    /// English branch name.
    pub name_en: String,
    /// Arabic branch name.
    pub name_ar: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// A menu item as rendered on the public menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenuItem {
    /// Item identifier.
    pub id: String,
    /// English item name.
    pub name_en: String,
    /// Arabic item name.
    pub name_ar: Option<String>,
    /// English description.
    pub description_en: Option<String>,
    /// Arabic description.
    pub description_ar: Option<String>,
    /// Formatted price, e.g. "SAR 45.00".
    pub price: Option<String>,
    /// Item photo URL.
    pub image_url: Option<String>,
    /// Badge and dietary tag labels.
    pub tags: Vec<String>,
}

/// A category section on the public menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenuSection {
    /// Category identifier.
    pub id: String,
    /// English category name.
    pub name_en: String,
    /// Arabic category name.
    pub name_ar: Option<String>,
    /// Visible items in display order.
    pub items: Vec<PublicMenuItem>,
}

/// The public-facing bilingual menu payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenu {
    /// Restaurant profile.
    pub restaurant: RestaurantProfile,
    /// Branches listed on the microsite.
    pub branches: Vec<BranchInfo>,
    /// Category sections in display order.
    pub categories: Vec<PublicMenuSection>,
    /// Visible items not filed under any category.
    pub uncategorized: Vec<PublicMenuItem>,
    /// Canonical QR-friendly URL of this menu.
    pub menu_url: String,
}

/// Build the canonical public menu URL for a slug.
pub fn menu_url(base: &str, slug: &str) -> String {
    format!("{}/m/{}", base.trim_end_matches('/'), slug)
}

/// Format a minor-unit price for display.
pub fn format_price(price_minor: i32, currency: &str) -> String {
    format!("{currency} {:.2}", f64::from(price_minor) / 100.0)
}

/// Compose the public menu payload from fetched rows.
pub fn compose_public_menu(
    restaurant: RestaurantProfile,
    branches: Vec<BranchInfo>,
    categories: &[CategoryRecord],
    items: &[ItemRecord],
    base_url: &str,
) -> PublicMenu {
    let mut ordered_categories: Vec<&CategoryRecord> = categories.iter().collect();
    ordered_categories.sort_by_key(|category| category.sort_order);

    let sections: Vec<PublicMenuSection> = ordered_categories
        .iter()
        .map(|category| PublicMenuSection {
            id: category.id.clone(),
            name_en: category.name_en.clone().unwrap_or_default(),
            name_ar: category.name_ar.clone(),
            items: visible_items_for(items, Some(category.id.as_str()), &restaurant.currency),
        })
        .collect();
    let uncategorized = visible_items_for(items, None, &restaurant.currency);
    let url = menu_url(base_url, &restaurant.slug);

    PublicMenu {
        restaurant,
        branches,
        categories: sections,
        uncategorized,
        menu_url: url,
    }
}

fn visible_items_for(
    items: &[ItemRecord],
    category_id: Option<&str>,
    currency: &str,
) -> Vec<PublicMenuItem> {
    let mut matched: Vec<&ItemRecord> = items
        .iter()
        .filter(|item| item.visible() && item.category_id.as_deref() == category_id)
        .collect();
    matched.sort_by_key(|item| item.sort_order);
    matched
        .into_iter()
        .map(|item| PublicMenuItem {
            id: item.id.clone(),
            name_en: item.name_en.clone().unwrap_or_default(),
            name_ar: item.name_ar.clone(),
            description_en: item.description_en.clone(),
            description_ar: item.description_ar.clone(),
            price: item.price_minor.map(|minor| format_price(minor, currency)),
            image_url: item.image_url.clone(),
            tags: tag_labels(item),
        })
        .collect()
}

fn tag_labels(item: &ItemRecord) -> Vec<String> {
    let flags = [
        (item.is_new, "new"),
        (item.is_popular, "popular"),
        (item.is_spicy, "spicy"),
        (item.is_vegetarian, "vegetarian"),
        (item.is_vegan, "vegan"),
        (item.is_gluten_free, "gluten_free"),
    ];
    flags
        .into_iter()
        .filter_map(|(set, label)| set.then(|| label.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        BranchInfo, RestaurantProfile, compose_public_menu, format_price, menu_url,
    };
    use crate::domain::fixtures::{bare_item, category, complete_item};

    fn profile() -> RestaurantProfile {
        RestaurantProfile {
            id: "r1".to_string(),
            slug: "beit-zaytoun".to_string(),
            name_en: "Beit Zaytoun".to_string(),
            name_ar: Some("بيت زيتون".to_string()),
            tagline_en: Some("Levantine home cooking".to_string()),
            tagline_ar: None,
            currency: "SAR".to_string(),
        }
    }

    #[test]
    fn menu_url_trims_trailing_slash() {
        assert_eq!(
            menu_url("https://sufra.menu/", "beit-zaytoun"),
            "https://sufra.menu/m/beit-zaytoun"
        );
        assert_eq!(
            menu_url("https://sufra.menu", "beit-zaytoun"),
            "https://sufra.menu/m/beit-zaytoun"
        );
    }

    #[test]
    fn prices_render_in_major_units() {
        assert_eq!(format_price(4550, "SAR"), "SAR 45.50");
        assert_eq!(format_price(900, "KWD"), "KWD 9.00");
    }

    #[test]
    fn hidden_items_never_reach_the_public_menu() {
        let mut hidden = complete_item("hidden", "mains");
        hidden.is_visible = Some(false);
        let visible = complete_item("visible", "mains");
        let menu = compose_public_menu(
            profile(),
            vec![],
            &[category("mains", "Mains", 0)],
            &[hidden, visible],
            "https://sufra.menu",
        );
        assert_eq!(menu.categories.len(), 1);
        let ids: Vec<&str> = menu.categories[0]
            .items
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["visible"]);
    }

    #[test]
    fn sections_follow_sort_order_and_keep_empty_categories() {
        let menu = compose_public_menu(
            profile(),
            vec![],
            &[
                category("desserts", "Desserts", 2),
                category("mains", "Mains", 1),
            ],
            &[complete_item("kabsa", "mains")],
            "https://sufra.menu",
        );
        let names: Vec<&str> = menu
            .categories
            .iter()
            .map(|section| section.name_en.as_str())
            .collect();
        assert_eq!(names, vec!["Mains", "Desserts"]);
        assert!(menu.categories[1].items.is_empty());
    }

    #[test]
    fn unfiled_visible_items_land_in_the_uncategorized_section() {
        let mut unfiled = bare_item("water");
        unfiled.name_en = Some("Water".to_string());
        let menu = compose_public_menu(
            profile(),
            vec![BranchInfo {
                id: "b1".to_string(),
                name_en: "Downtown".to_string(),
                name_ar: None,
                address: Some("12 Olaya St".to_string()),
                phone: None,
            }],
            &[category("mains", "Mains", 0)],
            &[unfiled],
            "https://sufra.menu",
        );
        assert_eq!(menu.uncategorized.len(), 1);
        assert_eq!(menu.uncategorized[0].name_en, "Water");
        assert_eq!(menu.branches.len(), 1);
        assert_eq!(menu.menu_url, "https://sufra.menu/m/beit-zaytoun");
    }

    #[test]
    fn tags_and_price_render_on_public_items() {
        let item = complete_item("kabsa", "mains");
        let menu = compose_public_menu(
            profile(),
            vec![],
            &[category("mains", "Mains", 0)],
            &[item],
            "https://sufra.menu",
        );
        let rendered = &menu.categories[0].items[0];
        assert_eq!(rendered.price.as_deref(), Some("SAR 45.00"));
        assert_eq!(rendered.tags, vec!["popular"]);
    }
}
