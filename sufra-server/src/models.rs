//! Database models for Sufra server.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use sufra_core::{BranchInfo, CategoryRecord, ItemRecord, RestaurantProfile};

use crate::schema::{branches, menu_categories, menu_events, menu_items, restaurants};

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Selectable)]
#[diesel(table_name = restaurants)]
/// Restaurant (tenant) database record.
pub struct Restaurant {
    /// Restaurant identifier.
    pub id: String,
    /// URL slug for the public menu.
    pub slug: String,
    /// English restaurant name.
    pub name_en: String,
    /// Arabic restaurant name.
    pub name_ar: Option<String>,
    /// English microsite tagline.
    pub tagline_en: Option<String>,
    /// Arabic microsite tagline.
    pub tagline_ar: Option<String>,
    /// ISO currency code for price display.
    pub currency: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = branches)]
#[diesel(belongs_to(Restaurant, foreign_key = restaurant_id))]
/// Branch database record.
pub struct Branch {
    /// Branch identifier.
    pub id: String,
    /// Owning restaurant identifier.
    pub restaurant_id: String,
    /// English branch name.
    pub name_en: String,
    /// Arabic branch name.
    pub name_ar: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = menu_categories)]
#[diesel(belongs_to(Restaurant, foreign_key = restaurant_id))]
/// Menu category database record.
pub struct MenuCategory {
    /// Category identifier.
    pub id: String,
    /// Owning restaurant identifier.
    pub restaurant_id: String,
    /// English category name.
    pub name_en: String,
    /// Arabic category name.
    pub name_ar: Option<String>,
    /// Display position on the menu.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = menu_items)]
#[diesel(belongs_to(Restaurant, foreign_key = restaurant_id))]
#[diesel(belongs_to(MenuCategory, foreign_key = category_id))]
/// Menu item database record.
pub struct MenuItem {
    /// Item identifier.
    pub id: String,
    /// Owning restaurant identifier.
    pub restaurant_id: String,
    /// Owning category identifier, if filed.
    pub category_id: Option<String>,
    /// English item name.
    pub name_en: String,
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
    /// Whether the item is shown on the public menu.
    pub is_visible: bool,
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
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable, Associations, Selectable)]
#[diesel(table_name = menu_events)]
#[diesel(belongs_to(Restaurant, foreign_key = restaurant_id))]
/// Engagement analytics event record.
pub struct MenuEvent {
    /// Event identifier.
    pub id: String,
    /// Owning restaurant identifier.
    pub restaurant_id: String,
    /// Referenced item identifier, if any.
    pub item_id: Option<String>,
    /// Event kind (`item_view`, `item_click`, `favorite`).
    pub kind: String,
    /// Recording timestamp.
    pub created_at: NaiveDateTime,
}

impl From<MenuItem> for ItemRecord {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            category_id: item.category_id,
            name_en: Some(item.name_en),
            name_ar: item.name_ar,
            description_en: item.description_en,
            description_ar: item.description_ar,
            price_minor: item.price_minor,
            image_url: item.image_url,
            is_visible: Some(item.is_visible),
            is_new: item.is_new,
            is_popular: item.is_popular,
            is_spicy: item.is_spicy,
            is_vegetarian: item.is_vegetarian,
            is_vegan: item.is_vegan,
            is_gluten_free: item.is_gluten_free,
            sort_order: item.sort_order,
        }
    }
}

impl From<MenuCategory> for CategoryRecord {
    fn from(category: MenuCategory) -> Self {
        Self {
            id: category.id,
            name_en: Some(category.name_en),
            name_ar: category.name_ar,
            sort_order: category.sort_order,
        }
    }
}

impl From<Restaurant> for RestaurantProfile {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            slug: restaurant.slug,
            name_en: restaurant.name_en,
            name_ar: restaurant.name_ar,
            tagline_en: restaurant.tagline_en,
            tagline_ar: restaurant.tagline_ar,
            currency: restaurant.currency,
        }
    }
}

impl From<Branch> for BranchInfo {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id,
            name_en: branch.name_en,
            name_ar: branch.name_ar,
            address: branch.address,
            phone: branch.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MenuItem, Restaurant};
    use chrono::NaiveDate;
    use sufra_core::{ItemRecord, RestaurantProfile};

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .expect("date")
            .and_hms_opt(12, 0, 0)
            .expect("time")
    }

    #[test]
    fn item_row_maps_to_core_record() {
        let row = MenuItem {
            id: "i1".to_string(),
            restaurant_id: "r1".to_string(),
            category_id: Some("c1".to_string()),
            name_en: "Kabsa".to_string(),
            name_ar: Some("كبسة".to_string()),
            description_en: None,
            description_ar: None,
            price_minor: Some(4500),
            image_url: None,
            is_visible: false,
            is_new: true,
            is_popular: false,
            is_spicy: false,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
            sort_order: 2,
            created_at: timestamp(),
        };
        let record = ItemRecord::from(row);
        assert_eq!(record.name_en.as_deref(), Some("Kabsa"));
        assert_eq!(record.is_visible, Some(false));
        assert!(!record.visible());
        assert!(record.has_any_tag());
        assert_eq!(record.sort_order, 2);
    }

    #[test]
    fn restaurant_row_maps_to_profile() {
        let row = Restaurant {
            id: "r1".to_string(),
            slug: "beit-zaytoun".to_string(),
            name_en: "Beit Zaytoun".to_string(),
            name_ar: Some("بيت زيتون".to_string()),
            tagline_en: None,
            tagline_ar: None,
            currency: "SAR".to_string(),
            created_at: timestamp(),
        };
        let profile = RestaurantProfile::from(row);
        assert_eq!(profile.slug, "beit-zaytoun");
        assert_eq!(profile.currency, "SAR");
    }
}
