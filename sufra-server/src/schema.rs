//! Diesel schema definitions for Sufra server.

diesel::table! {
    restaurants (id) {
        id -> Text,
        slug -> Text,
        name_en -> Text,
        name_ar -> Nullable<Text>,
        tagline_en -> Nullable<Text>,
        tagline_ar -> Nullable<Text>,
        currency -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    branches (id) {
        id -> Text,
        restaurant_id -> Text,
        name_en -> Text,
        name_ar -> Nullable<Text>,
        address -> Nullable<Text>,
        phone -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    menu_categories (id) {
        id -> Text,
        restaurant_id -> Text,
        name_en -> Text,
        name_ar -> Nullable<Text>,
        sort_order -> Int4,
        created_at -> Timestamp,
    }
}

diesel::table! {
    menu_items (id) {
        id -> Text,
        restaurant_id -> Text,
        category_id -> Nullable<Text>,
        name_en -> Text,
        name_ar -> Nullable<Text>,
        description_en -> Nullable<Text>,
        description_ar -> Nullable<Text>,
        price_minor -> Nullable<Int4>,
        image_url -> Nullable<Text>,
        is_visible -> Bool,
        is_new -> Bool,
        is_popular -> Bool,
        is_spicy -> Bool,
        is_vegetarian -> Bool,
        is_vegan -> Bool,
        is_gluten_free -> Bool,
        sort_order -> Int4,
        created_at -> Timestamp,
    }
}

diesel::table! {
    menu_events (id) {
        id -> Text,
        restaurant_id -> Text,
        item_id -> Nullable<Text>,
        kind -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(branches -> restaurants (restaurant_id));
diesel::joinable!(menu_categories -> restaurants (restaurant_id));
diesel::joinable!(menu_items -> restaurants (restaurant_id));
diesel::joinable!(menu_items -> menu_categories (category_id));
diesel::joinable!(menu_events -> restaurants (restaurant_id));

diesel::allow_tables_to_appear_in_same_query!(
    restaurants,
    branches,
    menu_categories,
    menu_items,
    menu_events,
);
