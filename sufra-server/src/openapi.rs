//! OpenAPI specification for Sufra server.

use utoipa::OpenApi;

use sufra_core::{
    BranchInfo, CategoryUsage, HealthBreakdown, MenuHealthIssue, MenuHealthReport, MenuMetrics,
    PublicMenu, PublicMenuItem, PublicMenuSection, RestaurantProfile, Severity,
};

use crate::routes::{
    BranchRequest, BranchResponse, CategoryRequest, CategoryResponse, CreateRestaurantRequest,
    DeleteItemResponse, ErrorResponse, ItemRequest, ItemResponse, RecordEventRequest,
    RecordEventResponse, RestaurantResponse, RestaurantSummaryResponse, ViewAnalyticsResponse,
    ViewCountEntry,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::create_restaurant,
        crate::routes::restaurant_summary,
        crate::routes::create_branch,
        crate::routes::list_branches,
        crate::routes::create_category,
        crate::routes::list_categories,
        crate::routes::update_category,
        crate::routes::create_item,
        crate::routes::list_items,
        crate::routes::update_item,
        crate::routes::delete_item,
        crate::routes::public_menu,
        crate::routes::record_event,
        crate::routes::analytics_views,
        crate::routes::menu_health,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            CreateRestaurantRequest,
            RestaurantResponse,
            RestaurantSummaryResponse,
            BranchRequest,
            BranchResponse,
            CategoryRequest,
            CategoryResponse,
            ItemRequest,
            ItemResponse,
            DeleteItemResponse,
            RecordEventRequest,
            RecordEventResponse,
            ViewCountEntry,
            ViewAnalyticsResponse,
            ErrorResponse,
            RestaurantProfile,
            BranchInfo,
            PublicMenu,
            PublicMenuSection,
            PublicMenuItem,
            MenuHealthReport,
            HealthBreakdown,
            MenuMetrics,
            CategoryUsage,
            MenuHealthIssue,
            Severity
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant accounts"),
        (name = "branches", description = "Branch management"),
        (name = "menu", description = "Menu categories and items"),
        (name = "public", description = "Public menu and engagement"),
        (name = "analytics", description = "Engagement analytics and menu health"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Sufra server.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_includes_expected_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/api/restaurants"));
        assert!(paths.contains_key("/api/restaurants/{id}"));
        assert!(paths.contains_key("/api/restaurants/{id}/branches"));
        assert!(paths.contains_key("/api/restaurants/{id}/categories"));
        assert!(paths.contains_key("/api/categories/{id}"));
        assert!(paths.contains_key("/api/restaurants/{id}/items"));
        assert!(paths.contains_key("/api/items/{id}"));
        assert!(paths.contains_key("/api/items/{id}/delete"));
        assert!(paths.contains_key("/api/menus/{slug}"));
        assert!(paths.contains_key("/api/menus/{slug}/events"));
        assert!(paths.contains_key("/api/restaurants/{id}/analytics/views"));
        assert!(paths.contains_key("/api/restaurants/{id}/health"));
        assert!(paths.contains_key("/api/openapi.json"));
    }
}
