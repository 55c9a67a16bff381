//! Diesel-backed implementation of the core menu source seam.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use sufra_core::{CategoryRecord, ItemRecord, ItemViewRecord, MenuSource, SufraError};

use crate::db::DbPool;
use crate::models::{MenuCategory, MenuItem};
use crate::schema::{menu_categories, menu_events, menu_items};

/// Event kind recorded when a guest opens an item.
pub const EVENT_ITEM_VIEW: &str = "item_view";
/// Event kind recorded when a guest taps through to item details.
pub const EVENT_ITEM_CLICK: &str = "item_click";
/// Event kind recorded when a guest favorites an item.
pub const EVENT_FAVORITE: &str = "favorite";

/// All accepted engagement event kinds.
pub const EVENT_KINDS: [&str; 3] = [EVENT_ITEM_VIEW, EVENT_ITEM_CLICK, EVENT_FAVORITE];

/// Tenant-scoped menu reads backed by the connection pool.
///
/// Each read checks out its own pooled connection, so callers may fan
/// the three scorer reads out across blocking threads.
#[derive(Clone)]
pub struct DieselMenuSource {
    pool: DbPool,
}

impl DieselMenuSource {
    /// Create a source over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MenuSource for DieselMenuSource {
    fn menu_items(&self, restaurant_id: &str) -> sufra_core::Result<Vec<ItemRecord>> {
        let mut conn = self.pool.get().map_err(SufraError::source)?;
        let rows = menu_items::table
            .filter(menu_items::restaurant_id.eq(restaurant_id))
            .order(menu_items::created_at.asc())
            .load::<MenuItem>(&mut conn)
            .map_err(SufraError::source)?;
        Ok(rows.into_iter().map(ItemRecord::from).collect())
    }

    fn menu_categories(&self, restaurant_id: &str) -> sufra_core::Result<Vec<CategoryRecord>> {
        let mut conn = self.pool.get().map_err(SufraError::source)?;
        let rows = menu_categories::table
            .filter(menu_categories::restaurant_id.eq(restaurant_id))
            .order(menu_categories::sort_order.asc())
            .load::<MenuCategory>(&mut conn)
            .map_err(SufraError::source)?;
        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    fn item_views(
        &self,
        restaurant_id: &str,
        since: DateTime<Utc>,
    ) -> sufra_core::Result<Vec<ItemViewRecord>> {
        let mut conn = self.pool.get().map_err(SufraError::source)?;
        let item_ids = menu_events::table
            .filter(menu_events::restaurant_id.eq(restaurant_id))
            .filter(menu_events::kind.eq(EVENT_ITEM_VIEW))
            .filter(menu_events::created_at.ge(since.naive_utc()))
            .select(menu_events::item_id)
            .load::<Option<String>>(&mut conn)
            .map_err(SufraError::source)?;
        Ok(item_ids
            .into_iter()
            .map(|item_id| ItemViewRecord { item_id })
            .collect())
    }
}
