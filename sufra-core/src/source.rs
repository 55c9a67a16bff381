//! Menu data access seam used by the health scorer.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{CategoryRecord, ItemRecord, ItemViewRecord};
use crate::error::Result;

/// Default analytics lookback, in days.
pub const DEFAULT_VIEW_WINDOW_DAYS: i64 = 30;

/// Abstraction over tenant-scoped menu reads for testability.
///
/// Implementations must filter every read to the given restaurant; the
/// view read must additionally restrict to item-view events recorded at
/// or after `since`.
#[cfg_attr(test, mockall::automock)]
pub trait MenuSource {
    /// Fetch all menu items for the restaurant, hidden ones included.
    fn menu_items(&self, restaurant_id: &str) -> Result<Vec<ItemRecord>>;
    /// Fetch all menu categories for the restaurant.
    fn menu_categories(&self, restaurant_id: &str) -> Result<Vec<CategoryRecord>>;
    /// Fetch item-view events for the restaurant since the given instant.
    fn item_views(
        &self,
        restaurant_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<ItemViewRecord>>;
}

/// Analytics lookback window for the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    /// Number of trailing days to include.
    pub days: i64,
}

impl ViewWindow {
    /// A window covering the trailing `days` days.
    pub fn days(days: i64) -> Self {
        Self { days }
    }

    /// The cutoff instant for this window relative to `now`.
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days)
    }
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_VIEW_WINDOW_DAYS,
        }
    }
}

/// A point-in-time snapshot of one restaurant's menu data.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSnapshot {
    /// All fetched menu items.
    pub items: Vec<ItemRecord>,
    /// All fetched categories, in fetch order.
    pub categories: Vec<CategoryRecord>,
    /// Viewed item ids, one entry per event.
    pub view_item_ids: Vec<String>,
    /// View events dropped for lacking an item reference.
    pub dropped_events: usize,
    /// Whether the view read failed and was degraded to an empty list.
    pub analytics_degraded: bool,
}

impl MenuSnapshot {
    /// Assemble a snapshot from the three read results, however obtained.
    ///
    /// Items and categories are load-bearing: either read failing fails the
    /// snapshot. Analytics are supplementary: a failed view read degrades to
    /// an empty event list and sets `analytics_degraded` so callers can log
    /// it. Events without an item id are dropped and counted.
    pub fn from_reads(
        items: Result<Vec<ItemRecord>>,
        categories: Result<Vec<CategoryRecord>>,
        views: Result<Vec<ItemViewRecord>>,
    ) -> Result<Self> {
        let items = items?;
        let categories = categories?;
        let (view_item_ids, dropped_events, analytics_degraded) = match views {
            Ok(events) => {
                let total = events.len();
                let ids: Vec<String> =
                    events.into_iter().filter_map(|event| event.item_id).collect();
                let dropped = total - ids.len();
                (ids, dropped, false)
            }
            Err(_) => (Vec::new(), 0, true),
        };
        Ok(Self {
            items,
            categories,
            view_item_ids,
            dropped_events,
            analytics_degraded,
        })
    }
}

/// Read a full snapshot from a source with sequential reads.
///
/// Callers that want the three reads fanned out concurrently can issue
/// them themselves and join through [`MenuSnapshot::from_reads`], which
/// applies the same failure policy.
pub fn load_snapshot<S: MenuSource>(
    source: &S,
    restaurant_id: &str,
    window: ViewWindow,
    now: DateTime<Utc>,
) -> Result<MenuSnapshot> {
    let items = source.menu_items(restaurant_id);
    let categories = source.menu_categories(restaurant_id);
    let views = source.item_views(restaurant_id, window.since(now));
    MenuSnapshot::from_reads(items, categories, views)
}
