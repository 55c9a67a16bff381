#![deny(missing_docs)]
//! Sufra core library.
//!
//! This crate contains the domain types, the menu health scoring engine,
//! and the public menu composition that power the broader Sufra platform.

pub mod domain;
pub mod error;
pub mod health;
/// Issue derivation rules for the health report.
pub mod issues;
pub mod menu;
pub mod metrics;
pub mod report;
pub mod source;

pub use domain::{
    CategoryRecord, CategoryUsage, HealthBreakdown, ItemRecord, ItemViewRecord, MenuHealthIssue,
    MenuHealthReport, MenuMetrics, Severity,
};
pub use error::{Result, SufraError};
pub use health::{OVERLOADED_CATEGORY_LIMIT, calculate_menu_health};
pub use issues::derive_issues;
pub use menu::{
    BranchInfo, PublicMenu, PublicMenuItem, PublicMenuSection, RestaurantProfile,
    compose_public_menu, format_price, menu_url,
};
pub use metrics::{extract_metrics, ranked_views, view_counts};
pub use report::{render_health_markdown, render_json, severity_label};
pub use source::{
    DEFAULT_VIEW_WINDOW_DAYS, MenuSnapshot, MenuSource, ViewWindow, load_snapshot,
};
