#![deny(missing_docs)]
//! Sufra command-line interface.
//!
//! Fetches menu health reports, public menus, and QR links from a
//! running Sufra server.

use std::fmt::Write;

use clap::{Parser, Subcommand, ValueEnum};
use sufra_core::{
    MenuHealthReport, PublicMenu, PublicMenuItem, menu_url, render_health_markdown, render_json,
    severity_label,
};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "sufra", version, about = "Sufra CLI")]
struct Cli {
    /// Base URL of the Sufra API server.
    #[arg(long, env = "SUFRA_API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and render the menu health report for a restaurant.
    Health {
        /// Restaurant identifier.
        #[arg(long)]
        restaurant: String,
        /// Output format for the report.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Fetch and render the public menu for a slug.
    Menu {
        /// Restaurant slug.
        #[arg(long)]
        slug: String,
        /// Output format for the menu.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the canonical QR-friendly public menu URL for a slug.
    QrUrl {
        /// Restaurant slug.
        #[arg(long)]
        slug: String,
        /// Public base URL; defaults to the API base URL.
        #[arg(long, env = "SUFRA_PUBLIC_BASE_URL")]
        base: Option<String>,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let api_url = cli.api_url.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Health { restaurant, format } => run_health(&api_url, &restaurant, format).await?,
        Commands::Menu { slug, format } => run_menu(&api_url, &slug, format).await?,
        Commands::QrUrl { slug, base } => {
            println!("{}", menu_url(base.as_deref().unwrap_or(&api_url), &slug));
        }
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_health(api_url: &str, restaurant: &str, format: OutputFormat) -> CliResult<()> {
    let url = format!("{api_url}/api/restaurants/{restaurant}/health");
    let report: MenuHealthReport = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json()
        .await?;
    let output = match format {
        OutputFormat::Text => render_health_text(&report, restaurant),
        OutputFormat::Markdown => render_health_markdown(&report, restaurant),
        OutputFormat::Json => render_json(&report)?,
    };
    println!("{output}");
    Ok(())
}

async fn run_menu(api_url: &str, slug: &str, format: OutputFormat) -> CliResult<()> {
    let url = format!("{api_url}/api/menus/{slug}");
    let menu: PublicMenu = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json()
        .await?;
    let output = match format {
        OutputFormat::Text => render_menu_text(&menu),
        OutputFormat::Markdown => render_menu_markdown(&menu),
        OutputFormat::Json => render_json(&menu)?,
    };
    println!("{output}");
    Ok(())
}

fn render_health_text(report: &MenuHealthReport, restaurant: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Menu health for {restaurant}: {}/100", report.score);
    let breakdown = &report.breakdown;
    let _ = writeln!(
        output,
        "  photos {} | descriptions {} | translations {} | tags {} | structure {} | performance {}",
        breakdown.photos,
        breakdown.descriptions,
        breakdown.translations,
        breakdown.tags,
        breakdown.structure,
        breakdown.performance
    );
    let _ = writeln!(
        output,
        "  {} items ({} visible), {} categories",
        report.metrics.total_items,
        report.metrics.visible_items,
        report.metrics.categories.len()
    );
    if report.issues.is_empty() {
        let _ = writeln!(output, "  no issues");
    } else {
        for issue in &report.issues {
            let _ = writeln!(
                output,
                "  [{}] {}: {}",
                severity_label(issue.severity),
                issue.title,
                issue.description
            );
        }
    }
    output
}

fn render_menu_text(menu: &PublicMenu) -> String {
    let mut output = String::new();
    let restaurant = &menu.restaurant;
    match &restaurant.name_ar {
        Some(name_ar) => {
            let _ = writeln!(output, "{} / {name_ar}", restaurant.name_en);
        }
        None => {
            let _ = writeln!(output, "{}", restaurant.name_en);
        }
    }
    let _ = writeln!(output, "{}", menu.menu_url);
    for section in &menu.categories {
        let _ = writeln!(output, "\n== {} ==", section.name_en);
        for item in &section.items {
            append_item_line(&mut output, item);
        }
    }
    if !menu.uncategorized.is_empty() {
        let _ = writeln!(output, "\n== Other ==");
        for item in &menu.uncategorized {
            append_item_line(&mut output, item);
        }
    }
    output
}

fn render_menu_markdown(menu: &PublicMenu) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# {}\n", menu.restaurant.name_en);
    for section in &menu.categories {
        let _ = writeln!(output, "## {}", section.name_en);
        for item in &section.items {
            let price = item.price.as_deref().unwrap_or("-");
            let _ = writeln!(output, "- {} ({price})", item.name_en);
        }
        let _ = writeln!(output);
    }
    if !menu.uncategorized.is_empty() {
        let _ = writeln!(output, "## Other");
        for item in &menu.uncategorized {
            let price = item.price.as_deref().unwrap_or("-");
            let _ = writeln!(output, "- {} ({price})", item.name_en);
        }
    }
    output
}

fn append_item_line(output: &mut String, item: &PublicMenuItem) {
    let _ = write!(output, "  {}", item.name_en);
    if let Some(name_ar) = &item.name_ar {
        let _ = write!(output, " / {name_ar}");
    }
    if let Some(price) = &item.price {
        let _ = write!(output, "  {price}");
    }
    if !item.tags.is_empty() {
        let _ = write!(output, "  [{}]", item.tags.join(", "));
    }
    let _ = writeln!(output);
}
