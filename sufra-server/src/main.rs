#![deny(missing_docs)]
//! Sufra server executable.
//!
//! Hosts HTTP endpoints for menu management, the public bilingual menu,
//! engagement analytics, and menu health scoring.

mod db;
mod models;
mod openapi;
mod routes;
mod schema;
mod store;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;

#[allow(unused_imports)]
use std::str::FromStr;

#[cfg(not(test))]
use crate::db::init_pool;
#[cfg(not(test))]
use crate::routes::{
    AppState, analytics_views, create_branch, create_category, create_item, create_restaurant,
    delete_item, list_branches, list_categories, list_items, menu_health, openapi_json,
    public_menu, record_event, restaurant_summary, update_category, update_item,
};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let pool = init_pool();

    let public_base_url =
        std::env::var("SUFRA_PUBLIC_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let state = web::Data::new(AppState {
        pool,
        public_base_url,
    });

    let origins = std::env::var("SUFRA_UI_ORIGINS")
        .unwrap_or_else(|_| "http://127.0.0.1:4200,http://localhost:4200".to_string());
    let allowed_origins: Vec<String> = origins
        .split(',')
        .map(|value| value.trim())
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    let listen_addr = std::env::var("SUFRA_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listen_port =
        u16::from_str(&std::env::var("SUFRA_PORT").unwrap_or_else(|_| "8080".to_string()))
            .expect("SUFRA_PORT must be a u16 number");
    let err_msg = format!("Can't bind {}:{}", &listen_addr, listen_port);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .service(create_restaurant)
                .service(restaurant_summary)
                .service(create_branch)
                .service(list_branches)
                .service(create_category)
                .service(list_categories)
                .service(update_category)
                .service(create_item)
                .service(list_items)
                .service(update_item)
                .service(delete_item)
                .service(public_menu)
                .service(record_event)
                .service(analytics_views)
                .service(menu_health)
                .service(openapi_json)
        })
        .bind((listen_addr, listen_port))
        .expect(&err_msg)
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
