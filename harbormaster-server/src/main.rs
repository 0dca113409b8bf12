#![deny(missing_docs)]
//! Harbormaster server executable.
//!
//! Hosts the fleet registry CRUD endpoints and the document/spreadsheet
//! export downloads.

mod db;
mod error;
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
    AppState, create_ship, delete_ship, download_fleet_document, download_fleet_spreadsheet,
    download_ship_document, download_ship_spreadsheet, get_ship, json_config, list_ships,
    openapi_json, update_ship,
};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let pool = init_pool();

    let state = web::Data::new(AppState { pool });

    let origins = std::env::var("HARBORMASTER_UI_ORIGINS")
        .unwrap_or_else(|_| "http://127.0.0.1:4200,http://localhost:4200".to_string());
    let allowed_origins: Vec<String> = origins
        .split(',')
        .map(|value| value.trim())
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    let listen_addr =
        std::env::var("HARBORMASTER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listen_port =
        u16::from_str(&std::env::var("HARBORMASTER_PORT").unwrap_or_else(|_| "8080".to_string()))
            .expect("HARBORMASTER_PORT must be a u16 number");
    let err_msg = format!("Can't bind {}:{}", &listen_addr, listen_port);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            // Export routes must register ahead of the {id} matchers.
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .app_data(json_config())
                .service(list_ships)
                .service(create_ship)
                .service(download_fleet_document)
                .service(download_ship_document)
                .service(download_fleet_spreadsheet)
                .service(download_ship_spreadsheet)
                .service(get_ship)
                .service(update_ship)
                .service(delete_ship)
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
