// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, routes, Request, Response, State};
use tracing::info;

use crate::config::AppConfig;
use crate::store::PostgresStore;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/jobs/search?<params..>")]
pub async fn search_jobs(
    params: SearchQueryParams,
    store: &State<PostgresStore>,
) -> Result<Json<SearchResponse>, Json<ErrorResponse>> {
    handlers::search_jobs_handler(params, store).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request format"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error"))
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let store = PostgresStore::connect(&config.database_url).await?;
    store.migrate().await?;

    info!("Starting job search API server on port {}", config.port);

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(store)
        .register("/api", catchers![bad_request, internal_error])
        .mount("/api", routes![search_jobs, health, options])
        .launch()
        .await?;

    Ok(())
}
