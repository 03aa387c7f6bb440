//! Rocket assembly

use crate::handlers::health::health;
use crate::handlers::{search_image, search_text, serve_image};
use crate::state::AppState;
use pictura_domain::error::{Error, Result};
use pictura_infrastructure::config::ServerConfig;
use rocket::config::Config as RocketConfig;
use rocket::{Build, Rocket, routes};
use std::net::IpAddr;

/// Build the Rocket instance with all routes mounted.
pub fn search_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/api", routes![health, search_text, search_image])
        .mount("/images", routes![serve_image])
}

/// Translate the server section of the app config into a Rocket config.
pub fn rocket_config(server: &ServerConfig) -> Result<RocketConfig> {
    let address: IpAddr = server
        .host
        .parse()
        .map_err(|_| Error::config(format!("invalid bind address '{}'", server.host)))?;
    Ok(RocketConfig {
        address,
        port: server.port,
        ..RocketConfig::default()
    })
}
