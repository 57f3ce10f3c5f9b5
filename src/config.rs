use rocket::figment::{Figment, providers::Env};
use serde::Deserialize;


const DEFAULT_POOL_SIZE: u32 = 10;


#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub db_pool_size: u32,
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}


/// Rocket's own figment (Rocket.toml, `ROCKET_*`) plus the raw
/// `DATABASE_URL` and `SENTRY_DSN` variables.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::raw().only(&["DATABASE_URL", "SENTRY_DSN"]))
}

pub fn load(figment: &Figment) -> Result<AppConfig, rocket::figment::Error> {
    figment.extract::<AppConfig>()
}
