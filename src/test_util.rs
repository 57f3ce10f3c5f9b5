use std::env;
use rocket::local::blocking::Client;

use crate::{build_rocket, config};
use crate::db::Db;


/// Nothing listens on port 1, so every checkout fails fast.
const UNREACHABLE_DATABASE: &str = "postgres://unused@127.0.0.1:1/unused";


/// Client whose pool never reaches a database. Routes that touch the
/// store answer 500 within the pool's checkout timeout.
pub fn lazy_client() -> Client {
    let db = Db::lazy(UNREACHABLE_DATABASE);
    Client::tracked(build_rocket(config::figment(), db))
        .expect("valid rocket instance")
}

/// Client backed by the database in `DATABASE_URL`. Tests using it are
/// `#[ignore]`d; run them with `cargo test -- --ignored`.
pub fn live_client() -> Client {
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for database tests");

    let db = Db::connect(&database_url, 2)
        .expect("DATABASE_URL is set but unreachable");
    db.create_tables()
        .expect("table creation failed");

    Client::tracked(build_rocket(config::figment(), db))
        .expect("valid rocket instance")
}
