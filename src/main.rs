#[macro_use] extern crate rocket;
#[macro_use] extern crate diesel;


mod db;
mod util;
mod error;
mod config;
mod cors;
mod logger;
mod animal_route;
mod lost_route;
#[cfg(test)]
mod test_util;


use std::process;
use log::{error, info};
use rocket::{
    Build, Rocket,
    figment::Figment,
    serde::json::Json,
};
use serde_json::{json, Value};

use db::Db;


#[get("/")]
fn index() -> Json<Value> {
    Json(json!({
        "message": "API Animais Comunitários",
        "docs": "/docs",
        "redoc": "/redoc",
        "endpoints": {
            "animais": {
                "listar": "GET /animals",
                "buscar": "GET /animals/{id}",
                "criar": "POST /animals",
                "atualizar": "PUT /animals/{id}",
                "deletar": "DELETE /animals/{id}",
            },
            "perdidos": {
                "listar": "GET /lost",
                "listar_encontrados": "GET /lost/found",
                "reportar": "POST /lost",
                "marcar_encontrado": "PATCH /lost/{id}/found",
            },
        },
    }))
}

#[get("/health")]
fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "database": "connected",
    }))
}


pub fn build_rocket(figment: Figment, db: Db) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(db)
        .attach(cors::Cors::new(&cors::ALLOWED_ORIGINS))
        .register("/", catchers![error::default_catcher])
        .mount("/", routes![
            index,
            health,
            cors::preflight,
        ])
        .mount("/animals", routes![
            animal_route::list_animals,
            animal_route::get_animal,
            animal_route::create_animal,
            animal_route::update_animal,
            animal_route::delete_animal,
        ])
        .mount("/lost", routes![
            lost_route::list_lost,
            lost_route::list_found,
            lost_route::report_lost,
            lost_route::mark_found,
        ])
}


fn main() {
    let figment = config::figment();

    let app_config = match config::load(&figment) {
        Ok(app_config) => app_config,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            process::exit(1);
        }
    };

    let _sentry = logger::init(app_config.sentry_dsn.as_deref());

    let db = match Db::connect(&app_config.database_url, app_config.db_pool_size) {
        Ok(db) => db,
        Err(err) => {
            error!("Database connection failed: {}", err);
            process::exit(1);
        }
    };

    info!("Creating tables");
    if let Err(err) = db.create_tables() {
        error!("Table creation failed: {}", err);
        process::exit(1);
    }
    info!("Tables ready");

    if let Err(err) = rocket::execute(build_rocket(figment, db).launch()) {
        error!("Server stopped: {}", err);
        process::exit(1);
    }
}
