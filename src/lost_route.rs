use chrono::{DateTime, NaiveDateTime, Utc};
use log::info;
use rocket::{
    State,
    response::status::Created,
    serde::json::{self, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::{self, Db};
use crate::db::models::{LostAnimal, NewLostAnimal};
use crate::error::ApiError;
use crate::util::{self, LengthCheck};


type ApiResult<T> = Result<T, ApiError>;


/// Report body. A `found` key sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct LostReportForm {
    name: String,
    #[serde(default)]
    photo: Option<String>,
    species: String,
    last_seen_location: String,
    #[serde(deserialize_with = "util::deserialize_naive_datetime")]
    last_seen_date: NaiveDateTime,
    description: String,
    contact_name: String,
    contact_phone: String,
}

impl LostReportForm {
    fn verify(&self) -> ApiResult<()> {
        LengthCheck::new()
            .field("name", Some(&self.name), 100)
            .field("photo", self.photo.as_deref(), 500)
            .field("species", Some(&self.species), 10)
            .field("last_seen_location", Some(&self.last_seen_location), 200)
            .field("description", Some(&self.description), 1000)
            .field("contact_name", Some(&self.contact_name), 100)
            .field("contact_phone", Some(&self.contact_phone), 20)
            .finish()
            .map_err(ApiError::Validation)
    }

    fn into_new_report(self, date_reported: DateTime<Utc>) -> NewLostAnimal {
        NewLostAnimal {
            name: self.name,
            photo: self.photo,
            species: self.species,
            last_seen_location: self.last_seen_location,
            last_seen_date: self.last_seen_date,
            description: self.description,
            contact_name: self.contact_name,
            contact_phone: self.contact_phone,
            found: false,
            date_reported,
        }
    }
}


#[get("/")]
pub async fn list_lost(db: &State<Db>) -> ApiResult<Json<Vec<LostAnimal>>> {
    let reports = db.run(|conn| db::get_lost_reports(conn, false)).await?;
    Ok(Json(reports))
}

#[get("/found")]
pub async fn list_found(db: &State<Db>) -> ApiResult<Json<Vec<LostAnimal>>> {
    let reports = db.run(|conn| db::get_lost_reports(conn, true)).await?;
    Ok(Json(reports))
}

#[post("/", data = "<form>")]
pub async fn report_lost(db: &State<Db>, form: Result<Json<LostReportForm>, json::Error<'_>>)
    -> ApiResult<Created<Json<LostAnimal>>> {

    let form = form.map_err(ApiError::from_json)?.into_inner();
    form.verify()?;

    let new_report = form.into_new_report(Utc::now());
    let report = db.run(move |conn| db::insert_lost_report(conn, &new_report)).await?;

    info!("Lost report({}) created: {}", report.id, report.name);

    Ok(Created::new(format!("/lost/{}", report.id)).body(Json(report)))
}

#[patch("/<id>/found")]
pub async fn mark_found(db: &State<Db>, id: i32) -> ApiResult<Json<Value>> {
    let count = db.run(move |conn| db::mark_lost_report_found(conn, id)).await?;

    if count == 0 {
        return Err(ApiError::NotFound);
    }

    info!("Lost report({}) marked as found", id);

    Ok(Json(json!({ "message": "Animal marcado como encontrado" })))
}
