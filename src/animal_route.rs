use chrono::{DateTime, Utc};
use log::info;
use rocket::{
    State,
    response::status::Created,
    serde::json::{self, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::{self, Db};
use crate::db::models::{Animal, AnimalChanges, NewAnimal};
use crate::error::ApiError;
use crate::util::{self, LengthCheck};


type ApiResult<T> = Result<T, ApiError>;


#[derive(Debug, Deserialize)]
pub struct AnimalForm {
    name: String,
    #[serde(default)]
    photo: Option<String>,
    species: String,
    location: String,
    latitude: f64,
    longitude: f64,
    caretaker: String,
    #[serde(default)]
    caretaker_contact: Option<String>,
    #[serde(default)]
    vaccinated: bool,
    #[serde(default)]
    vaccine_details: Option<String>,
    #[serde(default)]
    neutered: bool,
    #[serde(default)]
    description: Option<String>,
}

impl AnimalForm {
    fn verify(&self) -> ApiResult<()> {
        LengthCheck::new()
            .field("name", Some(&self.name), 100)
            .field("photo", self.photo.as_deref(), 500)
            .field("species", Some(&self.species), 10)
            .field("location", Some(&self.location), 200)
            .field("caretaker", Some(&self.caretaker), 100)
            .field("caretaker_contact", self.caretaker_contact.as_deref(), 20)
            .field("vaccine_details", self.vaccine_details.as_deref(), 500)
            .field("description", self.description.as_deref(), 1000)
            .finish()
            .map_err(ApiError::Validation)
    }

    fn into_new_animal(self, date_added: DateTime<Utc>) -> NewAnimal {
        NewAnimal {
            name: self.name,
            photo: self.photo,
            species: self.species,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            caretaker: self.caretaker,
            caretaker_contact: self.caretaker_contact,
            vaccinated: self.vaccinated,
            vaccine_details: self.vaccine_details,
            neutered: self.neutered,
            description: self.description,
            date_added,
        }
    }
}


/// Sparse update body. `species` is not part of it and stays fixed.
#[derive(Debug, Deserialize)]
pub struct AnimalUpdateForm {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_some")]
    photo: Option<Option<String>>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    caretaker: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_some")]
    caretaker_contact: Option<Option<String>>,
    #[serde(default)]
    vaccinated: Option<bool>,
    #[serde(default, deserialize_with = "util::deserialize_some")]
    vaccine_details: Option<Option<String>>,
    #[serde(default)]
    neutered: Option<bool>,
    #[serde(default, deserialize_with = "util::deserialize_some")]
    description: Option<Option<String>>,
}

impl AnimalUpdateForm {
    fn verify(&self) -> ApiResult<()> {
        LengthCheck::new()
            .field("name", self.name.as_deref(), 100)
            .field("photo", self.photo.as_ref().and_then(|v| v.as_deref()), 500)
            .field("location", self.location.as_deref(), 200)
            .field("caretaker", self.caretaker.as_deref(), 100)
            .field("caretaker_contact", self.caretaker_contact.as_ref().and_then(|v| v.as_deref()), 20)
            .field("vaccine_details", self.vaccine_details.as_ref().and_then(|v| v.as_deref()), 500)
            .field("description", self.description.as_ref().and_then(|v| v.as_deref()), 1000)
            .finish()
            .map_err(ApiError::Validation)
    }

    fn into_changes(self) -> AnimalChanges {
        AnimalChanges {
            name: self.name,
            photo: self.photo,
            location: self.location,
            caretaker: self.caretaker,
            caretaker_contact: self.caretaker_contact,
            vaccinated: self.vaccinated,
            vaccine_details: self.vaccine_details,
            neutered: self.neutered,
            description: self.description,
        }
    }
}


#[get("/")]
pub async fn list_animals(db: &State<Db>) -> ApiResult<Json<Vec<Animal>>> {
    let animals = db.run(db::get_animals).await?;
    Ok(Json(animals))
}

#[get("/<id>")]
pub async fn get_animal(db: &State<Db>, id: i32) -> ApiResult<Json<Animal>> {
    db.run(move |conn| db::get_animal(conn, id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[post("/", data = "<form>")]
pub async fn create_animal(db: &State<Db>, form: Result<Json<AnimalForm>, json::Error<'_>>)
    -> ApiResult<Created<Json<Animal>>> {

    let form = form.map_err(ApiError::from_json)?.into_inner();
    form.verify()?;

    let new_animal = form.into_new_animal(Utc::now());
    let animal = db.run(move |conn| db::insert_animal(conn, &new_animal)).await?;

    info!("Animal({}) registered: {}", animal.id, animal.name);

    Ok(Created::new(format!("/animals/{}", animal.id)).body(Json(animal)))
}

#[put("/<id>", data = "<form>")]
pub async fn update_animal(db: &State<Db>, id: i32, form: Result<Json<AnimalUpdateForm>, json::Error<'_>>)
    -> ApiResult<Json<Animal>> {

    let form = form.map_err(ApiError::from_json)?.into_inner();
    form.verify()?;

    let changes = form.into_changes();
    db.run(move |conn| db::update_animal(conn, id, &changes))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[delete("/<id>")]
pub async fn delete_animal(db: &State<Db>, id: i32) -> ApiResult<Json<Value>> {
    let count = db.run(move |conn| db::delete_animal(conn, id)).await?;

    if count == 0 {
        return Err(ApiError::NotFound);
    }

    info!("Animal({}) removed", id);

    Ok(Json(json!({ "message": "Animal removido com sucesso" })))
}


#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;
    use crate::test_util::{lazy_client, live_client};

    const REX: &str = r#"{"name":"Rex","species":"dog","location":"Park","latitude":1.0,"longitude":2.0,"caretaker":"Ana"}"#;

    #[test]
    fn create_form_applies_defaults() {
        let form: AnimalForm = serde_json::from_str(REX).unwrap();
        let now = Utc::now();
        let animal = form.into_new_animal(now);

        assert_eq!(animal.name, "Rex");
        assert!(!animal.vaccinated);
        assert!(!animal.neutered);
        assert_eq!(animal.photo, None);
        assert_eq!(animal.date_added, now);
    }

    #[test]
    fn update_form_distinguishes_null_from_absent() {
        let form: AnimalUpdateForm =
            serde_json::from_str(r#"{"name":"Max","photo":null,"species":"cat"}"#).unwrap();
        let changes = form.into_changes();

        assert_eq!(changes.name.as_deref(), Some("Max"));
        assert_eq!(changes.photo, Some(None));
        assert_eq!(changes.description, None);
        assert_eq!(changes.vaccinated, None);
        assert!(!changes.is_empty());
    }

    #[test]
    fn empty_update_has_no_changes() {
        let form: AnimalUpdateForm = serde_json::from_str("{}").unwrap();
        assert!(form.into_changes().is_empty());
    }

    #[test]
    fn create_rejects_missing_field() {
        let client = lazy_client();
        let response = client.post("/animals/")
            .header(ContentType::JSON)
            .body(r#"{"name":"Rex","species":"dog"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["detail"][0]["loc"], json!(["body", "location"]));
        assert_eq!(body["detail"][0]["type"], json!("missing"));
    }

    #[test]
    fn create_rejects_wrong_type() {
        let client = lazy_client();
        let response = client.post("/animals/")
            .header(ContentType::JSON)
            .body(r#"{"name":"Rex","species":"dog","location":"Park","latitude":"north","longitude":2.0,"caretaker":"Ana"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
    }

    #[test]
    fn create_rejects_overlong_species() {
        let client = lazy_client();
        let response = client.post("/animals/")
            .header(ContentType::JSON)
            .body(r#"{"name":"Rex","species":"capybara-xl","location":"Park","latitude":1.0,"longitude":2.0,"caretaker":"Ana"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["detail"][0]["loc"], json!(["body", "species"]));
    }

    fn create_rex(client: &Client) -> Value {
        let response = client.post("/animals/")
            .header(ContentType::JSON)
            .body(REX)
            .dispatch();

        assert_eq!(response.status(), Status::Created);
        response.into_json().unwrap()
    }

    #[test]
    #[ignore = "needs DATABASE_URL"]
    fn create_then_get() {
        let client = live_client();

        let created = create_rex(&client);
        assert!(created["id"].as_i64().unwrap() > 0);
        assert_eq!(created["vaccinated"], json!(false));
        assert_eq!(created["neutered"], json!(false));
        assert!(created["date_added"].is_string());

        let response = client.get(format!("/animals/{}", created["id"])).dispatch();
        assert_eq!(response.status(), Status::Ok);
        let fetched: Value = response.into_json().unwrap();
        assert_eq!(fetched, created);

        let response = client.get("/animals/").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let all: Vec<Value> = response.into_json().unwrap();
        assert!(all.iter().any(|a| a["id"] == created["id"]));
    }

    #[test]
    #[ignore = "needs DATABASE_URL"]
    fn get_missing_is_not_found() {
        let client = live_client();

        let response = client.get("/animals/2147483647").dispatch();
        assert_eq!(response.status(), Status::NotFound);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body, json!({ "detail": "Animal não encontrado" }));
    }

    #[test]
    #[ignore = "needs DATABASE_URL"]
    fn sparse_update_keeps_other_fields() {
        let client = live_client();

        let created = create_rex(&client);
        let response = client.put(format!("/animals/{}", created["id"]))
            .header(ContentType::JSON)
            .body(r#"{"name":"X","species":"cat"}"#)
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let updated: Value = response.into_json().unwrap();
        assert_eq!(updated["name"], json!("X"));
        assert_eq!(updated["species"], json!("dog"));
        for key in &["location", "latitude", "longitude", "caretaker", "vaccinated", "date_added"] {
            assert_eq!(updated[*key], created[*key], "{} changed", key);
        }
    }

    #[test]
    #[ignore = "needs DATABASE_URL"]
    fn update_missing_is_not_found() {
        let client = live_client();

        let response = client.put("/animals/2147483647")
            .header(ContentType::JSON)
            .body(r#"{"name":"X"}"#)
            .dispatch();
        assert_eq!(response.status(), Status::NotFound);
    }

    #[test]
    #[ignore = "needs DATABASE_URL"]
    fn delete_then_get_is_not_found() {
        let client = live_client();

        let created = create_rex(&client);
        let uri = format!("/animals/{}", created["id"]);

        let response = client.delete(uri.clone()).dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body, json!({ "message": "Animal removido com sucesso" }));

        assert_eq!(client.get(uri.clone()).dispatch().status(), Status::NotFound);
        assert_eq!(client.delete(uri).dispatch().status(), Status::NotFound);
    }
}
