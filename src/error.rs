use log::error;
use rocket::{
    http::Status,
    request::Request,
    response::{self, Responder},
    serde::json::{self, Json},
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::db::DbError;


pub const NOT_FOUND_MESSAGE: &str = "Animal não encontrado";


/// One entry of a 422 response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn body_field(field: &str, msg: String, kind: &str) -> Self {
        FieldError {
            loc: vec!["body".into(), field.into()],
            msg,
            kind: kind.into(),
        }
    }
}


#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error("invalid request body")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl ApiError {
    /// Turns a failed JSON body guard into a 422.
    pub fn from_json(err: json::Error<'_>) -> Self {
        let detail = match err {
            json::Error::Io(err) => FieldError {
                loc: vec!["body".into()],
                msg: err.to_string(),
                kind: "io_error".into(),
            },
            json::Error::Parse(_, err) => {
                let msg = err.to_string();
                let missing = missing_field(&msg).map(str::to_owned);

                if let Some(field) = missing {
                    FieldError::body_field(&field, "Field required".into(), "missing")
                }
                else {
                    let kind = match err.classify() {
                        serde_json::error::Category::Data => "value_error",
                        _ => "json_invalid",
                    };

                    FieldError {
                        loc: vec!["body".into()],
                        msg,
                        kind: kind.into(),
                    }
                }
            },
        };

        ApiError::Validation(vec![detail])
    }
}

/// Field name out of serde's "missing field `x`" message.
fn missing_field(msg: &str) -> Option<&str> {
    let rest = msg.strip_prefix("missing field `")?;
    rest.split('`').next().filter(|field| !field.is_empty())
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        match self {
            ApiError::NotFound => {
                (Status::NotFound, Json(json!({ "detail": NOT_FOUND_MESSAGE })))
                    .respond_to(req)
            },
            ApiError::Validation(detail) => {
                (Status::UnprocessableEntity, Json(json!({ "detail": detail })))
                    .respond_to(req)
            },
            ApiError::Storage(err) => {
                error!("{} {}: {}", req.method(), req.uri(), err);
                Err(Status::InternalServerError)
            },
        }
    }
}


#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request<'_>) -> Json<Value> {
    Json(json!({ "detail": status.reason().unwrap_or("Unknown Error") }))
}
