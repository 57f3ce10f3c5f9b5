use rocket::{
    Request, Response,
    fairing::{Fairing, Info, Kind},
    http::{Method, Status},
};
use std::io::Cursor;


/// Local frontend dev servers.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const PREFLIGHT_MAX_AGE: &str = "600";


pub struct Cors {
    origins: &'static [&'static str],
}

impl Cors {
    pub fn new(origins: &'static [&'static str]) -> Self {
        Cors { origins }
    }

    fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|&o| o == origin)
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let origin = match req.headers().get_one("Origin") {
            Some(origin) => origin.to_owned(),
            None => return,
        };

        let preflight = req.method() == Method::Options
            && req.headers().contains("Access-Control-Request-Method");

        if !self.is_allowed(&origin) {
            if preflight {
                let msg = "Disallowed CORS origin";
                res.set_status(Status::BadRequest);
                res.set_sized_body(msg.len(), Cursor::new(msg));
            }
            return;
        }

        res.set_raw_header("Access-Control-Allow-Origin", origin);
        res.set_raw_header("Access-Control-Allow-Credentials", "true");
        res.set_raw_header("Vary", "Origin");

        if preflight {
            res.set_raw_header("Access-Control-Allow-Methods", ALLOWED_METHODS);
            res.set_raw_header("Access-Control-Max-Age", PREFLIGHT_MAX_AGE);

            if let Some(headers) = req.headers().get_one("Access-Control-Request-Headers") {
                res.set_raw_header("Access-Control-Allow-Headers", headers.to_owned());
            }

            res.set_status(Status::Ok);
        }
    }
}

/// Answers preflight requests on every path; the headers come from `Cors`.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::Ok
}
