table! {
    animals (id) {
        id -> Integer,
        name -> Varchar,
        photo -> Nullable<Varchar>,
        species -> Varchar,
        location -> Varchar,
        latitude -> Double,
        longitude -> Double,
        caretaker -> Varchar,
        caretaker_contact -> Nullable<Varchar>,
        vaccinated -> Bool,
        vaccine_details -> Nullable<Varchar>,
        neutered -> Bool,
        description -> Nullable<Varchar>,
        date_added -> Timestamptz,
    }
}

table! {
    #[sql_name = "animais_perdidos"]
    lost_animals (id) {
        id -> Integer,
        name -> Varchar,
        photo -> Nullable<Varchar>,
        species -> Varchar,
        last_seen_location -> Varchar,
        last_seen_date -> Timestamp,
        description -> Varchar,
        contact_name -> Varchar,
        contact_phone -> Varchar,
        found -> Bool,
        date_reported -> Timestamptz,
    }
}

/// DDL run once at startup. Statements are idempotent.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS animals (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    photo VARCHAR(500),
    species VARCHAR(10) NOT NULL,
    location VARCHAR(200) NOT NULL,
    latitude DOUBLE PRECISION NOT NULL,
    longitude DOUBLE PRECISION NOT NULL,
    caretaker VARCHAR(100) NOT NULL,
    caretaker_contact VARCHAR(20),
    vaccinated BOOLEAN NOT NULL DEFAULT FALSE,
    vaccine_details VARCHAR(500),
    neutered BOOLEAN NOT NULL DEFAULT FALSE,
    description VARCHAR(1000),
    date_added TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS ix_animals_name ON animals (name);
CREATE INDEX IF NOT EXISTS ix_animals_species ON animals (species);

CREATE TABLE IF NOT EXISTS animais_perdidos (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    photo VARCHAR(500),
    species VARCHAR(10) NOT NULL,
    last_seen_location VARCHAR(200) NOT NULL,
    last_seen_date TIMESTAMP NOT NULL,
    description VARCHAR(1000) NOT NULL,
    contact_name VARCHAR(100) NOT NULL,
    contact_phone VARCHAR(20) NOT NULL,
    found BOOLEAN NOT NULL DEFAULT FALSE,
    date_reported TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS ix_animais_perdidos_name ON animais_perdidos (name);
CREATE INDEX IF NOT EXISTS ix_animais_perdidos_species ON animais_perdidos (species);
CREATE INDEX IF NOT EXISTS ix_animais_perdidos_found ON animais_perdidos (found);
"#;
