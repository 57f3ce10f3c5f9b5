pub mod models;
pub mod schema;


use diesel::prelude::*;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::QueryResult;
use rocket::tokio::task::{self, JoinError};
use thiserror::Error;

use models::*;
use schema::animals::dsl::{self as a_dsl};
use schema::lost_animals::dsl::{self as l_dsl};


pub type PgPool = Pool<ConnectionManager<PgConnection>>;


#[derive(Debug, Error)]
pub enum DbError {
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("connection pool failed: {0}")]
    Pool(#[from] PoolError),

    #[error("database task failed: {0}")]
    Task(#[from] JoinError),
}


/// Storage handle shared by every request through Rocket state.
///
/// Each `run` checks one connection out of the pool and gives it back
/// when the job returns, whatever the outcome.
#[derive(Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    pub fn connect(database_url: &str, pool_size: u32) -> Result<Db, DbError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)?;

        Ok(Db { pool })
    }

    /// A pool that never opens a connection until asked to.
    #[cfg(test)]
    pub fn lazy(database_url: &str) -> Db {
        use std::time::Duration;

        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(1)
            .min_idle(Some(0))
            .connection_timeout(Duration::from_millis(100))
            .build_unchecked(manager);

        Db { pool }
    }

    pub fn create_tables(&self) -> Result<(), DbError> {
        let mut conn = self.pool.get()?;
        conn.batch_execute(schema::CREATE_TABLES)?;
        Ok(())
    }

    pub async fn run<F, T>(&self, job: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            job(&mut *conn).map_err(DbError::from)
        })
        .await?
    }
}


pub fn get_animals(conn: &mut PgConnection) -> QueryResult<Vec<Animal>> {
    a_dsl::animals
        .order(a_dsl::id.asc())
        .load::<Animal>(conn)
}

pub fn get_animal(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Animal>> {
    a_dsl::animals
        .find(id)
        .first::<Animal>(conn)
        .optional()
}

pub fn insert_animal(conn: &mut PgConnection, animal: &NewAnimal) -> QueryResult<Animal> {
    diesel::insert_into(schema::animals::table)
        .values(animal)
        .get_result::<Animal>(conn)
}

pub fn update_animal(conn: &mut PgConnection, id: i32, changes: &AnimalChanges)
    -> QueryResult<Option<Animal>> {

    if changes.is_empty() {
        return get_animal(conn, id);
    }

    diesel::update(a_dsl::animals.find(id))
        .set(changes)
        .get_result::<Animal>(conn)
        .optional()
}

pub fn delete_animal(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(a_dsl::animals.find(id))
        .execute(conn)
}

pub fn get_lost_reports(conn: &mut PgConnection, found: bool) -> QueryResult<Vec<LostAnimal>> {
    l_dsl::lost_animals
        .filter(l_dsl::found.eq(found))
        .order(l_dsl::id.asc())
        .load::<LostAnimal>(conn)
}

pub fn insert_lost_report(conn: &mut PgConnection, report: &NewLostAnimal) -> QueryResult<LostAnimal> {
    diesel::insert_into(schema::lost_animals::table)
        .values(report)
        .get_result::<LostAnimal>(conn)
}

/// Returns the number of matched rows. Marking an already found
/// report still matches it.
pub fn mark_lost_report_found(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    diesel::update(l_dsl::lost_animals.find(id))
        .set(l_dsl::found.eq(true))
        .execute(conn)
}
