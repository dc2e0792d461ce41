use crate::db::models::DbCar;
use crate::db::patch::{CarFields, CarUpdate, DbPatchable};
use crate::db::schema::SQLITE_INIT;
use crate::error::GarageError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a car and return the stored row.
    Create(CarFields, RpcReplyPort<Result<DbCar, GarageError>>),

    /// List every stored car.
    List(RpcReplyPort<Result<Vec<DbCar>, GarageError>>),

    /// Get a car by id.
    Get(i64, RpcReplyPort<Result<DbCar, GarageError>>),

    /// Apply a partial update and return the merged row.
    Update(CarUpdate, RpcReplyPort<Result<DbCar, GarageError>>),

    /// Hard-delete a car by id.
    Delete(i64, RpcReplyPort<Result<(), GarageError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create(&self, fields: CarFields) -> Result<DbCar, GarageError> {
        ractor::call!(self.actor, DbActorMessage::Create, fields)
            .map_err(|e| GarageError::RactorError(format!("DbActor Create RPC failed: {e}")))?
    }

    pub async fn list(&self) -> Result<Vec<DbCar>, GarageError> {
        ractor::call!(self.actor, DbActorMessage::List)
            .map_err(|e| GarageError::RactorError(format!("DbActor List RPC failed: {e}")))?
    }

    pub async fn get(&self, id: i64) -> Result<DbCar, GarageError> {
        ractor::call!(self.actor, DbActorMessage::Get, id)
            .map_err(|e| GarageError::RactorError(format!("DbActor Get RPC failed: {e}")))?
    }

    pub async fn update(&self, update: CarUpdate) -> Result<DbCar, GarageError> {
        ractor::call!(self.actor, DbActorMessage::Update, update)
            .map_err(|e| GarageError::RactorError(format!("DbActor Update RPC failed: {e}")))?
    }

    pub async fn delete(&self, id: i64) -> Result<(), GarageError> {
        ractor::call!(self.actor, DbActorMessage::Delete, id)
            .map_err(|e| GarageError::RactorError(format!("DbActor Delete RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Create(fields, reply) => {
                let res = self.create_car(&state.pool, fields).await;
                let _ = reply.send(res);
            }
            DbActorMessage::List(reply) => {
                let res = self.list_cars(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Get(id, reply) => {
                let res = self.get_car(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Update(update, reply) => {
                let res = update.apply_patch(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(id, reply) => {
                let res = self.delete_car(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn create_car(&self, pool: &SqlitePool, fields: CarFields) -> Result<DbCar, GarageError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, DbCar>(
            r#"
        INSERT INTO cars (make, model, year, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, make, model, year, created_at, updated_at
        "#,
        )
        .bind(fields.make)
        .bind(fields.model)
        .bind(fields.year)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        debug!(table = "cars", id = row.id, "db row inserted");
        Ok(row)
    }

    async fn list_cars(&self, pool: &SqlitePool) -> Result<Vec<DbCar>, GarageError> {
        let rows = sqlx::query_as::<_, DbCar>(
            r#"
        SELECT id, make, model, year, created_at, updated_at
        FROM cars
        ORDER BY id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn get_car(&self, pool: &SqlitePool, id: i64) -> Result<DbCar, GarageError> {
        let row = sqlx::query_as::<_, DbCar>(
            r#"
        SELECT id, make, model, year, created_at, updated_at
        FROM cars
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.ok_or(GarageError::NotFound { id })
    }

    async fn delete_car(&self, pool: &SqlitePool, id: i64) -> Result<(), GarageError> {
        let res = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        let affected = res.rows_affected();
        debug!(table = "cars", id, affected, "db delete applied");

        if affected == 0 {
            return Err(GarageError::NotFound { id });
        }
        Ok(())
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// Fails if the database cannot be opened or the schema cannot be applied.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, GarageError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| GarageError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), GarageError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
