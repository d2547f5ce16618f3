use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;
