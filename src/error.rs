use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The storage engine refused a row (CHECK, NOT NULL or UNIQUE).
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Db(DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn is_constraint(&self) -> bool {
        matches!(self, AppError::Constraint(_))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return Self::Constraint(msg);
        }
        // SQLite reports CHECK and NOT NULL failures only through the message text.
        let msg = err.to_string();
        if msg.contains("constraint failed") {
            return Self::Constraint(msg);
        }
        Self::Db(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
