use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitMeowError {
    #[error("Level error: {0}")]
    Level(#[from] crate::level::LevelError),

    #[error("Game error: {0}")]
    Game(#[from] crate::game::GameError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

pub type Result<T> = std::result::Result<T, GitMeowError>;
