use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Mount point not found: #{0}")]
    MountPointMissing(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Todo title cannot be empty")]
    EmptyTitle,

    #[error("Todo not found: {0}")]
    TodoNotFound(u32),

    #[error("Duplicate todo id in stored list: {0}")]
    DuplicateTodoId(u32),

    #[error("No todo ids left to assign")]
    IdsExhausted,
}
