use thiserror::Error;

/// Fallos del store remoto (red, HTTP, respuesta ilegible o rechazo explícito)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// El mensaje es el que se muestra en la página de error
    #[error("Erreur {0}")]
    Http(u16),

    #[error("Erreur réseau : {0}")]
    Network(String),

    #[error("Réponse illisible : {0}")]
    Decode(String),

    #[error("Aucune note de frais à mettre à jour")]
    MissingSelector,

    #[error("{0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;
