//! Gestion des erreurs pour le stockage local

use thiserror::Error;

/// Type Result personnalisé pour ymastore
pub type Result<T> = std::result::Result<T, StoreError>;

/// Erreurs possibles lors de l'accès au stockage local
#[derive(Error, Debug)]
pub enum StoreError {
    /// Erreur du système de fichiers (création, suppression, écriture)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Le flux source du payload s'est interrompu en cours de copie
    #[error("Payload stream error: {0}")]
    Payload(std::io::Error),

    /// Erreur de sérialisation JSON
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
