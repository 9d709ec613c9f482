//! Gestion des erreurs pour le client Yandex Music

use thiserror::Error;

/// Type Result personnalisé pour ymaclient
pub type Result<T> = std::result::Result<T, ClientError>;

/// Erreurs possibles lors de l'utilisation du client Yandex Music
#[derive(Error, Debug)]
pub enum ClientError {
    /// Aucun token de session disponible (login externe pas encore effectué)
    #[error("No session token available")]
    AuthMissing,

    /// Erreur HTTP (réseau inaccessible, transport interrompu)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Réponse non-2xx du serveur
    #[error("Server returned status {code}")]
    Status { code: u16 },

    /// Erreur de parsing JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Erreur de parsing XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Payload présent mais de forme inattendue
    #[error("Malformed payload: {0}")]
    Parse(String),

    /// URL dont l'autorité ne peut pas être extraite
    #[error("Cannot derive host from URL: {0}")]
    BadUrl(String),

    /// La bibliothèque de pistes aimées est vide
    #[error("The liked tracks library is empty")]
    EmptyLibrary,

    /// Aucune variante mp3 dans les informations de téléchargement
    #[error("No mp3 variant in download info")]
    NoMp3Variant,

    /// Descripteur XML incomplet (host/path/ts/s requis, tous non vides)
    #[error("Incomplete download descriptor")]
    IncompleteDescriptor,

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl ClientError {
    /// Crée une erreur depuis un code de statut HTTP non-2xx
    pub fn from_status_code(code: u16) -> Self {
        Self::Status { code }
    }

    /// Vérifie si l'erreur vient d'un transport réseau défaillant
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(_))
    }
}
