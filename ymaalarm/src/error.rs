//! Gestion des erreurs de l'orchestrateur d'alarme

use thiserror::Error;

/// Permissions externes requises avant d'armer l'alarme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Planification d'alarme exacte
    ExactAlarm,
    /// Notifications et intent plein écran
    NotificationAndFullScreenIntent,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::ExactAlarm => write!(f, "exact alarm scheduling"),
            Permission::NotificationAndFullScreenIntent => {
                write!(f, "notification and full screen intent")
            }
        }
    }
}

/// Erreurs possibles de la séquence d'armement
///
/// L'orchestrateur ne laisse jamais remonter ces erreurs jusqu'à l'UI :
/// chacune est journalisée puis convertie en retour à l'état désarmé.
#[derive(Error, Debug)]
pub enum ArmError {
    /// Permission manquante (demandée au collaborateur externe)
    #[error("Permission denied: {0}")]
    PermissionDenied(Permission),

    /// Réseau inaccessible au moment du basculement
    #[error("Network is not reachable")]
    NetworkUnavailable,

    /// Échec de la chaîne d'acquisition de piste
    #[error("Track acquisition failed: {0}")]
    Acquisition(#[from] ymaclient::ClientError),

    /// Échec de la persistance locale
    #[error("Storage failed: {0}")]
    Storage(#[from] ymastore::StoreError),

    /// Échec du planificateur d'alarme externe
    #[error("Alarm scheduler error: {0}")]
    Scheduler(String),

    /// Échec du service de lecture externe
    #[error("Playback service error: {0}")]
    Playback(String),

    /// Heures/minutes absentes ou hors domaine
    #[error("Invalid alarm time")]
    InvalidTime,
}
