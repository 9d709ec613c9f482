//! État UI persisté et son stockage
//!
//! Le snapshot `UiState` est la seule copie durable de l'état de l'alarme ;
//! il survit aux redémarrages du processus. Le stockage se répare tout seul :
//! fichier absent ou corrompu, il réécrit le défaut « tout éditable » et ne
//! fait jamais échouer le chargement.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const HOURS_MIN: u32 = 0;
pub const HOURS_MAX: u32 = 23;
pub const MINUTES_MIN: u32 = 0;
pub const MINUTES_MAX: u32 = 59;

pub const DOWNLOAD_STATUS_NOT_DOWNLOADED: &str = "Music track is NOT downloaded.";
pub const DOWNLOAD_STATUS_DOWNLOADING: &str = "Music track is downloading.";
pub const DOWNLOAD_STATUS_DOWNLOADED: &str = "Music track is downloaded.";
pub const ALARM_STATUS_OFF: &str = "Alarm clock is OFF.";
pub const ALARM_STATUS_TURNING_ON: &str = "Alarm clock is turning on.";
pub const ALARM_STATUS_ON: &str = "Alarm clock is ON.";

/// Nom du fichier de snapshot
const UI_STATE_FILE_NAME: &str = "ui_state.json";

/// Snapshot de l'état UI de l'alarme
///
/// `hours` et `minutes` sont soit vides, soit des chaînes numériques
/// validées dans leur domaine (`0–23`, `0–59`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub is_hours_editable: bool,
    pub hours: String,
    pub is_minutes_editable: bool,
    pub minutes: String,
    pub is_switch_editable: bool,
    pub is_alarm_armed: bool,
    pub download_status: String,
    pub alarm_status: String,
}

impl Default for UiState {
    /// État de rendu initial, avant chargement du snapshot : tout désactivé
    fn default() -> Self {
        Self {
            is_hours_editable: false,
            hours: "00".to_string(),
            is_minutes_editable: false,
            minutes: "00".to_string(),
            is_switch_editable: false,
            is_alarm_armed: false,
            download_status: DOWNLOAD_STATUS_NOT_DOWNLOADED.to_string(),
            alarm_status: ALARM_STATUS_OFF.to_string(),
        }
    }
}

impl UiState {
    /// Défaut sûr du stockage : tout éditable, alarme désarmée
    pub fn unlocked() -> Self {
        Self {
            is_hours_editable: true,
            is_minutes_editable: true,
            is_switch_editable: true,
            ..Self::default()
        }
    }
}

/// Stockage du snapshot `UiState`
///
/// Une seule copie autoritaire sur disque, accès exclusif par mutex.
pub struct UiStateStore {
    dir: PathBuf,
    file_path: PathBuf,
    lock: Mutex<()>,
}

impl UiStateStore {
    /// Crée le stockage dans le répertoire documents donné
    pub fn new(documents_dir: impl Into<PathBuf>) -> Self {
        let dir = documents_dir.into();
        let file_path = dir.join(UI_STATE_FILE_NAME);
        Self {
            dir,
            file_path,
            lock: Mutex::new(()),
        }
    }

    /// Charge le snapshot depuis le disque
    ///
    /// Ne propage jamais d'erreur : fichier absent, il est créé avec le
    /// défaut sérialisé ; fichier illisible ou corrompu, il est supprimé et
    /// recréé avec le défaut. Dans tous les cas de réparation la valeur
    /// retournée est [`UiState::unlocked`].
    pub async fn load(&self) -> UiState {
        let _guard = self.lock.lock().await;
        let fallback = UiState::unlocked();

        // Créer le répertoire s'il n'existe pas
        if let Err(e) = fs::create_dir_all(&self.dir).await {
            warn!("Cannot create ui state directory: {}", e);
            return fallback;
        }

        // Créer le fichier avec le défaut s'il n'existe pas
        let exists = fs::try_exists(&self.file_path).await.unwrap_or(false);
        if !exists {
            if let Err(e) = self.write_state(&fallback).await {
                warn!("Cannot create default ui state file: {}", e);
            }
            return fallback;
        }

        // Lire et parser le fichier
        let text = match fs::read_to_string(&self.file_path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Cannot read ui state file: {}", e);
                self.heal(&fallback).await;
                return fallback;
            }
        };

        match serde_json::from_str::<UiState>(&text) {
            Ok(state) => {
                debug!("Loaded ui state from {}", self.file_path.display());
                state
            }
            Err(e) => {
                warn!("Corrupt ui state file, recreating default: {}", e);
                self.heal(&fallback).await;
                fallback
            }
        }
    }

    /// Persiste le snapshot, au mieux
    ///
    /// Les échecs sont journalisés et avalés : le chargement se répare au
    /// prochain démarrage.
    pub async fn save(&self, state: &UiState) {
        let _guard = self.lock.lock().await;

        if let Err(e) = fs::create_dir_all(&self.dir).await {
            warn!("Cannot create ui state directory: {}", e);
            return;
        }

        if let Err(e) = self.write_state(state).await {
            warn!("Cannot persist ui state: {}", e);
        }
    }

    /// Supprime le fichier corrompu et réécrit le défaut
    async fn heal(&self, fallback: &UiState) {
        if fs::try_exists(&self.file_path).await.unwrap_or(false) {
            if let Err(e) = fs::remove_file(&self.file_path).await {
                warn!("Cannot delete corrupt ui state file: {}", e);
                return;
            }
        }
        if let Err(e) = self.write_state(fallback).await {
            warn!("Cannot rewrite default ui state file: {}", e);
        }
    }

    /// Remplace le fichier par la sérialisation de l'état donné
    async fn write_state(&self, state: &UiState) -> Result<()> {
        // Supprimer l'ancien fichier avant d'écrire le nouveau
        if fs::try_exists(&self.file_path).await? {
            fs::remove_file(&self.file_path).await?;
        }

        let json = serde_json::to_string(state)?;
        fs::write(&self.file_path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_disabled() {
        let state = UiState::default();
        assert!(!state.is_hours_editable);
        assert!(!state.is_minutes_editable);
        assert!(!state.is_switch_editable);
        assert!(!state.is_alarm_armed);
        assert_eq!(state.hours, "00");
        assert_eq!(state.minutes, "00");
    }

    #[test]
    fn test_unlocked_is_all_editable_and_disarmed() {
        let state = UiState::unlocked();
        assert!(state.is_hours_editable);
        assert!(state.is_minutes_editable);
        assert!(state.is_switch_editable);
        assert!(!state.is_alarm_armed);
        assert_eq!(state.download_status, DOWNLOAD_STATUS_NOT_DOWNLOADED);
        assert_eq!(state.alarm_status, ALARM_STATUS_OFF);
    }
}
