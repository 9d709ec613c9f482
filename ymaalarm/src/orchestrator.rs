//! Machine à états de l'alarme
//!
//! L'orchestrateur possède l'état UI en mémoire et le publie par un canal
//! `watch` : un seul écrivain, remplacement complet du snapshot, lecteurs
//! jamais bloqués. Chaque basculement laisse le système dans l'un des deux
//! états cohérents : alarme armée avec piste en cache, ou alarme désarmée.

use crate::collaborators::{AlarmScheduler, PermissionCheck, PlaybackService, TrackSource};
use crate::error::{ArmError, Permission};
use crate::schedule::next_occurrence;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use ymastore::{
    ALARM_STATUS_OFF, ALARM_STATUS_ON, ALARM_STATUS_TURNING_ON, DOWNLOAD_STATUS_DOWNLOADED,
    DOWNLOAD_STATUS_DOWNLOADING, DOWNLOAD_STATUS_NOT_DOWNLOADED, HOURS_MAX, HOURS_MIN, MINUTES_MAX,
    MINUTES_MIN, TrackStore, UiState, UiStateStore,
};

/// État logique de la machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    /// Alarme désarmée, tout éditable
    Off,
    /// Séquence d'armement en cours, rien d'éditable
    Arming,
    /// Alarme armée, seul l'interrupteur est éditable
    On,
}

/// Orchestrateur du basculement d'alarme
pub struct AlarmOrchestrator {
    permissions: Arc<dyn PermissionCheck>,
    scheduler: Arc<dyn AlarmScheduler>,
    playback: Arc<dyn PlaybackService>,
    source: Arc<dyn TrackSource>,
    tracks: Arc<TrackStore>,
    snapshots: Arc<UiStateStore>,
    state_tx: watch::Sender<UiState>,
}

impl AlarmOrchestrator {
    /// Assemble l'orchestrateur à partir de ses collaborateurs injectés
    pub fn new(
        permissions: Arc<dyn PermissionCheck>,
        scheduler: Arc<dyn AlarmScheduler>,
        playback: Arc<dyn PlaybackService>,
        source: Arc<dyn TrackSource>,
        tracks: Arc<TrackStore>,
        snapshots: Arc<UiStateStore>,
    ) -> Self {
        let (state_tx, _) = watch::channel(UiState::default());
        Self {
            permissions,
            scheduler,
            playback,
            source,
            tracks,
            snapshots,
            state_tx,
        }
    }

    /// S'abonne aux snapshots d'état
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state_tx.subscribe()
    }

    /// Snapshot courant
    pub fn current_state(&self) -> UiState {
        self.state_tx.borrow().clone()
    }

    /// État logique dérivé du snapshot courant
    pub fn state(&self) -> AlarmState {
        let snapshot = self.state_tx.borrow();
        if snapshot.is_alarm_armed {
            AlarmState::On
        } else if !snapshot.is_switch_editable {
            AlarmState::Arming
        } else {
            AlarmState::Off
        }
    }

    /// Recharge l'état persisté au démarrage du processus
    ///
    /// Le champ `is_alarm_armed` du snapshot fait foi ; le planificateur
    /// externe n'est pas re-consulté.
    pub async fn restore(&self) {
        let state = self.snapshots.load().await;
        debug!(armed = state.is_alarm_armed, "Restored persisted ui state");
        self.state_tx.send_replace(state);
    }

    /// Saisie du champ heures : texte validé ou champ remis à vide
    pub fn set_hours(&self, text: &str) {
        let accepted = parse_time_component(text, HOURS_MIN, HOURS_MAX).is_some();
        let new_text = if accepted { text.to_string() } else { String::new() };
        self.state_tx.send_if_modified(|s| {
            if s.hours != new_text {
                s.hours = new_text;
                true
            } else {
                false
            }
        });
    }

    /// Saisie du champ minutes : texte validé ou champ remis à vide
    pub fn set_minutes(&self, text: &str) {
        let accepted = parse_time_component(text, MINUTES_MIN, MINUTES_MAX).is_some();
        let new_text = if accepted { text.to_string() } else { String::new() };
        self.state_tx.send_if_modified(|s| {
            if s.minutes != new_text {
                s.minutes = new_text;
                true
            } else {
                false
            }
        });
    }

    /// Basculement de l'interrupteur d'alarme
    pub async fn toggle(&self, switched_on: bool) {
        if switched_on {
            self.arm().await;
        } else {
            self.disarm().await;
        }
    }

    /// Séquence d'armement complète
    ///
    /// Toute étape en échec journalise sa cause et ramène l'état à désarmé ;
    /// l'UI ne voit que les deux textes de statut courts.
    async fn arm(&self) {
        // Désactiver les éléments interactifs pendant la séquence
        self.state_tx.send_modify(|s| {
            s.is_hours_editable = false;
            s.is_minutes_editable = false;
            s.is_switch_editable = false;
            s.download_status = DOWNLOAD_STATUS_DOWNLOADING.to_string();
            s.alarm_status = ALARM_STATUS_TURNING_ON.to_string();
        });

        if let Err(e) = self.run_arm_sequence().await {
            warn!("Arming aborted: {}", e);
            self.rollback();
        }
    }

    async fn run_arm_sequence(&self) -> Result<(), ArmError> {
        // Vérifier le réseau
        if !self.permissions.is_network_reachable().await {
            self.permissions.request_network().await;
            return Err(ArmError::NetworkUnavailable);
        }

        // Vérifier la permission d'alarme exacte
        if !self.permissions.can_schedule_exact_alarm().await {
            self.permissions.request_exact_alarm().await;
            return Err(ArmError::PermissionDenied(Permission::ExactAlarm));
        }

        // Vérifier notifications et intent plein écran
        if !self.permissions.has_notification_and_full_screen_intent().await {
            self.permissions.request_notification().await;
            return Err(ArmError::PermissionDenied(
                Permission::NotificationAndFullScreenIntent,
            ));
        }

        // Télécharger la piste
        let payload = self.source.fetch_track().await?;

        // La persister dans l'emplacement unique
        self.tracks.save(payload.into_stream()).await?;
        self.state_tx
            .send_modify(|s| s.download_status = DOWNLOAD_STATUS_DOWNLOADED.to_string());

        // Désarmer toute alarme et lecture précédentes (idempotent)
        self.scheduler.disarm().await.map_err(ArmError::Scheduler)?;
        self.playback.stop().await.map_err(ArmError::Playback)?;

        // Lire l'heure demandée dans le snapshot courant
        let snapshot = self.current_state();
        let hours = parse_time_component(&snapshot.hours, HOURS_MIN, HOURS_MAX)
            .ok_or(ArmError::InvalidTime)?;
        let minutes = parse_time_component(&snapshot.minutes, MINUTES_MIN, MINUTES_MAX)
            .ok_or(ArmError::InvalidTime)?;

        // Armer pour la prochaine occurrence
        let at = next_occurrence(hours, minutes, Local::now()).ok_or(ArmError::InvalidTime)?;
        self.scheduler.arm(at).await.map_err(ArmError::Scheduler)?;

        // Valider : interrupteur rendu, heures/minutes gelées tant qu'armé
        let mut committed = self.current_state();
        committed.is_switch_editable = true;
        committed.is_alarm_armed = true;
        committed.alarm_status = ALARM_STATUS_ON.to_string();
        self.snapshots.save(&committed).await;
        self.state_tx.send_replace(committed);

        info!(hours, minutes, "Alarm armed");
        Ok(())
    }

    /// Retour à l'état désarmé, saisies rendues, textes conservés
    fn rollback(&self) {
        self.state_tx.send_modify(|s| {
            s.is_hours_editable = true;
            s.is_minutes_editable = true;
            s.is_switch_editable = true;
            s.is_alarm_armed = false;
            s.download_status = DOWNLOAD_STATUS_NOT_DOWNLOADED.to_string();
            s.alarm_status = ALARM_STATUS_OFF.to_string();
        });
    }

    /// Séquence d'extinction
    ///
    /// Si l'un des deux arrêts échoue, seul l'interrupteur est rendu et
    /// l'état reste logiquement armé : un état incohérent mais sûr, dont on
    /// sort en rebasculant.
    async fn disarm(&self) {
        self.state_tx.send_modify(|s| {
            s.is_hours_editable = false;
            s.is_minutes_editable = false;
            s.is_switch_editable = false;
        });

        let alarm_stopped = self.scheduler.disarm().await;
        let playback_stopped = self.playback.stop().await;

        if alarm_stopped.is_err() || playback_stopped.is_err() {
            if let Err(e) = &alarm_stopped {
                warn!("Alarm disarm failed: {}", e);
            }
            if let Err(e) = &playback_stopped {
                warn!("Playback stop failed: {}", e);
            }
            self.state_tx.send_modify(|s| s.is_switch_editable = true);
            return;
        }

        let mut committed = self.current_state();
        committed.is_hours_editable = true;
        committed.is_minutes_editable = true;
        committed.is_switch_editable = true;
        committed.is_alarm_armed = false;
        committed.download_status = DOWNLOAD_STATUS_NOT_DOWNLOADED.to_string();
        committed.alarm_status = ALARM_STATUS_OFF.to_string();
        self.snapshots.save(&committed).await;
        self.state_tx.send_replace(committed);

        info!("Alarm disarmed");
    }
}

/// Parse une composante horaire dans son domaine
fn parse_time_component(text: &str, min: u32, max: u32) -> Option<u32> {
    if min > max {
        return None;
    }
    let value: u32 = text.parse().ok()?;
    if value >= min && value <= max {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_component_domain() {
        assert_eq!(parse_time_component("07", 0, 23), Some(7));
        assert_eq!(parse_time_component("0", 0, 23), Some(0));
        assert_eq!(parse_time_component("23", 0, 23), Some(23));
        assert_eq!(parse_time_component("24", 0, 23), None);
        assert_eq!(parse_time_component("59", 0, 59), Some(59));
        assert_eq!(parse_time_component("60", 0, 59), None);
        assert_eq!(parse_time_component("", 0, 59), None);
        assert_eq!(parse_time_component("-1", 0, 59), None);
        assert_eq!(parse_time_component("abc", 0, 59), None);
    }

    #[test]
    fn test_parse_time_component_rejects_inverted_bounds() {
        assert_eq!(parse_time_component("5", 10, 0), None);
    }
}
