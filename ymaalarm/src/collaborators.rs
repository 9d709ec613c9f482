//! Contrats des collaborateurs externes
//!
//! L'orchestrateur consomme ces surfaces sans connaître leur implémentation :
//! vérification de permissions, planificateur d'alarme du système et service
//! de lecture. Le binaire fournit des implémentations hôte ; les tests des
//! maquettes scriptées.

use async_trait::async_trait;
use ymaclient::{AudioPayload, TrackAcquisitionService};

/// Vérification et demande des permissions externes
#[async_trait]
pub trait PermissionCheck: Send + Sync {
    /// Le réseau est-il joignable ?
    async fn is_network_reachable(&self) -> bool;

    /// La planification d'alarme exacte est-elle autorisée ?
    async fn can_schedule_exact_alarm(&self) -> bool;

    /// Notifications et intent plein écran sont-ils autorisés ?
    async fn has_notification_and_full_screen_intent(&self) -> bool;

    /// Invite l'utilisateur à rétablir le réseau (fire-and-forget)
    async fn request_network(&self);

    /// Invite l'utilisateur à accorder l'alarme exacte (fire-and-forget)
    async fn request_exact_alarm(&self);

    /// Invite l'utilisateur à accorder les notifications (fire-and-forget)
    async fn request_notification(&self);
}

/// Planificateur d'alarme du système
#[async_trait]
pub trait AlarmScheduler: Send + Sync {
    /// Arme l'alarme pour l'instant donné (millisecondes epoch)
    async fn arm(&self, epoch_millis: i64) -> Result<(), String>;

    /// Désarme toute alarme existante (idempotent)
    async fn disarm(&self) -> Result<(), String>;
}

/// Service de lecture audio
#[async_trait]
pub trait PlaybackService: Send + Sync {
    /// Arrête toute lecture en cours
    async fn stop(&self) -> Result<(), String>;
}

/// Source d'une piste jouable pour la session courante
///
/// Le découplage permet aux tests de substituer un pipeline simulé à la
/// chaîne réseau complète.
#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Récupère une piste prête à être recopiée sur disque
    async fn fetch_track(&self) -> ymaclient::Result<AudioPayload>;
}

#[async_trait]
impl TrackSource for TrackAcquisitionService {
    async fn fetch_track(&self) -> ymaclient::Result<AudioPayload> {
        TrackAcquisitionService::fetch_track(self).await
    }
}
