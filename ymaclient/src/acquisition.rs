//! Service d'acquisition d'une piste jouable
//!
//! Compose les étapes du client en une unique opération publique :
//! « récupérer une piste jouable pour cette session ». Chaque étape
//! court-circuite vers l'erreur ; il n'y a ni réessai ni résultat partiel.

use crate::api::{CatalogClient, signing};
use crate::error::Result;
use crate::payload::AudioPayload;
use tracing::{debug, info};

/// Service haut-niveau d'acquisition d'une piste
pub struct TrackAcquisitionService {
    client: CatalogClient,
}

impl TrackAcquisitionService {
    /// Crée le service autour d'un client déjà configuré
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Crée le service depuis un objet Config
    pub fn from_config(config: &ymaconfig::Config) -> Result<Self> {
        Ok(Self::new(CatalogClient::from_config(config)?))
    }

    /// Retourne le client sous-jacent
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Récupère une piste aimée aléatoire, prête à être recopiée sur disque
    ///
    /// Chaîne stricte : identité → piste aimée aléatoire → négociation →
    /// descripteur XML → signature → téléchargement. La première étape en
    /// échec interrompt toute la chaîne.
    pub async fn fetch_track(&self) -> Result<AudioPayload> {
        let uid = self.client.resolve_uid().await?;

        let track = self.client.pick_random_liked_track(&uid).await?;
        info!("Picked liked track {}", track.id);

        let descriptor_url = self.client.negotiate_download(&track.id).await?;
        let descriptor = self.client.fetch_descriptor(&descriptor_url).await?;

        let sign = signing::sign(&descriptor.path, &descriptor.s);
        debug!("Computed download signature for track {}", track.id);

        self.client.fetch_audio(&descriptor, &sign).await
    }
}
