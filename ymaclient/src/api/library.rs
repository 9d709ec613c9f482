//! Sélection d'une piste dans la bibliothèque des pistes aimées

use super::CatalogClient;
use crate::error::{ClientError, Result};
use crate::models::{LikedTracksResponse, TrackDescriptor};
use rand::seq::IndexedRandom;
use tracing::debug;

impl CatalogClient {
    /// Choisit une piste aimée au hasard, uniformément sur la bibliothèque
    ///
    /// Interroge `/users/{uid}/likes/tracks` et tire un élément de
    /// `result.library.tracks`. Une bibliothèque vide est une erreur.
    pub async fn pick_random_liked_track(&self, uid: &str) -> Result<TrackDescriptor> {
        let url = format!("{}/users/{}/likes/tracks", self.base_url(), uid);
        let response: LikedTracksResponse = self.get_json(&url).await?;

        let tracks = response.result.library.tracks;
        debug!("Library holds {} liked tracks", tracks.len());

        let chosen = tracks
            .choose(&mut rand::rng())
            .ok_or(ClientError::EmptyLibrary)?;

        if chosen.id.is_empty() {
            return Err(ClientError::Parse("empty track id".to_string()));
        }

        Ok(TrackDescriptor {
            id: chosen.id.clone(),
        })
    }
}
