//! Structures de données pour représenter les réponses de l'API Yandex Music

use serde::{Deserialize, Deserializer};

/// Désérialiseur flexible pour les IDs qui peuvent être des strings ou des integers
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("ID must be a string or number")),
    }
}

/// Piste sélectionnée dans la bibliothèque des pistes aimées
///
/// Valeur éphémère : produite par la sélection aléatoire, consommée
/// immédiatement par la négociation de téléchargement, jamais persistée.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDescriptor {
    /// Identifiant de la piste
    pub id: String,
}

// ============ Réponses de l'API ============

/// Réponse de l'endpoint /account/status
#[derive(Debug, Deserialize)]
pub(crate) struct AccountStatusResponse {
    pub result: AccountStatusResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountStatusResult {
    pub account: AccountInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountInfo {
    #[serde(deserialize_with = "deserialize_id")]
    pub uid: String,
}

/// Réponse de l'endpoint /users/{uid}/likes/tracks
#[derive(Debug, Deserialize)]
pub(crate) struct LikedTracksResponse {
    pub result: LikedTracksResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LikedTracksResult {
    pub library: LikedTracksLibrary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LikedTracksLibrary {
    #[serde(default)]
    pub tracks: Vec<LikedTrack>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LikedTrack {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// Réponse de l'endpoint /tracks/{id}/download-info
#[derive(Debug, Deserialize)]
pub(crate) struct DownloadInfoResponse {
    #[serde(default)]
    pub result: Vec<DownloadVariant>,
}

/// Une variante de téléchargement proposée par le serveur
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DownloadVariant {
    #[serde(default)]
    pub codec: String,
    #[serde(rename = "downloadInfoUrl", default)]
    pub download_info_url: String,
    #[serde(rename = "bitrateInKbps", default)]
    pub bitrate_in_kbps: Option<u32>,
}
