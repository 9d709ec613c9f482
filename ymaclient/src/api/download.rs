//! Négociation et récupération du téléchargement
//!
//! Trois étapes : choisir la meilleure variante mp3 dans `download-info`,
//! récupérer le descripteur XML signable, puis télécharger le fichier
//! depuis l'URL signée.

use super::CatalogClient;
use crate::descriptor::{DownloadDescriptor, parse_download_descriptor};
use crate::error::{ClientError, Result};
use crate::models::{DownloadInfoResponse, DownloadVariant};
use crate::payload::AudioPayload;
use tracing::debug;

impl CatalogClient {
    /// Négocie l'URL du descripteur de téléchargement d'une piste
    ///
    /// Interroge `/tracks/{id}/download-info` et retient, parmi les entrées
    /// `codec == "mp3"`, celle au `bitrateInKbps` strictement le plus élevé.
    pub async fn negotiate_download(&self, track_id: &str) -> Result<String> {
        let url = format!("{}/tracks/{}/download-info", self.base_url(), track_id);
        let response: DownloadInfoResponse = self.get_json(&url).await?;

        let best = best_mp3_variant(&response.result).ok_or(ClientError::NoMp3Variant)?;
        if best.download_info_url.is_empty() {
            return Err(ClientError::Parse("empty downloadInfoUrl".to_string()));
        }

        debug!(
            "Selected mp3 variant at {} kbps",
            best.bitrate_in_kbps.unwrap_or(0)
        );
        Ok(best.download_info_url.clone())
    }

    /// Récupère et parse le descripteur XML de téléchargement
    pub async fn fetch_descriptor(&self, url: &str) -> Result<DownloadDescriptor> {
        let response = self.http_get(url).await?;
        let xml = response.text().await?;
        parse_download_descriptor(&xml)
    }

    /// Télécharge le fichier audio depuis l'URL signée
    ///
    /// L'URL est assemblée en `https://{host}/get-mp3/{sign}/{ts}{path}` ;
    /// le corps de la réponse est rendu tel quel, en flux.
    pub async fn fetch_audio(
        &self,
        descriptor: &DownloadDescriptor,
        sign: &str,
    ) -> Result<AudioPayload> {
        let url = audio_url(descriptor, sign);
        let response = self.http_get(&url).await?;
        Ok(AudioPayload::from_response(response))
    }
}

/// Sélectionne la variante mp3 au bitrate strictement le plus élevé
///
/// Les variantes d'un autre codec sont ignorées quel que soit leur bitrate,
/// et une variante sans bitrate ne concourt pas.
pub(crate) fn best_mp3_variant(variants: &[DownloadVariant]) -> Option<&DownloadVariant> {
    let mut best: Option<&DownloadVariant> = None;
    let mut max_bitrate: u32 = 0;

    for variant in variants {
        if variant.codec != "mp3" {
            continue;
        }
        if let Some(bitrate) = variant.bitrate_in_kbps {
            if bitrate > max_bitrate {
                best = Some(variant);
                max_bitrate = bitrate;
            }
        }
    }

    best
}

/// Assemble l'URL signée du fichier audio
pub(crate) fn audio_url(descriptor: &DownloadDescriptor, sign: &str) -> String {
    format!(
        "https://{}/get-mp3/{}/{}{}",
        descriptor.host, sign, descriptor.ts, descriptor.path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(codec: &str, bitrate: Option<u32>, url: &str) -> DownloadVariant {
        DownloadVariant {
            codec: codec.to_string(),
            download_info_url: url.to_string(),
            bitrate_in_kbps: bitrate,
        }
    }

    #[test]
    fn test_best_mp3_ignores_higher_bitrate_aac() {
        let variants = [
            variant("mp3", Some(128), "u128"),
            variant("mp3", Some(320), "u320"),
            variant("aac", Some(500), "u500"),
        ];
        let best = best_mp3_variant(&variants).unwrap();
        assert_eq!(best.download_info_url, "u320");
        assert_eq!(best.bitrate_in_kbps, Some(320));
    }

    #[test]
    fn test_no_mp3_variant() {
        let variants = [variant("aac", Some(500), "u500")];
        assert!(best_mp3_variant(&variants).is_none());
    }

    #[test]
    fn test_variant_without_bitrate_does_not_compete() {
        let variants = [
            variant("mp3", None, "unrated"),
            variant("mp3", Some(64), "u64"),
        ];
        let best = best_mp3_variant(&variants).unwrap();
        assert_eq!(best.download_info_url, "u64");
    }

    #[test]
    fn test_empty_variant_list() {
        assert!(best_mp3_variant(&[]).is_none());
    }

    #[test]
    fn test_audio_url_shape() {
        let descriptor = DownloadDescriptor {
            host: "storage.example.net".to_string(),
            path: "/get-audio/1/t.mp3".to_string(),
            ts: "5f1e2d3c".to_string(),
            s: "nonce".to_string(),
        };
        assert_eq!(
            audio_url(&descriptor, "deadbeef"),
            "https://storage.example.net/get-mp3/deadbeef/5f1e2d3c/get-audio/1/t.mp3"
        );
    }
}
