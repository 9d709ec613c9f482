//! Couche d'accès à l'API REST Yandex Music
//!
//! Ce module fournit le client bas-niveau : construction des requêtes GET
//! authentifiées, dérivation du header `host` et traitement des réponses.

pub mod account;
pub mod download;
pub mod library;
pub mod signing;

use crate::error::{ClientError, Result};
use crate::session::Session;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Client bas-niveau pour communiquer avec l'API Yandex Music
pub struct CatalogClient {
    /// Client HTTP
    client: Client,
    /// URL de base de l'API
    base_url: String,
    /// Session porteuse du token OAuth
    session: Session,
}

impl CatalogClient {
    /// Crée une nouvelle instance du client
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            session,
        })
    }

    /// Crée un client depuis un objet Config
    pub fn from_config(config: &ymaconfig::Config) -> Result<Self> {
        let session = match config.get_oauth_token() {
            Some(token) => Session::authenticated(token),
            None => Session::new(),
        };
        Self::new(config.get_api_base_url(), session)
    }

    /// Retourne l'URL de base configurée
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retourne la session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Vérifie que la session porte un token
    fn ensure_token(&self) -> Result<&str> {
        self.session.token().ok_or(ClientError::AuthMissing)
    }

    /// Effectue une requête GET authentifiée
    ///
    /// Chaque requête porte le header `host` dérivé de l'URL cible et le
    /// header `Authorization: OAuth <token>`. Toute réponse non-2xx est
    /// convertie en erreur.
    pub(crate) async fn http_get(&self, url: &str) -> Result<Response> {
        let host = extract_host(url).ok_or_else(|| ClientError::BadUrl(url.to_string()))?;
        let token = self.ensure_token()?;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("host", host)
            .header("Authorization", format!("OAuth {token}"))
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("API error ({}) for {}", status.as_u16(), url);
            return Err(ClientError::from_status_code(status.as_u16()));
        }

        Ok(response)
    }

    /// Effectue une requête GET et décode la réponse JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http_get(url).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response from {}: {}", url, e);
            ClientError::Json(e)
        })
    }
}

/// Extrait l'autorité (troisième segment) d'une URL par arithmétique d'index
///
/// `https://api.music.yandex.net/account/status` → `api.music.yandex.net`.
/// Aucune bibliothèque d'analyse d'URL : on repère les trois premiers `/`
/// et on découpe entre le troisième et le suivant (ou la fin de chaîne).
/// Une URL sans troisième segment (ou avec un segment vide) échoue proprement.
pub(crate) fn extract_host(url: &str) -> Option<&str> {
    let first = url.find('/')?;

    let second_start = first + 1;
    if second_start >= url.len() {
        return None;
    }
    let second = url[second_start..].find('/')? + second_start;

    let third_start = second + 1;
    if third_start >= url.len() {
        return None;
    }
    let end = url[third_start..]
        .find('/')
        .map(|i| i + third_start)
        .unwrap_or(url.len());

    let host = &url[third_start..end];
    if host.is_empty() { None } else { Some(host) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CatalogClient::new("https://api.example.net", Session::new()).unwrap();
        assert_eq!(client.base_url(), "https://api.example.net");
        assert!(!client.session().is_authenticated());
    }

    #[test]
    fn test_extract_host_simple() {
        assert_eq!(
            extract_host("https://api.music.yandex.net/account/status"),
            Some("api.music.yandex.net")
        );
    }

    #[test]
    fn test_extract_host_without_path() {
        assert_eq!(
            extract_host("https://storage.example.com"),
            Some("storage.example.com")
        );
    }

    #[test]
    fn test_extract_host_with_port() {
        assert_eq!(
            extract_host("http://127.0.0.1:4321/tracks/1"),
            Some("127.0.0.1:4321")
        );
    }

    #[test]
    fn test_extract_host_ambiguous_inputs() {
        assert_eq!(extract_host("no-slash-at-all"), None);
        assert_eq!(extract_host("https:/"), None);
        assert_eq!(extract_host("https://"), None);
        assert_eq!(extract_host("https:///path"), None);
        assert_eq!(extract_host(""), None);
    }
}
