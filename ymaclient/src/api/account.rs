//! Résolution de l'identité du compte

use super::CatalogClient;
use crate::error::{ClientError, Result};
use crate::models::AccountStatusResponse;
use tracing::debug;

impl CatalogClient {
    /// Résout l'identifiant `uid` du compte de la session
    ///
    /// Interroge `/account/status` et extrait `result.account.uid`.
    /// Un uid absent ou vide invalide toute la chaîne d'acquisition.
    pub async fn resolve_uid(&self) -> Result<String> {
        let url = format!("{}/account/status", self.base_url());
        let response: AccountStatusResponse = self.get_json(&url).await?;

        let uid = response.result.account.uid;
        if uid.is_empty() {
            return Err(ClientError::Parse("empty account uid".to_string()));
        }

        debug!("Resolved account uid {}", uid);
        Ok(uid)
    }
}
