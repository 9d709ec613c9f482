//! Session utilisateur portant le token OAuth
//!
//! Le token est obtenu par le flux de login externe (hors du périmètre de
//! cette crate) et injecté ici une seule fois. Il n'y a ni expiration ni
//! rafraîchissement : la session vit aussi longtemps que le processus.

/// Session porteuse du token OAuth Yandex
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Crée une session vide (avant login)
    pub fn new() -> Self {
        Self { token: None }
    }

    /// Crée une session déjà authentifiée
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Injecte le token après un login externe réussi
    ///
    /// Le token n'est posé qu'une fois ; un second appel est ignoré.
    pub fn set_token(&mut self, token: impl Into<String>) {
        if self.token.is_none() {
            self.token = Some(token.into());
        }
    }

    /// Retourne le token si la session est authentifiée
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Vérifie si la session est authentifiée
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
