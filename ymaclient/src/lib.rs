//! # ymaclient - Client Yandex Music pour YMAClock
//!
//! Cette crate fournit un client Rust pour la chaîne d'acquisition de piste
//! du service Yandex Music : résolution du compte, tirage d'une piste aimée,
//! négociation d'une URL de téléchargement signée et récupération du flux
//! audio.
//!
//! ## Vue d'ensemble
//!
//! La chaîne est strictement séquentielle et sans réessai :
//! - `/account/status` → identifiant `uid` du compte
//! - `/users/{uid}/likes/tracks` → une piste aimée tirée au hasard
//! - `/tracks/{id}/download-info` → la meilleure variante mp3
//! - descripteur XML (`host`, `path`, `ts`, `s`) → signature MD5
//! - `https://{host}/get-mp3/{sign}/{ts}{path}` → flux audio
//!
//! Chaque requête GET porte un header `host` dérivé de l'URL cible par
//! arithmétique d'index (pas de bibliothèque d'analyse d'URL) et le header
//! `Authorization: OAuth <token>` de la session.
//!
//! ## Structure des modules
//!
//! ```text
//! ymaclient/
//! ├── src/
//! │   ├── lib.rs              # Module principal (ce fichier)
//! │   ├── session.rs          # Session porteuse du token OAuth
//! │   ├── models.rs           # Structures des réponses JSON
//! │   ├── api/
//! │   │   ├── mod.rs          # Client bas-niveau (GET authentifié)
//! │   │   ├── account.rs      # Résolution de l'identité
//! │   │   ├── library.rs      # Tirage dans les pistes aimées
//! │   │   ├── download.rs     # Négociation et téléchargement
//! │   │   └── signing.rs      # Signature MD5
//! │   ├── descriptor.rs       # Parsing du descripteur XML
//! │   ├── payload.rs          # Flux d'octets du fichier audio
//! │   ├── acquisition.rs      # Service d'acquisition haut-niveau
//! │   └── error.rs            # Gestion des erreurs
//! ```
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use ymaclient::{CatalogClient, Session, TrackAcquisitionService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let session = Session::authenticated("oauth-token");
//!     let client = CatalogClient::new("https://api.music.yandex.net", session)?;
//!     let service = TrackAcquisitionService::new(client);
//!
//!     let payload = service.fetch_track().await?;
//!     // recopier `payload` vers le stockage local (crate ymastore)
//!     # let _ = payload;
//!     Ok(())
//! }
//! ```
//!
//! ## Gestion des erreurs
//!
//! La crate utilise `thiserror` pour définir des erreurs typées ; toute
//! étape en échec (token absent, réseau, statut non-2xx, payload malformé)
//! interrompt la chaîne entière sans résultat partiel.
//!
//! ## Voir aussi
//!
//! - `ymastore` : persistance de la piste et de l'état UI
//! - `ymaconfig` : configuration

pub mod acquisition;
pub mod api;
pub mod descriptor;
pub mod error;
pub mod models;
pub mod payload;
pub mod session;

pub use acquisition::TrackAcquisitionService;
pub use api::CatalogClient;
pub use api::signing;
pub use descriptor::DownloadDescriptor;
pub use error::{ClientError, Result};
pub use models::TrackDescriptor;
pub use payload::{AudioPayload, ByteStream};
pub use session::Session;
