//! # ymastore - Stockage local pour YMAClock
//!
//! Cette crate possède les deux copies durables du système :
//! - la piste d'alarme (un seul fichier audio, remplacé intégralement à
//!   chaque téléchargement) — [`TrackStore`] ;
//! - le snapshot d'état UI (un document JSON, auto-réparé en cas de
//!   corruption) — [`UiStateStore`].
//!
//! Chaque ressource est gardée par son propre mutex : au plus un
//! lecteur/écrivain à la fois, les appelants en concurrence se bloquent
//! jusqu'à libération du verrou. Aucun verrou n'est réentrant ni tenu
//! au-delà d'une opération.
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use ymastore::{TrackStore, UiStateStore};
//!
//! # async fn example() {
//! let tracks = TrackStore::new("./music");
//! let ui_state = UiStateStore::new("./documents");
//!
//! let state = ui_state.load().await;
//! println!("alarm armed: {}", state.is_alarm_armed);
//! # }
//! ```

pub mod error;
pub mod track;
pub mod ui_state;

pub use error::{Result, StoreError};
pub use track::TrackStore;
pub use ui_state::{
    ALARM_STATUS_OFF, ALARM_STATUS_ON, ALARM_STATUS_TURNING_ON, DOWNLOAD_STATUS_DOWNLOADED,
    DOWNLOAD_STATUS_DOWNLOADING, DOWNLOAD_STATUS_NOT_DOWNLOADED, HOURS_MAX, HOURS_MIN, MINUTES_MAX,
    MINUTES_MIN, UiState, UiStateStore,
};
