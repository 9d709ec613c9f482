//! Stockage de la piste d'alarme
//!
//! Un seul emplacement : le fichier audio courant remplace intégralement son
//! prédécesseur. L'accès est exclusif ; les appelants concurrents se
//! sérialisent sur le mutex de la ressource.

use crate::error::{Result, StoreError};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Nom du fichier audio dans l'emplacement unique
const TRACK_FILE_NAME: &str = "alarm_track.mp3";

/// Stockage du fichier audio de l'alarme
pub struct TrackStore {
    dir: PathBuf,
    file_path: PathBuf,
    lock: Mutex<()>,
}

impl TrackStore {
    /// Crée le stockage dans le répertoire musique donné
    pub fn new(music_dir: impl Into<PathBuf>) -> Self {
        let dir = music_dir.into();
        let file_path = dir.join(TRACK_FILE_NAME);
        Self {
            dir,
            file_path,
            lock: Mutex::new(()),
        }
    }

    /// Chemin du fichier audio (pour le service de lecture)
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Vérifie si une piste est présente dans l'emplacement
    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.file_path).await.unwrap_or(false)
    }

    /// Recopie le payload dans l'emplacement unique
    ///
    /// Séquence : créer le répertoire si besoin, supprimer l'ancien fichier,
    /// recopier le flux chunk par chunk dans un fichier neuf. Si la
    /// suppression a réussi mais que l'écriture échoue, l'emplacement reste
    /// vide jusqu'au prochain save réussi.
    pub async fn save<S>(&self, mut payload: S) -> Result<()>
    where
        S: Stream<Item = std::io::Result<Bytes>> + Unpin + Send,
    {
        let _guard = self.lock.lock().await;

        // Créer le répertoire s'il n'existe pas
        fs::create_dir_all(&self.dir).await?;

        // Supprimer l'ancien fichier s'il existe
        if fs::try_exists(&self.file_path).await? {
            fs::remove_file(&self.file_path).await?;
            debug!("Removed previous track file");
        }

        // Recopier le flux dans un fichier neuf
        let mut file = fs::File::create(&self.file_path).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = payload.next().await {
            let chunk = chunk.map_err(StoreError::Payload)?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        info!(bytes = written, path = %self.file_path.display(), "Saved alarm track");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_under_the_music_dir() {
        let store = TrackStore::new("/tmp/music");
        assert_eq!(
            store.path(),
            Path::new("/tmp/music").join(TRACK_FILE_NAME).as_path()
        );
    }
}
