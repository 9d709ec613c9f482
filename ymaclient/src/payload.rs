//! Flux d'octets du fichier audio téléchargé
//!
//! Le payload est opaque : un flux de chunks que le stockage local recopie
//! tel quel. Il n'est jamais bufferisé en entier en mémoire.

use bytes::Bytes;
use futures::{Stream, StreamExt, stream};
use std::pin::Pin;

/// Flux de chunks d'un payload audio
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Payload audio opaque renvoyé par le serveur de fichiers
pub struct AudioPayload {
    stream: ByteStream,
}

impl AudioPayload {
    /// Enveloppe le corps d'une réponse HTTP
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Construit un payload depuis des octets en mémoire (tests et démos)
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let chunk: std::io::Result<Bytes> = Ok(bytes.into());
        Self {
            stream: Box::pin(stream::iter([chunk])),
        }
    }

    /// Consomme le payload et rend le flux de chunks sous-jacent
    pub fn into_stream(self) -> ByteStream {
        self.stream
    }
}

impl std::fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioPayload").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_from_bytes_roundtrip() {
        let payload = AudioPayload::from_bytes(vec![1u8, 2, 3]);
        let mut stream = payload.into_stream();

        let chunk = stream.next().await.unwrap().unwrap();
        assert_eq!(chunk.as_ref(), &[1u8, 2, 3]);
        assert!(stream.next().await.is_none());
    }
}
