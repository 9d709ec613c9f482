//! Parsing du descripteur XML de téléchargement
//!
//! Le serveur renvoie un petit document XML dont quatre éléments feuilles
//! (`host`, `path`, `ts`, `s`) décrivent l'URL signée et limitée dans le
//! temps. La négociation n'est valide que si les quatre sont présents et
//! non vides simultanément : un succès partiel vaut échec total.

use crate::error::{ClientError, Result};
use quick_xml::{Error as XmlError, Reader, events::Event};

/// Descripteur de téléchargement négocié avec le serveur
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadDescriptor {
    /// Autorité du serveur de fichiers
    pub host: String,
    /// Chemin du fichier audio (commence par `/`)
    pub path: String,
    /// Jeton d'horodatage limitant la validité de l'URL
    pub ts: String,
    /// Nonce serveur entrant dans la signature
    pub s: String,
}

/// Parse le document XML du descripteur de téléchargement
pub fn parse_download_descriptor(xml: &str) -> Result<DownloadDescriptor> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut host: Option<String> = None;
    let mut path: Option<String> = None;
    let mut ts: Option<String> = None;
    let mut s: Option<String> = None;

    let mut current_tag: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                current_tag = Some(name);
            }
            Event::End(_) => {
                current_tag = None;
            }
            Event::Text(e) => {
                if let Some(tag) = &current_tag {
                    let text = e.decode().map_err(XmlError::Encoding)?.into_owned();
                    match tag.as_str() {
                        "host" => host = Some(text),
                        "path" => path = Some(text),
                        "ts" => ts = Some(text),
                        "s" => s = Some(text),
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match (host, path, ts, s) {
        (Some(host), Some(path), Some(ts), Some(s))
            if !host.is_empty() && !path.is_empty() && !ts.is_empty() && !s.is_empty() =>
        {
            Ok(DownloadDescriptor { host, path, ts, s })
        }
        _ => Err(ClientError::IncompleteDescriptor),
    }
}
