use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ymaalarm::{AlarmOrchestrator, AlarmScheduler, AlarmState, PermissionCheck, PlaybackService};
use ymaclient::TrackAcquisitionService;
use ymastore::{TrackStore, UiStateStore};

/// Permissions côté hôte
///
/// Un processus de bureau n'a pas de modèle de permissions : seule la
/// joignabilité du réseau est réellement sondée, les deux autres contrats
/// sont toujours accordés.
struct HostPermissions {
    probe_addr: String,
}

impl HostPermissions {
    fn new(api_base_url: &str) -> Self {
        let host = api_base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .split('/')
            .next()
            .unwrap_or_default();
        let probe_addr = if host.contains(':') {
            host.to_string()
        } else {
            format!("{host}:443")
        };
        Self { probe_addr }
    }
}

#[async_trait]
impl PermissionCheck for HostPermissions {
    async fn is_network_reachable(&self) -> bool {
        matches!(
            tokio::time::timeout(
                Duration::from_secs(5),
                TcpStream::connect(self.probe_addr.as_str()),
            )
            .await,
            Ok(Ok(_))
        )
    }

    async fn can_schedule_exact_alarm(&self) -> bool {
        true
    }

    async fn has_notification_and_full_screen_intent(&self) -> bool {
        true
    }

    async fn request_network(&self) {
        warn!("Network is not reachable, check the connection and retry");
    }

    async fn request_exact_alarm(&self) {}

    async fn request_notification(&self) {}
}

/// Planificateur d'alarme in-process basé sur un timer tokio
struct TokioAlarmScheduler {
    track_path: PathBuf,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TokioAlarmScheduler {
    fn new(track_path: PathBuf) -> Self {
        Self {
            track_path,
            task: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AlarmScheduler for TokioAlarmScheduler {
    async fn arm(&self, epoch_millis: i64) -> Result<(), String> {
        let delay = (epoch_millis - Utc::now().timestamp_millis()).max(0) as u64;
        let path = self.track_path.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            info!("⏰ Alarm! Wake-up track: {}", path.display());
        });

        if let Some(previous) = self.task.lock().await.replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    async fn disarm(&self) -> Result<(), String> {
        if let Some(task) = self.task.lock().await.take() {
            task.abort();
        }
        Ok(())
    }
}

/// Service de lecture hôte : rien à arrêter dans ce processus
struct HostPlayback;

#[async_trait]
impl PlaybackService for HostPlayback {
    async fn stop(&self) -> Result<(), String> {
        Ok(())
    }
}

fn print_usage() {
    eprintln!("Usage: YMAClock on <HH> <MM> | off | status");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Infrastructure ==========

    let config = ymaconfig::get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.get_log_min_level().unwrap_or_else(|_| "info".to_string()))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // ========== PHASE 2 : Assemblage des services ==========

    info!("🎵 Building Yandex Music acquisition pipeline...");
    let service = TrackAcquisitionService::from_config(&config)?;

    let tracks = Arc::new(TrackStore::new(config.get_music_dir()?));
    let snapshots = Arc::new(UiStateStore::new(config.get_documents_dir()?));

    let permissions = Arc::new(HostPermissions::new(&config.get_api_base_url()));
    let scheduler = Arc::new(TokioAlarmScheduler::new(tracks.path().to_path_buf()));
    let playback = Arc::new(HostPlayback);

    let orchestrator = AlarmOrchestrator::new(
        permissions,
        scheduler,
        playback,
        Arc::new(service),
        tracks,
        snapshots,
    );

    // Recharger l'état persisté du dernier processus
    orchestrator.restore().await;

    // ========== PHASE 3 : Commande ==========

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["status"] => {
            let state = orchestrator.current_state();
            info!("{}", state.download_status);
            info!("{}", state.alarm_status);
        }
        ["off"] => {
            orchestrator.toggle(false).await;
            let state = orchestrator.current_state();
            info!("{}", state.alarm_status);
        }
        ["on", hours, minutes] => {
            orchestrator.set_hours(hours);
            orchestrator.set_minutes(minutes);
            orchestrator.toggle(true).await;

            let state = orchestrator.current_state();
            info!("{}", state.download_status);
            info!("{}", state.alarm_status);

            if orchestrator.state() == AlarmState::On {
                // Le timer vit dans ce processus : rester en vie jusqu'au réveil
                info!("✅ YMAClock is armed, press Ctrl+C to quit...");
                tokio::signal::ctrl_c().await?;
            }
        }
        _ => print_usage(),
    }

    Ok(())
}
