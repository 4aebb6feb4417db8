use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use wardrobe_ai::config::AppConfig;
use wardrobe_ai::events::{EventService, MemoryEventStore};
use wardrobe_ai::identity::{LocalIdentityProvider, TokenSigner};
use wardrobe_ai::outfits::{OutfitGenerator, OutfitService};
use wardrobe_ai::storage::{LocalImageStore, UrlSigner};
use wardrobe_ai::wardrobe::{MemoryCatalogStore, WardrobeService};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local backends shared by every router.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) identity: Arc<LocalIdentityProvider>,
    pub(crate) catalog: Arc<MemoryCatalogStore>,
    pub(crate) images: Arc<LocalImageStore>,
    pub(crate) wardrobe: Arc<WardrobeService<MemoryCatalogStore, LocalImageStore>>,
    pub(crate) events: Arc<EventService<MemoryEventStore>>,
    pub(crate) outfits: Arc<OutfitService<MemoryCatalogStore>>,
}

impl Services {
    pub(crate) fn in_memory(config: &AppConfig) -> Self {
        let identity = Arc::new(LocalIdentityProvider::new(TokenSigner::new(
            config.auth.token_secret.clone(),
            config.auth.token_ttl_minutes,
        )));
        let images = Arc::new(LocalImageStore::new(
            UrlSigner::new(
                &config.storage.signing_secret,
                config.storage.public_base_url.clone(),
                config.storage.signed_url_ttl_secs,
            ),
            config.storage.max_upload_bytes,
        ));
        let catalog = Arc::new(MemoryCatalogStore::default());
        let wardrobe = Arc::new(WardrobeService::new(catalog.clone(), images.clone()));
        let events = Arc::new(EventService::new(Arc::new(MemoryEventStore::default())));
        let outfits = Arc::new(OutfitService::new(
            catalog.clone(),
            OutfitGenerator::from_mode(config.outfits.jitter),
        ));

        Self {
            identity,
            catalog,
            images,
            wardrobe,
            events,
            outfits,
        }
    }
}
