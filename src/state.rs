use std::sync::Arc;

use crate::application::services::link_service::LinkService;
use crate::domain::repositories::ShortUrlRepository;
use crate::web::middleware::admin_auth::AdminCredentials;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn ShortUrlRepository>>,
    /// `None` keeps the admin view unmounted.
    pub admin: Option<Arc<AdminCredentials>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ShortUrlRepository>, admin: Option<AdminCredentials>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
            admin: admin.map(Arc::new),
        }
    }
}
