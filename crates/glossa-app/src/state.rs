use std::sync::Arc;

use glossa_core::resolver::Resolver;
use glossa_provider::Provider;
use glossa_store::Gateway;

use crate::rate_limit::LookupRateLimiter;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub gateway: Arc<dyn Gateway>,
    pub provider: Arc<dyn Provider>,
    pub limiter: Arc<LookupRateLimiter>,
    /// Shared secret for admin routes; empty disables the check
    pub admin_token: String,
}
