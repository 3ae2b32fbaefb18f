//! Gateway shared state

use crate::connection::ConnectionManager;
use std::sync::Arc;
use tutor_service::ServiceContext;

/// State shared by the WebSocket route
#[derive(Clone)]
pub struct GatewayState {
    context: Arc<ServiceContext>,
    connection_manager: Arc<ConnectionManager>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(context: Arc<ServiceContext>, connection_manager: Arc<ConnectionManager>) -> Self {
        Self {
            context,
            connection_manager,
        }
    }

    /// Get the service context
    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .finish()
    }
}
