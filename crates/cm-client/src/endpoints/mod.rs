pub mod aliases;
pub mod catalog;
pub mod info;
pub mod metric_data;

use crate::reference::ReferenceCache;
use crate::transport::Transport;
use std::sync::Arc;

/// Common endpoint structure
///
/// All endpoint modules share the client's transport and its reference
/// cache, so validation done through one module is reused by the others.
#[derive(Clone)]
pub struct EndpointCore {
  pub transport: Arc<Transport>,
  pub reference: Arc<ReferenceCache>,
}

impl EndpointCore {
  /// Create a new endpoint core
  pub fn new(transport: Arc<Transport>, reference: Arc<ReferenceCache>) -> Self {
    Self { transport, reference }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_core_creation() {
    let transport = Arc::new(Transport::new_mock());
    let reference = Arc::new(ReferenceCache::new(transport.clone()));

    let core = EndpointCore::new(transport, reference);

    assert_eq!(core.transport.base_url(), "https://mock.coinmetrics.io/v4/");
  }
}
