use std::sync::Arc;

use hirecast::ServingContext;

/// Shared with every handler. Cloning is an `Arc` bump.
#[derive(Clone, Debug)]
pub struct HandlerState {
    pub context: Arc<ServingContext>,
}

impl HandlerState {
    pub fn new(context: Arc<ServingContext>) -> Self {
        Self { context }
    }
}

impl From<ServingContext> for HandlerState {
    fn from(context: ServingContext) -> Self {
        Self::new(Arc::new(context))
    }
}
