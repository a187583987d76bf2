use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Process-wide switch gating whether free-form text reaches the model.
///
/// Set once from configuration at startup and read on every dispatch. Clones
/// share the same underlying flag.
#[derive(Debug, Clone)]
pub struct ConversationFlag(Arc<AtomicBool>);

impl ConversationFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }
}

impl Default for ConversationFlag {
    fn default() -> Self {
        Self::new(true)
    }
}
