use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter};
use crate::application::services::RetrievalService;

/// Shared handler state. Holds no cache handle: answers are always computed
/// from the document itself.
pub struct AppState<F, T: ?Sized, L>
where
    F: FileLoader,
    T: TextSplitter,
    L: LlmClient,
{
    pub retrieval_service: Arc<RetrievalService<F, T, L>>,
}

impl<F, T: ?Sized, L> Clone for AppState<F, T, L>
where
    F: FileLoader,
    T: TextSplitter,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            retrieval_service: Arc::clone(&self.retrieval_service),
        }
    }
}
