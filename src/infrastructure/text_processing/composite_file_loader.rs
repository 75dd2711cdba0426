use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::{DocxAdapter, PlainTextAdapter};

/// Routes each document to the loader registered for its content type.
#[derive(Default)]
pub struct CompositeFileLoader {
    loaders: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    /// Word documents through [`DocxAdapter`], `.txt`/`.md` as plain text.
    pub fn with_default_adapters() -> Self {
        Self::default()
            .register(ContentType::Docx, Arc::new(DocxAdapter::new()))
            .register(ContentType::Text, Arc::new(PlainTextAdapter))
    }

    /// Later registrations for the same content type win.
    pub fn register(mut self, content_type: ContentType, loader: Arc<dyn FileLoader>) -> Self {
        self.loaders.insert(content_type, loader);
        self
    }

    pub fn supports(&self, content_type: ContentType) -> bool {
        self.loaders.contains_key(&content_type)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn load(&self, data: &[u8], document: &Document) -> Result<String, FileLoaderError> {
        match self.loaders.get(&document.content_type) {
            Some(loader) => loader.load(data, document).await,
            None => Err(FileLoaderError::UnsupportedFormat(
                document.content_type.as_mime().to_string(),
            )),
        }
    }
}
