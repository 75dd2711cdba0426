use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::sanitize_extracted_text;

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedFormat(
                document.content_type.as_mime().to_string(),
            ));
        }

        let text = std::str::from_utf8(data)
            .map_err(|e| FileLoaderError::Parse(e.to_string()))?;

        let paragraphs: Vec<String> = text
            .split("\n\n")
            .map(sanitize_extracted_text)
            .filter(|p| !p.is_empty())
            .collect();

        if paragraphs.is_empty() {
            return Err(FileLoaderError::Empty(document.filename.clone()));
        }

        Ok(paragraphs.join("\n\n"))
    }
}
