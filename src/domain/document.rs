use std::path::Path;

use super::chunk::DocumentId;

/// Formats the loader understands, keyed by file extension.
const KNOWN_EXTENSIONS: [(&str, ContentType); 3] = [
    ("docx", ContentType::Docx),
    ("txt", ContentType::Text),
    ("md", ContentType::Text),
];

/// Metadata of the source file being answered from.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Docx,
    Text,
}

impl ContentType {
    /// Case-insensitive lookup on the path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        KNOWN_EXTENSIONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(extension))
            .map(|(_, content_type)| *content_type)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Text => "text/plain",
        }
    }
}
