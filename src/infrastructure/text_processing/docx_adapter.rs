use std::time::Duration;

use async_trait::async_trait;
use docx_rs::{
    DocumentChild, InsertChild, MoveToChild, Paragraph, ParagraphChild, Run, RunChild,
    StructuredDataTag, StructuredDataTagChild, Table, TableCellContent, TableChild, TableRowChild,
    read_docx,
};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const CELL_SEPARATOR: &str = " | ";

/// Extracts the body text of a Word document, one block per paragraph and
/// one line per table row. Hyperlinks, tracked insertions and content
/// controls are read like ordinary runs; deleted and moved-from text is not.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocks(data: &[u8]) -> Result<Vec<String>, FileLoaderError> {
        let docx = read_docx(data).map_err(|e| {
            FileLoaderError::Parse(format!("failed to parse DOCX: {e}"))
        })?;

        let mut blocks = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(paragraph) => blocks.push(paragraph_text(paragraph)),
                DocumentChild::Table(table) => blocks.extend(table_rows(table)),
                DocumentChild::StructuredDataTag(tag) => blocks.extend(content_control_blocks(tag)),
                _ => {}
            }
        }

        Ok(blocks)
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_inline(&paragraph.children, &mut text);
    text
}

fn push_inline(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_inline(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run(run, out);
                    }
                }
            }
            ParagraphChild::MoveTo(moved) => {
                for child in &moved.children {
                    if let MoveToChild::Run(run) = child {
                        push_run(run, out);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(tag) => {
                out.push_str(&content_control_blocks(tag).join(" "));
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) | RunChild::PTab(_) => out.push('\t'),
            RunChild::Break(_) | RunChild::CarriageReturn(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Runs directly inside the control are gathered into one block that ends
/// at the next paragraph or table.
fn content_control_blocks(tag: &StructuredDataTag) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inline = String::new();

    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => {
                push_run(run, &mut inline);
            }
            StructuredDataTagChild::Paragraph(paragraph) => {
                flush(&mut inline, &mut blocks);
                blocks.push(paragraph_text(paragraph));
            }
            StructuredDataTagChild::Table(table) => {
                flush(&mut inline, &mut blocks);
                blocks.extend(table_rows(table));
            }
            StructuredDataTagChild::StructuredDataTag(inner) => {
                flush(&mut inline, &mut blocks);
                blocks.extend(content_control_blocks(inner));
            }
            _ => {}
        }
    }
    flush(&mut inline, &mut blocks);

    blocks
}

fn flush(inline: &mut String, blocks: &mut Vec<String>) {
    if !inline.is_empty() {
        blocks.push(std::mem::take(inline));
    }
}

fn table_rows(table: &Table) -> Vec<String> {
    let mut rows = Vec::new();

    for TableChild::TableRow(row) in &table.rows {
        let mut cells = Vec::with_capacity(row.cells.len());
        let mut nested = Vec::new();

        for TableRowChild::TableCell(cell) in &row.cells {
            let mut cell_text = Vec::new();
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => {
                        cell_text.push(paragraph_text(paragraph));
                    }
                    TableCellContent::StructuredDataTag(tag) => {
                        cell_text.extend(content_control_blocks(tag));
                    }
                    TableCellContent::Table(inner) => nested.extend(table_rows(inner)),
                    _ => {}
                }
            }
            cells.push(cell_text.join(" "));
        }

        rows.push(cells.join(CELL_SEPARATOR));
        rows.extend(nested);
    }

    rows
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id,
            filename = %document.filename,
        )
    )]
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.content_type.as_mime().to_string(),
            ));
        }

        let bytes = data.to_vec();
        let blocks = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_blocks(&bytes)),
        )
        .await
        .map_err(|_| FileLoaderError::Parse("DOCX extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::Parse(format!("task join error: {e}")))??;

        let sanitized: Vec<String> = blocks
            .iter()
            .map(|block| sanitize_extracted_text(block))
            .filter(|block| !block.is_empty())
            .collect();

        tracing::info!(block_count = sanitized.len(), "DOCX text extraction complete");

        if sanitized.is_empty() {
            return Err(FileLoaderError::Empty(document.filename.clone()));
        }

        Ok(sanitized.join("\n\n"))
    }
}
