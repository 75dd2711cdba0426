use askdoc::application::ports::{TextSplitter, TextSplitterError};
use askdoc::domain::{ContentType, Document};
use askdoc::infrastructure::text_processing::RecursiveCharacterSplitter;

const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_OVERLAP: usize = 200;

fn document() -> Document {
    Document::new("notes.docx".to_string(), ContentType::Docx, 0)
}

fn long_text() -> String {
    (1..=120)
        .map(|i| format!("Sentence number {i} talks about ownership and borrowing."))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn given_long_text_when_splitting_then_no_chunk_exceeds_chunk_size() {
    let splitter = RecursiveCharacterSplitter::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP);
    let text = long_text();

    let chunks = splitter.split(&text, &document()).await.unwrap();

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= DEFAULT_CHUNK_SIZE);
    }
}

#[tokio::test]
async fn given_empty_text_when_splitting_then_returns_no_chunks() {
    let splitter = RecursiveCharacterSplitter::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP);

    let chunks = splitter.split("", &document()).await.unwrap();

    assert!(chunks.is_empty());
}

#[tokio::test]
async fn given_whitespace_only_text_when_splitting_then_returns_no_chunks() {
    let splitter = RecursiveCharacterSplitter::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP);

    let chunks = splitter.split("  \n\n  \n ", &document()).await.unwrap();

    assert!(chunks.is_empty());
}

#[test]
fn given_two_paragraphs_that_do_not_fit_together_when_splitting_then_breaks_between_them() {
    let splitter = RecursiveCharacterSplitter::new(40, 0);
    let first = "a".repeat(30);
    let second = "b".repeat(30);
    let text = format!("{first}\n\n{second}");

    let chunks = splitter.split_text(&text).unwrap();

    assert_eq!(chunks, vec![first, second]);
}

#[test]
fn given_words_when_splitting_with_overlap_then_consecutive_chunks_share_words() {
    let splitter = RecursiveCharacterSplitter::new(20, 10);
    let text = "one two three four five six seven eight nine ten";

    let chunks = splitter.split_text(text).unwrap();

    assert_eq!(
        chunks,
        vec![
            "one two three four",
            "four five six seven",
            "six seven eight",
            "eight nine ten",
        ]
    );
}

#[test]
fn given_text_without_separators_when_splitting_then_falls_back_to_characters() {
    let splitter = RecursiveCharacterSplitter::new(10, 0);
    let text = "abcdefghij".repeat(3);

    let chunks = splitter.split_text(&text).unwrap();

    assert_eq!(chunks, vec!["abcdefghij"; 3]);
}

#[test]
fn given_multibyte_text_when_splitting_then_measures_characters_not_bytes() {
    let splitter = RecursiveCharacterSplitter::new(6, 0);
    let text = "ééééé ööööö";

    let chunks = splitter.split_text(text).unwrap();

    assert_eq!(chunks, vec!["ééééé", "ööööö"]);
}

#[test]
fn given_overlap_larger_than_size_when_splitting_then_rejects_configuration() {
    let splitter = RecursiveCharacterSplitter::new(100, 200);

    let result = splitter.split_text("some text");

    assert!(matches!(
        result,
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
}

#[test]
fn given_custom_separators_when_splitting_then_uses_them_first() {
    let splitter = RecursiveCharacterSplitter::new(12, 0)
        .with_separators(vec!["|".to_string(), "".to_string()]);

    let chunks = splitter.split_text("alpha beta|gamma delta").unwrap();

    assert_eq!(chunks, vec!["alpha beta", "|gamma delta"]);
}

#[tokio::test]
async fn given_document_when_splitting_then_chunks_point_back_into_text() {
    let splitter = RecursiveCharacterSplitter::new(200, 50);
    let text = long_text();
    let doc = document();

    let chunks = splitter.split(&text, &doc).await.unwrap();

    let mut previous_offset = None;
    for chunk in &chunks {
        assert_eq!(chunk.document_id, doc.id);
        assert_eq!(chunk.source, "notes.docx");
        assert!(text[chunk.offset..].starts_with(&chunk.text));
        if let Some(previous) = previous_offset {
            assert!(chunk.offset > previous);
        }
        previous_offset = Some(chunk.offset);
    }
}
