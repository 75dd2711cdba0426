use crate::application::ports::SearchResult;

const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Packs every retrieved passage into a single completion prompt.
pub fn stuff_prompt(question: &str, results: &[SearchResult]) -> String {
    let context = results
        .iter()
        .map(|r| r.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR);

    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, \
         don't try to make up an answer.\n\n\
         {context}\n\n\
         Question: {question}\n\
         Helpful Answer:"
    )
}
