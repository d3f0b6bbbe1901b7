//! Paragraph-aware text chunking

/// Default maximum chunk length in characters
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Split text into paragraph-aligned chunks of bounded length.
///
/// Paragraphs (blank-line separated) are merged greedily while the joined
/// text stays within `max_chars`, counting the two-character separator. A
/// single paragraph longer than the bound becomes one oversized chunk rather
/// than being split mid-paragraph. Chunk order follows paragraph order.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for para in text.split("\n\n") {
        let para_chars = para.chars().count();

        if current_chars + para_chars + 2 <= max_chars {
            if current.is_empty() {
                current.push_str(para);
                current_chars = para_chars;
            } else {
                current.push_str("\n\n");
                current.push_str(para);
                current_chars += para_chars + 2;
            }
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current = para.to_string();
            current_chars = para_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
