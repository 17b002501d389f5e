//! Word boundary helpers over a single block's text.

use crate::content::ContentBlock;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find word boundary backward from cursor.
pub fn find_word_boundary_backward(block: &ContentBlock, cursor: usize) -> usize {
    let mut pos = cursor.min(block.len());

    // Skip any whitespace/punctuation immediately before cursor.
    while pos > 0 {
        match block.char_at(pos - 1) {
            Some(c) if is_word_char(c) => break,
            Some(_) => pos -= 1,
            None => break,
        }
    }

    // Skip the word characters.
    while pos > 0 {
        match block.char_at(pos - 1) {
            Some(c) if is_word_char(c) => pos -= 1,
            _ => break,
        }
    }

    pos
}

/// Find word boundary forward from cursor.
pub fn find_word_boundary_forward(block: &ContentBlock, cursor: usize) -> usize {
    let len = block.len();
    let mut pos = cursor.min(len);

    // Skip whitespace/punctuation first.
    while pos < len {
        match block.char_at(pos) {
            Some(c) if is_word_char(c) => break,
            Some(_) => pos += 1,
            None => break,
        }
    }

    // Then the word itself.
    while pos < len {
        match block.char_at(pos) {
            Some(c) if is_word_char(c) => pos += 1,
            _ => break,
        }
    }

    pos
}
