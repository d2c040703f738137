/// The fence marker delimiting code regions in exported notebook text.
///
/// A marker occupies its own line: code starts on the line after the
/// opening marker, and whatever follows the opening marker on its own line
/// (an info string such as `~~~~js`) is not part of the code.
pub struct CodeFence;

impl CodeFence {
    pub const MARKER: &'static str = "~~~~";

    /// Byte offsets of every marker, left to right, non-overlapping.
    pub fn positions(text: &str) -> Vec<usize> {
        text.match_indices(Self::MARKER)
            .map(|(offset, _)| offset)
            .collect()
    }

    /// The trimmed code between an opening marker at `open` and a closing
    /// marker at `close`. Empty when no newline follows the opening marker.
    pub fn body(text: &str, open: usize, close: usize) -> &str {
        let region = &text[open + Self::MARKER.len()..close];
        match region.find('\n') {
            Some(newline) => region[newline + 1..].trim(),
            None => "",
        }
    }

    pub fn wrap(code: &str) -> String {
        format!("{marker}\n{code}\n{marker}", marker = Self::MARKER)
    }
}
