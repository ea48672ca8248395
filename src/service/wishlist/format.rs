//! Splitting notification text into Discord-sized messages.

use super::matching::WishlistMatch;

/// Discord's message content limit.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Longest piece of user input repeated back in a reply.
pub const MAX_ECHO_LEN: usize = 100;

const ELLIPSIS: char = '…';

pub const WISHLIST_HEADER: &str = "**Items from your wishlist are in today's shop!**";

/// A message made of lines, split into chunks on demand.
///
/// Lines are packed greedily in order, so the number of chunks is minimal. A line is never
/// split across chunks; a single line longer than the limit is truncated with an ellipsis.
/// [`ChunkedMessage::chunks`] can be called any number of times and always yields the same
/// chunks.
#[derive(Debug, Clone)]
pub struct ChunkedMessage {
    lines: Vec<String>,
    max_len: usize,
}

impl ChunkedMessage {
    /// # Arguments
    /// - `header` - First line of the first chunk
    /// - `lines` - Body lines, one per entry
    /// - `max_len` - Maximum characters per chunk
    pub fn new(
        header: impl Into<String>,
        lines: impl IntoIterator<Item = String>,
        max_len: usize,
    ) -> Self {
        Self {
            lines: std::iter::once(header.into()).chain(lines).collect(),
            max_len: max_len.max(1),
        }
    }

    pub fn chunks(&self) -> Chunks<'_> {
        Chunks {
            lines: &self.lines,
            max_len: self.max_len,
        }
    }
}

impl<'a> IntoIterator for &'a ChunkedMessage {
    type Item = String;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}

/// Lazy iterator over the chunks of a [`ChunkedMessage`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    lines: &'a [String],
    max_len: usize,
}

impl Iterator for Chunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (first, rest) = self.lines.split_first()?;

        let mut chunk = truncate(first, self.max_len);
        let mut len = chunk.chars().count();
        let mut taken = 1;

        for line in rest {
            let line_len = line.chars().count();
            if len + 1 + line_len > self.max_len {
                break;
            }
            chunk.push('\n');
            chunk.push_str(line);
            len += 1 + line_len;
            taken += 1;
        }

        self.lines = &self.lines[taken..];
        Some(chunk)
    }
}

/// Shortens `text` to at most `max_len` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// Formats a guild's wishlist matches, one line per user.
pub fn format_notification(matches: &[WishlistMatch], max_len: usize) -> ChunkedMessage {
    let lines = matches
        .iter()
        .map(|m| format!("<@{}>: {}", m.user_id, m.names.join(", ")));

    ChunkedMessage::new(WISHLIST_HEADER, lines, max_len)
}
