//! Chat text sanitizing.

/// Characters removed from relayed chat.
///
/// `@` would trigger mentions at the destination; a backtick or backslash
/// would break the inline code quoting the message is wrapped in.
pub const STRIPPED_CHARS: [char; 3] = ['@', '`', '\\'];

/// Strip every [`STRIPPED_CHARS`] character, then trim surrounding whitespace.
pub fn sanitize_message(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
    stripped.trim().to_string()
}
