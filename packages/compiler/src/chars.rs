//! Character constants used throughout the lexers

pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const NEWLINE: char = '\n';
pub const CR: char = '\r';
pub const SPACE: char = ' ';

pub const BANG: char = '!';
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const SLASH: char = '/';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';

pub const LBRACE: char = '{';
pub const RBRACE: char = '}';

/// Whitespace inside markup (horizontal or vertical).
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

/// Horizontal whitespace only. Newlines are significant for source mapping
/// and are never treated as collapsible.
pub fn is_horizontal_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// First character of a tag or directive name.
pub fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Subsequent characters of a tag or directive name.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}
