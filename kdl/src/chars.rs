//! Character classification for the KDL grammar.
//!
//! This module provides predicates over single code points used by both the
//! parser and the printer. The classes follow the KDL 1.x character grammar:
//! digits per radix, the Unicode line-space and whitespace sets, and the
//! bare-identifier character class.

/// Checks if a character is a decimal digit.
pub fn is_valid_decimal_char(c: char) -> bool {
    c.is_ascii_digit()
}

/// Checks if a character is a hexadecimal digit.
pub fn is_valid_hex_char(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Checks if a character is an octal digit.
pub fn is_valid_octal_char(c: char) -> bool {
    ('0'..='7').contains(&c)
}

/// Checks if a character is a binary digit.
pub fn is_valid_binary_char(c: char) -> bool {
    c == '0' || c == '1'
}

/// Checks if a character is a valid digit in the given radix.
///
/// # Arguments
///
/// * `c` - The character to check
/// * `radix` - The numeric base (2, 8, 10, or 16)
pub fn is_digit_in_radix(c: char, radix: u32) -> bool {
    match radix {
        2 => is_valid_binary_char(c),
        8 => is_valid_octal_char(c),
        10 => is_valid_decimal_char(c),
        16 => is_valid_hex_char(c),
        _ => false,
    }
}

/// Checks if a character can begin a number: a decimal digit or a sign.
pub fn is_valid_numeric_start(c: char) -> bool {
    c.is_ascii_digit() || c == '+' || c == '-'
}

/// Checks if a character is KDL line-space: a character that terminates a
/// node line.
///
/// # Example
///
/// ```
/// use kdl::chars::is_unicode_linespace;
///
/// assert!(is_unicode_linespace('\n'));
/// assert!(is_unicode_linespace('\u{2028}'));
/// assert!(!is_unicode_linespace(' '));
/// ```
pub fn is_unicode_linespace(c: char) -> bool {
    matches!(
        c,
        '\r' | '\n' | '\u{0085}' | '\u{000C}' | '\u{2028}' | '\u{2029}'
    )
}

/// Checks if a character is KDL horizontal whitespace.
pub fn is_unicode_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Checks if a character may appear anywhere in a bare identifier.
///
/// The bare-identifier class is every code point above U+0020 except
/// line-space, whitespace, and the structural punctuation of the grammar.
pub fn is_valid_bare_id_char(c: char) -> bool {
    if c <= '\u{20}' {
        return false;
    }
    if is_unicode_linespace(c) || is_unicode_whitespace(c) {
        return false;
    }
    !matches!(
        c,
        '\\' | '/' | '(' | ')' | '{' | '}' | '<' | '>' | ';' | '[' | ']' | '=' | ',' | '"'
    )
}

/// Checks if a character may begin a bare identifier.
///
/// Sign characters count as identifier starts; they lex as numbers only
/// when a decimal digit follows.
pub fn is_valid_bare_id_start(c: char) -> bool {
    is_valid_bare_id_char(c) && !c.is_ascii_digit()
}

/// Checks whether a whole string can be printed as a bare identifier.
///
/// Beyond per-character validity this rejects text that would lex back as
/// something else: a leading sign followed by a digit (a number), or a
/// leading `r#` (a raw string fence).
pub fn is_valid_bare_id(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !is_valid_bare_id_start(first) {
        return false;
    }
    let second = s.chars().nth(1);
    if (first == '+' || first == '-') && matches!(second, Some(c) if c.is_ascii_digit()) {
        return false;
    }
    if first == 'r' && second == Some('#') {
        return false;
    }
    chars.all(is_valid_bare_id_char)
}

/// Checks if a character can appear in one of the keyword literals `true`,
/// `false`, or `null`.
pub fn is_literal_char(c: char) -> bool {
    matches!(c, 't' | 'r' | 'u' | 'e' | 'n' | 'l' | 'f' | 'a' | 's')
}

/// Checks if a character is in the common-escape set: the characters with a
/// short written escape form.
pub fn is_common_escape(c: char) -> bool {
    matches!(
        c,
        '\\' | '\u{0008}' | '\n' | '\u{000C}' | '\t' | '\r' | '"'
    )
}

/// Checks if a character is printable ASCII (U+0020 through U+007E).
pub fn is_printable_ascii(c: char) -> bool {
    ('\u{20}'..='\u{7E}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_classes() {
        assert!(is_valid_decimal_char('0'));
        assert!(is_valid_decimal_char('9'));
        assert!(!is_valid_decimal_char('a'));

        assert!(is_valid_hex_char('F'));
        assert!(is_valid_hex_char('f'));
        assert!(!is_valid_hex_char('g'));

        assert!(is_valid_octal_char('7'));
        assert!(!is_valid_octal_char('8'));

        assert!(is_valid_binary_char('1'));
        assert!(!is_valid_binary_char('2'));
    }

    #[test]
    fn test_digit_in_radix() {
        assert!(is_digit_in_radix('a', 16));
        assert!(!is_digit_in_radix('a', 10));
        assert!(is_digit_in_radix('7', 8));
        assert!(!is_digit_in_radix('7', 2));
    }

    #[test]
    fn test_numeric_start() {
        assert!(is_valid_numeric_start('0'));
        assert!(is_valid_numeric_start('+'));
        assert!(is_valid_numeric_start('-'));
        assert!(!is_valid_numeric_start('.'));
        assert!(!is_valid_numeric_start('e'));
    }

    #[test]
    fn test_linespace() {
        for c in ['\n', '\r', '\u{0085}', '\u{000C}', '\u{2028}', '\u{2029}'] {
            assert!(is_unicode_linespace(c), "{:?}", c);
        }
        assert!(!is_unicode_linespace(' '));
        assert!(!is_unicode_linespace('\t'));
    }

    #[test]
    fn test_whitespace() {
        for c in ['\t', ' ', '\u{00A0}', '\u{2003}', '\u{3000}'] {
            assert!(is_unicode_whitespace(c), "{:?}", c);
        }
        assert!(!is_unicode_whitespace('\n'));
        assert!(!is_unicode_whitespace('x'));
    }

    #[test]
    fn test_bare_id_chars() {
        assert!(is_valid_bare_id_char('a'));
        assert!(is_valid_bare_id_char('0'));
        assert!(is_valid_bare_id_char('#'));
        assert!(is_valid_bare_id_char('+'));
        assert!(is_valid_bare_id_char('日'));
        for c in ['\\', '/', '(', ')', '{', '}', '<', '>', ';', '[', ']', '=', ',', '"'] {
            assert!(!is_valid_bare_id_char(c), "{:?}", c);
        }
        assert!(!is_valid_bare_id_char(' '));
        assert!(!is_valid_bare_id_char('\n'));
    }

    #[test]
    fn test_bare_id_start_excludes_digits() {
        assert!(is_valid_bare_id_start('a'));
        assert!(is_valid_bare_id_start('-'));
        assert!(!is_valid_bare_id_start('5'));
    }

    #[test]
    fn test_valid_bare_id_strings() {
        assert!(is_valid_bare_id("node"));
        assert!(is_valid_bare_id("my-node"));
        assert!(is_valid_bare_id("-"));
        assert!(is_valid_bare_id("r"));
        assert!(!is_valid_bare_id(""));
        assert!(!is_valid_bare_id("5node"));
        assert!(!is_valid_bare_id("-5"));
        assert!(!is_valid_bare_id("+1"));
        assert!(!is_valid_bare_id("r#raw"));
        assert!(!is_valid_bare_id("has space"));
    }

    #[test]
    fn test_literal_chars() {
        for c in "truefalsnl".chars() {
            assert!(is_literal_char(c), "{:?}", c);
        }
        assert!(!is_literal_char('x'));
    }

    #[test]
    fn test_common_escape() {
        for c in ['\\', '\u{0008}', '\n', '\u{000C}', '\t', '\r', '"'] {
            assert!(is_common_escape(c), "{:?}", c);
        }
        assert!(!is_common_escape('/'));
        assert!(!is_common_escape('a'));
    }

    #[test]
    fn test_printable_ascii() {
        assert!(is_printable_ascii(' '));
        assert!(is_printable_ascii('~'));
        assert!(!is_printable_ascii('\u{7F}'));
        assert!(!is_printable_ascii('\u{0007}'));
        assert!(!is_printable_ascii('é'));
    }
}
