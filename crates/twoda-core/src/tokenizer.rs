//! Token extraction driven by four byte classes
//!
//! - `split` ends the current token and continues on the same record
//! - `end` ends the current token and the whole extraction call
//! - `quote` opens or closes a span where split and end bytes are literal
//! - `ignore` is consumed and never emitted
//!
//! Empty tokens are never produced by [`tokenize`]; a run of split bytes
//! counts as a single boundary.

use crate::stream::ByteStream;
use std::io::{Read, Seek};

/// A fixed set of bytes with constant-time membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharSet([u64; 4]);

impl CharSet {
    /// The set with no members
    pub const EMPTY: CharSet = CharSet([0; 4]);

    /// Build a set from a list of bytes
    pub const fn of(bytes: &[u8]) -> Self {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            bits[(b >> 6) as usize] |= 1u64 << (b & 63);
            i += 1;
        }
        CharSet(bits)
    }

    /// Check whether `b` is in the set
    pub const fn contains(self, b: u8) -> bool {
        self.0[(b >> 6) as usize] & (1u64 << (b & 63)) != 0
    }
}

/// The byte classes used for one kind of record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenRules {
    pub split: CharSet,
    pub end: CharSet,
    pub quote: CharSet,
    pub ignore: CharSet,
}

impl TokenRules {
    /// Lines of a `V2.0` text table
    pub const TEXT: TokenRules = TokenRules {
        split: CharSet::of(b" "),
        end: CharSet::of(b"\n"),
        quote: CharSet::of(b"\""),
        ignore: CharSet::of(b"\r"),
    };

    /// The NUL-terminated header record of a `V2.b` table
    pub const BINARY_HEADERS: TokenRules = TokenRules {
        split: CharSet::of(b"\t"),
        end: CharSet::of(b"\0"),
        quote: CharSet::EMPTY,
        ignore: CharSet::EMPTY,
    };

    /// The row label block of a `V2.b` table
    pub const BINARY_ROW_NAMES: TokenRules = TokenRules {
        split: CharSet::of(b"\t"),
        end: CharSet::EMPTY,
        quote: CharSet::EMPTY,
        ignore: CharSet::EMPTY,
    };

    /// A single string in the `V2.b` string pool
    pub const BINARY_CELL: TokenRules = TokenRules {
        split: CharSet::of(b"\0"),
        end: CharSet::EMPTY,
        quote: CharSet::EMPTY,
        ignore: CharSet::EMPTY,
    };
}

/// What stopped a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A split byte; more tokens may follow in the same record
    Split,
    /// An end byte; the record is finished
    End,
    /// The stream ran out
    Eof,
}

/// A single extracted token, possibly empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub boundary: Boundary,
}

/// Extract the next token. Returns `None` if the stream had no bytes left.
pub fn next_token<R: Read + Seek>(stream: &mut ByteStream<R>, rules: TokenRules) -> Option<Token> {
    let mut bytes = Vec::new();
    let mut quote: Option<u8> = None;
    let mut read_any = false;

    let boundary = loop {
        let Some(c) = stream.read_byte() else {
            break Boundary::Eof;
        };
        read_any = true;

        if rules.ignore.contains(c) {
            continue;
        }

        match quote {
            Some(open) if c == open => {
                quote = None;
                continue;
            }
            Some(_) => {
                bytes.push(c);
                continue;
            }
            None => {}
        }

        if rules.quote.contains(c) {
            quote = Some(c);
        } else if rules.end.contains(c) {
            break Boundary::End;
        } else if rules.split.contains(c) {
            break Boundary::Split;
        } else {
            bytes.push(c);
        }
    };

    if !read_any {
        return None;
    }

    Some(Token {
        text: decode_text(bytes),
        boundary,
    })
}

/// Append the tokens of one record to `out`.
///
/// The first `skip` non-empty tokens are discarded. With `limit` set,
/// extraction stops as soon as that many tokens have been appended, leaving
/// the rest of the record unread. Returns `false` if the stream was already
/// exhausted and nothing was read.
pub fn tokenize<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    out: &mut Vec<String>,
    rules: TokenRules,
    mut skip: usize,
    mut limit: Option<usize>,
) -> bool {
    if limit == Some(0) {
        return true;
    }

    let mut read_any = false;
    while let Some(token) = next_token(stream, rules) {
        read_any = true;
        let boundary = token.boundary;

        if !token.text.is_empty() {
            if skip > 0 {
                skip -= 1;
            } else {
                out.push(token.text);
                if let Some(n) = limit.as_mut() {
                    *n -= 1;
                    if *n == 0 {
                        break;
                    }
                }
            }
        }

        if boundary != Boundary::Split {
            break;
        }
    }

    read_any
}

/// Cell text is usually ASCII; anything that is not valid UTF-8 is taken as
/// Latin-1 so no byte is lost.
fn decode_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stream(bytes: &[u8]) -> ByteStream<Cursor<Vec<u8>>> {
        ByteStream::new(Cursor::new(bytes.to_vec())).unwrap()
    }

    fn line(s: &mut ByteStream<Cursor<Vec<u8>>>, skip: usize, limit: Option<usize>) -> Vec<String> {
        let mut out = Vec::new();
        tokenize(s, &mut out, TokenRules::TEXT, skip, limit);
        out
    }

    #[test]
    fn test_char_set_membership() {
        let set = CharSet::of(b" \t\0\xff");
        assert!(set.contains(b' '));
        assert!(set.contains(b'\t'));
        assert!(set.contains(0));
        assert!(set.contains(0xff));
        assert!(!set.contains(b'a'));
        assert!(!CharSet::EMPTY.contains(b' '));
    }

    #[test]
    fn test_tokenize_splits_and_stops_at_end() {
        let mut s = stream(b"a  bb   ccc\nnext");
        assert_eq!(line(&mut s, 0, None), vec!["a", "bb", "ccc"]);
        assert_eq!(line(&mut s, 0, None), vec!["next"]);
        assert!(s.eos());
    }

    #[test]
    fn test_tokenize_skip_ignores_empty_tokens() {
        let mut s = stream(b"   0   x y\n");
        assert_eq!(line(&mut s, 1, None), vec!["x", "y"]);
    }

    #[test]
    fn test_tokenize_limit_leaves_rest_unread() {
        let mut s = stream(b"a\tb\tc\t");
        let mut out = Vec::new();
        tokenize(&mut s, &mut out, TokenRules::BINARY_ROW_NAMES, 0, Some(2));
        assert_eq!(out, vec!["a", "b"]);
        assert_eq!(s.pos(), 4);
    }

    #[test]
    fn test_tokenize_zero_limit_reads_nothing() {
        let mut s = stream(b"a\tb\t");
        let mut out = Vec::new();
        assert!(tokenize(&mut s, &mut out, TokenRules::BINARY_ROW_NAMES, 0, Some(0)));
        assert!(out.is_empty());
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn test_quotes_keep_split_and_end_bytes() {
        let mut s = stream(b"\"two words\" \"line\nbreak\" plain\n");
        assert_eq!(line(&mut s, 0, None), vec!["two words", "line\nbreak", "plain"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_eof() {
        let mut s = stream(b"a \"b c");
        assert_eq!(line(&mut s, 0, None), vec!["a", "b c"]);
    }

    #[test]
    fn test_ignore_bytes_are_dropped() {
        let mut s = stream(b"a b\r\nc\r\n");
        assert_eq!(line(&mut s, 0, None), vec!["a", "b"]);
        assert_eq!(line(&mut s, 0, None), vec!["c"]);
    }

    #[test]
    fn test_end_of_data() {
        let mut s = stream(b"x\n");
        assert_eq!(line(&mut s, 0, None), vec!["x"]);
        let mut out = Vec::new();
        assert!(!tokenize(&mut s, &mut out, TokenRules::TEXT, 0, None));
        assert!(out.is_empty());
    }

    #[test]
    fn test_blank_line_reads_but_yields_nothing() {
        let mut s = stream(b"\nx\n");
        let mut out = Vec::new();
        assert!(tokenize(&mut s, &mut out, TokenRules::TEXT, 0, None));
        assert!(out.is_empty());
        assert_eq!(line(&mut s, 0, None), vec!["x"]);
    }

    #[test]
    fn test_next_token_reports_boundary() {
        let mut s = stream(b"ab\0cd");
        let first = next_token(&mut s, TokenRules::BINARY_HEADERS).unwrap();
        assert_eq!(first.text, "ab");
        assert_eq!(first.boundary, Boundary::End);

        let second = next_token(&mut s, TokenRules::BINARY_HEADERS).unwrap();
        assert_eq!(second.text, "cd");
        assert_eq!(second.boundary, Boundary::Eof);

        assert!(next_token(&mut s, TokenRules::BINARY_HEADERS).is_none());
    }

    #[test]
    fn test_non_utf8_falls_back_to_latin1() {
        let mut s = stream(b"caf\xe9\n");
        assert_eq!(line(&mut s, 0, None), vec!["caf\u{e9}"]);
    }
}
