//! Small state-machine tokenizer for table markup
//!
//! Produces open-tag, close-tag and text tokens. It only understands as much
//! HTML as a converted table needs: attributes (quoted, unquoted, bare),
//! self-closing tags, comments and declarations. Anything it cannot close
//! (a tag without `>`, a quoted value without its closing quote, a `<` inside
//! a tag) is reported as a parse error so the caller can keep the original
//! markup.

use crate::utils::error::{ConversionError, ConversionResult};

/// A lexical unit of table markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name attr="v" …>` or `<name … />`
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    /// `</name>`
    Close { name: String },
    /// Character data between tags, entities untouched
    Text(&'a str),
}

impl Token<'_> {
    /// Look up an attribute on an opening tag (names are lowercase)
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Token::Open { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// States inside a start tag
#[derive(Debug, Clone, Copy)]
enum TagState {
    Name,
    BeforeAttr,
    AttrName(usize),
    AfterAttrName,
    BeforeValue,
    QuotedValue(u8, usize),
    UnquotedValue(usize),
    SelfClosing,
}

/// Streaming tokenizer; stops after the first error
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Tokenizer {
            src,
            pos: 0,
            failed: false,
        }
    }

    fn start_tag(&mut self) -> ConversionResult<Token<'a>> {
        let src = self.src;
        let bytes = src.as_bytes();
        let tag_start = self.pos;
        let name_start = self.pos + 1;
        let mut name_end = name_start;
        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut pending: Option<(usize, usize)> = None;
        let mut self_closing = false;
        let mut state = TagState::Name;
        let mut i = name_start;

        let attr_name = |span: (usize, usize)| src[span.0..span.1].to_ascii_lowercase();

        let close_at = loop {
            let Some(&b) = bytes.get(i) else {
                return Err(match state {
                    TagState::QuotedValue(_, _) => {
                        ConversionError::parse_at("unterminated quoted attribute value", tag_start)
                    }
                    _ => ConversionError::parse_at("unterminated tag", tag_start),
                });
            };

            match state {
                TagState::QuotedValue(quote, value_start) => {
                    if b == quote {
                        if let Some(span) = pending.take() {
                            attrs.push((attr_name(span), src[value_start..i].to_string()));
                        }
                        state = TagState::BeforeAttr;
                    }
                    i += 1;
                    continue;
                }
                _ if b == b'<' => {
                    return Err(ConversionError::parse_at("'<' inside tag", i));
                }
                _ => {}
            }

            match state {
                TagState::Name => {
                    if b.is_ascii_whitespace() || b == b'>' || b == b'/' {
                        name_end = i;
                        match b {
                            b'>' => break i,
                            b'/' => state = TagState::SelfClosing,
                            _ => state = TagState::BeforeAttr,
                        }
                    }
                }
                TagState::BeforeAttr => match b {
                    b'>' => break i,
                    b'/' => state = TagState::SelfClosing,
                    _ if b.is_ascii_whitespace() => {}
                    _ => state = TagState::AttrName(i),
                },
                TagState::AttrName(start) => match b {
                    b'=' => {
                        pending = Some((start, i));
                        state = TagState::BeforeValue;
                    }
                    b'>' | b'/' => {
                        attrs.push((attr_name((start, i)), String::new()));
                        if b == b'>' {
                            break i;
                        }
                        state = TagState::SelfClosing;
                    }
                    _ if b.is_ascii_whitespace() => {
                        pending = Some((start, i));
                        state = TagState::AfterAttrName;
                    }
                    _ => {}
                },
                TagState::AfterAttrName => match b {
                    b'=' => state = TagState::BeforeValue,
                    _ if b.is_ascii_whitespace() => {}
                    _ => {
                        // Bare attribute followed by another one
                        if let Some(span) = pending.take() {
                            attrs.push((attr_name(span), String::new()));
                        }
                        match b {
                            b'>' => break i,
                            b'/' => state = TagState::SelfClosing,
                            _ => state = TagState::AttrName(i),
                        }
                    }
                },
                TagState::BeforeValue => match b {
                    b'"' | b'\'' => state = TagState::QuotedValue(b, i + 1),
                    b'>' => {
                        if let Some(span) = pending.take() {
                            attrs.push((attr_name(span), String::new()));
                        }
                        break i;
                    }
                    _ if b.is_ascii_whitespace() => {}
                    _ => state = TagState::UnquotedValue(i),
                },
                TagState::UnquotedValue(start) => {
                    if b.is_ascii_whitespace() || b == b'>' {
                        if let Some(span) = pending.take() {
                            attrs.push((attr_name(span), src[start..i].to_string()));
                        }
                        if b == b'>' {
                            break i;
                        }
                        state = TagState::BeforeAttr;
                    }
                }
                TagState::SelfClosing => match b {
                    b'>' => {
                        self_closing = true;
                        break i;
                    }
                    _ if b.is_ascii_whitespace() => {}
                    _ => {
                        // Stray '/', reprocess this byte as an attribute start
                        state = TagState::BeforeAttr;
                        continue;
                    }
                },
                TagState::QuotedValue(_, _) => unreachable!("handled above"),
            }
            i += 1;
        };

        let name = src[name_start..name_end].to_ascii_lowercase();
        self.pos = close_at + 1;
        Ok(Token::Open {
            name,
            attrs,
            self_closing,
        })
    }

    fn end_tag(&mut self) -> ConversionResult<Token<'a>> {
        let bytes = self.src.as_bytes();
        let tag_start = self.pos;
        let name_start = self.pos + 2;
        let mut name_end = None;
        let mut i = name_start;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'>' => {
                    let end = name_end.unwrap_or(i);
                    self.pos = i + 1;
                    return Ok(Token::Close {
                        name: self.src[name_start..end].to_ascii_lowercase(),
                    });
                }
                b'<' => return Err(ConversionError::parse_at("'<' inside end tag", i)),
                _ if b.is_ascii_whitespace() && name_end.is_none() => name_end = Some(i),
                _ => {}
            }
            i += 1;
        }
        Err(ConversionError::parse_at("unterminated end tag", tag_start))
    }

    fn skip_until(&mut self, terminator: &str, what: &str) -> ConversionResult<()> {
        let start = self.pos;
        match self.src[start..].find(terminator) {
            Some(offset) => {
                self.pos = start + offset + terminator.len();
                Ok(())
            }
            None => Err(ConversionError::parse_at(format!("unterminated {}", what), start)),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = ConversionResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed || self.pos >= self.src.len() {
                return None;
            }

            let rest = &self.src[self.pos..];
            if !rest.starts_with('<') {
                let end = rest.find('<').map_or(self.src.len(), |i| self.pos + i);
                let text = &self.src[self.pos..end];
                self.pos = end;
                return Some(Ok(Token::Text(text)));
            }

            let step = if rest.starts_with("<!--") {
                self.skip_until("-->", "comment").map(|_| None)
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_until(">", "declaration").map(|_| None)
            } else if rest.starts_with("</") {
                self.end_tag().map(Some)
            } else if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                self.start_tag().map(Some)
            } else {
                // A lone '<' is just text
                let text = &self.src[self.pos..self.pos + 1];
                self.pos += 1;
                return Some(Ok(Token::Text(text)));
            };

            match step {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Tokenize a whole table span
pub fn tokenize(markup: &str) -> ConversionResult<Vec<Token<'_>>> {
    Tokenizer::new(markup).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(name: &str, attrs: &[(&str, &str)]) -> Token<'static> {
        Token::Open {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            self_closing: false,
        }
    }

    fn close(name: &str) -> Token<'static> {
        Token::Close {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = tokenize("<td>A</td>").unwrap();
        assert_eq!(tokens, vec![open("td", &[]), Token::Text("A"), close("td")]);
    }

    #[test]
    fn test_attribute_forms() {
        let tokens = tokenize(r#"<TD RowSpan="2" class='x y' width=10 hidden>"#).unwrap();
        assert_eq!(
            tokens,
            vec![open(
                "td",
                &[
                    ("rowspan", "2"),
                    ("class", "x y"),
                    ("width", "10"),
                    ("hidden", "")
                ]
            )]
        );
        assert_eq!(tokens[0].attr("rowspan"), Some("2"));
    }

    #[test]
    fn test_spaced_equals_and_gt_in_quotes() {
        let tokens = tokenize(r#"<td title = "a > b">"#).unwrap();
        assert_eq!(tokens[0].attr("title"), Some("a > b"));
    }

    #[test]
    fn test_self_closing_break() {
        let tokens = tokenize("a<br/>b<br />c").unwrap();
        assert_eq!(tokens.len(), 5);
        assert!(matches!(
            &tokens[1],
            Token::Open { name, self_closing: true, .. } if name == "br"
        ));
        assert!(matches!(
            &tokens[3],
            Token::Open { name, self_closing: true, .. } if name == "br"
        ));
    }

    #[test]
    fn test_comments_and_declarations_skipped() {
        let tokens = tokenize("<!-- note --><td>x</td><!DOCTYPE html>").unwrap();
        assert_eq!(tokens, vec![open("td", &[]), Token::Text("x"), close("td")]);
    }

    #[test]
    fn test_lone_lt_is_text() {
        let tokens = tokenize("<td>1 < 2</td>").unwrap();
        let text: String = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Text(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(text, "1 < 2");
    }

    #[test]
    fn test_unterminated_tag_is_error() {
        assert!(tokenize("<td>1</td><td").is_err());
        assert!(tokenize("<td>1</td").is_err());
    }

    #[test]
    fn test_lt_inside_tag_is_error() {
        let err = tokenize("<td</tbody>").unwrap_err();
        assert!(err.to_string().contains("inside tag"));
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        let err = tokenize(r#"<td class="x>1</td>"#).unwrap_err();
        assert!(err.to_string().contains("quoted"));
    }

    #[test]
    fn test_unterminated_comment_is_error() {
        assert!(tokenize("<td>1</td><!-- open").is_err());
    }
}
