//! HTML parser for extracting the title and outbound links of a page
//!
//! Extraction runs over the html5ever token stream rather than a DOM, so
//! memory use stays proportional to the input no matter how deeply nested
//! or unclosed the markup is.
//!
//! Extraction is best-effort and total: any byte input yields a
//! [`ParsedPage`], at worst with an empty title and no links.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Literal text of the first `<title>` element; empty when there is none
    pub title: String,

    /// Absolute links from `<a href>` in document order, duplicates included
    pub links: Vec<String>,

    /// Markup errors the tokenizer recovered from
    pub parse_errors: usize,
}

/// Returns true if `href` passes the absolute-link filter
///
/// The filter is deliberately crude: the value must be non-empty and start
/// with `http`. Relative, fragment and protocol-relative links fail it.
pub fn is_absolute_link(href: &str) -> bool {
    !href.is_empty() && href.starts_with("http")
}

/// Parses HTML bytes and extracts the page title and absolute links
///
/// # Extraction Rules
///
/// - Title: the text immediately following the first `<title>` start tag.
///   If anything other than text follows it, the title is empty.
/// - Links: the first `href` attribute of each `<a>` start tag, kept only if
///   it passes [`is_absolute_link`].
/// - `<title>` and `<textarea>` contents are read as escapable raw text;
///   `<script>`, `<style>`, `<noscript>`, `<iframe>`, `<noembed>`,
///   `<noframes>` and `<xmp>` as raw text; everything after `<plaintext>` as
///   plain text. Tag-like text inside them is not mistaken for markup.
/// - Markup errors are recovered from and counted; extraction only ends at
///   the end of input.
///
/// # Example
///
/// ```
/// use breadth_crawl::crawler::parse_html;
///
/// let html = br#"<html><head><title>Test</title></head>
///     <body><a href="https://example.com/a">A</a><a href="/b">B</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["https://example.com/a".to_string()]);
/// ```
pub fn parse_html(content: &[u8]) -> ParsedPage {
    let text = String::from_utf8_lossy(content);

    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(&text));

    let mut tokenizer = Tokenizer::new(ExtractSink::default(), TokenizerOpts::default());
    match tokenizer.feed(&mut input) {
        TokenizerResult::Done => {}
        // ExtractSink never asks for a script to be run
        TokenizerResult::Script(()) => {}
    }
    tokenizer.end();

    tokenizer.sink.finish()
}

/// Where the sink is with respect to the page title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TitleState {
    /// No `<title>` start tag seen yet
    #[default]
    Pending,
    /// Collecting the text run right after the first `<title>`
    Capturing,
    /// Title settled; later `<title>` tags are ignored
    Done,
}

#[derive(Debug, Default)]
struct ExtractSink {
    title: String,
    title_state: TitleState,
    links: Vec<String>,
    parse_errors: usize,
}

impl ExtractSink {
    fn finish(self) -> ParsedPage {
        ParsedPage {
            title: self.title,
            links: self.links,
            parse_errors: self.parse_errors,
        }
    }

    fn start_tag(&mut self, tag: &Tag) -> TokenSinkResult<()> {
        match &*tag.name {
            "title" => {
                if self.title_state == TitleState::Pending {
                    self.title_state = TitleState::Capturing;
                }
                TokenSinkResult::RawData(RawKind::Rcdata)
            }
            "a" => {
                if let Some(href) = href_of(tag) {
                    self.links.push(href);
                }
                TokenSinkResult::Continue
            }
            "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "noscript" | "iframe" | "noembed" | "noframes" | "xmp" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "plaintext" => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }
}

impl TokenSink for ExtractSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        // Errors are diagnostics; the tokenizer has already recovered.
        if let Token::ParseError(reason) = &token {
            tracing::trace!("Markup error on line {}: {}", line_number, reason);
            self.parse_errors += 1;
            return TokenSinkResult::Continue;
        }

        if self.title_state == TitleState::Capturing {
            if let Token::CharacterTokens(text) = &token {
                self.title.push_str(text);
                return TokenSinkResult::Continue;
            }
            self.title_state = TitleState::Done;
        }

        match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => self.start_tag(&tag),
            _ => TokenSinkResult::Continue,
        }
    }
}

/// Returns the tag's first `href` value if it passes the absolute-link filter
fn href_of(tag: &Tag) -> Option<String> {
    let href = tag.attrs.iter().find(|attr| &*attr.name.local == "href")?;
    let value: &str = &href.value;
    is_absolute_link(value).then(|| value.to_string())
}
