//! Storage-format markup to plain text.
//!
//! The fragment is parsed with `scraper` (html5ever), so unbalanced tags and
//! HTML entities such as `&nbsp;` are handled the way a browser would.
//! Whitespace inside text nodes collapses to single spaces, block elements
//! start a new line, inline elements are concatenated.
//!
//! Code and noformat macros keep their body in a `<![CDATA[...]]>` section,
//! which html5ever reads as a comment outside foreign content. Those sections
//! are rewritten into escaped text before parsing.

use std::borrow::Cow;
use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{Html, Node};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());

/// Elements rendered on their own line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tr",
    "ul",
    "ac:layout-cell",
    "ac:layout-section",
    "ac:plain-text-body",
    "ac:structured-macro",
    "ac:task",
];

/// Elements separated from their siblings by a space.
const CELL_ELEMENTS: &[&str] = &["td", "th"];

/// Elements whose content is never text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Convert storage-format markup into plain text.
///
/// The result contains no tags, no empty lines, and no runs of whitespace.
#[must_use]
pub fn html_to_text(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let markup = unwrap_cdata(markup);
    let fragment = Html::parse_fragment(&markup);
    let mut raw = String::with_capacity(markup.len());
    collect_text(fragment.tree.root(), &mut raw);
    normalize_whitespace(&raw)
}

/// Replace every CDATA section with its content, escaped as HTML text.
fn unwrap_cdata(markup: &str) -> Cow<'_, str> {
    if !markup.contains("<![CDATA[") {
        return Cow::Borrowed(markup);
    }
    CDATA_RE.replace_all(markup, |caps: &regex::Captures<'_>| {
        caps[1]
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    })
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&WHITESPACE_RE.replace_all(text, " ")),
            Node::Element(element) => {
                let name = element.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    out.push('\n');
                } else if CELL_ELEMENTS.contains(&name) {
                    out.push(' ');
                }
                collect_text(child, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn normalize_whitespace(raw: &str) -> String {
    raw.lines()
        .map(|line| WHITESPACE_RE.replace_all(line, " ").trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
