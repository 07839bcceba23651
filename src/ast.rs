//! Document tree types.
//!
//! A minimal Pandoc-like model: a [`Document`] is a sequence of [`Block`]s
//! plus a metadata mapping, blocks contain [`Inline`]s, and certain inlines
//! carry an optional [`Attr`] block. The tree is built once by the generator
//! and never mutated afterwards.
//!
//! All types serialize with a `type` discriminant field so `--dump-ast`
//! output can be diffed against hand-written fixtures.

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_yaml::Value;

/// Attribute block attachable to certain inline elements, modeled after
/// Pandoc's generic attribute syntax (`{#id .class key="value"}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attr {
    /// Bare identifier, never starting with a decimal digit.
    pub id: String,
    /// Class names. Deduplicated within this element; repeats across
    /// elements are deliberate.
    pub classes: Vec<String>,
    /// Key/value attributes, insertion-ordered.
    pub attributes: IndexMap<String, String>,
}

/// Inline-level content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Inline {
    /// Literal text.
    Str { text: String },
    /// A single word separator.
    Space,
    /// Inline code, optionally attributed (`` `x`{#id} ``).
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        attr: Option<Attr>,
        text: String,
    },
    /// Emphasis (`*...*`).
    Emph { content: Vec<Inline> },
    /// Bracketed span (`[...]{...}`). Renders a trailing `{}` even when
    /// unattributed so the brackets parse as a span, not plain text.
    Span {
        #[serde(skip_serializing_if = "Option::is_none")]
        attr: Option<Attr>,
        content: Vec<Inline>,
    },
    /// Link (`[text](target)` plus optional attribute block).
    Link {
        #[serde(skip_serializing_if = "Option::is_none")]
        attr: Option<Attr>,
        content: Vec<Inline>,
        target: String,
    },
    /// Template-engine token: `{{< content >}}`, or `{{{< content >}}}`
    /// when escaped.
    Shortcode { content: String, escaped: bool },
}

/// Block-level content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Block {
    /// Paragraph of inline content.
    Para { content: Vec<Inline> },
}

/// A complete document: blocks plus YAML-front-matter metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
    /// Metadata referenced by generated `meta <key>` shortcodes.
    /// Insertion-ordered; keys are unique.
    pub meta: IndexMap<String, Value>,
}

// The root carries the same `type` discriminant as the nodes beneath it.
impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Document", 3)?;
        state.serialize_field("type", "Document")?;
        state.serialize_field("blocks", &self.blocks)?;
        state.serialize_field("meta", &self.meta)?;
        state.end()
    }
}
