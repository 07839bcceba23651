//! Document → markup rendering.
//!
//! [`Renderer`] is a pure string accumulator over a [`Document`]: one pass,
//! no backtracking, no I/O. It exactly inverts the generator's token
//! conventions — attribute blocks `{#id .class key="value"}`, shortcodes
//! `{{< ... >}}` / `{{{< ... >}}}`, emphasis `*...*`, spans `[...]{}` and
//! links `[text](target)` — so the output exercises every surface the
//! downstream parser has to handle.
//!
//! The only fallible step is the YAML front-matter stringification, which
//! is delegated to `serde_yaml`.

use crate::ast::{Attr, Block, Document, Inline};
use crate::error::Result;

/// Stateful accumulator for one rendering pass.
pub struct Renderer {
    output: String,
    // Paragraph indent in two-space units. Tracked for nested block kinds;
    // nothing adjusts it while Para is the only block.
    indent: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit `{#id .class key="value"}`, or nothing when absent.
    pub fn render_attr(&mut self, attr: Option<&Attr>) {
        let Some(attr) = attr else {
            return;
        };
        self.output.push_str("{#");
        self.output.push_str(&attr.id);
        for class in &attr.classes {
            self.output.push_str(" .");
            self.output.push_str(class);
        }
        for (key, value) in &attr.attributes {
            self.output.push(' ');
            self.output.push_str(key);
            self.output.push_str("=\"");
            self.output.push_str(value);
            self.output.push('"');
        }
        self.output.push('}');
    }

    /// Emit `{{< content >}}`, with one extra brace pair on each side when
    /// escaped. The two forms never mix.
    pub fn render_shortcode(&mut self, content: &str, escaped: bool) {
        let (open, close) = if escaped {
            ("{{{< ", " >}}}")
        } else {
            ("{{< ", " >}}")
        };
        self.output.push_str(open);
        self.output.push_str(content);
        self.output.push_str(close);
    }

    pub fn render_inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Str { text } => self.output.push_str(text),
            Inline::Space => self.output.push(' '),
            Inline::Code { attr, text } => {
                self.output.push('`');
                self.output.push_str(text);
                self.output.push('`');
                self.render_attr(attr.as_ref());
            }
            Inline::Emph { content } => {
                self.output.push('*');
                for inner in content {
                    self.render_inline(inner);
                }
                self.output.push('*');
            }
            Inline::Span { attr, content } => {
                self.output.push('[');
                for inner in content {
                    self.render_inline(inner);
                }
                self.output.push(']');
                // An unattributed span still closes with `{}` so the
                // brackets read as a span, not literal text.
                match attr {
                    Some(attr) => self.render_attr(Some(attr)),
                    None => self.output.push_str("{}"),
                }
            }
            Inline::Link {
                attr,
                content,
                target,
            } => {
                self.output.push('[');
                for inner in content {
                    self.render_inline(inner);
                }
                self.output.push_str("](");
                self.output.push_str(target);
                self.output.push(')');
                self.render_attr(attr.as_ref());
            }
            Inline::Shortcode { content, escaped } => {
                self.render_shortcode(content, *escaped);
            }
        }
    }

    /// Emit a blank-line separator, the current indent, then the content.
    pub fn render_para(&mut self, content: &[Inline]) {
        self.output.push_str("\n\n");
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        for inline in content {
            self.render_inline(inline);
        }
    }

    pub fn render_block(&mut self, block: &Block) {
        match block {
            Block::Para { content } => self.render_para(content),
        }
    }

    /// Render front matter (when meta is non-empty) followed by every
    /// block.
    pub fn render_document(&mut self, document: &Document) -> Result<()> {
        if !document.meta.is_empty() {
            self.output.push_str("---\n");
            self.output.push_str(&serde_yaml::to_string(&document.meta)?);
            self.output.push_str("---\n\n");
        }
        for block in &document.blocks {
            self.render_block(block);
        }
        Ok(())
    }

    /// Yield the accumulated output.
    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a document to a string.
///
/// The main entry point for rendering: creates a [`Renderer`], serializes
/// the document, and returns the accumulated markup.
pub fn render_document(document: &Document) -> Result<String> {
    let mut renderer = Renderer::new();
    renderer.render_document(document)?;
    Ok(renderer.finish())
}
