//! Stochastic document generation.
//!
//! [`Generator`] builds a random [`Document`] tree under a probability
//! configuration and a set of size budgets. Recursion terminates because
//! every descent into a container derives a [`Sizes::smaller`] budget, so
//! content counts shrink toward one as the tree deepens.
//!
//! The generator owns the three pools shared across one run (`classes`,
//! `ids`, `meta`); child "configurations" are just smaller [`Sizes`] values
//! threaded through calls. Pools only grow, and the meta mapping collected
//! while generating shortcodes is attached to the finished document.
//!
//! Draw discipline: every probabilistic decision consumes exactly one
//! [`RandomSource::next_unit`] draw, in a fixed order per operation, so a
//! seeded source replays the same document across runs.

mod config;

pub use config::{Probabilities, Sizes};

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::ast::{Attr, Block, Document, Inline};
use crate::rng::{RandomSource, ThreadSource};

const PUNCTUATION: [&str; 6] = [".", "!", "?", ",", ";", ":"];
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Outcome of the inline-kind cascade: which constructor to dispatch to,
/// or `Null` when all six gates failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    Str,
    Code,
    Span,
    Emph,
    Link,
    InlineShortcode,
    Null,
}

/// Randomized document generator.
///
/// Holds the probability configuration, the top-level size budgets, and the
/// pools that grow over one generation run.
pub struct Generator<R: RandomSource = ThreadSource> {
    rng: R,
    pub probabilities: Probabilities,
    pub sizes: Sizes,
    classes: Vec<String>,
    ids: Vec<String>,
    meta: IndexMap<String, Value>,
}

impl Generator<ThreadSource> {
    /// Generator drawing from OS entropy, with default probabilities and
    /// sizes.
    pub fn new() -> Self {
        Self::with_source(ThreadSource::new())
    }
}

impl Default for Generator<ThreadSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Generator<R> {
    /// Generator drawing from an explicit source.
    pub fn with_source(rng: R) -> Self {
        Self {
            rng,
            probabilities: Probabilities::default(),
            sizes: Sizes::default(),
            classes: Vec::new(),
            ids: Vec::new(),
            meta: IndexMap::new(),
        }
    }

    /// Class pool minted so far this run.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Element id pool minted so far this run.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Metadata collected from shortcode generation so far this run.
    pub fn meta(&self) -> &IndexMap<String, Value> {
        &self.meta
    }

    fn unit(&mut self) -> f64 {
        self.rng.next_unit()
    }

    /// One Bernoulli gate: a fresh draw against `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform index in `0..n` (`0` when `n` is zero).
    fn index(&mut self, n: usize) -> usize {
        (self.unit() * n as f64) as usize
    }

    ////////////////////////////////////////////////////////////////////////
    // Identifiers and attributes

    /// Mint a base-36 token of length 3-9. Consumes two draws: one for the
    /// digits, one for the length (3..=8 before prefixing). A leading
    /// decimal digit gets an `a` prefix so the result is always a valid
    /// bare identifier.
    pub fn fresh_id(&mut self) -> String {
        let mut frac = self.unit();
        let len = 3 + (self.unit() * 6.0) as usize;
        let mut id = String::with_capacity(len + 1);
        for _ in 0..len {
            frac *= 36.0;
            let digit = (frac as usize).min(35);
            frac -= digit as f64;
            id.push(BASE36[digit] as char);
        }
        if id.as_bytes()[0].is_ascii_digit() {
            id.insert(0, 'a');
        }
        id
    }

    /// Mint a fresh id and record it in the shared id pool.
    pub fn random_id(&mut self) -> String {
        let id = self.fresh_id();
        self.ids.push(id.clone());
        id
    }

    /// Mint a fresh class (growing the pool) or reuse an existing one.
    /// The mint-vs-reuse draw is always consumed, even when an empty pool
    /// forces minting.
    pub fn random_class(&mut self) -> String {
        let mint = self.chance(self.probabilities.reuse_class);
        if mint || self.classes.is_empty() {
            let id = self.fresh_id();
            self.classes.push(id.clone());
            id
        } else {
            let i = self.index(self.classes.len());
            self.classes[i].clone()
        }
    }

    /// 1-3 classes for one element. Duplicate draws are dropped rather than
    /// retried, so the chosen count is an upper bound.
    pub fn random_classes(&mut self) -> Vec<String> {
        let count = self.index(3) + 1;
        let mut classes = Vec::new();
        for _ in 0..count {
            let id = self.random_class();
            if !classes.contains(&id) {
                classes.push(id);
            }
        }
        classes
    }

    /// 1-3 fresh key/value pairs. Key collisions silently overwrite.
    pub fn random_attributes(&mut self) -> IndexMap<String, String> {
        let count = self.index(3) + 1;
        let mut attributes = IndexMap::new();
        for _ in 0..count {
            let key = self.fresh_id();
            let value = self.fresh_id();
            attributes.insert(key, value);
        }
        attributes
    }

    /// Attribute block with probability `probabilities.attr`, else nothing.
    pub fn random_attr(&mut self) -> Option<Attr> {
        if !self.chance(self.probabilities.attr) {
            return None;
        }
        Some(Attr {
            id: self.random_id(),
            classes: self.random_classes(),
            attributes: self.random_attributes(),
        })
    }

    ////////////////////////////////////////////////////////////////////////
    // Inlines

    /// Six independent Bernoulli gates in priority order, each consuming
    /// its own fresh draw. Falls through to `Null` only when every gate
    /// fails, which under the default configuration is vanishingly rare.
    pub fn choose_inline_kind(&mut self) -> InlineKind {
        if self.chance(self.probabilities.str) {
            return InlineKind::Str;
        }
        if self.chance(self.probabilities.code) {
            return InlineKind::Code;
        }
        if self.chance(self.probabilities.span) {
            return InlineKind::Span;
        }
        if self.chance(self.probabilities.emph) {
            return InlineKind::Emph;
        }
        if self.chance(self.probabilities.link) {
            return InlineKind::Link;
        }
        if self.chance(self.probabilities.shortcode) {
            return InlineKind::InlineShortcode;
        }
        InlineKind::Null
    }

    /// Generate one inline, or `None` when the cascade fell through.
    pub fn generate_inline(&mut self, sizes: Sizes) -> Option<Inline> {
        match self.choose_inline_kind() {
            InlineKind::Str => Some(self.generate_str()),
            InlineKind::Code => Some(self.generate_code()),
            InlineKind::Span => Some(self.generate_span(sizes)),
            InlineKind::Emph => Some(self.generate_emph(sizes)),
            InlineKind::Link => Some(self.generate_link(sizes)),
            InlineKind::InlineShortcode => Some(self.generate_inline_shortcode()),
            InlineKind::Null => None,
        }
    }

    pub fn generate_str(&mut self) -> Inline {
        Inline::Str {
            text: self.fresh_id(),
        }
    }

    pub fn generate_code(&mut self) -> Inline {
        // attr draws before the code text
        Inline::Code {
            attr: self.random_attr(),
            text: self.fresh_id(),
        }
    }

    /// Fill `1..=sizes.inline` children from the already-smaller budget,
    /// dropping any `Null` outcomes.
    fn generate_content(&mut self, sizes: Sizes) -> Vec<Inline> {
        let count = self.index(sizes.inline) + 1;
        let mut content = Vec::new();
        for _ in 0..count {
            if let Some(inline) = self.generate_inline(sizes) {
                content.push(inline);
            }
        }
        content
    }

    pub fn generate_emph(&mut self, sizes: Sizes) -> Inline {
        let small = sizes.smaller();
        Inline::Emph {
            content: self.generate_content(small),
        }
    }

    pub fn generate_span(&mut self, sizes: Sizes) -> Inline {
        let small = sizes.smaller();
        let content = self.generate_content(small);
        // attr draws after the content
        Inline::Span {
            attr: self.random_attr(),
            content,
        }
    }

    pub fn generate_link(&mut self, sizes: Sizes) -> Inline {
        let small = sizes.smaller();
        let content = self.generate_content(small);
        let attr = self.random_attr();
        Inline::Link {
            attr,
            content,
            target: self.generate_target(),
        }
    }

    /// Link target: a fresh id, sometimes with a shortcode literal spliced
    /// in as plain text (not a typed node).
    pub fn generate_target(&mut self) -> String {
        let mut target = self.fresh_id();
        if self.chance(self.probabilities.target_shortcode) {
            let content = self.shortcode_content();
            target = format!("{target}-{{{{< {content} >}}}}");
        }
        target
    }

    /// Mint a fresh meta entry and return the `meta <key>` shortcode body
    /// that references it.
    fn shortcode_content(&mut self) -> String {
        let key = self.fresh_id();
        let value = self.fresh_id();
        let content = format!("meta {key}");
        self.meta.insert(key, Value::String(value));
        content
    }

    pub fn generate_inline_shortcode(&mut self) -> Inline {
        Inline::Shortcode {
            content: self.shortcode_content(),
            escaped: false,
        }
    }

    pub fn generate_punctuation(&mut self) -> String {
        PUNCTUATION[self.index(PUNCTUATION.len())].to_string()
    }

    ////////////////////////////////////////////////////////////////////////
    // Blocks

    /// Paragraph: `1..=small.inline` sentences of `1..=small.sentence`
    /// positions each. A generated inline is followed by a `Space` (or by
    /// terminating punctuation at the last position); a `Null` position
    /// degrades to bare punctuation with no separator.
    pub fn generate_para(&mut self, sizes: Sizes) -> Block {
        let small = sizes.smaller();
        let sentence_count = self.index(small.inline) + 1;
        let mut content = Vec::new();

        for s in 0..sentence_count {
            let sentence_len = self.index(small.sentence) + 1;
            for i in 0..sentence_len {
                match self.generate_inline(small) {
                    Some(inline) => {
                        content.push(inline);
                        if i != sentence_len - 1 {
                            content.push(Inline::Space);
                        } else {
                            content.push(Inline::Str {
                                text: self.generate_punctuation(),
                            });
                        }
                    }
                    None => content.push(Inline::Str {
                        text: self.generate_punctuation(),
                    }),
                }
            }
            if s != sentence_count - 1 {
                content.push(Inline::Space);
            }
        }

        Block::Para { content }
    }

    pub fn generate_block(&mut self, sizes: Sizes) -> Block {
        self.generate_para(sizes)
    }

    ////////////////////////////////////////////////////////////////////////
    // Documents

    /// Generate a whole document: `1..=(sizes.block / 2)` blocks under the
    /// halved top-level budget, with the run's collected meta attached.
    pub fn generate_document(&mut self) -> Document {
        let small = self.sizes.smaller();
        let block_count = self.index(small.block) + 1;
        let mut blocks = Vec::with_capacity(block_count);
        for _ in 0..block_count {
            blocks.push(self.generate_block(small));
        }
        Document {
            blocks,
            meta: self.meta.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, SeededSource};
    use proptest::prelude::*;

    fn scripted(draws: impl IntoIterator<Item = f64>) -> Generator<ScriptedSource> {
        Generator::with_source(ScriptedSource::new(draws))
    }

    #[test]
    fn test_fresh_id_expands_base36_digits() {
        // 0.5 in base 36 is "i"; length draw of 0.0 gives 3 digits.
        let mut generator = scripted([0.5, 0.0]);
        assert_eq!(generator.fresh_id(), "i00");
    }

    #[test]
    fn test_fresh_id_prefixes_leading_digit() {
        // 0.1 * 36 = 3.6, so the first digit is "3" and the prefix kicks in.
        let mut generator = scripted([0.1, 0.0]);
        let id = generator.fresh_id();
        assert!(id.starts_with('a'));
        assert_eq!(id.len(), 4);
    }

    #[test]
    fn test_fresh_id_length_range() {
        // Length draw just under 1.0 gives the maximum 8 digits.
        let mut generator = scripted([0.5, 0.999]);
        assert_eq!(generator.fresh_id().len(), 8);
    }

    #[test]
    fn test_random_id_grows_pool() {
        let mut generator = scripted([0.5, 0.0, 0.75, 0.0]);
        let first = generator.random_id();
        let second = generator.random_id();
        assert_eq!(generator.ids(), &[first, second]);
    }

    #[test]
    fn test_random_class_mints_when_pool_empty() {
        // Gate draw 0.9 fails reuse_class = 0.5, but the empty pool forces
        // a mint anyway; the gate draw is still consumed first.
        let mut generator = scripted([0.9, 0.5, 0.0]);
        let class = generator.random_class();
        assert_eq!(class, "i00");
        assert_eq!(generator.classes(), &["i00".to_string()]);
    }

    #[test]
    fn test_random_class_reuses_existing() {
        let mut generator = scripted([
            0.9, 0.5, 0.0, // forced mint of "i00"
            0.9, 0.0, // gate fails, index 0 reuses "i00"
        ]);
        let minted = generator.random_class();
        let reused = generator.random_class();
        assert_eq!(minted, reused);
        assert_eq!(generator.classes().len(), 1);
    }

    #[test]
    fn test_random_class_mints_on_gate_success() {
        let mut generator = scripted([
            0.9, 0.5, 0.0, // forced mint of "i00"
            0.1, 0.75, 0.0, // gate passes, mints "r00"
        ]);
        generator.random_class();
        let second = generator.random_class();
        assert_eq!(second, "r00");
        assert_eq!(generator.classes().len(), 2);
    }

    #[test]
    fn test_random_attr_absent_when_gate_fails() {
        let mut generator = scripted([0.99]);
        assert!(generator.random_attr().is_none());
    }

    #[test]
    fn test_random_attr_field_order() {
        let mut generator = scripted([
            0.0, // attr gate passes (0.0 < 0.95)
            0.5, 0.0, // id "i00"
            0.0, // class count 1
            0.9, 0.75, 0.0, // forced mint "r00"
            0.0, // attribute count 1
            0.25, 0.0, // key
            0.5, 0.0, // value
        ]);
        let attr = generator.random_attr().unwrap();
        assert_eq!(attr.id, "i00");
        assert_eq!(attr.classes, vec!["r00".to_string()]);
        assert_eq!(attr.attributes.get("a900"), Some(&"i00".to_string()));
        assert_eq!(generator.ids(), &["i00".to_string()]);
    }

    #[test]
    fn test_choose_inline_kind_cascade_consumes_one_draw_per_gate() {
        // Defaults: str 0.9, then 0.5 for the rest. First draw fails the
        // str gate, second passes code.
        let mut generator = scripted([0.95, 0.3]);
        assert_eq!(generator.choose_inline_kind(), InlineKind::Code);

        // All six gates fail.
        let mut generator = scripted([0.95, 0.6, 0.6, 0.6, 0.6, 0.6]);
        assert_eq!(generator.choose_inline_kind(), InlineKind::Null);
    }

    #[test]
    fn test_shortcode_mints_meta_entry() {
        let mut generator = scripted([0.5, 0.0, 0.75, 0.0]);
        let inline = generator.generate_inline_shortcode();
        match inline {
            Inline::Shortcode { content, escaped } => {
                assert_eq!(content, "meta i00");
                assert!(!escaped);
            }
            other => panic!("expected shortcode, got {other:?}"),
        }
        assert_eq!(
            generator.meta().get("i00"),
            Some(&Value::String("r00".to_string()))
        );
    }

    #[test]
    fn test_target_shortcode_splices_literal() {
        let mut generator = scripted([
            0.5, 0.0, // target id "i00"
            0.1, // target_shortcode gate passes (0.1 < 0.25)
            0.75, 0.0, // meta key "r00"
            0.5, 0.0, // meta value
        ]);
        let target = generator.generate_target();
        assert_eq!(target, "i00-{{< meta r00 >}}");
        assert_eq!(generator.meta().len(), 1);
    }

    #[test]
    fn test_para_null_positions_degrade_to_punctuation() {
        let mut generator = scripted([0.0, 0.5]);
        generator.probabilities = Probabilities {
            attr: 0.0,
            reuse_class: 0.0,
            str: 0.0,
            code: 0.0,
            span: 0.0,
            emph: 0.0,
            link: 0.0,
            shortcode: 0.0,
            target_shortcode: 0.0,
        };
        // sentence count 1, sentence length 2; every position falls through
        // the cascade, so each becomes bare punctuation with no Space.
        let Block::Para { content } = generator.generate_para(Sizes {
            inline: 2,
            block: 2,
            sentence: 2,
        });
        assert_eq!(content.len(), 2);
        for inline in &content {
            match inline {
                Inline::Str { text } => {
                    assert!([".", "!", "?", ",", ";", ":"].contains(&text.as_str()));
                }
                other => panic!("expected punctuation Str, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_para_space_between_sentences() {
        // Sentence-count draw picks 2; the exhausted source then yields 0.0,
        // giving two one-word sentences.
        let mut generator = scripted([0.6]);
        generator.probabilities.str = 1.0;
        generator.probabilities.attr = 0.0;
        let Block::Para { content } = generator.generate_para(Sizes {
            inline: 4,
            block: 4,
            sentence: 2,
        });
        // Each sentence is [word, punct]; sentences separated by a Space.
        assert_eq!(content.len(), 5);
        assert_eq!(content[2], Inline::Space);
    }

    #[test]
    fn test_document_attaches_collected_meta() {
        let mut generator = scripted([]);
        generator.probabilities = Probabilities {
            shortcode: 1.0,
            str: 0.0,
            code: 0.0,
            span: 0.0,
            emph: 0.0,
            link: 0.0,
            attr: 0.0,
            ..Probabilities::default()
        };
        generator.sizes = Sizes {
            inline: 2,
            block: 2,
            sentence: 2,
        };
        let document = generator.generate_document();
        assert!(!document.meta.is_empty());
        assert_eq!(&document.meta, generator.meta());
    }

    proptest! {
        #[test]
        fn prop_fresh_id_never_starts_with_digit(
            digits in 0.0f64..1.0,
            length in 0.0f64..1.0,
        ) {
            let mut generator = scripted([digits, length]);
            let id = generator.fresh_id();
            prop_assert!(!id.is_empty());
            prop_assert!(!id.as_bytes()[0].is_ascii_digit());
            prop_assert!((3..=9).contains(&id.len()));
            prop_assert!(id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        }

        #[test]
        fn prop_random_classes_has_no_duplicates(seed in any::<u64>()) {
            let mut generator = Generator::with_source(SeededSource::new(seed));
            for _ in 0..16 {
                let classes = generator.random_classes();
                prop_assert!(!classes.is_empty() && classes.len() <= 3);
                let mut deduped = classes.clone();
                deduped.sort();
                deduped.dedup();
                prop_assert_eq!(deduped.len(), classes.len());
            }
        }

        #[test]
        fn prop_pools_only_grow(seed in any::<u64>()) {
            let mut generator = Generator::with_source(SeededSource::new(seed));
            let mut last_classes = 0;
            let mut last_ids = 0;
            for _ in 0..8 {
                generator.random_attr();
                prop_assert!(generator.classes().len() >= last_classes);
                prop_assert!(generator.ids().len() >= last_ids);
                last_classes = generator.classes().len();
                last_ids = generator.ids().len();
            }
        }

        #[test]
        fn prop_document_block_count_bounded(seed in any::<u64>()) {
            let mut generator = Generator::with_source(SeededSource::new(seed));
            let document = generator.generate_document();
            let bound = generator.sizes.block / 2;
            prop_assert!(!document.blocks.is_empty());
            prop_assert!(document.blocks.len() <= bound);
            for block in &document.blocks {
                let Block::Para { content } = block;
                prop_assert!(!content.is_empty());
            }
        }
    }
}
