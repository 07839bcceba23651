//! Tuning knobs for generation: per-kind probabilities and size budgets.

/// Selection thresholds in `[0, 1]` for each probabilistic branch.
///
/// The inline thresholds (`str` through `shortcode`) are *not* a categorical
/// distribution: each is an independent Bernoulli gate evaluated in priority
/// order, so the realized mix of inline kinds is the composition of the
/// gates, not the configured values themselves.
#[derive(Debug, Clone)]
pub struct Probabilities {
    /// Chance an eligible element carries an attribute block.
    pub attr: f64,
    /// Chance a class draw mints a fresh class instead of reusing the pool.
    pub reuse_class: f64,

    pub str: f64,
    pub code: f64,
    pub span: f64,
    pub emph: f64,
    pub link: f64,
    pub shortcode: f64,
    /// Chance a link target embeds a shortcode literal.
    pub target_shortcode: f64,
}

impl Default for Probabilities {
    fn default() -> Self {
        Self {
            attr: 0.95,
            reuse_class: 0.5,

            str: 0.9,
            code: 0.5,
            span: 0.5,
            emph: 0.5,
            link: 0.5,
            shortcode: 0.5,
            target_shortcode: 0.25,
        }
    }
}

/// Size budgets bounding the shape of the generated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizes {
    /// Upper bound on inline children per container (and sentences per
    /// paragraph).
    pub inline: usize,
    /// Upper bound on blocks per document.
    pub block: usize,
    /// Upper bound on inlines per sentence.
    pub sentence: usize,
}

impl Default for Sizes {
    fn default() -> Self {
        Self {
            inline: 10,
            block: 10,
            sentence: 10,
        }
    }
}

impl Sizes {
    /// Budget for one recursive descent: `inline` and `block` halve toward
    /// zero, `sentence` carries over. The repeated halving is what bounds
    /// the depth of the generated tree.
    pub fn smaller(self) -> Sizes {
        Sizes {
            inline: self.inline / 2,
            block: self.block / 2,
            sentence: self.sentence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smaller_halves_inline_and_block_only() {
        let sizes = Sizes {
            inline: 10,
            block: 7,
            sentence: 9,
        };
        let small = sizes.smaller();
        assert_eq!(small.inline, 5);
        assert_eq!(small.block, 3);
        assert_eq!(small.sentence, 9);
    }

    #[test]
    fn test_smaller_reaches_zero() {
        let mut sizes = Sizes::default();
        for _ in 0..8 {
            sizes = sizes.smaller();
        }
        assert_eq!(sizes.inline, 0);
        assert_eq!(sizes.block, 0);
        assert_eq!(sizes.sentence, 10);
    }
}
