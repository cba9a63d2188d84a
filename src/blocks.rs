// ✂️ Block Splitter - one contiguous token slice per shop

use crate::boundary::BoundaryHit;

/// A view into the document tokens; nothing is copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// The boundary token that opened this block (place label)
    pub boundary: &'a str,
    pub start: usize,
    pub end: usize,
    pub tokens: &'a [String],
}

impl<'a> Block<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for blocks produced by `split_blocks`
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Block i spans [hits[i].index, hits[i+1].index); the last one runs to the end.
/// Tokens before the first hit belong to no block.
pub fn split_blocks<'a>(tokens: &'a [String], hits: &'a [BoundaryHit]) -> Vec<Block<'a>> {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let start = hit.index;
            let end = hits.get(i + 1).map(|next| next.index).unwrap_or(tokens.len());
            Block {
                boundary: hit.text.as_str(),
                start,
                end,
                tokens: &tokens[start..end],
            }
        })
        .collect()
}
