use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Block, BlockKind};

/// A named notebook file: blocks keyed by storage id.
///
/// Storage ids record insertion, `Block::order` records display position.
/// Anything that produces output must go through [`Document::ordered_blocks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default, deserialize_with = "super::id_keys::deserialize")]
    pub blocks: BTreeMap<u64, Block>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    /// A document holding one code block at order 0
    pub fn single_code(name: impl Into<String>, content: impl AsRef<str>) -> Self {
        let mut document = Self::new(name);
        document.push_block(BlockKind::Code, content);
        document
    }

    /// Append a block after every existing one, under a fresh storage id.
    pub fn push_block(&mut self, kind: BlockKind, content: impl AsRef<str>) {
        let key = self.next_key();
        let order = self
            .blocks
            .values()
            .map(|block| block.order + 1)
            .max()
            .unwrap_or(0);
        self.blocks.insert(key, Block::new(kind, content, order));
    }

    /// Blocks sorted by display order. Ties fall back to storage id.
    pub fn ordered_blocks(&self) -> Vec<&Block> {
        let mut blocks: Vec<(&u64, &Block)> = self.blocks.iter().collect();
        blocks.sort_by_key(|(key, block)| (block.order, **key));
        blocks.into_iter().map(|(_, block)| block).collect()
    }

    /// True when the orders are exactly `0..len`
    pub fn has_dense_order(&self) -> bool {
        let mut orders: Vec<usize> = self.blocks.values().map(|block| block.order).collect();
        orders.sort_unstable();
        orders.iter().copied().eq(0..self.blocks.len())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn next_key(&self) -> u64 {
        self.blocks.keys().next_back().map_or(0, |key| key + 1)
    }
}
