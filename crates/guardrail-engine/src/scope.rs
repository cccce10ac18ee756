//! Matching scopes: projections of the document at three granularities.
//!
//! All texts here are the original raw texts; normalization happens at the
//! matching site so evidence extraction always sees the untouched surface.

use std::collections::HashMap;

use guardrail_types::{Block, Document};

/// One page's concatenated raw text, in first-appearance order.
#[derive(Debug, Clone)]
pub struct PageText {
    pub page: u32,
    pub text_raw: String,
}

/// Read-only view over a document used by every rule evaluator.
#[derive(Debug)]
pub struct Scope<'a> {
    /// All non-empty block texts joined with `\n`.
    pub global_text_raw: String,
    /// Per-page raw text, ordered by first appearance of each page.
    pub pages: Vec<PageText>,
    /// Block id -> raw text.
    pub block_text_raw: HashMap<&'a str, &'a str>,
    /// Block type -> blocks, preserving input order within each type.
    pub blocks_by_type: HashMap<&'a str, Vec<&'a Block>>,
    /// The original block sequence, for deterministic first-match scans.
    pub blocks: &'a [Block],
}

impl<'a> Scope<'a> {
    pub fn build(document: &'a Document) -> Self {
        let blocks = document.blocks.as_slice();

        let global_text_raw = blocks
            .iter()
            .filter(|b| !b.text_raw.is_empty())
            .map(|b| b.text_raw.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut pages: Vec<PageText> = Vec::new();
        for block in blocks {
            let idx = match pages.iter().position(|p| p.page == block.source_page) {
                Some(idx) => idx,
                None => {
                    pages.push(PageText {
                        page: block.source_page,
                        text_raw: String::new(),
                    });
                    pages.len() - 1
                }
            };
            if !block.text_raw.is_empty() {
                pages[idx].text_raw.push_str(&block.text_raw);
                pages[idx].text_raw.push('\n');
            }
        }

        let block_text_raw = blocks
            .iter()
            .map(|b| (b.block_id.as_str(), b.text_raw.as_str()))
            .collect();

        let mut blocks_by_type: HashMap<&str, Vec<&Block>> = HashMap::new();
        for block in blocks {
            blocks_by_type
                .entry(block.block_type.as_str())
                .or_default()
                .push(block);
        }

        Self {
            global_text_raw,
            pages,
            block_text_raw,
            blocks_by_type,
            blocks,
        }
    }

    pub fn has_block_type(&self, block_type: &str) -> bool {
        self.blocks_by_type
            .get(block_type)
            .is_some_and(|blocks| !blocks.is_empty())
    }

    pub fn blocks_of_type(&self, block_type: &str) -> &[&'a Block] {
        self.blocks_by_type
            .get(block_type)
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardrail_types::Block;

    fn block(id: &str, block_type: &str, text: &str, page: u32) -> Block {
        Block {
            block_id: id.to_string(),
            block_type: block_type.to_string(),
            text_raw: text.to_string(),
            source_page: page,
        }
    }

    #[test]
    fn test_global_text_skips_empty_blocks() {
        let doc = Document {
            lines: vec![],
            blocks: vec![
                block("b1", "title", "Oat Milk", 1),
                block("b2", "other", "", 1),
                block("b3", "ingredient", "oats, water", 2),
            ],
        };
        let scope = Scope::build(&doc);
        assert_eq!(scope.global_text_raw, "Oat Milk\noats, water");
    }

    #[test]
    fn test_pages_keep_first_appearance_order() {
        let doc = Document {
            lines: vec![],
            blocks: vec![
                block("b1", "other", "three", 3),
                block("b2", "other", "one", 1),
                block("b3", "other", "more three", 3),
            ],
        };
        let scope = Scope::build(&doc);
        let order: Vec<u32> = scope.pages.iter().map(|p| p.page).collect();
        assert_eq!(order, vec![3, 1]);
        assert_eq!(scope.pages[0].text_raw, "three\nmore three\n");
    }

    #[test]
    fn test_type_index_preserves_input_order() {
        let doc = Document {
            lines: vec![],
            blocks: vec![
                block("b1", "title", "A", 1),
                block("b2", "ingredient", "B", 1),
                block("b3", "title", "C", 2),
            ],
        };
        let scope = Scope::build(&doc);
        assert!(scope.has_block_type("title"));
        assert!(!scope.has_block_type("license"));
        let ids: Vec<&str> = scope
            .blocks_of_type("title")
            .iter()
            .map(|b| b.block_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b1", "b3"]);
    }
}
