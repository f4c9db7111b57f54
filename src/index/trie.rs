//! First-child / next-sibling trie over chars.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]. At every
//! depth the alternatives for the next character form a sibling chain; a node's
//! `child` points at the head of the chain one character deeper. Siblings are
//! unordered but never repeat a character.

use crate::index::types::{NgramStats, NodeId};

/// A single character position in the trie
#[derive(Debug, Clone)]
pub struct TrieNode {
    pub ch: char,
    pub child: Option<NodeId>,
    pub sibling: Option<NodeId>,
    /// Present only on terminal nodes
    stats: Option<NgramStats>,
}

impl TrieNode {
    fn new(ch: char) -> Self {
        Self {
            ch,
            child: None,
            sibling: None,
            stats: None,
        }
    }

    /// True if the path ending here is an indexed n-gram
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.stats.is_some()
    }

    #[inline]
    pub fn stats(&self) -> Option<&NgramStats> {
        self.stats.as_ref()
    }
}

/// Which link to follow when looking up a sibling chain
#[derive(Debug, Clone, Copy)]
enum Chain {
    Root,
    ChildOf(NodeId),
}

#[derive(Debug, Clone, Default)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    /// Head of the depth-0 sibling chain; absent until the first insert
    root: Option<NodeId>,
    terminals: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head of the top-level sibling chain
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    /// Number of allocated nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of terminal nodes, i.e. distinct indexed n-grams
    pub fn ngram_count(&self) -> usize {
        self.terminals
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Scan the sibling chain starting at `head` for `ch`
    #[inline]
    pub fn find_in_chain(&self, head: Option<NodeId>, ch: char) -> Option<NodeId> {
        let mut cursor = head;
        while let Some(id) = cursor {
            let node = self.node(id);
            if node.ch == ch {
                return Some(id);
            }
            cursor = node.sibling;
        }
        None
    }

    /// Walk `path` from the root, returning the node of its last character
    pub fn find_path(&self, path: &[char]) -> Option<NodeId> {
        let mut head = self.root;
        let mut last = None;
        for &ch in path {
            let id = self.find_in_chain(head, ch)?;
            head = self.node(id).child;
            last = Some(id);
        }
        last
    }

    /// Statistics for an indexed n-gram, if `ngram` is one
    pub fn get(&self, ngram: &str) -> Option<&NgramStats> {
        let chars: Vec<char> = ngram.chars().collect();
        self.find_path(&chars)
            .and_then(|id| self.node(id).stats())
    }

    /// Create the path for `ngram` where missing and mark its last node terminal.
    ///
    /// Returns the terminal node's statistics for the caller to update, or
    /// `None` for an empty path.
    pub fn insert(&mut self, ngram: &[char]) -> Option<&mut NgramStats> {
        let mut chain = Chain::Root;
        let mut last = None;
        for &ch in ngram {
            let id = self.find_or_append(chain, ch);
            chain = Chain::ChildOf(id);
            last = Some(id);
        }

        let node = &mut self.nodes[last?];
        if node.stats.is_none() {
            self.terminals += 1;
        }
        Some(node.stats.get_or_insert_with(NgramStats::default))
    }

    fn head(&self, chain: Chain) -> Option<NodeId> {
        match chain {
            Chain::Root => self.root,
            Chain::ChildOf(parent) => self.node(parent).child,
        }
    }

    fn find_or_append(&mut self, chain: Chain, ch: char) -> NodeId {
        let mut cursor = self.head(chain);
        let mut tail = None;
        while let Some(id) = cursor {
            let node = self.node(id);
            if node.ch == ch {
                return id;
            }
            tail = Some(id);
            cursor = node.sibling;
        }

        let id = self.nodes.len();
        self.nodes.push(TrieNode::new(ch));
        match (tail, chain) {
            (Some(prev), _) => self.nodes[prev].sibling = Some(id),
            (None, Chain::Root) => self.root = Some(id),
            (None, Chain::ChildOf(parent)) => self.nodes[parent].child = Some(id),
        }
        id
    }
}
