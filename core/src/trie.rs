//! Prefix trie holding the dictionary words offered as completions.
use tracing::debug;

/// Handle of a node inside a [`PrefixIndex`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single trie node.
///
/// Children are kept sorted by character so that lookups can binary search
/// and depth-first traversal visits edges in ascending order.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    label: Option<char>,
    children: Vec<(char, NodeId)>,
    is_end: bool,
    /// Fewest characters left to reach a terminal at or below this node.
    /// `None` until a word has been inserted through this node. Nothing in
    /// the query path reads it; it is kept for pruning experiments.
    min_distance: Option<usize>,
}

impl TrieNode {
    fn with_label(label: char) -> Self {
        Self {
            label: Some(label),
            ..Self::default()
        }
    }

    /// Character on the edge leading into this node (`None` for the root).
    pub fn label(&self) -> Option<char> {
        self.label
    }

    /// Whether the path from the root to this node spells an inserted word.
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub fn min_distance(&self) -> Option<usize> {
        self.min_distance
    }

    /// Child reached through `ch`, if any.
    pub fn child(&self, ch: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|pos| self.children[pos].1)
    }

    /// Children in ascending character order.
    pub fn children(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.children.iter().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Read-only view of a node, as shown when inspecting a drawn trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSummary {
    pub label: Option<char>,
    pub is_end: bool,
    pub child_count: usize,
}

/// Character trie stored as an arena of [`TrieNode`]s.
///
/// The root is a sentinel node with no label. The index is built once by
/// repeated [`insert`](PrefixIndex::insert) calls and only read afterwards.
///
/// # Example
/// ```
/// use autocomplete_core::trie::PrefixIndex;
///
/// let mut index = PrefixIndex::new();
/// index.insert("cat");
/// index.insert("car");
///
/// assert!(index.contains_word("cat"));
/// assert!(!index.contains_word("ca"));
///
/// let node = index.find_node("ca").unwrap();
/// let words = index.collect(node, "ca");
/// assert_eq!(words, vec![("car".to_string(), 3), ("cat".to_string(), 3)]);
/// ```
#[derive(Debug, Clone)]
pub struct PrefixIndex {
    nodes: Vec<TrieNode>,
    words: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    /// Create an index holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            words: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node by handle.
    ///
    /// Handles are only produced by this index, so lookups never miss.
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    pub fn summary(&self, id: NodeId) -> NodeSummary {
        let node = self.node(id);
        NodeSummary {
            label: node.label,
            is_end: node.is_end,
            child_count: node.children.len(),
        }
    }

    /// Number of distinct words inserted.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a word.
    ///
    /// Every node on the path has its `min_distance` lowered to the number of
    /// characters still to be consumed from it, and the final node becomes
    /// terminal with distance zero. Inserting an existing word changes
    /// nothing observable. Empty input is ignored.
    ///
    /// # Example
    /// ```
    /// use autocomplete_core::trie::PrefixIndex;
    ///
    /// let mut index = PrefixIndex::new();
    /// index.insert("dog");
    /// let root = index.node(index.root());
    /// assert_eq!(root.min_distance(), Some(3));
    /// ```
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            debug!("ignoring empty dictionary word");
            return;
        }

        let length = word.chars().count();
        let mut current = self.root();
        for (i, ch) in word.chars().enumerate() {
            let remaining = length - i;
            let node = &mut self.nodes[current.0];
            node.min_distance = Some(node.min_distance.map_or(remaining, |d| d.min(remaining)));
            current = self.child_or_insert(current, ch);
        }

        let last = &mut self.nodes[current.0];
        if !last.is_end {
            last.is_end = true;
            self.words += 1;
        }
        last.min_distance = Some(0);
    }

    fn child_or_insert(&mut self, parent: NodeId, ch: char) -> NodeId {
        match self.nodes[parent.0]
            .children
            .binary_search_by_key(&ch, |&(c, _)| c)
        {
            Ok(pos) => self.nodes[parent.0].children[pos].1,
            Err(pos) => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(TrieNode::with_label(ch));
                self.nodes[parent.0].children.insert(pos, (ch, id));
                id
            }
        }
    }

    /// Walk `word` one edge at a time from the root.
    ///
    /// Returns `None` at the first missing edge, so a miss costs only the
    /// depth at which it happens. The empty string resolves to the root.
    pub fn find_node(&self, word: &str) -> Option<NodeId> {
        let mut current = self.root();
        for ch in word.chars() {
            current = self.node(current).child(ch)?;
        }
        Some(current)
    }

    /// Check whether `word` was inserted as a complete word.
    pub fn contains_word(&self, word: &str) -> bool {
        self.find_node(word)
            .map(|id| self.node(id).is_end)
            .unwrap_or(false)
    }

    /// Every terminal word at or below `node`, each spelled as `prefix`
    /// followed by the edge labels walked from `node`, paired with its length
    /// in characters.
    ///
    /// Results come out depth-first with children in ascending order.
    pub fn collect(&self, node: NodeId, prefix: &str) -> Vec<(String, usize)> {
        let mut out = Vec::new();
        let mut buf = prefix.to_string();
        let mut len = prefix.chars().count();
        self.collect_into(node, &mut buf, &mut len, &mut out);
        out
    }

    fn collect_into(
        &self,
        id: NodeId,
        buf: &mut String,
        len: &mut usize,
        out: &mut Vec<(String, usize)>,
    ) {
        let node = self.node(id);
        if node.is_end {
            out.push((buf.clone(), *len));
        }
        for &(ch, child) in &node.children {
            buf.push(ch);
            *len += 1;
            self.collect_into(child, buf, len, out);
            buf.pop();
            *len -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_insert_and_contains() {
        let mut index = PrefixIndex::new();
        index.insert("ca");
        index.insert("casa");
        index.insert("carro");

        assert!(index.contains_word("ca"));
        assert!(index.contains_word("casa"));
        assert!(index.contains_word("carro"));
        assert!(!index.contains_word("c"));
        assert!(!index.contains_word("cas"));
        assert!(!index.contains_word("carros"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut index = PrefixIndex::new();
        index.insert("sol");
        let nodes = index.node_count();
        index.insert("sol");

        assert_eq!(index.len(), 1);
        assert_eq!(index.node_count(), nodes);
    }

    #[test]
    fn test_empty_word_is_ignored() {
        let mut index = PrefixIndex::new();
        index.insert("");

        assert!(index.is_empty());
        assert!(!index.node(index.root()).is_end());
        assert_eq!(index.node(index.root()).min_distance(), None);
    }

    #[test]
    fn test_min_distance_tracks_shortest_word() {
        let mut index = PrefixIndex::new();
        index.insert("banana");
        assert_eq!(index.node(index.root()).min_distance(), Some(6));

        let b = index.find_node("b").unwrap();
        assert_eq!(index.node(b).min_distance(), Some(5));

        index.insert("ban");
        assert_eq!(index.node(index.root()).min_distance(), Some(3));
        assert_eq!(index.node(b).min_distance(), Some(2));

        let ban = index.find_node("ban").unwrap();
        assert_eq!(index.node(ban).min_distance(), Some(0));

        // a longer word never raises the distance again
        index.insert("bandeira");
        assert_eq!(index.node(b).min_distance(), Some(2));
        assert_eq!(index.node(ban).min_distance(), Some(0));
    }

    #[test]
    fn test_find_node_short_circuits() {
        let mut index = PrefixIndex::new();
        index.insert("gato");

        assert!(index.find_node("ga").is_some());
        assert!(index.find_node("gx").is_none());
        assert!(index.find_node("xyz").is_none());
        assert_eq!(index.find_node(""), Some(index.root()));
    }

    #[test]
    fn test_collect_sorted_children() {
        let mut index = PrefixIndex::new();
        for word in ["cats", "cat", "car", "dog"] {
            index.insert(word);
        }

        let node = index.find_node("ca").unwrap();
        let words = index.collect(node, "ca");
        assert_eq!(
            words,
            vec![
                ("car".to_string(), 3),
                ("cat".to_string(), 3),
                ("cats".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_collect_uses_given_prefix() {
        let mut index = PrefixIndex::new();
        index.insert("cat");

        let node = index.find_node("ca").unwrap();
        let words = index.collect(node, "the ca");
        assert_eq!(words, vec![("the cat".to_string(), 7)]);
    }

    #[test]
    fn test_unicode_words() {
        let mut index = PrefixIndex::new();
        index.insert("café");
        index.insert("caça");

        assert!(index.contains_word("café"));
        let node = index.find_node("ca").unwrap();
        let words = index.collect(node, "ca");
        // 'f' (U+0066) sorts before 'ç' (U+00E7)
        assert_eq!(words[0], ("café".to_string(), 4));
        assert_eq!(words[1], ("caça".to_string(), 4));
    }

    #[test]
    fn test_summary() {
        let mut index = PrefixIndex::new();
        index.insert("a");
        index.insert("ab");
        index.insert("ac");

        let root = index.summary(index.root());
        assert_eq!(root.label, None);
        assert_eq!(root.child_count, 1);

        let a = index.summary(index.find_node("a").unwrap());
        assert_eq!(a.label, Some('a'));
        assert!(a.is_end);
        assert_eq!(a.child_count, 2);
    }
}
