#![allow(dead_code)]

use std::{collections::BTreeMap, iter::FusedIterator};

use smallvec::SmallVec;

/// Sorted, duplicate-free set of payloads attached to a terminal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PayloadSet<P>(SmallVec<[P; 1]>);

impl<P> Default for PayloadSet<P> {
    fn default() -> Self {
        Self(SmallVec::new())
    }
}

impl<P: Ord> PayloadSet<P> {
    pub(crate) fn insert(&mut self, payload: P) -> bool {
        match self.0.binary_search(&payload) {
            Ok(_) => false,
            Err(index) => {
                self.0.insert(index, payload);
                true
            }
        }
    }

    pub(crate) fn contains(&self, payload: &P) -> bool {
        self.0.binary_search(payload).is_ok()
    }
}

impl<P> PayloadSet<P> {
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, P> {
        self.0.iter()
    }

    pub(crate) fn as_slice(&self) -> &[P] {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TrieNode<P> {
    children: BTreeMap<char, TrieNode<P>>,
    is_terminal: bool,
    payloads: PayloadSet<P>,
}

impl<P> Default for TrieNode<P> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            is_terminal: false,
            payloads: PayloadSet::default(),
        }
    }
}

impl<P> TrieNode<P> {
    pub(crate) fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub(crate) fn payloads(&self) -> &PayloadSet<P> {
        &self.payloads
    }

    pub(crate) fn child(&self, c: char) -> Option<&TrieNode<P>> {
        self.children.get(&c)
    }
}

/// Character trie. Children are kept in ascending `char` order, so every
/// enumeration is lexicographic.
///
/// `Trie<()>` is the plain word trie. Any other `P` attaches payloads to the
/// exact node an inserted word ends at; prefixes of that word do not see them.
#[derive(Debug, Clone)]
pub(crate) struct Trie<P = ()> {
    root: TrieNode<P>,
    len: usize,
}

impl<P> Default for Trie<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Trie<P> {
    pub(crate) fn new() -> Self {
        Trie {
            root: TrieNode::default(),
            len: 0,
        }
    }

    fn terminal_node_mut(&mut self, word: &str) -> &mut TrieNode<P> {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        if !node.is_terminal {
            node.is_terminal = true;
            self.len += 1;
        }
        node
    }

    pub(crate) fn insert<S: AsRef<str>>(&mut self, word: S) {
        self.terminal_node_mut(word.as_ref());
    }

    pub(crate) fn contains<S: AsRef<str>>(&self, word: S) -> bool {
        self.try_match(word).map_or(false, |node| node.is_terminal)
    }

    pub(crate) fn try_match<S: AsRef<str>>(&self, prefix: S) -> Option<&TrieNode<P>> {
        let mut node = &self.root;
        for c in prefix.as_ref().chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    /// Lazily yields every inserted word starting with `prefix`, in
    /// lexicographic order. Yields nothing if no word has that prefix.
    pub(crate) fn words_with_prefix<S: AsRef<str>>(&self, prefix: S) -> Words<'_, P> {
        let prefix = prefix.as_ref();
        let mut stack = SmallVec::new();
        if let Some(node) = self.try_match(prefix) {
            stack.push((prefix.to_owned(), node));
        }
        Words { stack }
    }

    pub(crate) fn search<S: AsRef<str>>(&self, prefix: S) -> Vec<String> {
        self.words_with_prefix(prefix).collect()
    }

    /// Payloads attached at the node `prefix` ends on. Longer words sharing
    /// the prefix do not contribute.
    pub(crate) fn search_payloads<S: AsRef<str>>(&self, prefix: S) -> &[P] {
        match self.try_match(prefix) {
            Some(node) => node.payloads.as_slice(),
            None => &[],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<P: Ord> Trie<P> {
    pub(crate) fn insert_with_payload<S: AsRef<str>>(&mut self, word: S, payload: P) {
        self.terminal_node_mut(word.as_ref()).payloads.insert(payload);
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

/// Depth-first walk over a subtree, see [`Trie::words_with_prefix`].
pub(crate) struct Words<'a, P> {
    stack: SmallVec<[(String, &'a TrieNode<P>); 8]>,
}

impl<'a, P> Iterator for Words<'a, P> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((word, node)) = self.stack.pop() {
            // reversed so the smallest child is popped first
            for (&c, child) in node.children.iter().rev() {
                let mut next = String::with_capacity(word.len() + c.len_utf8());
                next.push_str(&word);
                next.push(c);
                self.stack.push((next, child));
            }
            if node.is_terminal {
                return Some(word);
            }
        }
        None
    }
}

impl<P> FusedIterator for Words<'_, P> {}
