pub(crate) mod filesystem;
pub(crate) mod symbol;
pub(crate) mod trie;
