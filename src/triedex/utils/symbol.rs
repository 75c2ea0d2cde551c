use std::{cmp::Ordering, collections::HashMap, fmt::Display, sync::RwLock};

use lazy_static::lazy_static;

lazy_static! {
    static ref SYMBOL_TABLE: RwLock<HashMap<&'static str, u32>> = RwLock::new(HashMap::new());
}

/// Interned string. Two symbols built from equal strings share the same id
/// and backing `&'static str`, so copies and comparisons are cheap.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct Symbol(u32, &'static str);

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Ordered by text so payload sets list ids the way a reader expects.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.1.cmp(other.1)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Symbol {
    pub(crate) fn new<S: AsRef<str>>(s: S) -> Self {
        let s = s.as_ref();
        if let Some(symbol) = Self::lookup(s) {
            return symbol;
        }

        let mut writer = SYMBOL_TABLE.write().unwrap_or_else(|e| e.into_inner());
        // another thread may have interned it between the two locks
        if let Some((&interned, &id)) = writer.get_key_value(s) {
            return Self(id, interned);
        }
        let id = writer.len() as u32;
        let interned: &'static str = Box::leak(s.to_owned().into_boxed_str());
        writer.insert(interned, id);
        Self(id, interned)
    }

    /// Finds an already interned symbol without interning `s`.
    pub(crate) fn lookup(s: &str) -> Option<Self> {
        let reader = SYMBOL_TABLE.read().unwrap_or_else(|e| e.into_inner());
        reader
            .get_key_value(s)
            .map(|(&interned, &id)| Self(id, interned))
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.1
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.1
    }
}
