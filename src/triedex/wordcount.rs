use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
    sync::mpsc::channel,
};

use tracing::{debug, info};

use super::utils::{
    filesystem::{str_chunks, MappedFile},
    trie::Trie,
};

pub(crate) const DEFAULT_CHUNK_SIZE: usize = 10 * 1024 * 1024;
pub(crate) const DEFAULT_FILE_SIZE: u64 = 1024 * 1024 * 1024;
pub(crate) const DEFAULT_PATH: &str = "large_text_file.txt";
pub(crate) const DEFAULT_QUERY: &str = "appl";

const FILLER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";

#[derive(Debug, Clone)]
pub(crate) struct WordCountConfig {
    pub(crate) path: PathBuf,
    pub(crate) chunk_size: usize,
    pub(crate) file_size: u64,
    pub(crate) query: String,
    /// Regenerate the text file before counting.
    pub(crate) generate: bool,
}

impl Default for WordCountConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            chunk_size: DEFAULT_CHUNK_SIZE,
            file_size: DEFAULT_FILE_SIZE,
            query: DEFAULT_QUERY.to_owned(),
            generate: true,
        }
    }
}

/// Fills `path` with repeated filler text until at least `target_bytes`
/// bytes are written. Returns the number of bytes written.
pub(crate) fn generate_text_file<P: AsRef<Path>>(path: P, target_bytes: u64) -> io::Result<u64> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut written = 0u64;
    while written < target_bytes {
        writer.write_all(FILLER.as_bytes())?;
        written += FILLER.len() as u64;
    }
    writer.flush()?;
    Ok(written)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct WordCounts {
    counts: HashMap<String, usize>,
}

impl WordCounts {
    fn add_chunk(&mut self, chunk: &str) {
        for word in chunk.split_whitespace() {
            if let Some(count) = self.counts.get_mut(word) {
                *count += 1;
            } else {
                self.counts.insert(word.to_owned(), 1);
            }
        }
    }

    fn merge(&mut self, other: WordCounts) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    pub(crate) fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }

    pub(crate) fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Most frequent first; equal counts fall back to word order.
    pub(crate) fn sorted_by_frequency(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<_> = self
            .counts
            .iter()
            .map(|(word, &count)| (word.as_str(), count))
            .collect();
        sorted.sort_by(|(a_word, a_count), (b_word, b_count)| {
            b_count.cmp(a_count).then_with(|| a_word.cmp(b_word))
        });
        sorted
    }

    pub(crate) fn build_trie(&self) -> Trie {
        self.counts.keys().collect()
    }
}

/// Counts whitespace-separated words chunk by chunk on the rayon pool.
///
/// Chunks are cut by size alone, so a word crossing a chunk boundary is
/// counted as two fragments.
pub(crate) fn count_str(text: &str, chunk_size: usize) -> WordCounts {
    let (tx, rx) = channel();
    let mut chunks = 0usize;
    rayon::scope(|scope| {
        for chunk in str_chunks(text, chunk_size) {
            chunks += 1;
            let tx = tx.clone();
            scope.spawn(move |_| {
                let mut local = WordCounts::default();
                local.add_chunk(chunk);
                let _ = tx.send(local);
            });
        }
    });
    drop(tx);

    let mut counts = WordCounts::default();
    for partial in rx {
        counts.merge(partial);
    }
    debug!(chunks, distinct = counts.len(), "counted chunks");
    counts
}

pub(crate) fn count_words<P: AsRef<Path>>(path: P, chunk_size: usize) -> io::Result<WordCounts> {
    if chunk_size == 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "chunk size must be greater than zero",
        ));
    }
    let file = MappedFile::new(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        bytes = file.len(),
        mapped = file.is_mapped(),
        "opened text source"
    );
    let text = file.as_str()?;
    Ok(count_str(text, chunk_size))
}

#[derive(Debug)]
pub(crate) struct WordCountReport {
    pub(crate) counts: WordCounts,
    pub(crate) trie: Trie,
    pub(crate) query: String,
    pub(crate) matches: Vec<String>,
}

pub(crate) fn run(config: &WordCountConfig) -> io::Result<WordCountReport> {
    if config.generate {
        let written = generate_text_file(&config.path, config.file_size)?;
        info!(path = %config.path.display(), bytes = written, "generated text file");
    }

    let counts = count_words(&config.path, config.chunk_size)?;
    info!(distinct = counts.len(), total = counts.total(), "counted words");

    let trie = counts.build_trie();
    let matches = trie.search(&config.query);
    debug!(query = %config.query, matches = matches.len(), "prefix search");

    Ok(WordCountReport {
        counts,
        trie,
        query: config.query.clone(),
        matches,
    })
}
