use std::{
    fs::File,
    io::{Error, ErrorKind, Read},
    ops::Deref,
    path::Path,
};

const MMAP_THRESHOLD: usize = 1024 * 1024;

#[derive(Debug)]
pub(crate) enum MappedFile {
    Mmap(memmap2::Mmap),
    Memory(Vec<u8>),
}

impl MappedFile {
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut file = File::open(path.as_ref())?;
        let len = file.metadata()?.len() as usize;
        if len < MMAP_THRESHOLD {
            let mut buffer = Vec::with_capacity(len);
            file.read_to_end(&mut buffer)?;
            return Ok(MappedFile::Memory(buffer));
        }
        // SAFETY: the file is opened read-only and nothing in this process writes to it
        // while the mapping is alive.
        let mmap = unsafe { memmap2::MmapOptions::new().map(&file)? };
        Ok(MappedFile::Mmap(mmap))
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            MappedFile::Mmap(mmap) => &mmap[..],
            MappedFile::Memory(mem) => &mem[..],
        }
    }

    pub(crate) fn as_str(&self) -> Result<&str, Error> {
        std::str::from_utf8(self.as_slice()).map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }

    pub(crate) fn is_mapped(&self) -> bool {
        matches!(self, MappedFile::Mmap(_))
    }
}

impl AsRef<[u8]> for MappedFile {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

/// Splits `text` into pieces of at most `chunk_size` bytes, cutting only on
/// `char` boundaries. A chunk never comes back empty; if one `char` is wider
/// than `chunk_size` it is emitted on its own.
pub(crate) fn str_chunks(text: &str, chunk_size: usize) -> StrChunks<'_> {
    StrChunks {
        rest: text,
        chunk_size,
    }
}

pub(crate) struct StrChunks<'a> {
    rest: &'a str,
    chunk_size: usize,
}

impl<'a> Iterator for StrChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let mut end = self.chunk_size.min(self.rest.len());
        while !self.rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            end = self.rest.chars().next().map_or(self.rest.len(), char::len_utf8);
        }
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
