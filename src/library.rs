use crate::passage::Passage;
use crate::reference::Reference;
use crate::verses::VerseSet;
use rand::Rng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("passage index {index} out of range (library holds {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("passage file not found: {0}")]
    FileNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Ordered collection of passages. Insertion order is preserved and duplicate
/// references are allowed.
#[derive(Debug, Default)]
pub struct Library {
    passages: Vec<Passage>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library pre-seeded with the bundled default verse set.
    pub fn with_defaults() -> Self {
        Self::from_verse_set("kjv")
    }

    /// A library pre-seeded from the named bundled verse set.
    pub fn from_verse_set(name: &str) -> Self {
        let mut library = Self::new();
        for entry in VerseSet::new(name).entries {
            let reference = entry
                .reference
                .parse()
                .expect("bundled verse reference must parse");
            library.add(reference, &entry.text);
        }
        library
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Tokenizes `text` and appends a new passage.
    pub fn add(&mut self, reference: Reference, text: &str) {
        self.passages.push(Passage::new(reference, text));
    }

    pub fn get(&self, index: usize) -> Result<&Passage, LibraryError> {
        self.passages.get(index).ok_or(LibraryError::OutOfRange {
            index,
            len: self.passages.len(),
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Passage, LibraryError> {
        let len = self.passages.len();
        self.passages
            .get_mut(index)
            .ok_or(LibraryError::OutOfRange { index, len })
    }

    /// Index of a uniformly chosen passage, or None when the library is empty.
    pub fn random_index(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.passages.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.passages.len()))
        }
    }

    /// Index of the first passage with the given reference.
    pub fn position(&self, reference: &Reference) -> Option<usize> {
        self.passages.iter().position(|p| p.reference() == reference)
    }

    /// Rendered references of every passage, in insertion order.
    pub fn references(&self) -> Vec<String> {
        self.passages
            .iter()
            .map(|p| p.reference().to_string())
            .collect()
    }

    /// Loads passages from a line-oriented file and returns how many were
    /// added.
    ///
    /// Records are separated by blank lines: the first line of a record is
    /// its reference, every following non-blank line is trimmed and joined
    /// with single spaces into the passage text. A record whose reference
    /// does not parse is skipped with a warning; it never aborts the load.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LibraryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LibraryError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        Ok(self.load_records(&contents))
    }

    fn load_records(&mut self, contents: &str) -> usize {
        let mut added = 0;
        let mut lines = contents.lines().peekable();

        while let Some(line) = lines.next() {
            let reference_line = line.trim();
            if reference_line.is_empty() {
                continue;
            }

            let mut text_lines = Vec::new();
            while let Some(text_line) = lines.peek().map(|l| l.trim()) {
                if text_line.is_empty() {
                    break;
                }
                text_lines.push(text_line);
                lines.next();
            }

            if text_lines.is_empty() {
                eprintln!("warning: skipping passage {reference_line:?}: record has no text");
                continue;
            }

            match reference_line.parse::<Reference>() {
                Ok(reference) => {
                    self.add(reference, &text_lines.join(" "));
                    added += 1;
                }
                Err(err) => {
                    eprintln!("warning: skipping passage {reference_line:?}: {err}");
                }
            }
        }

        added
    }

    /// Writes every passage in insertion order: reference line, one text
    /// line, blank line between records, no trailing blank line.
    ///
    /// Each passage is reset to fully visible first; the written text is
    /// reconstructed from word text and never depends on hidden state.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for (i, passage) in self.passages.iter_mut().enumerate() {
            passage.reset();
            if i > 0 {
                writeln!(writer)?;
            }
            writeln!(writer, "{}", passage.reference())?;
            writeln!(writer, "{}", passage.text())?;
        }

        writer.flush()?;
        Ok(())
    }
}
