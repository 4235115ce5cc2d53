use crate::reference::Reference;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

/// One whitespace-delimited unit of passage text, independently hideable.
/// Punctuation stays attached to its word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    hidden: bool,
}

impl Word {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            hidden: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn hide(&mut self) {
        self.hidden = true;
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    /// The word as shown to the user: verbatim when visible, an underscore
    /// run of equal character length when hidden.
    pub fn display_text(&self) -> String {
        if self.hidden {
            "_".repeat(self.text.chars().count())
        } else {
            self.text.clone()
        }
    }
}

/// Hidden/visible word counts for one passage. `total` is fixed for the
/// passage's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub hidden: usize,
    pub visible: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent_hidden(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        ((self.hidden as f64 / self.total as f64) * 100.0).round() as u16
    }
}

/// A referenced passage whose words can be progressively hidden for practice.
///
/// Randomness is always passed in by the caller so drills are reproducible
/// under a seeded generator. Every edge case (empty passage, nothing left to
/// hide, nothing hidden to reveal) is a no-op with a sentinel return, never
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    reference: Reference,
    words: Vec<Word>,
}

impl Passage {
    /// Tokenizes `text` on whitespace; runs collapse and empty tokens are
    /// dropped.
    pub fn new(reference: Reference, text: &str) -> Self {
        Self {
            reference,
            words: text.split_whitespace().map(Word::new).collect(),
        }
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Hides up to `count` currently visible words, chosen uniformly without
    /// replacement, and returns how many were actually hidden. A word that is
    /// already hidden is never picked again.
    pub fn hide_random(&mut self, rng: &mut impl Rng, count: usize) -> usize {
        let mut visible: Vec<usize> = (0..self.words.len())
            .filter(|&i| !self.words[i].hidden)
            .collect();

        let to_hide = count.min(visible.len());
        for _ in 0..to_hide {
            let pick = rng.gen_range(0..visible.len());
            let word_index = visible.swap_remove(pick);
            self.words[word_index].hide();
        }

        to_hide
    }

    /// Reveals one uniformly chosen hidden word. Returns false (and changes
    /// nothing) when no word is hidden.
    pub fn reveal_hint(&mut self, rng: &mut impl Rng) -> bool {
        let hidden: Vec<usize> = (0..self.words.len())
            .filter(|&i| self.words[i].hidden)
            .collect();

        match hidden.choose(rng) {
            Some(&word_index) => {
                self.words[word_index].show();
                true
            }
            None => false,
        }
    }

    /// Makes every word visible again.
    pub fn reset(&mut self) {
        for word in &mut self.words {
            word.show();
        }
    }

    /// True iff every word is hidden.
    pub fn is_complete(&self) -> bool {
        self.words.iter().all(|w| w.hidden)
    }

    pub fn progress(&self) -> Progress {
        let hidden = self.words.iter().filter(|w| w.hidden).count();
        Progress {
            hidden,
            visible: self.words.len() - hidden,
            total: self.words.len(),
        }
    }

    /// The passage as shown to the user, hidden words rendered as underscore
    /// runs, single spaces between words.
    pub fn display_text(&self) -> String {
        self.words.iter().map(Word::display_text).join(" ")
    }

    /// The full original text, reconstructed from word text regardless of any
    /// hidden state.
    pub fn text(&self) -> String {
        self.words.iter().map(Word::text).join(" ")
    }
}
