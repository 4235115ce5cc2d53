use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("malformed reference {0:?}: expected \"Book Chapter:Verse\" or \"Book Chapter:Start-End\"")]
    Format(String),
}

/// A scripture reference such as "John 3:16" or "Proverbs 3:5-6".
///
/// The book name is everything up to the last space, so multi-word books
/// ("1 John", "Song of Solomon") parse without any special casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub chapter: u32,
    pub start_verse: u32,
    pub end_verse: u32,
}

impl Reference {
    /// Reference to a single verse.
    pub fn verse(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            start_verse: verse,
            end_verse: verse,
        }
    }

    /// Reference to a range of verses within one chapter.
    pub fn range(book: impl Into<String>, chapter: u32, start_verse: u32, end_verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            start_verse,
            end_verse,
        }
    }

    pub fn is_range(&self) -> bool {
        self.start_verse != self.end_verse
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ReferenceError::Format(s.to_string());

        let (book, chapter_verse) = s.trim().rsplit_once(' ').ok_or_else(err)?;
        let book = book.trim();
        if book.is_empty() {
            return Err(err());
        }

        let (chapter, verse_part) = chapter_verse.split_once(':').ok_or_else(err)?;
        let chapter = chapter.parse().map_err(|_| err())?;

        let (start_verse, end_verse) = match verse_part.split_once('-') {
            Some((start, end)) => (
                start.parse().map_err(|_| err())?,
                end.parse().map_err(|_| err())?,
            ),
            None => {
                let verse = verse_part.parse().map_err(|_| err())?;
                (verse, verse)
            }
        };

        Ok(Self {
            book: book.to_string(),
            chapter,
            start_verse,
            end_verse,
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(
                f,
                "{} {}:{}-{}",
                self.book, self.chapter, self.start_verse, self.end_verse
            )
        } else {
            write!(f, "{} {}:{}", self.book, self.chapter, self.start_verse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_single_verse() {
        let reference: Reference = "John 3:16".parse().unwrap();

        assert_eq!(reference.book, "John");
        assert_eq!(reference.chapter, 3);
        assert_eq!(reference.start_verse, 16);
        assert_eq!(reference.end_verse, 16);
        assert!(!reference.is_range());
    }

    #[test]
    fn parse_verse_range() {
        let reference: Reference = "Proverbs 3:5-6".parse().unwrap();

        assert_eq!(reference.book, "Proverbs");
        assert_eq!(reference.chapter, 3);
        assert_eq!(reference.start_verse, 5);
        assert_eq!(reference.end_verse, 6);
        assert!(reference.is_range());
    }

    #[test]
    fn parse_multi_word_book() {
        let reference: Reference = "1 John 4:19".parse().unwrap();
        assert_eq!(reference.book, "1 John");

        let reference: Reference = "Song of Solomon 2:1".parse().unwrap();
        assert_eq!(reference.book, "Song of Solomon");
        assert_eq!(reference.chapter, 2);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let reference: Reference = "  Psalm 23:1-3  ".parse().unwrap();
        assert_eq!(reference.book, "Psalm");
        assert_eq!(reference.end_verse, 3);
    }

    #[test]
    fn parse_rejects_missing_space() {
        assert_matches!(
            "Invalid".parse::<Reference>(),
            Err(ReferenceError::Format(s)) if s == "Invalid"
        );
    }

    #[test]
    fn parse_rejects_missing_colon() {
        assert_matches!("John 316".parse::<Reference>(), Err(ReferenceError::Format(_)));
    }

    #[test]
    fn parse_rejects_non_numeric_segments() {
        assert_matches!("John a:16".parse::<Reference>(), Err(ReferenceError::Format(_)));
        assert_matches!("John 3:b".parse::<Reference>(), Err(ReferenceError::Format(_)));
        assert_matches!("John 3:5-c".parse::<Reference>(), Err(ReferenceError::Format(_)));
        assert_matches!("John 3:".parse::<Reference>(), Err(ReferenceError::Format(_)));
        assert_matches!("John :16".parse::<Reference>(), Err(ReferenceError::Format(_)));
    }

    #[test]
    fn parse_accepts_inverted_range() {
        // Matches the observed behavior: no start <= end validation.
        let reference: Reference = "John 3:16-2".parse().unwrap();
        assert_eq!(reference.start_verse, 16);
        assert_eq!(reference.end_verse, 2);
    }

    #[test]
    fn display_round_trips() {
        for input in ["John 3:16", "Proverbs 3:5-6", "1 Corinthians 13:4-7"] {
            let reference: Reference = input.parse().unwrap();
            assert_eq!(reference.to_string(), input);
        }
    }

    #[test]
    fn display_collapses_degenerate_range() {
        let reference = Reference::range("John", 3, 16, 16);
        assert_eq!(reference.to_string(), "John 3:16");
    }
}
