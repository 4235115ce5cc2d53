use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static VERSE_DIR: Dir = include_dir!("src/verses");

/// One bundled passage: a reference string plus its text.
#[derive(Deserialize, Clone, Debug)]
pub struct VerseEntry {
    pub reference: String,
    pub text: String,
}

/// A named set of passages bundled into the binary.
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct VerseSet {
    pub name: String,
    pub size: u32,
    pub entries: Vec<VerseEntry>,
}

impl VerseSet {
    pub fn new(file_name: &str) -> Self {
        read_verse_set_from_file(&format!("{file_name}.json")).unwrap()
    }
}

fn read_verse_set_from_file(file_name: &str) -> Result<VerseSet, Box<dyn Error>> {
    let file = VERSE_DIR.get_file(file_name).expect("Verse set not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let set = from_str(file_as_str).expect("Unable to deserialize verse set json");

    Ok(set)
}
