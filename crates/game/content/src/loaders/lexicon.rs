//! Lesson word-list loader.

use std::collections::BTreeMap;
use std::path::Path;

use crate::loaders::{LoadResult, parse_ron, read_file};

pub struct LexiconLoader;

impl LexiconLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, Vec<String>>> {
        Self::parse(&read_file(path)?)
    }

    /// Words are lowercased and de-duplicated within each lesson.
    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, Vec<String>>> {
        let raw: BTreeMap<String, Vec<String>> = parse_ron(content, "lexicon")?;
        let mut lessons = BTreeMap::new();
        for (lesson, words) in raw {
            let mut cleaned: Vec<String> = Vec::with_capacity(words.len());
            for word in words {
                let word = word.trim().to_lowercase();
                if word.is_empty() || word.contains(char::is_whitespace) {
                    anyhow::bail!("lesson '{}' has an invalid word '{}'", lesson, word);
                }
                if !cleaned.contains(&word) {
                    cleaned.push(word);
                }
            }
            lessons.insert(lesson, cleaned);
        }
        Ok(lessons)
    }
}
