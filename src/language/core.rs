use super::WordListError;
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::fs;
use std::path::Path;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Word list file as shipped in `src/lang`: `{ "name", "size", "words" }`
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load one of the lists compiled into the crate, e.g. `"common"` or `"all"`.
    pub fn embedded(name: &str) -> Result<Self, WordListError> {
        let file_name = format!("{name}.json");
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| WordListError::Missing(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| WordListError::Missing(file_name.clone()))?;

        Ok(from_str(contents)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        let contents = fs::read_to_string(path)?;
        Ok(from_str(&contents)?)
    }
}
