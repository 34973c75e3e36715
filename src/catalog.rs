// GestureCatalog - class index to gesture metadata mapping
//
// The classifier reports a bare class index; this catalog resolves it to a
// named gesture. Entry order therefore matters and must match the order the
// model was trained with. A JSON catalog on disk overrides the built-in set.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Broad grouping for a gesture entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureCategory {
    Alphabet,
    Word,
    Phrase,
    Number,
    Letter,
}

/// One recognizable gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEntry {
    pub name: String,
    pub description: String,
    pub category: GestureCategory,
}

impl GestureEntry {
    fn new(name: &str, description: &str, category: GestureCategory) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            category,
        }
    }
}

/// Built-in gesture set, in model class-index order
static BUILTIN_GESTURES: Lazy<Vec<GestureEntry>> = Lazy::new(|| {
    let mut entries = Vec::with_capacity(11);
    for number in 1..=9u32 {
        entries.push(GestureEntry::new(
            &number.to_string(),
            &format!("Number {number} sign"),
            GestureCategory::Number,
        ));
    }
    entries.push(GestureEntry::new(
        "A",
        "Letter A sign",
        GestureCategory::Letter,
    ));
    entries.push(GestureEntry::new(
        "B",
        "Letter B sign",
        GestureCategory::Letter,
    ));
    entries
});

/// Ordered mapping from class index to gesture metadata
#[derive(Debug, Clone)]
pub struct GestureCatalog {
    entries: Vec<GestureEntry>,
}

impl GestureCatalog {
    /// The built-in catalog: digits 1-9 followed by letters A and B
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_GESTURES.clone(),
        }
    }

    /// Build a catalog from explicit entries (class index = position)
    pub fn from_entries(entries: Vec<GestureEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON file, falling back to the built-in set
    ///
    /// A missing or malformed file logs a warning rather than failing: the
    /// engine can always run against the built-in gestures.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Vec<GestureEntry>>(&contents) {
                Ok(entries) if !entries.is_empty() => {
                    log::info!(
                        "[GestureCatalog] Loaded {} gestures from {}",
                        entries.len(),
                        path.display()
                    );
                    Self::from_entries(entries)
                }
                Ok(_) => {
                    log::warn!(
                        "[GestureCatalog] {} is empty, using built-in gestures",
                        path.display()
                    );
                    Self::builtin()
                }
                Err(err) => {
                    log::warn!(
                        "[GestureCatalog] Failed to parse {}: {}, using built-in gestures",
                        path.display(),
                        err
                    );
                    Self::builtin()
                }
            },
            Err(err) => {
                log::warn!(
                    "[GestureCatalog] Failed to read {}: {}, using built-in gestures",
                    path.display(),
                    err
                );
                Self::builtin()
            }
        }
    }

    /// Resolve a class index; None when the index is out of range
    pub fn get(&self, class_index: usize) -> Option<&GestureEntry> {
        self.entries.get(class_index)
    }

    /// Number of known classes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in class-index order
    pub fn iter(&self) -> impl Iterator<Item = &GestureEntry> {
        self.entries.iter()
    }
}
