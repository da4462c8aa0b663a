//! Extension-based categorization.
//!
//! This module holds the category table (category name -> extensions) and the
//! extension index derived from it. Lookup is total: anything the table does
//! not know about lands in [`OTHERS`].
//!
//! # Examples
//!
//! ```
//! use organizer::file_category::{CategoryTable, OTHERS};
//!
//! let table = CategoryTable::builtin();
//! assert_eq!(table.category_for(".png"), "Images");
//! assert_eq!(table.category_for(".PDF"), "Documents");
//! assert_eq!(table.category_for(".unknownext"), OTHERS);
//! assert_eq!(table.category_for(""), OTHERS);
//! ```
use std::collections::HashMap;
use std::path::Path;

/// Category used for unrecognized extensions and files without one.
pub const OTHERS: &str = "Others";

const BUILTIN: &[(&str, &[&str])] = &[
    ("Documents", &[".pdf", ".docx", ".xlsx", ".pptx", ".txt", ".md"]),
    ("Images", &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg"]),
    ("Audio", &[".mp3", ".wav", ".flac", ".m4a"]),
    ("Videos", &[".mp4", ".mov", ".mkv", ".avi"]),
    ("Archives", &[".zip", ".rar", ".7z", ".tar", ".gz"]),
    ("Installers", &[".exe", ".msi", ".dmg", ".pkg"]),
    (
        "Code",
        &[".py", ".js", ".ts", ".html", ".css", ".json", ".yaml", ".yml", ".xml"],
    ),
];

/// Ordered mapping from category name to its extensions, plus the reverse
/// extension index.
///
/// Extensions are stored lowercase with a leading dot. If the same extension
/// is listed under two categories, the one defined last wins on lookup.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    categories: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl CategoryTable {
    /// Creates an empty table. Every lookup on it yields [`OTHERS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table with the standard categories.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (name, extensions) in BUILTIN {
            table.insert_category(name, extensions.iter().copied());
        }
        table
    }

    /// Adds a category, or replaces the extension list of an existing one
    /// while keeping its position.
    pub fn insert_category<I, S>(&mut self, name: &str, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();

        match self.categories.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = extensions,
            None => self.categories.push((name.to_string(), extensions)),
        }
        self.rebuild_index();
    }

    // Flattening in table order makes later definitions overwrite earlier ones.
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, (_, extensions)) in self.categories.iter().enumerate() {
            for ext in extensions {
                self.index.insert(ext.clone(), position);
            }
        }
    }

    /// Returns the category for an extension such as `".png"`.
    ///
    /// Matching is case-insensitive and includes the leading dot. Unknown or
    /// empty extensions map to [`OTHERS`].
    pub fn category_for(&self, ext: &str) -> &str {
        self.index
            .get(&ext.to_lowercase())
            .map(|&position| self.categories[position].0.as_str())
            .unwrap_or(OTHERS)
    }

    /// Returns the category for a file path, based on its extension.
    pub fn category_for_path(&self, path: &Path) -> &str {
        self.category_for(&extension_of(path))
    }

    /// Returns the extensions listed for a category, if it exists.
    pub fn extensions_for(&self, name: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, exts)| exts.as_slice())
    }

    /// Iterates over `(category, extensions)` in table order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, exts)| (name.as_str(), exts.as_slice()))
    }

    /// Number of categories, not counting the [`OTHERS`] fallback.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when the table has no categories at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Returns the lowercased extension of `path` including the leading dot, or
/// an empty string when the file has none.
///
/// Only the last suffix counts: `archive.tar.gz` yields `".gz"` and a dotfile
/// such as `.env` has no extension.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Lowercases an extension and makes sure it starts with a dot.
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().to_lowercase();
    if ext.is_empty() || ext == "." {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{}", ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_category_order() {
        let table = CategoryTable::builtin();
        let names: Vec<&str> = table.categories().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "Documents",
                "Images",
                "Audio",
                "Videos",
                "Archives",
                "Installers",
                "Code"
            ]
        );
    }

    #[test]
    fn test_index_matches_table() {
        let table = CategoryTable::builtin();
        for (name, extensions) in table.categories() {
            for ext in extensions {
                assert_eq!(table.category_for(ext), name, "extension {}", ext);
            }
        }
    }

    #[test]
    fn test_category_for_case_insensitive() {
        let table = CategoryTable::builtin();
        assert_eq!(table.category_for(".PNG"), "Images");
        assert_eq!(table.category_for(".Mp3"), "Audio");
        assert_eq!(table.category_for(".7Z"), "Archives");
    }

    #[test]
    fn test_category_for_requires_leading_dot() {
        let table = CategoryTable::builtin();
        assert_eq!(table.category_for("pdf"), OTHERS);
        assert_eq!(table.category_for(".pdf"), "Documents");
    }

    #[test]
    fn test_unknown_and_empty_default_to_others() {
        let table = CategoryTable::builtin();
        assert_eq!(table.category_for(".unknownext"), OTHERS);
        assert_eq!(table.category_for(""), OTHERS);
        assert_eq!(CategoryTable::new().category_for(".pdf"), OTHERS);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("photo.PNG")), ".png");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("README")), "");
        assert_eq!(extension_of(Path::new(".env")), "");
        assert_eq!(extension_of(Path::new("/tmp/dir.d/notes.Md")), ".md");
    }

    #[test]
    fn test_category_for_path() {
        let table = CategoryTable::builtin();
        assert_eq!(table.category_for_path(Path::new("a.pdf")), "Documents");
        assert_eq!(table.category_for_path(Path::new("Makefile")), OTHERS);
    }

    #[test]
    fn test_insert_new_category_normalizes_extensions() {
        let mut table = CategoryTable::builtin();
        table.insert_category("Ebooks", ["EPUB", ".Mobi", "  ", "."]);

        assert_eq!(table.category_for(".epub"), "Ebooks");
        assert_eq!(table.category_for(".mobi"), "Ebooks");
        assert_eq!(
            table.extensions_for("Ebooks"),
            Some(&[".epub".to_string(), ".mobi".to_string()][..])
        );
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_replace_category_keeps_position() {
        let mut table = CategoryTable::builtin();
        table.insert_category("Audio", [".ogg"]);

        assert_eq!(table.categories().nth(2).map(|(n, _)| n), Some("Audio"));
        assert_eq!(table.category_for(".ogg"), "Audio");
        assert_eq!(table.category_for(".mp3"), OTHERS);
    }

    #[test]
    fn test_duplicate_extension_last_defined_wins() {
        let mut table = CategoryTable::builtin();
        table.insert_category("Notes", [".md"]);
        assert_eq!(table.category_for(".md"), "Notes");
        assert_eq!(table.category_for(".txt"), "Documents");
    }
}
