//! Move planning: from discovered files to (source, destination) pairs.
//!
//! Planning never touches the filesystem beyond existence checks. Each
//! destination is `destination_root / category / file name`, renamed with a
//! numeric suffix when it would collide with an existing entry or with a
//! destination already assigned earlier in the same plan.
use crate::conflict::disambiguate_against;
use crate::file_category::CategoryTable;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One planned or completed relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovePair {
    /// Where the file currently lives.
    pub source: PathBuf,
    /// Final, collision-free destination.
    pub destination: PathBuf,
}

impl MovePair {
    /// Name of the destination's parent folder, i.e. the category used.
    pub fn category(&self) -> Option<&str> {
        self.destination
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str())
    }
}

/// Ordered list of moves, in the order the source files were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Plan {
    pairs: Vec<MovePair>,
}

impl Plan {
    /// The planned moves as a slice.
    pub fn pairs(&self) -> &[MovePair] {
        &self.pairs
    }

    /// Iterates the moves in plan order.
    pub fn iter(&self) -> std::slice::Iter<'_, MovePair> {
        self.pairs.iter()
    }

    /// Number of planned moves.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when there is nothing to move.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<Vec<MovePair>> for Plan {
    fn from(pairs: Vec<MovePair>) -> Self {
        Self { pairs }
    }
}

impl IntoIterator for Plan {
    type Item = MovePair;
    type IntoIter = std::vec::IntoIter<MovePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a MovePair;
    type IntoIter = std::slice::Iter<'a, MovePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Computes the unqualified destination of `file`:
/// `destination_root / category / file name`.
///
/// Pure path arithmetic: no directory is created and collisions are not
/// checked.
///
/// # Examples
///
/// ```
/// use organizer::file_category::CategoryTable;
/// use organizer::planner::resolve;
/// use std::path::Path;
///
/// let table = CategoryTable::builtin();
/// let target = resolve(Path::new("/in/photo.PNG"), Path::new("/out"), &table);
/// assert_eq!(target, Path::new("/out/Images/photo.PNG"));
/// ```
pub fn resolve(file: &Path, destination_root: &Path, table: &CategoryTable) -> PathBuf {
    let category = table.category_for_path(file);
    let dest_dir = destination_root.join(category);
    match file.file_name() {
        Some(name) => dest_dir.join(name),
        None => dest_dir,
    }
}

/// Builds the plan for `files`, preserving their order.
///
/// Destinations assigned earlier in this call are reserved, so two files
/// with the same name heading to the same category get distinct paths
/// (`name.ext`, then `name-1.ext`) even before anything is moved.
pub fn plan(files: &[PathBuf], destination_root: &Path, table: &CategoryTable) -> Plan {
    let mut reserved: HashSet<PathBuf> = HashSet::with_capacity(files.len());
    let mut pairs = Vec::with_capacity(files.len());

    for file in files {
        let suggested = resolve(file, destination_root, table);
        let destination = disambiguate_against(&suggested, &reserved);
        reserved.insert(destination.clone());
        pairs.push(MovePair {
            source: file.clone(),
            destination,
        });
    }

    Plan { pairs }
}
