//! Per-category counts of a plan.

use crate::planner::Plan;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Category name -> number of files, ordered case-insensitively by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    rows: Vec<(String, usize)>,
}

impl Summary {
    /// Count for `category`, zero if it does not appear.
    pub fn get(&self, category: &str) -> usize {
        self.rows
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Iterates `(category, count)` rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.rows.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the summarized plan was empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts; equals the length of the summarized plan.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (name, count) in &self.rows {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Groups `plan` by the name of each destination's parent folder.
///
/// Only the destination paths are inspected, so this works the same on a
/// dry-run plan and on an executed one.
pub fn summarize(plan: &Plan) -> Summary {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for pair in plan {
        let category = pair
            .destination
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        *counts.entry(category).or_insert(0) += 1;
    }

    let mut rows: Vec<(String, usize)> = counts.into_iter().collect();
    rows.sort_by(|(a, _), (b, _)| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    Summary { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::MovePair;
    use std::path::PathBuf;

    fn plan_of(destinations: &[&str]) -> Plan {
        destinations
            .iter()
            .map(|dst| MovePair {
                source: PathBuf::from("/src").join(PathBuf::from(dst).file_name().unwrap()),
                destination: PathBuf::from(dst),
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_summarize_counts_by_parent_folder() {
        let plan = plan_of(&[
            "/dst/Images/a.png",
            "/dst/Documents/b.pdf",
            "/dst/Images/c.jpg",
            "/dst/Others/d.bin",
        ]);
        let summary = summarize(&plan);

        assert_eq!(summary.get("Images"), 2);
        assert_eq!(summary.get("Documents"), 1);
        assert_eq!(summary.get("Others"), 1);
        assert_eq!(summary.get("Audio"), 0);
        assert_eq!(summary.total(), plan.len());
    }

    #[test]
    fn test_summarize_orders_case_insensitively() {
        let plan = plan_of(&[
            "/dst/videos/a.mp4",
            "/dst/Code/b.rs",
            "/dst/archives/c.zip",
            "/dst/Documents/d.pdf",
        ]);
        let summary = summarize(&plan);
        let names: Vec<&str> = summary.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["archives", "Code", "Documents", "videos"]);
    }

    #[test]
    fn test_summarize_empty_plan() {
        let summary = summarize(&Plan::default());
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_summary_serializes_as_ordered_object() {
        let plan = plan_of(&["/dst/Others/x", "/dst/Documents/a.pdf", "/dst/Images/b.png"]);
        let json = serde_json::to_string(&summarize(&plan)).unwrap();
        assert_eq!(json, r#"{"Documents":1,"Images":1,"Others":1}"#);
    }
}
