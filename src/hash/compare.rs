// Compare module
// Classifies the key union of two hash indexes into two ordered reports

use serde::Serialize;

use super::walk::HashIndex;

/// Classification of one left-side entry against the right index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
    /// Present in both trees with equal digests
    Match { digest: String },
    /// Present in both trees with differing digests
    Mismatch { left: String, right: String },
    /// Present only in the left tree
    MissingInRight,
}

/// One classified entry of the left-side report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub path: String,
    #[serde(flatten)]
    pub status: EntryStatus,
}

/// Result of comparing two hash indexes
///
/// `entries` covers every left-side key in lexicographic order;
/// `only_in_right` the remaining right-side keys, also sorted. Together the
/// two lists partition the key union with no duplicates.
#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub left_label: String,
    pub right_label: String,
    pub entries: Vec<ReportEntry>,
    pub only_in_right: Vec<String>,
}

impl CompareReport {
    /// Format the report in the plain text output format
    pub fn to_plain_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Comparing {} with {}:\n",
            self.left_label, self.right_label
        ));

        for entry in &self.entries {
            match &entry.status {
                EntryStatus::Match { digest } => {
                    output.push_str(&format!("[Match] {} - {}\n", entry.path, digest));
                }
                EntryStatus::Mismatch { left, right } => {
                    output.push_str(&format!(
                        "[Hash Mismatch] {} - {} vs {}\n",
                        entry.path, left, right
                    ));
                }
                EntryStatus::MissingInRight => {
                    output.push_str(&format!(
                        "[Missing in {}] {}\n",
                        self.right_label, entry.path
                    ));
                }
            }
        }

        if !self.only_in_right.is_empty() {
            output.push_str(&format!("Only in {}:\n", self.right_label));
            for path in &self.only_in_right {
                output.push_str(path);
                output.push('\n');
            }
        }

        output
    }

    /// Print the plain text report to stdout
    pub fn display(&self) {
        print!("{}", self.to_plain_text());
    }
}

/// Compare two hash indexes
///
/// Pure function: no I/O, inputs untouched, identical inputs always yield
/// an identical report. Keys present in both trees are classified once, in
/// the left-side report; keys only in the right tree appear only in
/// `only_in_right`.
pub fn compare(
    left_label: &str,
    left: &HashIndex,
    right_label: &str,
    right: &HashIndex,
) -> CompareReport {
    let entries = left
        .iter()
        .map(|(path, left_digest)| {
            let status = match right.get(path) {
                Some(right_digest) if right_digest == left_digest => EntryStatus::Match {
                    digest: left_digest.to_string(),
                },
                Some(right_digest) => EntryStatus::Mismatch {
                    left: left_digest.to_string(),
                    right: right_digest.to_string(),
                },
                None => EntryStatus::MissingInRight,
            };
            ReportEntry {
                path: path.to_string(),
                status,
            }
        })
        .collect();

    let only_in_right = right
        .iter()
        .filter(|&(path, _)| !left.contains(path))
        .map(|(path, _)| path.to_string())
        .collect();

    CompareReport {
        left_label: left_label.to_string(),
        right_label: right_label.to_string(),
        entries,
        only_in_right,
    }
}
