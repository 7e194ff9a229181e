//! Substring matching over the municipal store, driving map highlighting
//! and result summaries.

use crate::core::store::MunicipalStore;
use crate::domain::model::Municipality;

/// Queries shorter than this are not evaluated at all.
pub const MIN_QUERY_LEN: usize = 2;

/// Borrows the store it searches; the store itself stays write-once.
pub struct SearchEngine<'a> {
    store: &'a MunicipalStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a MunicipalStore) -> Self {
        Self { store }
    }

    /// Case- and accent-insensitive symmetric containment against the
    /// municipality name or its region name. Results keep store order.
    pub fn search(&self, query: &str) -> Vec<&'a Municipality> {
        let needle = normalize(query);
        if needle.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        self.store
            .records()
            .iter()
            .filter(|record| Self::matches(&needle, record))
            .collect()
    }

    /// Resolves one free-text label (e.g. a map tooltip title) to at most
    /// one record, using the same containment rule. First match in store
    /// order wins.
    pub fn match_by_display_label(&self, label: &str) -> Option<&'a Municipality> {
        let needle = normalize(label);
        if needle.is_empty() {
            return None;
        }

        self.store
            .records()
            .iter()
            .find(|record| Self::matches(&needle, record))
    }

    fn matches(needle: &str, record: &Municipality) -> bool {
        symmetric_contains(needle, &normalize(&record.name))
            || symmetric_contains(needle, &normalize(&record.region_name))
    }
}

/// Symmetric containment tolerates both partial queries ("campo" in
/// "campo grande") and over-long labels ("campo grande - ms" containing
/// "campo grande").
fn symmetric_contains(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

// Covers the diacritics that occur in Brazilian municipality names.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}
