//! Client-side filtering of subscribed lists.

use campushub_core::types::FilterCriteria;
use campushub_entity::Filterable;

/// Number of items a teaser section shows.
pub const PREVIEW_LIMIT: usize = 6;

/// Whether one record passes the criteria.
///
/// Text matches a case-insensitive substring of the title or description.
/// Branch and category, when set, must equal the record's value ignoring
/// case. Empty inputs match everything.
pub fn matches<T: Filterable>(item: &T, criteria: &FilterCriteria) -> bool {
    let query = criteria.text.to_lowercase();
    let text_ok = query.is_empty()
        || item.title().to_lowercase().contains(&query)
        || item
            .description()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&query);

    text_ok
        && tag_matches(item.branch(), &criteria.branch)
        && tag_matches(item.category(), &criteria.category)
}

fn tag_matches(value: Option<&str>, wanted: &str) -> bool {
    wanted.is_empty() || value.unwrap_or_default().to_lowercase() == wanted.to_lowercase()
}

/// Records passing the criteria, in input order.
pub fn filter<T: Filterable + Clone>(items: &[T], criteria: &FilterCriteria) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches(*item, criteria))
        .cloned()
        .collect()
}

/// The first `limit` records.
pub fn preview<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    items.iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        title: &'static str,
        description: Option<&'static str>,
        branch: &'static str,
        category: Option<&'static str>,
    }

    impl Filterable for Item {
        fn title(&self) -> &str {
            self.title
        }
        fn description(&self) -> Option<&str> {
            self.description
        }
        fn branch(&self) -> Option<&str> {
            Some(self.branch)
        }
        fn category(&self) -> Option<&str> {
            self.category
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { title: "Signals", description: Some("Fourier basics"), branch: "ECE", category: Some("Notes") },
            Item { title: "Machines", description: None, branch: "EE", category: Some("PYQ") },
            Item { title: "Thermo", description: Some("signal flow"), branch: "ME", category: None },
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        assert_eq!(filter(&items(), &FilterCriteria::all()), items());
    }

    #[test]
    fn test_text_matches_title_or_description_case_insensitive() {
        let titles: Vec<_> = filter(&items(), &FilterCriteria::all().text("SIGNAL"))
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Signals", "Thermo"]);
    }

    #[test]
    fn test_branch_and_category_equality() {
        assert_eq!(filter(&items(), &FilterCriteria::all().branch("ee")).len(), 1);
        assert_eq!(filter(&items(), &FilterCriteria::all().branch("E")).len(), 0);
        assert_eq!(filter(&items(), &FilterCriteria::all().category("pyq"))[0].title, "Machines");
        assert!(filter(&items(), &FilterCriteria::all().category("x")).is_empty());
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview(&items(), 2).len(), 2);
        assert_eq!(preview(&items(), PREVIEW_LIMIT).len(), 3);
    }
}
