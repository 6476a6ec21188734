//! Category names the client offers before the backend answers.

/// Pseudo-category that asks the backend to generate words for a topic.
pub const CUSTOM_CATEGORY: &str = "Custom";

/// Used when `GET /api/categories` fails.
pub const FALLBACK_CATEGORIES: [&str; 8] = [
    "Technology",
    "Animals",
    "Fruits",
    "Countries",
    "Science - Solar System",
    "Science - Ecosystems",
    "History - Ancient Civilizations",
    "History - Civil Rights Movement",
];

/// Appends [`CUSTOM_CATEGORY`] unless the list already ends with it.
pub fn with_custom_entry(mut categories: Vec<String>) -> Vec<String> {
    categories.retain(|name| name != CUSTOM_CATEGORY);
    categories.push(CUSTOM_CATEGORY.to_string());
    categories
}

pub fn fallback_categories() -> Vec<String> {
    with_custom_entry(FALLBACK_CATEGORIES.iter().map(|name| name.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_is_always_last_and_unique() {
        let categories = with_custom_entry(vec!["Custom".into(), "Animals".into()]);
        assert_eq!(categories, vec!["Animals".to_string(), "Custom".to_string()]);
        assert_eq!(fallback_categories().len(), FALLBACK_CATEGORIES.len() + 1);
    }
}
