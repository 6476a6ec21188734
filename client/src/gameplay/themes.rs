use buddy_protocol::CUSTOM_CATEGORY;

/// Prefix the backend gives categories generated from a custom topic.
pub const AI_CATEGORY_PREFIX: &str = "AI: ";

const CATEGORY_ICONS: [(&str, &str); 9] = [
    ("Technology", "💻"),
    ("Animals", "🦁"),
    ("Fruits", "🍎"),
    ("Countries", "🌍"),
    ("Science - Solar System", "🪐"),
    ("Science - Ecosystems", "🌿"),
    ("History - Ancient Civilizations", "🏛️"),
    ("History - Civil Rights Movement", "✊"),
    (CUSTOM_CATEGORY, "✨"),
];

const DEFAULT_ICON: &str = "🎮";

pub fn is_ai_category(category: &str) -> bool {
    category.starts_with(AI_CATEGORY_PREFIX)
}

/// Icon shown next to the category badge. Generated categories share the
/// custom icon.
pub fn category_icon(category: &str) -> &'static str {
    let key = if is_ai_category(category) {
        CUSTOM_CATEGORY
    } else {
        category
    };
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Label used in the category picker.
pub fn category_label(category: &str) -> String {
    if category == CUSTOM_CATEGORY {
        "✨ Custom AI Topic...".to_string()
    } else if is_ai_category(category) {
        format!("✨ {category}")
    } else {
        category.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_categories_use_custom_icon() {
        assert_eq!(category_icon("AI: Dinosaurs"), "✨");
        assert_eq!(category_icon("Animals"), "🦁");
        assert_eq!(category_icon("Board Games"), "🎮");
    }

    #[test]
    fn picker_labels() {
        assert_eq!(category_label("Custom"), "✨ Custom AI Topic...");
        assert_eq!(category_label("AI: Space"), "✨ AI: Space");
        assert_eq!(category_label("Fruits"), "Fruits");
    }
}
