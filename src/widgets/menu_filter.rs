//! Category filter over the coffee menu.

use crate::content::schema::MenuItem;

/// The category that shows every item.
pub const ALL_CATEGORIES: &str = "all";

/// Which filter button is active. Exactly one category is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFilter {
    categories: Vec<String>,
    active: usize,
}

impl MenuFilter {
    /// Start with `all` active. `categories` should already lead with `all`.
    pub fn new(categories: Vec<String>) -> Self {
        let active = categories
            .iter()
            .position(|c| c == ALL_CATEGORIES)
            .unwrap_or(0);
        Self { categories, active }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn active(&self) -> &str {
        self.categories
            .get(self.active)
            .map(String::as_str)
            .unwrap_or(ALL_CATEGORIES)
    }

    pub fn is_active(&self, category: &str) -> bool {
        self.active() == category
    }

    /// Make `category` the active one. Unknown categories are ignored.
    pub fn select(&mut self, category: &str) -> bool {
        match self.categories.iter().position(|c| c == category) {
            Some(i) => {
                self.active = i;
                true
            }
            None => false,
        }
    }

    /// Items shown under the active category, in their original order.
    pub fn visible<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        filter_items(items, self.active())
    }
}

/// Items whose category equals `category`, or all of them for `all`.
pub fn filter_items<'a>(items: &'a [MenuItem], category: &str) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| category == ALL_CATEGORIES || item.category == category)
        .collect()
}

/// Upper-case the first character for button labels.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, category: &str) -> MenuItem {
        MenuItem {
            title: title.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    fn filter() -> MenuFilter {
        MenuFilter::new(["all", "hot", "cold"].map(String::from).to_vec())
    }

    #[test]
    fn test_starts_on_all() {
        let f = filter();
        assert_eq!(f.active(), "all");
        assert!(f.is_active("all"));
    }

    #[test]
    fn test_select_keeps_one_active() {
        let mut f = filter();
        assert!(f.select("cold"));
        assert!(f.is_active("cold"));
        assert!(!f.is_active("all"));
        assert!(!f.select("tea"));
        assert_eq!(f.active(), "cold");
    }

    #[test]
    fn test_filtering_preserves_order_and_source() {
        let items = vec![item("Latte", "hot"), item("Iced Tea", "cold"), item("Mocha", "hot")];
        let mut f = filter();

        let all: Vec<_> = f.visible(&items).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(all, ["Latte", "Iced Tea", "Mocha"]);

        f.select("hot");
        let hot: Vec<_> = f.visible(&items).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(hot, ["Latte", "Mocha"]);

        f.select("all");
        assert_eq!(f.visible(&items).len(), 3);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cold"), "Cold");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
