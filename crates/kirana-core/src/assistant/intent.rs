//! Intent detection for the chat assistant
//!
//! Lower-cased substring matching against a fixed, ordered category list.
//! First match wins - deliberately not a best-match scorer, so precedence
//! is encoded purely in the order below.

/// What the user is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Sales, revenue, profit questions
    Sales,
    /// Products, stock levels, best sellers
    Inventory,
    /// What the notification/insight feed covers
    Notifications,
    /// Hello/hi/hey
    Greeting,
    /// Anything unrecognized
    Fallback,
}

impl Intent {
    const SALES_KEYWORDS: [&'static str; 5] = ["sell", "sales", "revenue", "profit", "money"];
    const INVENTORY_KEYWORDS: [&'static str; 5] =
        ["product", "stock", "inventory", "bestseller", "best seller"];
    const NOTIFICATION_KEYWORDS: [&'static str; 2] = ["notification", "alert"];
    const GREETING_KEYWORDS: [&'static str; 3] = ["hello", "hi", "hey"];

    /// Match an utterance to the first intent whose keyword list hits.
    pub fn detect(utterance: &str) -> Intent {
        let lower = utterance.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if contains_any(&Self::SALES_KEYWORDS) {
            Intent::Sales
        } else if contains_any(&Self::INVENTORY_KEYWORDS) {
            Intent::Inventory
        } else if contains_any(&Self::NOTIFICATION_KEYWORDS) {
            Intent::Notifications
        } else if contains_any(&Self::GREETING_KEYWORDS) {
            Intent::Greeting
        } else {
            Intent::Fallback
        }
    }
}
