//! Core data types for smartcart

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single shopping-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque unique identifier
    pub id: String,
    /// Display text
    pub name: String,
    /// Grouping label; usually a canonical [`Category`] but not enforced
    pub category: String,
    /// Completion flag
    pub checked: bool,
    /// Milliseconds since the Unix epoch at insertion
    pub created_at: i64,
}

impl Item {
    /// Create an unchecked item with a fresh id and the current timestamp
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            category: category.into(),
            checked: false,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl From<CategorizedItem> for Item {
    fn from(categorized: CategorizedItem) -> Self {
        Item::new(categorized.name, categorized.category)
    }
}

/// One `{name, category}` pair as returned by the categorizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedItem {
    pub name: String,
    pub category: String,
}

impl CategorizedItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// The nine canonical categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fruits & Vegetables")]
    FruitsAndVeg,
    #[serde(rename = "Meat & Fish")]
    MeatAndFish,
    #[serde(rename = "Dairy & Eggs")]
    Dairy,
    #[serde(rename = "Bakery")]
    Bakery,
    #[serde(rename = "Pantry")]
    Pantry,
    #[serde(rename = "Frozen")]
    Frozen,
    #[serde(rename = "Beverages")]
    Beverages,
    #[serde(rename = "Household")]
    Household,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 9] = [
        Category::FruitsAndVeg,
        Category::MeatAndFish,
        Category::Dairy,
        Category::Bakery,
        Category::Pantry,
        Category::Frozen,
        Category::Beverages,
        Category::Household,
        Category::Other,
    ];

    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// The canonical identifier, used as grouping and localization key
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FruitsAndVeg => "Fruits & Vegetables",
            Category::MeatAndFish => "Meat & Fish",
            Category::Dairy => "Dairy & Eggs",
            Category::Bakery => "Bakery",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::Household => "Household",
            Category::Other => "Other",
        }
    }

    /// Localization key for this category
    pub fn i18n_key(&self) -> String {
        category_key(self.as_str())
    }
}

/// Localization key for an arbitrary category string
pub fn category_key(category: &str) -> String {
    format!("category.{}", category)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a canonical category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}
