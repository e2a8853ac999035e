//! The fixed set of categories that transactions and budgets are filed under.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// The label a transaction or budget is filed under.
///
/// Categories are serialized using their display labels, e.g. "Food & Dining".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, restaurants and takeaways.
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    /// General shopping.
    Shopping,
    /// Rent, mortgage and home maintenance.
    Housing,
    /// Fuel, public transport and vehicle costs.
    Transportation,
    /// Movies, games and events.
    Entertainment,
    /// Medical and dental costs.
    Healthcare,
    /// Tuition, courses and books.
    Education,
    /// Flights, accommodation and holidays.
    Travel,
    /// Haircuts, cosmetics and similar.
    #[serde(rename = "Personal Care")]
    PersonalCare,
    /// Power, water, internet and phone bills.
    Utilities,
    /// Recurring subscriptions.
    Subscriptions,
    /// Presents and charitable giving.
    #[serde(rename = "Gifts & Donations")]
    GiftsAndDonations,
    /// Wages, salary and other earnings.
    Income,
    /// Shares, funds and savings contributions.
    Investments,
    /// Anything that does not fit the other categories.
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 15] = [
        Category::FoodAndDining,
        Category::Shopping,
        Category::Housing,
        Category::Transportation,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::PersonalCare,
        Category::Utilities,
        Category::Subscriptions,
        Category::GiftsAndDonations,
        Category::Income,
        Category::Investments,
        Category::Other,
    ];

    /// The display label for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Shopping => "Shopping",
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::PersonalCare => "Personal Care",
            Category::Utilities => "Utilities",
            Category::Subscriptions => "Subscriptions",
            Category::GiftsAndDonations => "Gifts & Donations",
            Category::Income => "Income",
            Category::Investments => "Investments",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string did not match any of the category labels.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a valid category")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
            .ok_or_else(|| UnknownCategory(label.to_owned()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
