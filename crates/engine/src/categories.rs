//! Suggested categories.
//!
//! Categories are free text; these lists are what clients offer and what the
//! dashboard reports on. `EXPENSE_CATEGORIES` order is the chart order.

pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Housing",
    "Health",
    "Education",
    "Leisure",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investments", "Sales", "Other"];
