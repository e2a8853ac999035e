//! Defines the budget store trait.

use crate::{
    Error,
    budget::{Budget, BudgetForm, BudgetId},
    category::Category,
    period::Period,
};

/// Handles the creation, retrieval and modification of budgets.
///
/// Implementations must keep at most one budget per category and month.
pub trait BudgetStore {
    /// Validate `form` and create a new budget.
    ///
    /// # Errors
    /// Returns [Error::MissingBudgetFields] or [Error::Validation] if the form
    /// is invalid, or [Error::DuplicateBudget] if the category already has a
    /// budget for the month.
    fn create(&self, form: &BudgetForm) -> Result<Budget, Error>;

    /// Retrieve a budget from the store.
    ///
    /// # Errors
    /// Returns [Error::BudgetNotFound] if `id` does not refer to a budget.
    fn get(&self, id: BudgetId) -> Result<Budget, Error>;

    /// Retrieve budgets matching `query`, ordered by category.
    fn list(&self, query: &BudgetQuery) -> Result<Vec<Budget>, Error>;

    /// Replace the fields of an existing budget.
    ///
    /// Notes left out of `form` keep their stored value.
    ///
    /// # Errors
    /// Returns the same errors as [BudgetStore::create], or
    /// [Error::BudgetNotFound] if `id` does not refer to a budget.
    fn update(&self, id: BudgetId, form: &BudgetForm) -> Result<Budget, Error>;

    /// Delete a budget.
    ///
    /// # Errors
    /// Returns [Error::BudgetNotFound] if `id` does not refer to a budget.
    fn delete(&self, id: BudgetId) -> Result<(), Error>;
}

/// Defines how budgets should be fetched from [BudgetStore::list].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BudgetQuery {
    /// Only include budgets for this month.
    pub month: Option<Period>,
    /// Only include budgets for this category.
    pub category: Option<Category>,
}
