use chrono::NaiveDate;

use super::transaction::{NewTransaction, TransactionKind};
use crate::errors::DashboardError;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 6;
const CATEGORY_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 200;

/// Minimal syntactic email check: one `@`, non-empty local part,
/// a dot inside the domain, no whitespace.
fn validate_email(email: &str) -> Result<(), DashboardError> {
    let invalid = || DashboardError::ValidationError(format!("Invalid email address '{email}'"));
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        validate_email(self.email.trim())?;
        if self.password.is_empty() {
            return Err(DashboardError::ValidationError("Password is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), DashboardError> {
        let username_len = self.username.trim().chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&username_len) {
            return Err(DashboardError::ValidationError(format!(
                "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
            )));
        }
        validate_email(self.email.trim())?;
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(DashboardError::ValidationError(format!(
                "Password must be at least {PASSWORD_MIN} characters"
            )));
        }
        if self.password != self.confirm_password {
            return Err(DashboardError::ValidationError("Passwords do not match".into()));
        }
        Ok(())
    }
}

/// The "add transaction" form. Holds raw text exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl TransactionForm {
    /// Empty form with the date pre-filled.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            kind: TransactionKind::Expense.to_string(),
            amount: String::new(),
            category: String::new(),
            description: String::new(),
        }
    }

    /// Clear every field and put the date back to `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Check the fields and build the creation body.
    pub fn validate(&self) -> Result<NewTransaction, DashboardError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            DashboardError::ValidationError(format!(
                "Invalid date '{}': expected YYYY-MM-DD",
                self.date
            ))
        })?;

        let kind = TransactionKind::parse(&self.kind)?;

        let amount: f64 = self.amount.trim().parse().map_err(|_| {
            DashboardError::ValidationError(format!("Invalid amount '{}'", self.amount))
        })?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DashboardError::ValidationError(format!(
                "Amount must be a positive number, got {amount}"
            )));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(DashboardError::ValidationError("Category is required".into()));
        }
        if category.chars().count() > CATEGORY_MAX {
            return Err(DashboardError::ValidationError(format!(
                "Category must be at most {CATEGORY_MAX} characters"
            )));
        }

        let description = self.description.trim();
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(DashboardError::ValidationError(format!(
                "Description must be at most {DESCRIPTION_MAX} characters"
            )));
        }

        Ok(NewTransaction {
            date,
            kind,
            amount,
            category: category.to_string(),
            description: description.to_string(),
        })
    }
}
