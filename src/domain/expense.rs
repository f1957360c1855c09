use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{merge, Displayable, Identifiable, NamedEntity, Patch};
use crate::domain::date::advance_one_month;
use crate::errors::LedgerError;

/// Whether an expense has been settled for its month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    #[default]
    Pending,
    Paid,
}

impl ExpenseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ExpenseStatus::Pending),
            "paid" => Some(ExpenseStatus::Paid),
            _ => None,
        }
    }
}

/// A monthly bill or one-off spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub value: f64,
    /// `DD/MM/YYYY`.
    pub due_date: String,
    #[serde(default)]
    pub status: ExpenseStatus,
    /// Fixed expenses are regenerated on every month rollover.
    #[serde(default)]
    pub is_fixed: bool,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Builds a stored expense from caller input with a fresh id.
    pub fn create(input: NewExpense, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            value: input.value,
            due_date: input.due_date,
            status: input.status,
            is_fixed: input.is_fixed,
            created_at,
        }
    }

    /// Copy of this expense due one month later, reset to pending.
    pub fn next_month(&self, created_at: DateTime<Utc>) -> Result<Self, LedgerError> {
        let due_date = advance_one_month(&self.due_date)?;
        Ok(Self {
            id: Uuid::new_v4(),
            due_date,
            status: ExpenseStatus::Pending,
            created_at,
            ..self.clone()
        })
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({}) due {}", self.name, self.category, self.due_date)
    }
}

/// Caller-supplied fields for a new expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewExpense {
    pub name: String,
    pub category: String,
    pub value: f64,
    pub due_date: String,
    #[serde(default)]
    pub status: ExpenseStatus,
    #[serde(default)]
    pub is_fixed: bool,
}

impl NewExpense {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        value: f64,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            value,
            due_date: due_date.into(),
            status: ExpenseStatus::Pending,
            is_fixed: false,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn paid(mut self) -> Self {
        self.status = ExpenseStatus::Paid;
        self
    }
}

/// Partial update for an expense; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ExpenseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fixed: Option<bool>,
}

impl Patch<Expense> for ExpenseUpdate {
    fn apply_to(&self, target: &mut Expense) {
        merge(&mut target.name, &self.name);
        merge(&mut target.category, &self.category);
        merge(&mut target.value, &self.value);
        merge(&mut target.due_date, &self.due_date);
        merge(&mut target.status, &self.status);
        merge(&mut target.is_fixed, &self.is_fixed);
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.value.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.is_fixed.is_none()
    }
}
