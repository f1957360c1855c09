use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{merge, Displayable, Identifiable, NamedEntity, Patch};

/// A balance paid down in fixed monthly installments.
///
/// `paid_amount` is expected to stay within `0..=total_amount`; rollover never
/// pushes it past the total, but direct updates are stored as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    pub id: Uuid,
    pub name: String,
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub installment_value: f64,
    /// `DD/MM/YYYY`.
    pub due_date: String,
    pub created_at: DateTime<Utc>,
}

impl Debt {
    pub fn create(input: NewDebt, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            total_amount: input.total_amount,
            paid_amount: input.paid_amount,
            installment_value: input.installment_value,
            due_date: input.due_date,
            created_at,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.total_amount - self.paid_amount
    }

    pub fn is_settled(&self) -> bool {
        self.paid_amount >= self.total_amount
    }

    /// Applies one installment, never paying past the total.
    pub fn apply_installment(&mut self) {
        self.paid_amount = (self.paid_amount + self.installment_value).min(self.total_amount);
    }
}

impl Identifiable for Debt {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Debt {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Debt {
    fn display_label(&self) -> String {
        format!(
            "{} ({:.2} of {:.2} paid)",
            self.name, self.paid_amount, self.total_amount
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub installment_value: f64,
    pub due_date: String,
}

impl NewDebt {
    pub fn new(
        name: impl Into<String>,
        total_amount: f64,
        installment_value: f64,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            total_amount,
            paid_amount: 0.0,
            installment_value,
            due_date: due_date.into(),
        }
    }

    pub fn with_paid_amount(mut self, paid_amount: f64) -> Self {
        self.paid_amount = paid_amount;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DebtUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Patch<Debt> for DebtUpdate {
    fn apply_to(&self, target: &mut Debt) {
        merge(&mut target.name, &self.name);
        merge(&mut target.total_amount, &self.total_amount);
        merge(&mut target.paid_amount, &self.paid_amount);
        merge(&mut target.installment_value, &self.installment_value);
        merge(&mut target.due_date, &self.due_date);
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.total_amount.is_none()
            && self.paid_amount.is_none()
            && self.installment_value.is_none()
            && self.due_date.is_none()
    }
}
