use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{merge, Displayable, Identifiable, NamedEntity, Patch};
use crate::domain::date::advance_one_month;
use crate::errors::LedgerError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Income {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    /// `DD/MM/YYYY`.
    pub date: String,
    pub created_at: DateTime<Utc>,
}

impl Income {
    pub fn create(input: NewIncome, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            value: input.value,
            date: input.date,
            created_at,
        }
    }

    /// Copy of this income dated one month later.
    pub fn next_month(&self, created_at: DateTime<Utc>) -> Result<Self, LedgerError> {
        let date = advance_one_month(&self.date)?;
        Ok(Self {
            id: Uuid::new_v4(),
            date,
            created_at,
            ..self.clone()
        })
    }
}

impl Identifiable for Income {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Income {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Income {
    fn display_label(&self) -> String {
        format!("{} on {}", self.name, self.date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewIncome {
    pub name: String,
    pub value: f64,
    pub date: String,
}

impl NewIncome {
    pub fn new(name: impl Into<String>, value: f64, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            date: date.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IncomeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Patch<Income> for IncomeUpdate {
    fn apply_to(&self, target: &mut Income) {
        merge(&mut target.name, &self.name);
        merge(&mut target.value, &self.value);
        merge(&mut target.date, &self.date);
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.date.is_none()
    }
}
