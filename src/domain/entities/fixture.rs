//! Typed sales rows for building upload tables in tests.

use rusqlite::types::Value;

use crate::domain::entities::record::{
    Month, ACCOUNT_COLUMN, ACTUALS_SCENARIO, BUSINESS_UNIT_COLUMN, SCENARIO_COLUMN, YEAR_COLUMN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Actuals,
    Budget,
    Forecast,
}

impl Scenario {
    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Actuals => ACTUALS_SCENARIO,
            Scenario::Budget => "Budget",
            Scenario::Forecast => "Forecast",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed row in the shape the aggregations expect.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub scenario: Scenario,
    pub business_unit: String,
    pub account: String,
    pub year: i64,
    pub months: [Option<f64>; 12],
}

impl SalesRecord {
    pub fn new(scenario: Scenario, business_unit: &str, account: &str, year: i64) -> Self {
        Self {
            scenario,
            business_unit: business_unit.to_string(),
            account: account.to_string(),
            year,
            months: [Some(0.0); 12],
        }
    }

    pub fn with_month(mut self, month: Month, value: f64) -> Self {
        self.months[month.ordinal()] = Some(value);
        self
    }

    pub fn headers() -> Vec<String> {
        let mut headers = vec![
            SCENARIO_COLUMN.to_string(),
            BUSINESS_UNIT_COLUMN.to_string(),
            ACCOUNT_COLUMN.to_string(),
            YEAR_COLUMN.to_string(),
        ];
        headers.extend(Month::ALL.iter().map(|month| month.label().to_string()));
        headers
    }

    pub fn to_row(&self) -> Vec<Value> {
        let mut row = vec![
            Value::Text(self.scenario.as_str().to_string()),
            Value::Text(self.business_unit.clone()),
            Value::Text(self.account.clone()),
            Value::Integer(self.year),
        ];
        row.extend(
            self.months
                .iter()
                .map(|value| value.map(Value::Real).unwrap_or(Value::Null)),
        );
        row
    }
}
