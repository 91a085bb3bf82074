use crate::domain::entities::record::{
    ACCOUNT_COLUMN, ACTUALS_SCENARIO, BUSINESS_UNIT_COLUMN, SCENARIO_COLUMN, YEAR_COLUMN,
};

pub const REPORT_YEAR: &str = "2023";
pub const SALES_ACCOUNT: &str = "Sales";
pub const SOFTWARE_UNIT: &str = "Software";
pub const SALES_VALUE_COLUMN: &str = "sales";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals { column: &'static str, value: String },
    NotEquals { column: &'static str, value: String },
}

impl Predicate {
    pub fn eq(column: &'static str, value: &str) -> Self {
        Predicate::Equals {
            column,
            value: value.to_string(),
        }
    }

    pub fn ne(column: &'static str, value: &str) -> Self {
        Predicate::NotEquals {
            column,
            value: value.to_string(),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Predicate::Equals { column, .. } | Predicate::NotEquals { column, .. } => column,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Predicate::Equals { value, .. } | Predicate::NotEquals { value, .. } => value,
        }
    }
}

/// Applied to every month value before the reshape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTransform {
    Identity,
    Absolute,
}

/// Filter, reshape the month columns to long form, optionally group and sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRecipe {
    pub name: &'static str,
    pub filters: Vec<Predicate>,
    pub keys: Vec<&'static str>,
    pub period_name: &'static str,
    pub transform: ValueTransform,
    pub group_by: Option<Vec<&'static str>>,
}

impl AggregationRecipe {
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = match &self.group_by {
            Some(group_by) => group_by.iter().map(|c| c.to_string()).collect(),
            None => {
                let mut columns: Vec<String> = self.keys.iter().map(|c| c.to_string()).collect();
                columns.push(self.period_name.to_string());
                columns
            }
        };
        columns.push(SALES_VALUE_COLUMN.to_string());
        columns
    }

    /// Every source column the recipe reads besides the months.
    pub fn referenced_columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        for column in self
            .keys
            .iter()
            .copied()
            .chain(self.filters.iter().map(Predicate::column))
        {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }
}

pub fn business_unit_by_scenario() -> AggregationRecipe {
    AggregationRecipe {
        name: "business_unit_by_scenario",
        filters: vec![
            Predicate::eq(YEAR_COLUMN, REPORT_YEAR),
            Predicate::eq(ACCOUNT_COLUMN, SALES_ACCOUNT),
        ],
        keys: vec![SCENARIO_COLUMN, BUSINESS_UNIT_COLUMN],
        period_name: "month",
        transform: ValueTransform::Identity,
        group_by: Some(vec![SCENARIO_COLUMN, BUSINESS_UNIT_COLUMN]),
    }
}

pub fn monthly_budget_vs_forecast() -> AggregationRecipe {
    AggregationRecipe {
        name: "monthly_budget_vs_forecast",
        filters: vec![
            Predicate::eq(YEAR_COLUMN, REPORT_YEAR),
            Predicate::eq(ACCOUNT_COLUMN, SALES_ACCOUNT),
            Predicate::eq(BUSINESS_UNIT_COLUMN, SOFTWARE_UNIT),
        ],
        keys: vec![SCENARIO_COLUMN],
        period_name: "month",
        transform: ValueTransform::Identity,
        group_by: None,
    }
}

// Cost accounts are booked with the opposite sign to Sales, hence Absolute.
pub fn yearly_sales_per_account() -> AggregationRecipe {
    AggregationRecipe {
        name: "yearly_sales_per_account",
        filters: vec![
            Predicate::eq(SCENARIO_COLUMN, ACTUALS_SCENARIO),
            Predicate::ne(ACCOUNT_COLUMN, SALES_ACCOUNT),
        ],
        keys: vec![ACCOUNT_COLUMN, YEAR_COLUMN],
        period_name: "year",
        transform: ValueTransform::Absolute,
        group_by: Some(vec![ACCOUNT_COLUMN, YEAR_COLUMN]),
    }
}
