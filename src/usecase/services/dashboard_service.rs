use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info_span, warn};

use crate::domain::entities::recipe::{
    business_unit_by_scenario, monthly_budget_vs_forecast, yearly_sales_per_account,
    AggregationRecipe, REPORT_YEAR,
};
use crate::domain::entities::result::AggregatedResult;
use crate::usecase::ports::repo::{SalesRepository, TabularData};

/// Everything one render pass shows. Rebuilt on every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub preview: TabularData,
    pub sales_by_unit: AggregatedResult,
    pub monthly_budget_forecast: AggregatedResult,
    pub yearly_per_account: AggregatedResult,
}

pub struct DashboardService {
    repo: Arc<dyn SalesRepository>,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn SalesRepository>) -> Self {
        Self { repo }
    }

    pub fn aggregate(&self, recipe: &AggregationRecipe) -> Result<AggregatedResult> {
        self.repo
            .aggregate(recipe)
            .with_context(|| format!("aggregation {} failed", recipe.name))
    }

    pub fn preview(&self) -> Result<TabularData> {
        Ok(self.repo.load_table()?)
    }

    pub fn render_pass(&self) -> Result<DashboardData> {
        let _span = info_span!("render_pass").entered();

        let data = DashboardData {
            preview: self.preview()?,
            sales_by_unit: self.aggregate(&business_unit_by_scenario())?,
            monthly_budget_forecast: self.aggregate(&monthly_budget_vs_forecast())?,
            yearly_per_account: self.aggregate(&yearly_sales_per_account())?,
        };
        if data.sales_by_unit.is_empty() {
            warn!("upload has no {REPORT_YEAR} sales rows");
        }
        debug!(
            preview_rows = data.preview.rows.len(),
            units = data.sales_by_unit.rows.len(),
            unit_total = data.sales_by_unit.total(),
            monthly_points = data.monthly_budget_forecast.rows.len(),
            accounts = data.yearly_per_account.rows.len(),
            "render pass computed"
        );
        Ok(data)
    }
}
