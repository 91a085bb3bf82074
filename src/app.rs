use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::warn;

use crate::config::{default_db_path, APP_TITLE};
use crate::domain::entities::recipe::monthly_budget_vs_forecast;
use crate::domain::entities::record::{
    ACCOUNT_COLUMN, BUSINESS_UNIT_COLUMN, SCENARIO_COLUMN, YEAR_COLUMN,
};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::chart::{CategoryOrder, ChartData};
use crate::ui::components::charts::{BarChart, BarMode, LineChart};
use crate::ui::components::preview::DataPreview;
use crate::ui::components::widgets::{GaugeCard, MetricCard};
use crate::ui::format::PreviewTable;
use crate::ui::kpi::kpi_columns;
use crate::ui::state::app_state::AppState;
use crate::ui::state::page::PagePhase;
use crate::usecase::ports::repo::SalesRepository;
use crate::usecase::services::dashboard_service::{DashboardData, DashboardService};
use crate::usecase::services::upload_service::{UploadOutcome, UploadService, SUPPORTED_EXTENSIONS};

/// Chart-ready views of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub preview: PreviewTable,
    pub sales_by_unit: ChartData,
    pub monthly_budget_forecast: ChartData,
    pub yearly_per_account: ChartData,
}

pub fn dashboard_charts(data: &DashboardData) -> DashboardCharts {
    DashboardCharts {
        preview: PreviewTable::from_tabular(&data.preview),
        sales_by_unit: ChartData::from_result(
            &data.sales_by_unit,
            BUSINESS_UNIT_COLUMN,
            SCENARIO_COLUMN,
            CategoryOrder::Appearance,
        ),
        monthly_budget_forecast: ChartData::from_result(
            &data.monthly_budget_forecast,
            monthly_budget_vs_forecast().period_name,
            SCENARIO_COLUMN,
            CategoryOrder::Months,
        ),
        yearly_per_account: ChartData::from_result(
            &data.yearly_per_account,
            YEAR_COLUMN,
            ACCOUNT_COLUMN,
            CategoryOrder::Numeric,
        ),
    }
}

pub fn root_container_style() -> &'static str {
    "display: flex; height: 100vh; margin: 0; font-family: sans-serif; color: #222; background: #fafafa;"
}

#[component]
fn Notice(kind: &'static str, message: String) -> Element {
    let (background, border, icon) = match kind {
        "error" => ("#fdecea", "#f5c2c0", "⚠️"),
        _ => ("#e8f1fb", "#b9d4f1", "ℹ️"),
    };
    rsx! {
        div {
            style: "background: {background}; border: 1px solid {border}; border-radius: 8px; padding: 12px 16px; white-space: pre-wrap;",
            "{icon} {message}"
        }
    }
}

#[component]
fn Dashboard(charts: DashboardCharts, preview_open: bool, on_toggle_preview: EventHandler<bool>) -> Element {
    let kpis = kpi_columns();

    rsx! {
        DataPreview { table: charts.preview.clone(), open: preview_open, on_toggle: on_toggle_preview }

        div {
            style: "display: grid; grid-template-columns: 2fr 1fr; gap: 16px; margin-bottom: 16px;",
            div {
                style: "display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 12px; align-content: start;",
                for column in kpis.into_iter() {
                    div { style: "display: flex; flex-direction: column; gap: 12px; min-width: 0;",
                        MetricCard { spec: column.metric.clone() }
                        GaugeCard { spec: column.gauge.clone() }
                    }
                }
            }
            BarChart {
                title: "Sales for Year 2023".to_string(),
                chart: charts.sales_by_unit.clone(),
                mode: BarMode::Group,
                show_labels: true,
            }
        }

        div {
            style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px;",
            LineChart {
                title: "Monthly Budget vs Forecast 2023".to_string(),
                chart: charts.monthly_budget_forecast.clone(),
            }
            BarChart {
                title: "Actual Yearly Sales Per Account".to_string(),
                chart: charts.yearly_per_account.clone(),
                mode: BarMode::Stack,
                show_labels: false,
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let db_path = match default_db_path() {
        Ok(path) => path,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to resolve the session database path: {err}" }
                }
            };
        }
    };

    let AppState {
        mut phase,
        mut upload,
        mut upload_error,
        mut busy,
        mut status,
        mut preview_open,
    } = AppState::new();

    let repo = Arc::new(SqliteRepo { db_path });
    let upload_service = Arc::new(UploadService::new(repo.clone()));
    let dashboard_service = DashboardService::new(repo.clone());
    let repo_for_init = repo.clone();
    let upload_service_for_pick = upload_service.clone();
    let upload_service_for_clear = upload_service.clone();

    use_effect(move || {
        *busy.write() = true;
        if let Err(err) = run_blocking("init", || repo_for_init.init()) {
            *status.write() = format!("Failed to initialize session database: {err}");
        }
        *busy.write() = false;
    });

    use_effect(move || {
        if phase() == PagePhase::DataLoaded {
            phase.set(PagePhase::DataLoaded.on_render());
        }
    });

    // Recomputed on every render; only the parsed table is cached.
    let render_result = if phase().has_data() && upload_error().is_none() {
        Some(run_blocking("render_pass", || dashboard_service.render_pass()))
    } else {
        None
    };

    let upload_label = upload().map(|meta| {
        format!("{} ({} rows, loaded {})", meta.file_name, meta.row_count, meta.loaded_at)
    });

    rsx! {
        div { style: "{root_container_style()}",
            aside {
                style: "width: 260px; flex-shrink: 0; padding: 16px; background: #f0f2f6; display: flex; flex-direction: column; gap: 12px;",
                h2 { style: "margin: 0;", "Configuration" }
                span { style: "font-size: 14px;", "Choose a file" }
                button {
                    disabled: busy(),
                    style: "border: 1px solid #bbb; background: #fff; padding: 8px 10px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        if busy() {
                            return;
                        }

                        let Some(file_path) = FileDialog::new()
                            .add_filter("Spreadsheet", &SUPPORTED_EXTENSIONS)
                            .pick_file() else {
                            *status.write() = "Upload cancelled".to_string();
                            return;
                        };

                        *busy.write() = true;
                        *status.write() = format!("Loading {}", file_path.display());

                        match run_blocking("upload", || upload_service_for_pick.upload(&file_path)) {
                            Ok(outcome) => {
                                *status.write() = match &outcome {
                                    UploadOutcome::Loaded(meta) => format!(
                                        "Loaded {} at {}",
                                        meta.file_name,
                                        chrono::Local::now().format("%H:%M:%S")
                                    ),
                                    UploadOutcome::Reused(meta) => {
                                        format!("{} is unchanged, using cached table", meta.file_name)
                                    }
                                };
                                upload.set(Some(outcome.meta().clone()));
                                upload_error.set(None);
                                let next = phase().on_upload();
                                phase.set(next);
                            }
                            Err(err) => {
                                warn!(path = %file_path.display(), error = %format!("{err:#}"), "upload failed");
                                upload_error.set(Some(format!("{err:#}")));
                                *status.write() = "Upload failed".to_string();
                            }
                        }

                        *busy.write() = false;
                    },
                    "Browse files"
                }
                if let Some(label) = upload_label {
                    div { style: "font-size: 13px; word-break: break-all;", "{label}" }
                    button {
                        disabled: busy(),
                        style: "border: 1px solid #bbb; background: #fff; padding: 4px 8px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            *busy.write() = true;
                            match run_blocking("clear", || upload_service_for_clear.clear()) {
                                Ok(()) => {
                                    upload.set(None);
                                    upload_error.set(None);
                                    let next = phase().on_clear();
                                    phase.set(next);
                                    *status.write() = "File removed".to_string();
                                }
                                Err(err) => {
                                    *status.write() = format!("Failed to remove file: {err:#}");
                                }
                            }
                            *busy.write() = false;
                        },
                        "Remove file"
                    }
                }
                span { style: "font-size: 12px; color: #555;", "{status}" }
            }

            main {
                style: "flex: 1; min-width: 0; overflow: auto; padding: 16px 24px;",
                h1 { style: "margin-top: 0;", "📊 {APP_TITLE}" }
                if let Some(message) = upload_error() {
                    Notice { kind: "error", message }
                } else if !phase().has_data() {
                    Notice { kind: "info", message: "Upload a file through config".to_string() }
                } else {
                    {match render_result {
                        Some(Ok(data)) => rsx! {
                            Dashboard {
                                charts: dashboard_charts(&data),
                                preview_open: preview_open(),
                                on_toggle_preview: move |open| preview_open.set(open),
                            }
                        },
                        Some(Err(err)) => rsx! {
                            Notice { kind: "error", message: format!("{err:#}") }
                        },
                        None => rsx! {},
                    }}
                }
            }
        }
    }
}
