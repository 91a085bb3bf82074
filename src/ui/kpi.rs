//! Fixed KPI figures shown above the charts. They are not derived from the
//! uploaded sheet.

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSpec {
    pub label: &'static str,
    pub value: f64,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub show_graph: bool,
    pub color_graph: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSpec {
    pub value: f64,
    pub color: &'static str,
    pub suffix: &'static str,
    pub title: &'static str,
    pub max_bound: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiColumn {
    pub metric: MetricSpec,
    pub gauge: GaugeSpec,
}

pub fn kpi_columns() -> Vec<KpiColumn> {
    vec![
        KpiColumn {
            metric: MetricSpec {
                label: "Total Accounts Receivable",
                value: 6_621_280.0,
                prefix: "$",
                suffix: "",
                show_graph: true,
                color_graph: "rgba(0, 104, 201, 0.2)",
            },
            gauge: GaugeSpec {
                value: 1.86,
                color: "#0068C9",
                suffix: "%",
                title: "Current Ratio",
                max_bound: 3.0,
            },
        },
        KpiColumn {
            metric: MetricSpec {
                label: "Total Accounts Payable",
                value: 1_630_270.0,
                prefix: "$",
                suffix: "",
                show_graph: true,
                color_graph: "rgba(255, 43, 43, 0.2)",
            },
            gauge: GaugeSpec {
                value: 10.0,
                color: "#FF8700",
                suffix: " days",
                title: "In Stock",
                max_bound: 31.0,
            },
        },
        KpiColumn {
            metric: MetricSpec {
                label: "Equity Ratio",
                value: 75.38,
                prefix: "",
                suffix: " %",
                show_graph: false,
                color_graph: "",
            },
            gauge: GaugeSpec {
                value: 7.0,
                color: "#FF2B2B",
                suffix: " days",
                title: "Out Stock",
                max_bound: 31.0,
            },
        },
        KpiColumn {
            metric: MetricSpec {
                label: "Debt Equity",
                value: 1.10,
                prefix: "",
                suffix: " %",
                show_graph: false,
                color_graph: "",
            },
            gauge: GaugeSpec {
                value: 1.10,
                color: "#29B09D",
                suffix: " %",
                title: "Debt Equity",
                max_bound: 3.0,
            },
        },
    ]
}

pub fn format_metric_value(spec: &MetricSpec) -> String {
    format!(
        "{}{}{}",
        spec.prefix,
        crate::ui::format::format_amount(spec.value),
        spec.suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_grid_has_four_columns_with_one_gauge_each() {
        let columns = kpi_columns();
        assert_eq!(columns.len(), 4);
        assert!(columns.iter().all(|c| c.gauge.max_bound > 0.0));
        assert_eq!(
            columns.iter().filter(|c| c.metric.show_graph).count(),
            2
        );
    }

    #[test]
    fn metric_value_carries_prefix_and_suffix() {
        let columns = kpi_columns();
        assert_eq!(format_metric_value(&columns[0].metric), "$6,621,280");
        assert_eq!(format_metric_value(&columns[2].metric), "75.38 %");
    }
}
