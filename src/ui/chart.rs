use rand::Rng;

use crate::domain::entities::record::Month;
use crate::domain::entities::result::AggregatedResult;

pub const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOrder {
    Appearance,
    Months,
    Numeric,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    /// (category index, value) in result order; a category may repeat.
    pub points: Vec<(usize, f64)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    /// Splits a result into one series per `color_column` value along `x_column`.
    pub fn from_result(
        result: &AggregatedResult,
        x_column: &str,
        color_column: &str,
        order: CategoryOrder,
    ) -> ChartData {
        let (Some(x_idx), Some(color_idx)) =
            (result.key_index(x_column), result.key_index(color_column))
        else {
            return ChartData::default();
        };

        let mut categories: Vec<String> = Vec::new();
        for row in &result.rows {
            let category = &row.keys[x_idx];
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        match order {
            CategoryOrder::Appearance => {}
            CategoryOrder::Months => categories.sort_by_key(|c| {
                Month::from_label(c).map(Month::ordinal).unwrap_or(usize::MAX)
            }),
            CategoryOrder::Numeric => categories.sort_by(|a, b| {
                let a_num = a.parse::<f64>().unwrap_or(f64::INFINITY);
                let b_num = b.parse::<f64>().unwrap_or(f64::INFINITY);
                a_num.total_cmp(&b_num).then_with(|| a.cmp(b))
            }),
        }

        let mut series: Vec<Series> = Vec::new();
        for row in &result.rows {
            let name = &row.keys[color_idx];
            let Some(category) = categories.iter().position(|c| c == &row.keys[x_idx]) else {
                continue;
            };
            let idx = match series.iter().position(|s| &s.name == name) {
                Some(idx) => idx,
                None => {
                    series.push(Series {
                        name: name.clone(),
                        color: PALETTE[series.len() % PALETTE.len()],
                        points: Vec::new(),
                    });
                    series.len() - 1
                }
            };
            series[idx].points.push((category, row.sales));
        }

        ChartData { categories, series }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, v)| *v))
    }

    pub fn value_extent(&self) -> (f64, f64) {
        self.values()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    /// Extent of the bars once values in the same category are stacked.
    pub fn stacked_extent(&self) -> (f64, f64) {
        let mut positive = vec![0.0; self.categories.len()];
        let mut negative = vec![0.0; self.categories.len()];
        for (category, value) in self.series.iter().flat_map(|s| s.points.iter()) {
            if *value >= 0.0 {
                positive[*category] += value;
            } else {
                negative[*category] += value;
            }
        }
        let hi = positive.iter().copied().fold(0.0_f64, f64::max);
        let lo = negative.iter().copied().fold(0.0_f64, f64::min);
        (lo, hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 56.0,
            right: 16.0,
            top: 24.0,
            bottom: 40.0,
        }
    }

    pub fn inner_width(&self) -> f64 {
        (self.width - self.left - self.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.top - self.bottom).max(0.0)
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.bottom
    }

    pub fn band_width(&self, categories: usize) -> f64 {
        if categories == 0 {
            0.0
        } else {
            self.inner_width() / categories as f64
        }
    }

    pub fn category_center(&self, categories: usize, idx: usize) -> f64 {
        self.left + self.band_width(categories) * (idx as f64 + 0.5)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

impl ValueAxis {
    /// Always spans zero; an all-zero or empty extent becomes 0..1.
    pub fn nice(min: f64, max: f64, target_ticks: usize) -> ValueAxis {
        let lo = min.min(0.0);
        let mut hi = max.max(0.0);
        if (hi - lo).abs() < f64::EPSILON {
            hi = lo + 1.0;
        }

        let step = nice_step((hi - lo) / target_ticks.max(1) as f64);
        let first = (lo / step).floor() as i64;
        let last = (hi / step).ceil() as i64;
        let ticks = (first..=last).map(|i| i as f64 * step).collect();

        ValueAxis {
            min: first as f64 * step,
            max: last as f64 * step,
            ticks,
        }
    }

    pub fn project(&self, value: f64, area: &PlotArea) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return area.baseline();
        }
        area.baseline() - (value - self.min) / span * area.inner_height()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub value: f64,
}

pub fn grouped_bars(chart: &ChartData, area: &PlotArea, axis: &ValueAxis) -> Vec<BarRect> {
    let band = area.band_width(chart.categories.len());
    let series_count = chart.series.len().max(1) as f64;
    let bar_width = band * 0.8 / series_count;
    let zero = axis.project(0.0, area);

    let mut bars = Vec::new();
    for (series_idx, series) in chart.series.iter().enumerate() {
        for (category, value) in &series.points {
            let x = area.left + band * (*category as f64 + 0.1) + bar_width * series_idx as f64;
            let end = axis.project(*value, area);
            bars.push(BarRect {
                x,
                y: end.min(zero),
                width: bar_width,
                height: (end - zero).abs(),
                color: series.color,
                value: *value,
            });
        }
    }
    bars
}

pub fn stacked_bars(chart: &ChartData, area: &PlotArea, axis: &ValueAxis) -> Vec<BarRect> {
    let band = area.band_width(chart.categories.len());
    let mut positive = vec![0.0; chart.categories.len()];
    let mut negative = vec![0.0; chart.categories.len()];

    let mut bars = Vec::new();
    for series in &chart.series {
        for (category, value) in &series.points {
            let stack = if *value >= 0.0 {
                &mut positive[*category]
            } else {
                &mut negative[*category]
            };
            let start = axis.project(*stack, area);
            *stack += value;
            let end = axis.project(*stack, area);
            bars.push(BarRect {
                x: area.left + band * (*category as f64 + 0.1),
                y: start.min(end),
                width: band * 0.8,
                height: (start - end).abs(),
                color: series.color,
                value: *value,
            });
        }
    }
    bars
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub name: String,
    pub color: &'static str,
    pub points: Vec<(f64, f64, f64)>,
}

impl LineTrace {
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|(x, y, _)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn line_traces(chart: &ChartData, area: &PlotArea, axis: &ValueAxis) -> Vec<LineTrace> {
    chart
        .series
        .iter()
        .map(|series| LineTrace {
            name: series.name.clone(),
            color: series.color,
            points: series
                .points
                .iter()
                .map(|(category, value)| {
                    (
                        area.category_center(chart.categories.len(), *category),
                        axis.project(*value, area),
                        *value,
                    )
                })
                .collect(),
        })
        .collect()
}

/// SVG path for a dial arc running left to right over the top half.
pub fn gauge_arc(cx: f64, cy: f64, radius: f64, fraction: f64) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let angle = std::f64::consts::PI * (1.0 - fraction);
    let end_x = cx + radius * angle.cos();
    let end_y = cy - radius * angle.sin();
    format!(
        "M {:.2} {:.2} A {radius:.2} {radius:.2} 0 0 1 {end_x:.2} {end_y:.2}",
        cx - radius,
        cy
    )
}

pub fn gauge_fraction(value: f64, max_bound: f64) -> f64 {
    if max_bound <= 0.0 || !value.is_finite() {
        0.0
    } else {
        (value / max_bound).clamp(0.0, 1.0)
    }
}

/// 30 distinct values from 0..=100, in random order.
pub fn sample_trend<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    rand::seq::index::sample(rng, 101, 30)
        .into_iter()
        .map(|v| v as f64)
        .collect()
}

/// Line points and filled-to-zero area path for a sparkline.
pub fn sparkline_paths(samples: &[f64], width: f64, height: f64) -> (String, String) {
    if samples.is_empty() {
        return (String::new(), String::new());
    }
    let max = samples.iter().copied().fold(0.0_f64, f64::max).max(1.0);
    let step = if samples.len() > 1 {
        width / (samples.len() - 1) as f64
    } else {
        0.0
    };
    let points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(idx, v)| (idx as f64 * step, height - v.max(0.0) / max * height))
        .collect();

    let line = points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let last_x = points.last().map(|(x, _)| *x).unwrap_or(0.0);
    let area = format!("M 0,{height:.1} L {} L {last_x:.1},{height:.1} Z", line.replace(' ', " L "));
    (line, area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::result::ResultRow;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn result(columns: &[&str], rows: &[(&[&str], f64)]) -> AggregatedResult {
        AggregatedResult {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|(keys, sales)| ResultRow {
                    keys: keys.iter().map(|k| k.to_string()).collect(),
                    sales: *sales,
                })
                .collect(),
        }
    }

    #[test]
    fn from_result_splits_series_by_color_column() {
        let data = result(
            &["Scenario", "business_unit", "sales"],
            &[
                (&["Actuals", "Software"], 50.0),
                (&["Budget", "Software"], 160.0),
                (&["Actuals", "Hardware"], 10.0),
            ],
        );
        let chart = ChartData::from_result(&data, "business_unit", "Scenario", CategoryOrder::Appearance);

        assert_eq!(chart.categories, ["Software", "Hardware"]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Actuals");
        assert_eq!(chart.series[0].points, vec![(0, 50.0), (1, 10.0)]);
        assert_eq!(chart.series[1].color, PALETTE[1]);
    }

    #[test]
    fn month_order_overrides_appearance() {
        let data = result(
            &["Scenario", "month", "sales"],
            &[(&["Budget", "Mar"], 3.0), (&["Budget", "Jan"], 1.0), (&["Budget", "Feb"], 2.0)],
        );
        let chart = ChartData::from_result(&data, "month", "Scenario", CategoryOrder::Months);

        assert_eq!(chart.categories, ["Jan", "Feb", "Mar"]);
        assert_eq!(chart.series[0].points, vec![(2, 3.0), (0, 1.0), (1, 2.0)]);
    }

    #[test]
    fn numeric_order_sorts_years() {
        let data = result(
            &["Account", "Year", "sales"],
            &[(&["COGS", "2024"], 1.0), (&["COGS", "2022"], 1.0), (&["COGS", "2023"], 1.0)],
        );
        let chart = ChartData::from_result(&data, "Year", "Account", CategoryOrder::Numeric);
        assert_eq!(chart.categories, ["2022", "2023", "2024"]);
    }

    #[test]
    fn empty_result_gives_empty_chart() {
        let data = result(&["Scenario", "business_unit", "sales"], &[]);
        let chart = ChartData::from_result(&data, "business_unit", "Scenario", CategoryOrder::Appearance);
        let area = PlotArea::new(600.0, 400.0);
        let axis = ValueAxis::nice(0.0, 0.0, 5);

        assert!(chart.is_empty());
        assert!(grouped_bars(&chart, &area, &axis).is_empty());
        assert_eq!(axis.min, 0.0);
        assert!(axis.max > 0.0);
    }

    #[test]
    fn unknown_column_gives_empty_chart() {
        let data = result(&["Scenario", "business_unit", "sales"], &[(&["Actuals", "Software"], 1.0)]);
        let chart = ChartData::from_result(&data, "Year", "Scenario", CategoryOrder::Appearance);
        assert!(chart.is_empty());
    }

    #[test]
    fn nice_axis_spans_zero_and_rounds_out() {
        let axis = ValueAxis::nice(-50.0, 160.0, 5);
        assert_eq!(axis.min, -50.0);
        assert_eq!(axis.max, 200.0);
        assert_eq!(axis.ticks.first(), Some(&-50.0));
        assert!(axis.ticks.contains(&0.0));
    }

    #[test]
    fn grouped_bars_hang_negative_values_below_zero() {
        let data = result(
            &["Scenario", "business_unit", "sales"],
            &[(&["Actuals", "Software"], -50.0), (&["Budget", "Software"], 100.0)],
        );
        let chart = ChartData::from_result(&data, "business_unit", "Scenario", CategoryOrder::Appearance);
        let area = PlotArea::new(600.0, 400.0);
        let axis = ValueAxis::nice(-50.0, 100.0, 5);
        let bars = grouped_bars(&chart, &area, &axis);
        let zero = axis.project(0.0, &area);

        assert_eq!(bars.len(), 2);
        assert!((bars[0].y - zero).abs() < 1e-9);
        assert!(bars[1].y < zero);
        assert!(bars[0].x < bars[1].x);
    }

    #[test]
    fn stacked_bars_accumulate_per_category() {
        let data = result(
            &["Account", "Year", "sales"],
            &[(&["COGS", "2023"], 40.0), (&["Opex", "2023"], 60.0)],
        );
        let chart = ChartData::from_result(&data, "Year", "Account", CategoryOrder::Numeric);
        let (lo, hi) = chart.stacked_extent();
        let area = PlotArea::new(600.0, 400.0);
        let axis = ValueAxis::nice(lo, hi, 5);
        let bars = stacked_bars(&chart, &area, &axis);

        assert_eq!((lo, hi), (0.0, 100.0));
        assert!((bars[0].y - (bars[1].y + bars[1].height)).abs() < 1e-9);
        assert!((bars[1].y - axis.project(100.0, &area)).abs() < 1e-9);
    }

    #[test]
    fn gauge_arc_ends_at_right_edge_when_full() {
        assert_eq!(gauge_arc(100.0, 100.0, 80.0, 1.0), "M 20.00 100.00 A 80.00 80.00 0 0 1 180.00 100.00");
        assert_eq!(gauge_fraction(45.0, 31.0), 1.0);
        assert_eq!(gauge_fraction(1.0, 0.0), 0.0);
    }

    #[test]
    fn sample_trend_draws_distinct_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = sample_trend(&mut rng);
        let mut sorted = samples.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();

        assert_eq!(samples.len(), 30);
        assert_eq!(sorted.len(), 30);
        assert!(samples.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn sparkline_area_closes_on_baseline() {
        let (line, area) = sparkline_paths(&[0.0, 50.0, 100.0], 100.0, 40.0);
        assert_eq!(line, "0.0,40.0 50.0,20.0 100.0,0.0");
        assert_eq!(area, "M 0,40.0 L 0.0,40.0 L 50.0,20.0 L 100.0,0.0 L 100.0,40.0 Z");
    }
}
