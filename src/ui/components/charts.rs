use dioxus::prelude::*;

use crate::ui::chart::{
    grouped_bars, line_traces, stacked_bars, ChartData, PlotArea, ValueAxis,
};
use crate::ui::format::{format_amount, format_si};

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 400.0;
const AXIS_TICKS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarMode {
    Group,
    Stack,
}

pub fn card_style() -> &'static str {
    "background: #fff; border: 1px solid #e6e6e6; border-radius: 8px; padding: 12px; min-width: 0;"
}

#[component]
fn Legend(chart: ChartData) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; font-size: 12px; padding-top: 4px;",
            {chart.series.iter().map(|series| {
                let name = series.name.clone();
                let color = series.color;
                rsx!(
                    span {
                        style: "display: inline-flex; align-items: center; gap: 4px;",
                        span { style: "width: 10px; height: 10px; background: {color}; display: inline-block;" }
                        "{name}"
                    }
                )
            })}
        }
    }
}

#[component]
fn ValueGrid(axis: ValueAxis) -> Element {
    let area = PlotArea::new(CHART_WIDTH, CHART_HEIGHT);
    let left = area.left;
    let right = CHART_WIDTH - area.right;
    let label_x = area.left - 6.0;

    rsx! {
        {axis.ticks.iter().map(|tick| {
            let y = axis.project(*tick, &area);
            let label_y = y + 4.0;
            let label = format_si(*tick);
            let stroke = if *tick == 0.0 { "#888" } else { "#e5e5e5" };
            rsx!(
                line { x1: "{left}", y1: "{y}", x2: "{right}", y2: "{y}", stroke: "{stroke}", stroke_width: "1" }
                text { x: "{label_x}", y: "{label_y}", text_anchor: "end", font_size: "11", fill: "#555", "{label}" }
            )
        })}
    }
}

#[component]
fn CategoryLabels(categories: Vec<String>) -> Element {
    let area = PlotArea::new(CHART_WIDTH, CHART_HEIGHT);
    let y = area.baseline() + 18.0;
    let count = categories.len();

    rsx! {
        {categories.iter().enumerate().map(|(idx, category)| {
            let x = area.category_center(count, idx);
            let category = category.clone();
            rsx!(
                text { x: "{x}", y: "{y}", text_anchor: "middle", font_size: "12", fill: "#333", "{category}" }
            )
        })}
    }
}

#[component]
fn EmptyPlot() -> Element {
    let x = CHART_WIDTH / 2.0;
    let y = CHART_HEIGHT / 2.0;
    rsx! {
        text {
            x: "{x}",
            y: "{y}",
            text_anchor: "middle",
            font_size: "14",
            fill: "#999",
            "No data"
        }
    }
}

#[component]
pub fn BarChart(title: String, chart: ChartData, mode: BarMode, show_labels: bool) -> Element {
    let area = PlotArea::new(CHART_WIDTH, CHART_HEIGHT);
    let (lo, hi) = match mode {
        BarMode::Group => chart.value_extent(),
        BarMode::Stack => chart.stacked_extent(),
    };
    let axis = ValueAxis::nice(lo, hi, AXIS_TICKS);
    let bars = match mode {
        BarMode::Group => grouped_bars(&chart, &area, &axis),
        BarMode::Stack => stacked_bars(&chart, &area, &axis),
    };
    let zero = axis.project(0.0, &area);

    rsx! {
        div { style: "{card_style()}",
            h3 { style: "margin: 0 0 8px 0; font-size: 16px;", "{title}" }
            svg {
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                style: "width: 100%; height: auto; display: block;",
                ValueGrid { axis: axis.clone() }
                if chart.is_empty() {
                    EmptyPlot {}
                } else {
                    CategoryLabels { categories: chart.categories.clone() }
                    {bars.iter().map(|bar| {
                        let label = format_si(bar.value);
                        let label_y = if bar.y < zero { bar.y - 4.0 } else { bar.y + bar.height + 12.0 };
                        let label_x = bar.x + bar.width / 2.0;
                        let (x, y, width, height, color) = (bar.x, bar.y, bar.width, bar.height, bar.color);
                        rsx!(
                            rect { x: "{x}", y: "{y}", width: "{width}", height: "{height}", fill: "{color}" }
                            if show_labels {
                                text { x: "{label_x}", y: "{label_y}", text_anchor: "middle", font_size: "12", fill: "#333", "{label}" }
                            }
                        )
                    })}
                }
            }
            Legend { chart: chart.clone() }
        }
    }
}

#[component]
pub fn LineChart(title: String, chart: ChartData) -> Element {
    let area = PlotArea::new(CHART_WIDTH, CHART_HEIGHT);
    let (lo, hi) = chart.value_extent();
    let axis = ValueAxis::nice(lo, hi, AXIS_TICKS);
    let traces = line_traces(&chart, &area, &axis);

    rsx! {
        div { style: "{card_style()}",
            h3 { style: "margin: 0 0 8px 0; font-size: 16px;", "{title}" }
            svg {
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                style: "width: 100%; height: auto; display: block;",
                ValueGrid { axis: axis.clone() }
                if chart.is_empty() {
                    EmptyPlot {}
                } else {
                    CategoryLabels { categories: chart.categories.clone() }
                    {traces.iter().map(|trace| {
                        let points = trace.polyline();
                        let color = trace.color;
                        let markers = trace.points.clone();
                        rsx!(
                            polyline { points: "{points}", fill: "none", stroke: "{color}", stroke_width: "2" }
                            {markers.into_iter().map(move |(x, y, value)| {
                                let label = format_amount(value);
                                let label_y = y - 8.0;
                                rsx!(
                                    circle { cx: "{x}", cy: "{y}", r: "4", fill: "{color}" }
                                    text { x: "{x}", y: "{label_y}", text_anchor: "middle", font_size: "11", fill: "#333", "{label}" }
                                )
                            })}
                        )
                    })}
                }
            }
            Legend { chart: chart.clone() }
        }
    }
}
