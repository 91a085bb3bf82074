use dioxus::prelude::*;

use crate::ui::chart::{gauge_arc, gauge_fraction, sample_trend, sparkline_paths};
use crate::ui::components::charts::card_style;
use crate::ui::format::format_amount;
use crate::ui::kpi::{format_metric_value, GaugeSpec, MetricSpec};

const SPARK_WIDTH: f64 = 200.0;
const SPARK_HEIGHT: f64 = 40.0;

#[component]
pub fn MetricCard(spec: MetricSpec) -> Element {
    let samples = use_hook(|| sample_trend(&mut rand::thread_rng()));
    let value = format_metric_value(&spec);
    let (line, area) = sparkline_paths(&samples, SPARK_WIDTH, SPARK_HEIGHT);
    let color = spec.color_graph;

    rsx! {
        div {
            style: "{card_style()} position: relative; height: 100px; overflow: hidden; text-align: center;",
            if spec.show_graph {
                svg {
                    view_box: "0 0 {SPARK_WIDTH} {SPARK_HEIGHT}",
                    preserve_aspect_ratio: "none",
                    style: "position: absolute; left: 0; bottom: 0; width: 100%; height: 60%;",
                    path { d: "{area}", fill: "{color}", stroke: "none" }
                    polyline { points: "{line}", fill: "none", stroke: "{color}", stroke_width: "1" }
                }
            }
            div { style: "position: relative; font-size: 15px; color: #444;", "{spec.label}" }
            div { style: "position: relative; font-size: 26px; font-weight: 600;", "{value}" }
        }
    }
}

#[component]
pub fn GaugeCard(spec: GaugeSpec) -> Element {
    let (cx, cy, radius) = (100.0, 100.0, 80.0);
    let track = gauge_arc(cx, cy, radius, 1.0);
    let fill = gauge_arc(cx, cy, radius, gauge_fraction(spec.value, spec.max_bound));
    let value = format!("{}{}", format_amount(spec.value), spec.suffix);
    let max_label = format_amount(spec.max_bound);
    let color = spec.color;
    let number_y = cy - 10.0;
    let max_x = cx + radius;
    let tick_y = cy + 16.0;
    let min_x = cx - radius;

    rsx! {
        div {
            style: "{card_style()} text-align: center; height: 200px;",
            div { style: "font-size: 15px; color: #444;", "{spec.title}" }
            svg {
                view_box: "0 0 200 120",
                style: "width: 100%; height: 150px;",
                path { d: "{track}", fill: "none", stroke: "#eee", stroke_width: "18" }
                path { d: "{fill}", fill: "none", stroke: "{color}", stroke_width: "18" }
                text { x: "{cx}", y: "{number_y}", text_anchor: "middle", font_size: "22", fill: "#222", "{value}" }
                text { x: "{min_x}", y: "{tick_y}", text_anchor: "middle", font_size: "10", fill: "#777", "0" }
                text { x: "{max_x}", y: "{tick_y}", text_anchor: "middle", font_size: "10", fill: "#777", "{max_label}" }
            }
        }
    }
}
