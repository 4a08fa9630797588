use dioxus::prelude::*;

use services::{FLOW_RATE_LPM, SensorReading};

use crate::context::AppContext;

const REFRESH_SECS: u64 = 5;

#[component]
pub fn MonitorView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut tick = use_signal(|| 0u32);

    // Advance the mock feed on the same cadence the probes would report.
    use_future({
        let sensors = ctx.sensors();
        move || {
            let sensors = sensors.clone();
            async move {
                loop {
                    tokio::time::sleep(std::time::Duration::from_secs(REFRESH_SECS)).await;
                    sensors.advance();
                    let current = tick();
                    tick.set(current.wrapping_add(1));
                }
            }
        }
    });

    let _ = tick();
    let window = ctx.sensors().window();
    let latest = ctx.sensors().latest();
    let flow = format!("{FLOW_RATE_LPM:.1} L/m");

    rsx! {
        div { class: "page monitor",
            h2 { "Reservoir monitor" }
            div { class: "stat-grid",
                StatTile { label: "pH level", value: format!("{:.1}", latest.ph) }
                StatTile { label: "Water temp", value: format!("{:.1} °C", latest.water_temp_c) }
                StatTile { label: "EC (nutrient)", value: format!("{:.0} ppm", latest.nutrient_ppm) }
                StatTile { label: "Flow rate", value: flow }
            }
            div { class: "chart-grid",
                ChartCard {
                    title: "Live pH".to_string(),
                    points: polyline_points(&window, |reading| reading.ph, 4.0, 9.0),
                }
                ChartCard {
                    title: "Water temperature".to_string(),
                    points: polyline_points(&window, |reading| reading.water_temp_c, 15.0, 35.0),
                }
            }
        }
    }
}

#[component]
fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div { class: "stat-tile",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}

#[component]
fn ChartCard(title: String, points: String) -> Element {
    rsx! {
        div { class: "chart-card",
            div { class: "chart-head",
                h3 { "{title}" }
                span { class: "live-pill", "Live sensor" }
            }
            svg {
                class: "chart",
                view_box: "0 0 100 40",
                preserve_aspect_ratio: "none",
                polyline {
                    points: "{points}",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "1.5",
                }
            }
        }
    }
}

/// Maps a sample window onto a 100x40 viewBox, newest sample at the right
/// edge, value axis clamped to `[min, max]`.
fn polyline_points(
    window: &[SensorReading],
    metric: impl Fn(&SensorReading) -> f64,
    min: f64,
    max: f64,
) -> String {
    if window.len() < 2 {
        return String::new();
    }

    let step = 100.0 / (window.len() - 1) as f64;
    window
        .iter()
        .enumerate()
        .map(|(index, reading)| {
            let x = index as f64 * step;
            let normalized = ((metric(reading) - min) / (max - min)).clamp(0.0, 1.0);
            let y = 40.0 - normalized * 40.0;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
