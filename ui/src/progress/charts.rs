use dioxus::prelude::*;

use crate::progress::normalize::{ScorePoint, Trend, TrendDirection};
use crate::progress::sparkline::{
    self, layout_points, path_data, smooth_path, Rgba, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use crate::progress::HistoryPeriod;

/// Series color shared by the area chart and the sparkline.
pub(crate) const SERIES_COLOR: Rgba = Rgba::new(20, 184, 166);

const CHART_WIDTH: f64 = 560.0;
const CHART_HEIGHT: f64 = 180.0;

/// Area chart of the score history with the period picker and trend badge
/// in its header. Pure SVG so it renders identically in the browser and
/// the desktop webview.
#[component]
pub fn ScoreTrendChart(
    points: Vec<ScorePoint>,
    trend: Option<Trend>,
    period: Signal<HistoryPeriod>,
) -> Element {
    let active = period();

    let values: Vec<f64> = points.iter().map(|p| p.score as f64).collect();
    let chart = (!values.is_empty()).then(|| {
        let layout = layout_points(&values, CHART_WIDTH, CHART_HEIGHT);
        let commands = smooth_path(&layout);
        let line_d = path_data(&commands);

        let first = layout[0];
        let last = layout[layout.len() - 1];
        let area_d = format!(
            "M {:.2} {:.2} L {:.2} {:.2} {} L {:.2} {:.2} Z",
            first.x,
            CHART_HEIGHT,
            first.x,
            first.y,
            path_data(&commands[1..]),
            last.x,
            CHART_HEIGHT,
        );

        (line_d, area_d)
    });

    // A handful of evenly spaced date labels under the plot.
    let labels: Vec<String> = if points.len() <= 6 {
        points.iter().map(|p| p.label.clone()).collect()
    } else {
        let step = (points.len() - 1) as f64 / 5.0;
        (0..6)
            .map(|i| points[(i as f64 * step).round() as usize].label.clone())
            .collect()
    };

    rsx! {
        section { class: "progress-card chart-card",
            div { class: "progress-card__header",
                h2 { "Score over time" }
                TrendBadge { trend }
                div { class: "period-picker", role: "group", aria_label: "History period",
                    for option in HistoryPeriod::ALL {
                        button {
                            r#type: "button",
                            class: if option == active {
                                "period-picker__option period-picker__option--active"
                            } else {
                                "period-picker__option"
                            },
                            onclick: move |_| period.set(option),
                            "{option.label()}"
                        }
                    }
                }
            }

            match chart {
                Some((line_d, area_d)) => rsx! {
                    svg {
                        class: "chart-card__plot",
                        view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                        preserve_aspect_ratio: "none",
                        role: "img",
                        "aria-label": "Average pronunciation score per practice day",
                        defs {
                            linearGradient {
                                id: "score-area",
                                x1: "0", y1: "0", x2: "0", y2: "1",
                                stop { offset: "0", stop_color: "rgb(20, 184, 166)", stop_opacity: "0.19" }
                                stop { offset: "1", stop_color: "rgb(20, 184, 166)", stop_opacity: "0.02" }
                            }
                        }
                        path { d: "{area_d}", fill: "url(#score-area)" }
                        path {
                            d: "{line_d}",
                            fill: "none",
                            stroke: "{SERIES_COLOR.css()}",
                            stroke_width: "2",
                            stroke_linecap: "round",
                        }
                    }
                    div { class: "chart-card__axis",
                        for label in labels {
                            span { class: "chart-card__tick", "{label}" }
                        }
                    }
                },
                None => rsx! {
                    p { class: "progress-card__placeholder",
                        "Score history will chart here once practice sessions land in this window."
                    }
                },
            }
        }
    }
}

/// Direction arrow plus magnitude for the recent trend. Renders nothing
/// when no trend could be computed.
#[component]
pub fn TrendBadge(trend: Option<Trend>) -> Element {
    let Some(trend) = trend else {
        return rsx! {};
    };

    let (class, arrow) = match trend.direction {
        TrendDirection::Up => ("trend-badge trend-badge--up", "▲"),
        TrendDirection::Down => ("trend-badge trend-badge--down", "▼"),
        TrendDirection::Flat => ("trend-badge trend-badge--flat", "–"),
    };

    rsx! {
        span { class: "{class}", "{arrow} {trend.magnitude_percent}%" }
    }
}

/// Small smoothed sparkline for a stat card. On the web it paints onto a
/// real canvas; the desktop webview gets equivalent SVG markup from the
/// same renderer.
#[component]
pub fn TrendSparkline(values: Vec<f64>, canvas_id: String) -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        let draw_id = canvas_id.clone();
        // Props aren't reactive by themselves; `use_reactive` re-runs the
        // draw when a fetch or period change delivers new values.
        use_effect(use_reactive!(|(values,)| {
            draw_on_canvas(&draw_id, &values);
        }));

        rsx! {
            canvas {
                id: "{canvas_id}",
                class: "trend-sparkline",
                width: "{DEFAULT_WIDTH as u32}",
                height: "{DEFAULT_HEIGHT as u32}",
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut surface = sparkline::SvgSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        sparkline::render(
            &mut surface,
            &values,
            SERIES_COLOR,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
        );
        let markup = surface.into_markup();

        rsx! {
            div {
                id: "{canvas_id}",
                class: "trend-sparkline",
                dangerous_inner_html: "{markup}",
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn draw_on_canvas(canvas_id: &str, values: &[f64]) {
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    let Some(canvas) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(canvas_id))
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
    else {
        return;
    };

    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|object| object.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    // The renderer leaves empty input untouched, so clear stale pixels here.
    ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));

    let mut surface = sparkline::CanvasSurface::new(&ctx);
    sparkline::render(
        &mut surface,
        values,
        SERIES_COLOR,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    );
}
