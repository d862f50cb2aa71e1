use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::core::{format, platform};
use crate::progress::charts::SERIES_COLOR;
use crate::progress::sparkline;
use crate::progress::DashboardModel;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

/// Export panel: tidy JSON and CSV of the normalized dashboard data, plus
/// a PNG snapshot of the score curve drawn by the sparkline renderer.
#[component]
pub fn ProgressExportPanel(model: DashboardModel) -> Element {
    let session_count = model.sessions.len();
    let phoneme_count = model.buckets.all.len();

    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => {
            Some(("progress-card__meta".to_string(), format!("{label}…")))
        }
        ExportStatus::Done(message) => Some((
            "progress-card__meta progress-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "progress-card__meta progress-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let json_handler = {
        let export_model = model.clone();
        move |_| {
            run_export(status, busy, "Preparing JSON", {
                let export_model = export_model.clone();
                move || perform_json_export(export_model)
            });
        }
    };

    let csv_handler = {
        let export_model = model.clone();
        move |_| {
            run_export(status, busy, "Preparing CSV", {
                let export_model = export_model.clone();
                move || perform_csv_export(export_model)
            });
        }
    };

    let png_handler = {
        let export_model = model.clone();
        move |_| {
            run_export(status, busy, "Preparing PNG", {
                let export_model = export_model.clone();
                move || perform_png_export(export_model)
            });
        }
    };

    rsx! {
        section { class: "progress-card progress-export",
            div { class: "progress-card__header",
                h2 { "Export" }
            }

            if session_count == 0 && phoneme_count == 0 {
                p { class: "progress-card__placeholder",
                    "Exports unlock once this screen has data to share."
                }
            } else {
                p { "Prepare tidy JSON, CSV, or a PNG snapshot for coaches and further analysis." }

                ul { class: "progress-export__summary",
                    li { strong { "{session_count}" } " recent sessions" }
                    li { strong { "{phoneme_count}" } " tracked phonemes" }
                }

                div { class: "progress-export__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy(),
                        onclick: json_handler,
                        "Export JSON"
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: busy(),
                        onclick: csv_handler,
                        "Export CSV"
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: busy(),
                        onclick: png_handler,
                        "Export PNG"
                    }
                }

                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", "{message}" }
                }
            }
        }
    }
}

/// Drive one export to completion, keeping the status line and busy flag
/// in sync. Browser builds run on the event loop; native builds block
/// inline because file and clipboard access are synchronous there anyway.
fn run_export<F, Fut>(
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
    label: &'static str,
    work: F,
) where
    F: FnOnce() -> Fut + 'static,
    Fut: std::future::Future<Output = Result<String, String>> + 'static,
{
    if busy() {
        return;
    }
    busy.set(true);
    status.set(ExportStatus::Working(label));

    #[cfg(target_arch = "wasm32")]
    {
        platform::spawn_future(async move {
            match work().await {
                Ok(message) => status.set(ExportStatus::Done(message)),
                Err(err) => status.set(ExportStatus::Error(err)),
            }
            busy.set(false);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match futures::executor::block_on(work()) {
            Ok(message) => status.set(ExportStatus::Done(message)),
            Err(err) => status.set(ExportStatus::Error(err)),
        }
        busy.set(false);
    }
}

async fn perform_json_export(model: DashboardModel) -> Result<String, String> {
    let json = serde_json::to_string_pretty(&model).map_err(|err| err.to_string())?;
    copy_to_clipboard(json.clone()).await?;
    let filename = format!("phonoscope-progress-{}.json", timestamp_slug());
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("JSON copied and saved to {path}"),
        None => "JSON copied to clipboard and download started".to_string(),
    })
}

async fn perform_csv_export(model: DashboardModel) -> Result<String, String> {
    let csv = build_csv(&model);
    let filename = format!("phonoscope-progress-{}.csv", timestamp_slug());
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("CSV saved to {path}"),
        None => "CSV download started".to_string(),
    })
}

async fn perform_png_export(model: DashboardModel) -> Result<String, String> {
    let png_bytes = build_png_snapshot(&model).await?;
    let filename = format!("phonoscope-progress-{}.png", timestamp_slug());
    let delivery = download_bytes(&filename, "image/png", png_bytes).await?;
    Ok(match delivery {
        Some(path) => format!("PNG snapshot saved to {path}"),
        None => "PNG download started".to_string(),
    })
}

/// Sessions and phonemes in one long table, discriminated by `kind`.
fn build_csv(model: &DashboardModel) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(
        model.sessions.len() + model.buckets.all.len() + 1,
    );
    rows.push(
        ["kind", "label", "score", "attempts", "duration_minutes", "tier"]
            .into_iter()
            .map(String::from)
            .collect(),
    );

    for session in &model.sessions {
        rows.push(vec![
            "session".to_string(),
            session.date.clone(),
            session.score_fraction.to_string(),
            session.attempts.to_string(),
            session.duration_minutes.to_string(),
            String::new(),
        ]);
    }

    for record in &model.buckets.all {
        rows.push(vec![
            "phoneme".to_string(),
            record.display_symbol().to_string(),
            record.current_score.to_string(),
            record.attempts.to_string(),
            String::new(),
            record.tier().label().to_string(),
        ]);
    }

    let mut csv = String::new();
    for row in rows {
        let line = row
            .into_iter()
            .map(|field| escape_csv(&field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        if !document.exec_command("copy").unwrap_or(false) {
            textarea.remove();
            return Err("Clipboard copy blocked".into());
        }
        textarea.remove();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Phonoscope", "Phonoscope")
        .ok_or("Unable to determine export directory")?;
    let dir = dirs.data_dir().join("exports");
    Ok(dir)
}

const SNAPSHOT_WIDTH: u32 = 1200;
const SNAPSHOT_HEIGHT: u32 = 400;

async fn build_png_snapshot(model: &DashboardModel) -> Result<Vec<u8>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        build_png_web(model).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        build_png_desktop(model)
    }
}

#[cfg(target_arch = "wasm32")]
async fn build_png_web(model: &DashboardModel) -> Result<Vec<u8>, String> {
    use base64::Engine as _;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let svg_markup = svg_snapshot(model);
    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&svg_markup));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(SNAPSHOT_WIDTH);
    canvas.set_height(SNAPSHOT_HEIGHT);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    let decode = image.decode();
    image.set_src(&url);
    JsFuture::from(decode)
        .await
        .map_err(|_| "Image decode failed")?;

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| "Unable to draw image")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;
    Url::revoke_object_url(&url).ok();

    let encoded = data_url.split(',').nth(1).ok_or("Malformed data URL")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| "PNG decode failed")?;

    Ok(bytes)
}

/// SVG snapshot markup for the web export path: dark backdrop, headline
/// figures, and the score curve from the shared sparkline renderer.
#[cfg(target_arch = "wasm32")]
fn svg_snapshot(model: &DashboardModel) -> String {
    let curve_width = f64::from(SNAPSHOT_WIDTH) - 120.0;
    let curve_height = 200.0;

    let mut surface = sparkline::SvgSurface::new(curve_width, curve_height);
    sparkline::render(
        &mut surface,
        &model.score_values(),
        SERIES_COLOR,
        curve_width,
        curve_height,
    );
    let curve = surface.into_body();

    let average = format::format_percent(model.stats.average_score_fraction);
    let sub = format!(
        "{} attempts · {} sessions · average {average}",
        model.stats.total_attempts, model.stats.total_sessions,
    );

    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>\n  \
         <rect width='{w}' height='{h}' fill='#0f1116'/>\n  \
         <text x='60' y='80' fill='#f5f7fb' font-family='Inter, sans-serif' font-size='40' font-weight='700'>Phonoscope progress</text>\n  \
         <text x='60' y='120' fill='rgba(245,247,251,0.72)' font-family='Inter, sans-serif' font-size='22'>{sub}</text>\n  \
         <g transform='translate(60 160)'>{curve}</g>\n</svg>",
        w = SNAPSHOT_WIDTH,
        h = SNAPSHOT_HEIGHT,
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn build_png_desktop(model: &DashboardModel) -> Result<Vec<u8>, String> {
    use crate::progress::sparkline::{PixmapSurface, Rgba};

    let mut surface = PixmapSurface::new(SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT)
        .ok_or("Unable to allocate snapshot surface")?;
    surface.fill_background(Rgba::new(15, 17, 22));

    sparkline::render(
        &mut surface,
        &model.score_values(),
        SERIES_COLOR,
        f64::from(SNAPSHOT_WIDTH),
        f64::from(SNAPSHOT_HEIGHT),
    );

    surface.encode_png()
}
