use js_sys::{Array, Function, Reflect};
use leptos::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use super::dataset::{ChartDataset, ChartKind};
use super::transform::chartjs_config;

/// Canvas driven by the page's `window.Chart` (Chart.js).
///
/// The chart is rebuilt whenever `data` changes; the previous instance is
/// destroyed first so the canvas can be reused.
#[component]
pub fn ChartCanvas(
    kind: ChartKind,
    #[prop(into)] data: Signal<ChartDataset>,
    #[prop(optional)] horizontal: bool,
    #[prop(optional, into)] height: Option<String>,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    // Chart instances are JS objects, keep them on this thread
    let chart = StoredValue::new_local(None::<JsValue>);

    Effect::new(move |_| {
        let data = data.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        chart.update_value(|current| {
            if let Some(previous) = current.take() {
                destroy_chart(&previous);
            }
            match create_chart(&canvas, kind, &data, horizontal) {
                Ok(instance) => *current = Some(instance),
                Err(err) => log::error!("Failed to render {} chart: {:?}", kind.as_str(), err),
            }
        });
    });

    on_cleanup(move || {
        let _ = chart.try_update_value(|current| {
            if let Some(previous) = current.take() {
                destroy_chart(&previous);
            }
        });
    });

    let style = format!(
        "position: relative; height: {};",
        height.unwrap_or_else(|| "300px".to_string())
    );

    view! {
        <div class="chart-container" style=style>
            <canvas node_ref=canvas_ref></canvas>
        </div>
    }
}

fn create_chart(
    canvas: &HtmlCanvasElement,
    kind: ChartKind,
    data: &ChartDataset,
    horizontal: bool,
) -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let constructor = Reflect::get(&window, &JsValue::from_str("Chart"))?;
    if !constructor.is_function() {
        return Err(JsValue::from_str("Chart.js is not loaded"));
    }
    let constructor: Function = constructor.dyn_into()?;

    let config = chartjs_config(kind, data, horizontal)
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let target: JsValue = canvas.clone().into();

    Reflect::construct(&constructor, &Array::of2(&target, &config))
}

fn destroy_chart(chart: &JsValue) {
    let destroy = Reflect::get(chart, &JsValue::from_str("destroy"));
    if let Ok(destroy) = destroy {
        if let Some(destroy) = destroy.dyn_ref::<Function>() {
            if let Err(err) = destroy.call0(chart) {
                log::warn!("Failed to destroy chart: {:?}", err);
            }
        }
    }
}
