use serde::Deserialize;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use chartwatch_core::{ChartSize, DashError, Dashboard, DashboardConfig, FilterSet, load_configured};

use crate::common::*;

/// Dropdown values as sent by the page: { artist, range, metric }.
#[derive(Debug, Deserialize)]
struct FilterValues {
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    metric: Option<String>,
}

#[wasm_bindgen]
pub struct WasmDashboard {
    inner: Dashboard,
    failed_weeks: Vec<String>,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// Build from fetched files:
    /// files: { "manifest.json": Uint8Array, "data/songs-global-weekly/2017-01-05.json": Uint8Array, ... }
    /// With `allow_partial`, weeks that failed are reported by `failed_weeks()` instead of failing.
    #[wasm_bindgen(constructor)]
    pub fn new(files: JsValue, allow_partial: Option<bool>) -> Result<WasmDashboard, JsValue> {
        let src = js_files_to_memsource(files).map_err(js_err)?;
        let config = DashboardConfig::from_source(&src).map_err(js_err)?;
        let outcome = load_configured(&src, &config).map_err(js_err)?;

        let failed_weeks = outcome.failures().iter().map(|f| f.week.to_string()).collect();
        let dataset = if allow_partial.unwrap_or(false) {
            outcome.into_partial()
        } else {
            outcome.into_strict()
        }.map_err(js_err)?;

        Ok(WasmDashboard { inner: Dashboard::from_dataset(dataset), failed_weeks })
    }

    /// Sorted artist names for the selection list.
    pub fn artists(&self) -> Vec<String> { self.inner.artists().to_vec() }

    /// Weeks that could not be loaded (only non-empty with `allow_partial`).
    pub fn failed_weeks(&self) -> Vec<String> { self.failed_weeks.clone() }

    pub fn set_artist(&mut self, value: &str) -> Result<(), JsValue> {
        self.inner.select_artist(value).map_err(js_err)
    }

    pub fn set_time_range(&mut self, value: &str) -> Result<(), JsValue> {
        self.inner.select_time_range(value).map_err(js_err)
    }

    pub fn set_metric(&mut self, value: &str) -> Result<(), JsValue> {
        self.inner.select_metric(value).map_err(js_err)
    }

    /// Replace all three filters at once. Missing keys reset to "all"/"streams".
    pub fn set_filters(&mut self, values: JsValue) -> Result<(), JsValue> {
        let values: FilterValues = serde_wasm_bindgen::from_value(values).map_err(js_err)?;
        let or_all = |v: Option<String>| v.unwrap_or_default();

        let filters = FilterSet {
            artist: or_all(values.artist).parse().map_err(js_err)?,
            time_range: or_all(values.range).parse().map_err(js_err)?,
            metric: match values.metric {
                Some(metric) => metric.parse().map_err(js_err)?,
                None => Default::default(),
            },
        };
        self.inner.set_filters(filters);
        Ok(())
    }

    /// Current view as a JS object, or `null` when no week matches the filters.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        match self.inner.view() {
            Ok(view) => to_js_json(&view),
            Err(DashError::NoData) => Ok(JsValue::NULL),
            Err(e) => Err(js_err(e)),
        }
    }

    pub fn title(&self) -> Result<String, JsValue> {
        self.inner.view().map(|v| v.title).map_err(js_err)
    }

    /// Trend chart SVG for the current filters (UI can set innerHTML).
    /// Defaults to a 960x500 canvas.
    pub fn trend_svg(&self, width: Option<f64>, height: Option<f64>) -> Result<String, JsValue> {
        let default = ChartSize::default();
        let size = ChartSize { width: width.unwrap_or(default.width), height: height.unwrap_or(default.height) };
        self.inner.view().and_then(|v| v.trend_svg(size)).map_err(js_err)
    }

    /// `<li>` items for the top-songs list.
    pub fn top_list_html(&self) -> Result<String, JsValue> {
        self.inner.view().map(|v| v.top_list_html()).map_err(js_err)
    }
}
