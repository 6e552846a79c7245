use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use chartwatch_core::{DashboardConfig, MapView, WorldConfig, WorldMap};

use crate::common::*;

const DEFAULT_WIDTH: f64 = 960.0;
const DEFAULT_MARGIN: f64 = 10.0;

#[wasm_bindgen]
pub struct WasmWorldMap {
    inner: WorldMap,
    width: f64,
    margin: f64,
    // last pointer position that landed on a country
    pointer: Option<(f64, f64)>,
}

impl WasmWorldMap {
    fn view(&self) -> Result<MapView<'_>, JsValue> {
        let mut view = self.inner.view(self.width, self.margin).map_err(js_err)?;
        if let Some((x, y)) = self.pointer { let _ = view.hover(x, y); }
        Ok(view)
    }
}

#[wasm_bindgen]
impl WasmWorldMap {
    /// files: { "world.geojson": Uint8Array, "users.csv": Uint8Array, "manifest.json"?: Uint8Array }
    /// Paths come from the manifest's "world" entry, else `boundaries`/`usage`.
    #[wasm_bindgen(constructor)]
    pub fn new(files: JsValue, boundaries: Option<String>, usage: Option<String>, width: Option<f64>) -> Result<WasmWorldMap, JsValue> {
        let src = js_files_to_memsource(files).map_err(js_err)?;
        let manifest = DashboardConfig::from_source(&src).map_err(js_err)?.world;

        let config = match (manifest, boundaries, usage) {
            (_, Some(boundaries), Some(usage)) => WorldConfig { boundaries, usage, code_property: "ISO_A2".into() },
            (Some(world), _, _) => world,
            _ => return Err(js_err("world map needs boundary and usage file paths")),
        };

        let inner = WorldMap::from_source(&src, &config).map_err(js_err)?;
        Ok(WasmWorldMap { inner, width: width.unwrap_or(DEFAULT_WIDTH), margin: DEFAULT_MARGIN, pointer: None })
    }

    /// Resize: the next render is fitted to the new width.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.pointer = None;
    }

    /// Pointer moved over the SVG. Returns { name, code, label, x, y } or `null` over water.
    pub fn hover(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let mut view = self.inner.view(self.width, self.margin).map_err(js_err)?;
        let tooltip = view.hover(x, y);
        self.pointer = tooltip.as_ref().map(|_| (x, y));
        match tooltip {
            Some(tip) => to_js_json(&tip),
            None => Ok(JsValue::NULL),
        }
    }

    /// Pointer left the map.
    pub fn unhover(&mut self) { self.pointer = None }

    /// Choropleth SVG with the current highlight.
    pub fn to_svg(&self) -> Result<String, JsValue> {
        self.view()?.to_svg().map_err(js_err)
    }

    /// Joined value for an ISO code: a number, or `null` for no data.
    pub fn value_for_code(&self, code: &str) -> Result<JsValue, JsValue> {
        match self.inner.value_for_code(code) {
            Some(value) => to_js_json(&value),
            None => Ok(JsValue::NULL),
        }
    }
}
