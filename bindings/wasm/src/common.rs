use anyhow::{anyhow, bail, Result};
use chartwatch_core::MemSource;
use js_sys::{Array, ArrayBuffer, Object, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Bytes of one file value. Text is taken as UTF-8, binary as raw bytes.
fn file_bytes(path: &str, value: &JsValue) -> Result<Vec<u8>> {
    if let Some(array) = value.dyn_ref::<Uint8Array>() {
        return Ok(array.to_vec());
    }
    if value.is_instance_of::<ArrayBuffer>() {
        return Ok(Uint8Array::new(value).to_vec());
    }
    if let Some(text) = value.as_string() {
        return Ok(text.into_bytes());
    }
    bail!("file '{path}' must be a Uint8Array, ArrayBuffer or string")
}

/// Collect `{ "data/users.csv": Uint8Array, ... }` into an in-memory chart source.
pub(crate) fn js_files_to_memsource(files: JsValue) -> Result<MemSource> {
    let obj: Object = files.dyn_into()
        .map_err(|_| anyhow!("files must be an object mapping paths to file contents"))?;

    let mut src = MemSource::default();
    for entry in Object::entries(&obj).iter() {
        let entry: Array = entry.unchecked_into();
        let path = entry.get(0).as_string().ok_or_else(|| anyhow!("file path is not a string"))?;
        let bytes = file_bytes(&path, &entry.get(1))?;
        src.insert(&path, bytes);
    }

    if src.is_empty() {
        bail!("no files were provided");
    }
    Ok(src)
}

/// Serialize through a JSON string so large structures parse natively in JS.
pub(crate) fn to_js_json<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value)
        .map_err(|e| js_err(format!("failed to serialize result: {e}")))?;
    js_sys::JSON::parse(&json)
}
