//! WASM bindings for the web viewer

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use isaac_core::Viewport;

#[cfg(target_arch = "wasm32")]
fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct WasmViewer {
    viewer: crate::scene::Viewer,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl WasmViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewer: crate::scene::Viewer::new(crate::config::ViewConfig::default(), Viewport::new(width, height)),
        }
    }

    /// Build a viewer from a JSON [`ViewConfig`](crate::config::ViewConfig)
    pub fn with_config(config_json: &str, width: f64, height: f64) -> Result<WasmViewer, JsValue> {
        let config = crate::config::ViewConfig::from_json(config_json).map_err(to_js)?;
        Ok(Self {
            viewer: crate::scene::Viewer::new(config, Viewport::new(width, height)),
        })
    }

    /// Body of the macro-state endpoint
    #[wasm_bindgen]
    pub fn set_macro_states(&mut self, json: &str) -> Result<(), JsValue> {
        self.viewer.set_history_json(json).map_err(to_js)
    }

    /// Body of the impulse endpoint
    #[wasm_bindgen]
    pub fn set_impulses(&mut self, json: &str) -> Result<(), JsValue> {
        self.viewer.set_impulses_json(json).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewer.resize(Viewport::new(width, height));
    }

    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.viewer.is_ready()
    }

    /// The current frame as JSON, or `undefined` while a feed is missing
    #[wasm_bindgen]
    pub fn frame_json(&self) -> Result<Option<String>, JsValue> {
        self.viewer
            .frame()
            .map(|frame| serde_json::to_string(&frame).map_err(to_js))
            .transpose()
    }
}

/// Field element (decimal or `0x` hex) to its signed decimal value
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn decode_felt(value: &str) -> Result<String, JsValue> {
    isaac_core::decode_str(value).map(|real| real.to_string()).map_err(to_js)
}

/// Base64 orientation to degrees
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn decode_phi_degrees(phi: &str) -> Result<f64, JsValue> {
    isaac_core::decode_angle_base64(phi).map_err(to_js)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
