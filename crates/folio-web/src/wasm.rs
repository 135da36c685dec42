#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the PortfolioRunner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::RunnerCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!(
                    "folio panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                ),
                None => format!("folio panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

/// Portfolio page runner.
///
/// Host-driven: JavaScript measures the DOM, pushes JSON inputs, advances
/// time from its own timers, and applies the JSON commands it drains.
#[wasm_bindgen]
pub struct PortfolioRunner {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl PortfolioRunner {
    /// Create a runner with the default config and built-in projects.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        install_panic_hook();
        Self {
            inner: RunnerCore::new(),
        }
    }

    /// Create a runner from a config JSON and an optional project catalog
    /// JSON. Throws a string describing the first load error.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        config_json: Option<String>,
        catalog_json: Option<String>,
    ) -> Result<PortfolioRunner, JsValue> {
        install_panic_hook();
        RunnerCore::from_json_sources(config_json.as_deref(), catalog_json.as_deref())
            .map(|inner| Self { inner })
            .map_err(|err| JsValue::from_str(&err))
    }

    /// Apply the starting theme from `prefers-color-scheme`. Call once.
    pub fn init(&mut self, system_dark: bool) {
        self.inner.init(system_dark);
    }

    /// Advance deterministic clock by `dt_ms` milliseconds.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time_ms(dt_ms);
    }

    /// Set deterministic clock to absolute milliseconds.
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, ts_ms: f64) {
        self.inner.set_time_ms(ts_ms);
    }

    /// Milliseconds until the next deferred task, or `undefined`.
    #[wasm_bindgen(js_name = msUntilNextDeadline)]
    pub fn ms_until_next_deadline(&self) -> Option<f64> {
        self.inner.ms_until_next_deadline()
    }

    /// Parse a JSON-encoded input and push to the event queue.
    /// Returns `true` if accepted, `false` if unsupported/malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        self.inner.push_encoded_input(json)
    }

    /// Process pending inputs.
    /// Returns `{ events_processed, commands_pending }`.
    pub fn step(&mut self) -> JsValue {
        let result = self.inner.step();
        let obj = Object::new();
        set_js(
            &obj,
            "events_processed",
            JsValue::from_f64(f64::from(result.events_processed)),
        );
        set_js(
            &obj,
            "commands_pending",
            JsValue::from_f64(f64::from(result.commands_pending)),
        );
        obj.into()
    }

    /// Drain pending DOM commands as a JSON array string.
    #[wasm_bindgen(js_name = takeCommands)]
    pub fn take_commands(&mut self) -> String {
        self.inner.take_commands_json()
    }

    /// Take accumulated log lines.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        let logs = self.inner.take_logs();
        let arr = Array::new();
        for log in logs {
            arr.push(&JsValue::from_str(&log));
        }
        arr
    }

    /// Whether the project modal is currently visible.
    #[wasm_bindgen(js_name = isModalOpen)]
    pub fn is_modal_open(&self) -> bool {
        self.inner.portfolio().modal().is_open()
    }
}

impl Default for PortfolioRunner {
    fn default() -> Self {
        Self::new()
    }
}
