// JSON-driven API for browser hosts.
use crate::encode;
use crate::session::DecodeSession;
use crate::types::{ColorSample, DecoderConfig, Interval};
use js_sys::Array;
use wasm_bindgen::prelude::*;

// Console logging for debugging
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[allow(unused_macros)]
macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn parse_config(config_json: &str) -> DecoderConfig {
    if config_json.trim().is_empty() || config_json == "{}" {
        DecoderConfig::default()
    } else {
        serde_json::from_str::<DecoderConfig>(config_json)
            .unwrap_or_else(|_| DecoderConfig::default())
    }
}

#[wasm_bindgen]
pub struct DecodeResult {
    text: String,
    intervals_processed: usize,
    noise_intervals: usize,
    unknown_patterns: usize,
    threshold: f32,
}

#[wasm_bindgen]
impl DecodeResult {
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn intervals_processed(&self) -> usize {
        self.intervals_processed
    }

    #[wasm_bindgen(getter)]
    pub fn noise_intervals(&self) -> usize {
        self.noise_intervals
    }

    #[wasm_bindgen(getter)]
    pub fn unknown_patterns(&self) -> usize {
        self.unknown_patterns
    }

    #[wasm_bindgen(getter)]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

fn result_from_session(mut session: DecodeSession) -> DecodeResult {
    session.flush();
    DecodeResult {
        intervals_processed: session.diagnostics().intervals_recorded(),
        noise_intervals: session.diagnostics().noise_intervals(),
        unknown_patterns: session.diagnostics().unknown_patterns(),
        threshold: session.threshold(),
        text: session.finish(),
    }
}

#[wasm_bindgen]
pub fn decode_color_samples(samples_json: &str, config_json: &str) -> Result<DecodeResult, JsValue> {
    let samples: Vec<ColorSample> = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid samples JSON: {}", e)))?;
    let config = parse_config(config_json);

    let mut session =
        DecodeSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    for sample in &samples {
        session.push_sample(sample);
    }
    Ok(result_from_session(session))
}

#[wasm_bindgen]
pub fn decode_signal_intervals(
    intervals_json: &str,
    config_json: &str,
) -> Result<DecodeResult, JsValue> {
    let intervals: Vec<Interval> = serde_json::from_str(intervals_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid intervals JSON: {}", e)))?;
    let config = parse_config(config_json);

    let mut session =
        DecodeSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    for interval in &intervals {
        session.push_interval(*interval);
    }
    Ok(result_from_session(session))
}

#[wasm_bindgen]
pub fn encode_text_timing(text: &str, config_json: &str) -> Result<Array, JsValue> {
    let config = parse_config(config_json);
    let intervals =
        encode::encode_text(text, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let array = Array::new();
    for interval in &intervals {
        let obj = js_sys::Object::new();
        let state = match interval.state {
            crate::types::SignalState::Mark => "mark",
            crate::types::SignalState::Gap => "gap",
        };
        js_sys::Reflect::set(&obj, &"state".into(), &state.into())?;
        js_sys::Reflect::set(&obj, &"startSeconds".into(), &interval.start_seconds.into())?;
        js_sys::Reflect::set(
            &obj,
            &"durationSeconds".into(),
            &interval.duration_seconds.into(),
        )?;
        array.push(&obj);
    }
    Ok(array)
}
