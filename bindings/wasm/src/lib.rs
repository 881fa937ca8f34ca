// WebAssembly bindings for the photomorse decoding engine
use js_sys::Array;
use photomorse_core::types::*;
use photomorse_core::{encode, DecodeSession};
use wasm_bindgen::prelude::*;

mod support;

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

// Macro to generate wasm_bindgen wrapper enums that mirror core enums
macro_rules! wasm_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $value:expr),* $(,)?
        }
        from $core_type:ty
    ) => {
        #[wasm_bindgen]
        $(#[$meta])*
        $vis enum $name {
            $($variant = $value),*
        }

        impl From<$core_type> for $name {
            fn from(value: $core_type) -> Self {
                match value {
                    $(<$core_type>::$variant => $name::$variant),*
                }
            }
        }

        impl From<$name> for $core_type {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => <$core_type>::$variant),*
                }
            }
        }
    };
}

wasm_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SignalState {
        Gap = 0,
        Mark = 1,
    }
    from photomorse_core::types::SignalState
}

wasm_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum IntervalLabel {
        Dit = 0,
        Dah = 1,
        IntraGap = 2,
        LetterGap = 3,
        WordGap = 4,
        Noise = 5,
    }
    from photomorse_core::types::IntervalLabel
}

// JavaScript-compatible result types

#[wasm_bindgen]
pub struct DecodeResultJs {
    text: String,
    intervals_processed: usize,
    noise_intervals: usize,
    unknown_patterns: usize,
    threshold: f32,
}

#[wasm_bindgen]
impl DecodeResultJs {
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

#[wasm_bindgen]
pub struct IntervalTimingResult {
    intervals: Vec<Interval>,
}

#[wasm_bindgen]
impl IntervalTimingResult {
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.intervals.len()
    }

    #[wasm_bindgen(getter)]
    pub fn intervals(&self) -> Array {
        let array = Array::new();
        for interval in &self.intervals {
            let obj = js_sys::Object::new();
            let state = match interval.state {
                photomorse_core::types::SignalState::Mark => "mark",
                photomorse_core::types::SignalState::Gap => "gap",
            };
            js_sys::Reflect::set(&obj, &"state".into(), &state.into()).unwrap();
            js_sys::Reflect::set(&obj, &"startSeconds".into(), &interval.start_seconds.into())
                .unwrap();
            js_sys::Reflect::set(
                &obj,
                &"durationSeconds".into(),
                &interval.duration_seconds.into(),
            )
            .unwrap();
            array.push(&obj);
        }
        array
    }
}

// Main JavaScript API functions

fn finish_session(mut session: DecodeSession) -> DecodeResultJs {
    session.flush();
    DecodeResultJs {
        intervals_processed: session.diagnostics().intervals_recorded(),
        noise_intervals: session.diagnostics().noise_intervals(),
        unknown_patterns: session.diagnostics().unknown_patterns(),
        threshold: session.threshold(),
        text: session.finish(),
    }
}

#[wasm_bindgen]
pub fn decode_color_samples(
    samples_json: &str,
    config_json: &str,
) -> Result<DecodeResultJs, JsValue> {
    let samples: Vec<ColorSample> = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid samples JSON: {}", e)))?;
    let config = support::parse_with_defaults::<DecoderConfig>(config_json);

    let mut session =
        DecodeSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    for sample in &samples {
        session.push_sample(sample);
    }
    Ok(finish_session(session))
}

#[wasm_bindgen]
pub fn decode_signal_intervals(
    intervals_json: &str,
    config_json: &str,
) -> Result<DecodeResultJs, JsValue> {
    let intervals: Vec<Interval> = serde_json::from_str(intervals_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid intervals JSON: {}", e)))?;
    let config = support::parse_with_defaults::<DecoderConfig>(config_json);

    let mut session =
        DecodeSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    for interval in &intervals {
        session.push_interval(*interval);
    }
    Ok(finish_session(session))
}

wasm_fn! {
    /// Encode text as the mark/gap interval stream an ideal sender would
    /// transmit, using the durations in the JSON config.
    pub fn encode_text_timing(text: &str, config_json: &str)
    -> Result<IntervalTimingResult, JsValue>
    with encode::encode_text, DecoderConfig, |intervals| IntervalTimingResult { intervals }
}
