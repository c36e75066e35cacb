pub mod audio;
pub mod dsp;
pub mod error;
pub mod graph;
pub mod input;
pub mod options;
pub mod sequencer;
pub mod session;
pub mod timer;
pub mod tone;

use crate::error::DtmfError;
use crate::input::DigitSequence;
use crate::options::PlaybackOptions;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the dtmf-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn to_js(e: DtmfError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn playback_options(sample_rate: u32, volume: f64) -> Result<PlaybackOptions, JsValue> {
    let opts = PlaybackOptions { sample_rate, volume };
    opts.validate().map_err(to_js)?;
    Ok(opts)
}

/// WASM-exposed: the `{ low, high }` pair for a digit.
#[wasm_bindgen]
pub fn tone_for_digit(digit: u8) -> Result<JsValue, JsValue> {
    let tone = tone::lookup(digit).map_err(to_js)?;
    serde_wasm_bindgen::to_value(&tone).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: the full ten-entry tone table.
#[wasm_bindgen]
pub fn tone_table() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&tone::TONE_TABLE).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: extract the digits from free-text input.
#[wasm_bindgen]
pub fn parse_digits(input: &str) -> Vec<u8> {
    DigitSequence::parse(input).digits().to_vec()
}

/// WASM-exposed: the graph for a digit as `{ ticks, points }`.
#[wasm_bindgen]
pub fn graph_points(digit: u8) -> Result<JsValue, JsValue> {
    let plot = graph::plot_digit(digit).map_err(to_js)?;
    serde_wasm_bindgen::to_value(&plot).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: the graph for a digit as a standalone SVG document.
#[wasm_bindgen]
pub fn graph_svg(digit: u8) -> Result<String, JsValue> {
    let plot = graph::plot_digit(digit).map_err(to_js)?;
    Ok(graph::canvas::render_svg(
        &plot,
        &graph::title(digit),
        graph::WIDTH,
        graph::HEIGHT,
    ))
}

/// WASM-exposed: render the digits in `input` to a WAV byte array.
#[wasm_bindgen]
pub fn render_digits_wav(input: &str, sample_rate: u32, volume: f64) -> Result<Vec<u8>, JsValue> {
    let opts = playback_options(sample_rate, volume)?;
    let digits = DigitSequence::parse(input);
    Ok(dsp::renderer::render_wav(digits.digits(), &opts))
}

/// WASM-exposed: render the digits in `input` to mono f32 samples.
/// Returns the raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_digits_samples(input: &str, sample_rate: u32, volume: f64) -> Result<Vec<f32>, JsValue> {
    let opts = playback_options(sample_rate, volume)?;
    let digits = DigitSequence::parse(input);
    let samples = dsp::renderer::render_sequence(digits.digits(), &opts);
    Ok(samples.iter().map(|&s| s as f32).collect())
}
