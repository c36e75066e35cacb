//! DSP — pure Rust DTMF synthesis.
//!
//! The same voices feed the speaker backend, the offline device, and the
//! WASM sample/WAV exports.

pub mod gain;
pub mod oscillator;
pub mod renderer;
pub mod voice;
