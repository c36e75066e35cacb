//! Gain stage — sums inputs and scales them by an automatable value.

/// A scheduled change of the gain value.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SetValue {
    time: f64,
    value: f64,
}

/// Summing gain stage with step automation, in the manner of a WebAudio
/// `GainNode` driven by `setValueAtTime`.
#[derive(Debug, Clone)]
pub struct GainStage {
    /// Gain in effect before any scheduled change.
    pub value: f64,
    events: Vec<SetValue>,
}

impl GainStage {
    pub fn new(value: f64) -> Self {
        GainStage {
            value,
            events: Vec::new(),
        }
    }

    /// Jump to `value` at `time` seconds and hold it.
    pub fn set_value_at_time(&mut self, value: f64, time: f64) {
        let at = self.events.partition_point(|e| e.time <= time);
        self.events.insert(at, SetValue { time, value });
    }

    /// Gain in effect at `time`.
    pub fn value_at(&self, time: f64) -> f64 {
        self.events
            .iter()
            .take_while(|e| e.time <= time)
            .last()
            .map_or(self.value, |e| e.value)
    }

    /// Sum `inputs` and apply the gain in effect at `time`.
    pub fn process(&self, inputs: &[f64], time: f64) -> f64 {
        inputs.iter().sum::<f64>() * self.value_at(time)
    }
}
