use serde::{Deserialize, Serialize};

/// Sampling settings handed to a text-generation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u64,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: Option<f64>,
    /// Fixed seed for providers that accept one.
    pub seed: Option<u64>,
}

impl GenerationParams {
    /// Temperature actually sent to the model; greedy decoding when sampling is off.
    pub fn effective_temperature(&self) -> f64 {
        if self.do_sample {
            self.temperature
        } else {
            0.0
        }
    }

    pub fn effective_top_p(&self) -> Option<f64> {
        self.top_p.filter(|_| self.do_sample)
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            do_sample: true,
            temperature: 0.8,
            top_p: Some(0.9),
            seed: None,
        }
    }
}
