use serde::Deserialize;
use serde::Serialize;

/// Rough characters-per-token ratio used for estimates.
pub const CHARS_PER_TOKEN: usize = 4;

/// Per-1000-token prices, in dollars.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            input_per_1k: 0.000_15,
            output_per_1k: 0.000_6,
        }
    }
}

impl CostModel {
    #[must_use]
    pub fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }

    /// Estimated cost of one exchange, from character counts.
    #[must_use]
    pub fn estimate(&self, input_chars: usize, output_chars: usize) -> f64 {
        let input = tokens_as_f64(estimate_tokens(input_chars));
        let output = tokens_as_f64(estimate_tokens(output_chars));
        input / 1000.0 * self.input_per_1k + output / 1000.0 * self.output_per_1k
    }
}

/// `ceil(chars / 4)`
#[must_use]
pub fn estimate_tokens(chars: usize) -> usize {
    chars.div_ceil(CHARS_PER_TOKEN)
}

#[allow(clippy::cast_precision_loss)]
fn tokens_as_f64(tokens: usize) -> f64 {
    tokens as f64
}
