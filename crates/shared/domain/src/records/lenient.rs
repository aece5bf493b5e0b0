use serde::Deserialize;
use serde::de::IgnoredAny;

/// A number as hosts actually send it: integer, float, numeric text, or junk.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LooseNumber {
    /// Finite value; `None` for junk.
    pub(crate) fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => text.trim().replace(',', ".").parse().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Rounded and clamped into `0..=max`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn clamped(&self, max: u32) -> Option<u32> {
        self.value().map(|v| v.round().clamp(0.0, f64::from(max)) as u32)
    }
}
