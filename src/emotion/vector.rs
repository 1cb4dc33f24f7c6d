//! The emotion vector and its normalization algebra.

use serde::Serialize;
use std::collections::HashMap;

/// Tolerance below which values are treated as exactly zero, and within
/// which two values are treated as equal.
pub const EPSILON: f64 = 1e-6;

/// Default base emotion set.
pub const BASE_EMOTIONS: [&str; 6] = [
    "Anger",
    "Disgust",
    "Fear",
    "Happiness",
    "Sadness",
    "Surprise",
];

/// Normalize an emotion name: first letter upper-cased, the rest lower-cased.
///
/// Every entry point (construction, delta keys, set/get names) goes through
/// this one function, so callers can pass names in any capitalization.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A named scalar emotion intensity. Never negative.
///
/// Emotions exist only inside their owning [`EmotionVector`]; all mutation
/// goes through the vector so the simplex invariant can be re-established.
#[derive(Debug, Clone, Serialize)]
pub struct Emotion {
    name: String,
    value: f64,
}

impl Emotion {
    fn new(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            value: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A fixed collection of emotions whose values always sum to 1.
///
/// The key set is established at construction and never grows. Every public
/// mutation re-establishes the simplex invariant before returning, so a
/// caller never observes an un-normalized state. Values are relative
/// proportions, not unbounded accumulators.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionVector {
    emotions: Vec<Emotion>,
}

impl Default for EmotionVector {
    fn default() -> Self {
        Self::new(BASE_EMOTIONS)
    }
}

impl EmotionVector {
    /// Build a vector from an ordered set of base emotion names (expected
    /// non-empty; see [`crate::config::Config`] for the validation surface).
    ///
    /// Names are normalized and de-duplicated, keeping first-occurrence
    /// order. The initial state is the uniform "calm" baseline of `1/N`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut emotions: Vec<Emotion> = Vec::new();
        for name in names {
            let emotion = Emotion::new(name.as_ref());
            if !emotions.iter().any(|e| e.name == emotion.name) {
                emotions.push(emotion);
            }
        }

        let mut vector = Self { emotions };
        vector.normalize();
        vector
    }

    /// Number of emotions in the fixed set.
    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }

    /// The calm baseline value, `1/N`.
    pub fn baseline(&self) -> f64 {
        if self.emotions.is_empty() {
            0.0
        } else {
            1.0 / self.emotions.len() as f64
        }
    }

    /// Emotion names in construction order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.emotions.iter().map(|e| e.name.as_str())
    }

    /// The contained emotions, in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &Emotion> {
        self.emotions.iter()
    }

    /// Re-establish the simplex invariant from the current raw values.
    ///
    /// When the total is effectively zero (right after construction, or
    /// after every value was driven to zero) the state resolves to the
    /// uniform calm distribution. Collapsed emotional energy is calm, not
    /// an error.
    pub fn normalize(&mut self) {
        if self.emotions.is_empty() {
            return;
        }

        let total: f64 = self.emotions.iter().map(|e| e.value).sum();
        if total < EPSILON {
            let uniform = self.baseline();
            for emotion in &mut self.emotions {
                emotion.value = uniform;
            }
        } else {
            for emotion in &mut self.emotions {
                emotion.value /= total;
            }
        }
    }

    /// Apply signed deltas keyed by emotion name, then renormalize.
    ///
    /// Keys match case-insensitively; unknown names are ignored and affect
    /// nothing. A result landing below [`EPSILON`] clamps to exactly 0 so
    /// floating drift cannot leave tiny negative noise behind.
    pub fn add_delta(&mut self, deltas: &HashMap<String, f64>) {
        for (name, delta) in deltas {
            let name = normalize_name(name);
            if let Some(emotion) = self.emotions.iter_mut().find(|e| e.name == name) {
                emotion.value += delta;
                if emotion.value < EPSILON {
                    emotion.value = 0.0;
                }
            }
        }
        self.normalize();
    }

    /// Fix one emotion's share of the total and redistribute the remaining
    /// mass across the others in proportion to their current values,
    /// preserving their pairwise ratios.
    ///
    /// `value` is clamped to `[0, 1]`. When the other emotions are all
    /// effectively zero there is no ratio to preserve and the remainder is
    /// split evenly across them. Unknown names are a no-op. This is not a
    /// set-then-normalize: the target holds exactly the clamped `value` on
    /// return.
    pub fn set_emotion(&mut self, name: &str, value: f64) {
        let name = normalize_name(name);
        let Some(target) = self.emotions.iter().position(|e| e.name == name) else {
            return;
        };
        let value = value.clamp(0.0, 1.0);

        if self.emotions.len() == 1 {
            // A lone emotion always carries the whole mass.
            self.emotions[target].value = 1.0;
            return;
        }

        let others_total: f64 = self
            .emotions
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target)
            .map(|(_, e)| e.value)
            .sum();
        let remainder = 1.0 - value;

        if others_total < EPSILON {
            let share = remainder / (self.emotions.len() - 1) as f64;
            for (i, emotion) in self.emotions.iter_mut().enumerate() {
                emotion.value = if i == target { value } else { share };
            }
        } else {
            let scale = remainder / others_total;
            for (i, emotion) in self.emotions.iter_mut().enumerate() {
                emotion.value = if i == target {
                    value
                } else {
                    emotion.value * scale
                };
            }
        }
    }

    /// Current value of an emotion, matched case-insensitively.
    ///
    /// `None` is the "unknown name" signal; vector reads never panic.
    pub fn get_emotion(&self, name: &str) -> Option<f64> {
        let name = normalize_name(name);
        self.emotions
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value)
    }

    /// Every emotion within [`EPSILON`] of the maximum value, plus that
    /// maximum. Ties are all included; order within a tie follows
    /// construction order.
    pub fn get_dominant(&self) -> (Vec<String>, f64) {
        if self.emotions.is_empty() {
            return (Vec::new(), 0.0);
        }

        let max = self
            .emotions
            .iter()
            .map(|e| e.value)
            .fold(f64::NEG_INFINITY, f64::max);

        let names = self
            .emotions
            .iter()
            .filter(|e| max - e.value < EPSILON)
            .map(|e| e.name.clone())
            .collect();
        (names, max)
    }

    /// Emotions meaningfully above the calm baseline.
    ///
    /// An empty result is a valid signal: the overall state is calm.
    pub fn get_strong_emotions(&self) -> Vec<String> {
        let baseline = self.baseline();
        self.emotions
            .iter()
            .filter(|e| e.value > baseline + EPSILON)
            .map(|e| e.name.clone())
            .collect()
    }

    /// Snapshot of all current values keyed by name. Read-only; sums to 1.
    pub fn as_map(&self) -> HashMap<String, f64> {
        self.emotions
            .iter()
            .map(|e| (e.name.clone(), e.value))
            .collect()
    }
}
