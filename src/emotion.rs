//! Emotion state: a fixed set of named emotions on the probability simplex.

pub mod vector;

pub use vector::{BASE_EMOTIONS, EPSILON, Emotion, EmotionVector, normalize_name};
