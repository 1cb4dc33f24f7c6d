//! Configuration loading and validation.

use crate::conversation::ChatCache;
use crate::emotion::{BASE_EMOTIONS, normalize_name};
use crate::error::{ConfigError, Result};

/// Moodbot configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Emotion model settings.
    pub emotion: EmotionConfig,

    /// Conversation cache settings.
    pub conversation: ConversationConfig,
}

/// Emotion model configuration.
#[derive(Debug, Clone)]
pub struct EmotionConfig {
    /// Base emotion names, normalized. Fixed for the lifetime of a session.
    pub base_emotions: Vec<String>,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            base_emotions: BASE_EMOTIONS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// Conversation cache configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConversationConfig {
    /// Maximum retained chat entries per session.
    pub cache_capacity: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            cache_capacity: ChatCache::DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `MOODBOT_EMOTIONS` is a comma-separated list of base emotion names;
    /// `MOODBOT_CACHE_CAPACITY` bounds the per-session chat cache. Unset
    /// variables fall back to defaults; set-but-invalid values are an error
    /// rather than a silent fallback.
    pub fn load() -> Result<Self> {
        let emotion = match std::env::var("MOODBOT_EMOTIONS") {
            Ok(raw) => EmotionConfig {
                base_emotions: parse_emotion_list(&raw)?,
            },
            Err(_) => {
                tracing::debug!("MOODBOT_EMOTIONS not set, using the base emotion set");
                EmotionConfig::default()
            }
        };

        let conversation = match std::env::var("MOODBOT_CACHE_CAPACITY") {
            Ok(raw) => ConversationConfig {
                cache_capacity: parse_cache_capacity(&raw)?,
            },
            Err(_) => ConversationConfig::default(),
        };

        Ok(Self {
            emotion,
            conversation,
        })
    }
}

/// Parse and validate a comma-separated emotion list.
///
/// Names are normalized the same way the vector normalizes them, so the
/// validation here sees exactly the key set a session will be built with.
fn parse_emotion_list(raw: &str) -> Result<Vec<String>> {
    let names: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(normalize_name)
        .collect();

    if names.is_empty() {
        return Err(ConfigError::Invalid(
            "MOODBOT_EMOTIONS must name at least one emotion".into(),
        )
        .into());
    }

    for (index, name) in names.iter().enumerate() {
        if names[..index].contains(name) {
            return Err(ConfigError::Invalid(format!(
                "MOODBOT_EMOTIONS lists {name} more than once"
            ))
            .into());
        }
    }

    Ok(names)
}

fn parse_cache_capacity(raw: &str) -> Result<usize> {
    let capacity = raw.trim().parse::<usize>().map_err(|_| {
        ConfigError::Invalid(format!(
            "MOODBOT_CACHE_CAPACITY must be a positive integer, got {raw:?}"
        ))
    })?;

    if capacity == 0 {
        return Err(
            ConfigError::Invalid("MOODBOT_CACHE_CAPACITY must be at least 1".into()).into(),
        );
    }

    Ok(capacity)
}
