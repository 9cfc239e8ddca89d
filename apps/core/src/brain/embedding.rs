//! Deterministic text embeddings.
//!
//! Two flavours, both pure functions of the input text:
//! - [`feature_embedding`]: 128 hand-crafted features (length, topic
//!   signatures, character frequencies), used by the diversity scorers.
//! - [`hashed_embedding`]: 384 pseudo-random components seeded from a
//!   SHA-256 of the text, stored alongside submitted ideas.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use super::keywords::{self, COMMON_WORDS};

pub const FEATURE_DIMENSIONS: usize = 128;
pub const HASHED_DIMENSIONS: usize = 384;

const TOPIC_SIGNATURES: &[&[&str]] = &[
    // tech
    &[
        "ai", "technology", "digital", "app", "smart", "system", "algorithm", "data", "software",
        "platform",
    ],
    // social
    &[
        "community", "people", "social", "human", "culture", "education", "network",
        "collaboration",
    ],
    // env
    &[
        "environment", "green", "sustainable", "eco", "waste", "energy", "climate", "renewable",
    ],
    // business
    &[
        "business", "market", "profit", "cost", "revenue", "customer", "startup", "entrepreneur",
    ],
    // health
    &[
        "health", "medical", "wellness", "fitness", "nutrition", "mental", "care", "therapy",
    ],
];

/// Letters a..o contribute one frequency feature each
const CHAR_FEATURES: usize = 15;

/// Structural feature vector of `text`, always [`FEATURE_DIMENSIONS`] long.
pub fn feature_embedding(text: &str) -> Vec<f32> {
    let text = text.trim().to_lowercase();
    let words = keywords::tokenize(&text);
    let unique = words.iter().collect::<std::collections::HashSet<_>>().len();
    let meaningful: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| !COMMON_WORDS.contains(w) && w.chars().count() > 2)
        .collect();

    let mut features = Vec::with_capacity(FEATURE_DIMENSIONS);
    features.push((text.chars().count() % 100) as f32);
    features.push((words.len() % 50) as f32);
    features.push((unique % 30) as f32);
    features.push((meaningful.len() % 40) as f32);
    features.push(text.chars().filter(|c| *c == '?' || *c == '!').count() as f32);

    for signature in TOPIC_SIGNATURES {
        let score = meaningful.iter().filter(|w| signature.contains(w)).count();
        features.push((score % 10) as f32);
    }

    for letter in ('a'..='z').take(CHAR_FEATURES) {
        let count = text.chars().filter(|c| *c == letter).count();
        features.push((count % 8) as f32);
    }

    features.resize(FEATURE_DIMENSIONS, 0.0);
    features
}

/// Stable seed for `text`: the first eight bytes of its SHA-256.
pub fn text_seed(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Pseudo-random vector in [-1, 1]; same text, same vector.
pub fn hashed_embedding(text: &str) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(text_seed(text));
    (0..HASHED_DIMENSIONS)
        .map(|_| rng.gen_range(-1.0f32..=1.0))
        .collect()
}

/// Cosine similarity, `None` when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm = norm_a * norm_b;
    (norm > 0.0).then(|| dot / norm)
}

/// Population variance of the components
pub fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_embedding_shape() {
        let v = feature_embedding("A mobile app for community recycling");
        assert_eq!(v.len(), FEATURE_DIMENSIONS);
        // 36 chars, 6 words, 6 unique, 4 meaningful, no punctuation
        assert_eq!(&v[..5], &[36.0, 6.0, 6.0, 4.0, 0.0]);
        // tech signature ("app"), social signature ("community")
        assert_eq!(v[5], 1.0);
        assert_eq!(v[6], 1.0);
        assert!(v[30..].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_empty_text_embeds_to_zero() {
        let v = feature_embedding("");
        assert!(v.iter().all(|x| *x == 0.0));
        assert_eq!(variance(&v), 0.0);
    }

    #[test]
    fn test_hashed_embedding_is_stable() {
        let a = hashed_embedding("solar powered bikes");
        let b = hashed_embedding("solar powered bikes");
        let c = hashed_embedding("solar powered boats");
        assert_eq!(a.len(), HASHED_DIMENSIONS);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-6);
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_none());
    }
}
