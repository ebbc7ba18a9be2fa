use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::document::{ContentType, Document};

pub const SAMPLE_TITLES: [&str; 5] = [
    "Первый документ про Python",
    "Введение в OpenSearch",
    "Docker и контейнеры — кратко",
    "Как писать тесты",
    "Советы по разработке",
];

pub const SAMPLE_CONTENTS: [&str; 5] = [
    "Это небольшой тестовый контент, в котором упоминается Python и OpenSearch.",
    "В этом тексте рассказывается, как использовать OpenSearch для быстрого поиска.",
    "Docker помогает запускать приложения в контейнерах и упрощает деплой.",
    "Тестирование важно: пишите юнит-тесты и интеграционные тесты.",
    "Полезные советы по написанию чистого кода и рефакторингу.",
];

/// Inclusive bounds on how many sample documents a fresh index receives.
pub const MIN_SEED_DOCS: usize = 3;
pub const MAX_SEED_DOCS: usize = 5;

/// Draw one sample document. Title, content and category are drawn
/// independently, so pairings are arbitrary.
pub fn random_document<R: Rng + ?Sized>(rng: &mut R) -> Document {
    Document {
        title: pick(&SAMPLE_TITLES, rng).to_string(),
        content: pick(&SAMPLE_CONTENTS, rng).to_string(),
        content_type: *pick(&ContentType::ALL, rng),
    }
}

/// Generate the seed set: between [`MIN_SEED_DOCS`] and [`MAX_SEED_DOCS`]
/// documents, paired with sequential ids starting at 1.
pub fn seed_documents<R: Rng + ?Sized>(rng: &mut R) -> Vec<(u64, Document)> {
    let count = rng.random_range(MIN_SEED_DOCS..=MAX_SEED_DOCS);
    (1..=count as u64)
        .map(|id| (id, random_document(rng)))
        .collect()
}

fn pick<'a, T, R: Rng + ?Sized>(pool: &'a [T], rng: &mut R) -> &'a T {
    // Pools are non-empty constants.
    pool.choose(rng).unwrap_or(&pool[0])
}
