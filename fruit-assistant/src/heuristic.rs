//! Keyword-based interpretation used when the model is unavailable.
//!
//! Matching is plain substring containment on the lower-cased text. The fruit
//! table is scanned in declaration order and the first hit wins, even if a
//! later keyword appears earlier in the text.

use crate::question::{InfoKind, InterpretedQuestion};

/// `(keyword, canonical fruit name)`, scanned top to bottom.
const FRUIT_KEYWORDS: &[(&str, &str)] = &[
    ("banana", "banana"),
    ("maçã", "maçã"),
    ("maca", "maçã"),
    ("manga", "manga"),
    ("uva", "uva"),
    ("laranja", "laranja"),
    ("abacaxi", "abacaxi"),
    ("morango", "morango"),
    ("melancia", "melancia"),
    ("melão", "melão"),
    ("melao", "melão"),
    ("limão", "limão"),
    ("limao", "limão"),
    ("pêra", "pêra"),
    ("pera", "pêra"),
    ("kiwi", "kiwi"),
    ("mamão", "mamão"),
    ("mamao", "mamão"),
    ("coco", "coco"),
    ("goiaba", "goiaba"),
    ("pêssego", "pêssego"),
    ("pessego", "pêssego"),
    ("ameixa", "ameixa"),
    ("caqui", "caqui"),
    ("framboesa", "framboesa"),
    ("mirtilo", "mirtilo"),
];

const PRICE_KEYWORDS: &[&str] = &[
    "preço",
    "preco",
    "custa",
    "valor",
    "quanto ta",
    "quanto tá",
    "quanto e",
    "quanto é",
];

const STOCK_KEYWORDS: &[&str] = &[
    "estoque",
    "quantidade",
    "tem",
    "disponivel",
    "disponível",
    "ainda tem",
    "quantas",
    "temos",
    "restam",
];

/// Interprets `text` without any I/O. Never fails; unresolved parts stay empty.
pub fn interpret(text: &str) -> InterpretedQuestion {
    let lower = text.to_lowercase();

    let fruit = FRUIT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, canonical)| *canonical)
        .unwrap_or_default();

    // Price is checked first; it wins when both sets match.
    let info = if contains_any(&lower, PRICE_KEYWORDS) {
        Some(InfoKind::Price)
    } else if contains_any(&lower, STOCK_KEYWORDS) {
        Some(InfoKind::Stock)
    } else {
        None
    };

    InterpretedQuestion::new(fruit, info)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
