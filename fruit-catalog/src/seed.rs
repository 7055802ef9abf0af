//! Fixed catalog the service is (re)initialized with on every start.

use crate::record::FruitRecord;

/// `(name, price in BRL, units in stock)`, in insertion order.
pub const SEED_FRUITS: [(&str, f64, u32); 20] = [
    ("Banana", 3.50, 120),
    ("Maçã", 4.20, 80),
    ("Manga", 5.00, 40),
    ("Uva", 6.30, 60),
    ("Laranja", 3.80, 90),
    ("Abacaxi", 6.00, 30),
    ("Morango", 7.50, 50),
    ("Melancia", 9.90, 20),
    ("Melão", 8.40, 25),
    ("Limão", 2.20, 200),
    ("Pêra", 5.30, 70),
    ("Kiwi", 6.80, 45),
    ("Mamão", 4.70, 35),
    ("Coco", 5.90, 40),
    ("Goiaba", 4.10, 55),
    ("Pêssego", 6.20, 30),
    ("Ameixa", 5.60, 28),
    ("Caqui", 4.90, 22),
    ("Framboesa", 9.50, 15),
    ("Mirtilo", 10.50, 12),
];

pub fn seed_records() -> Vec<FruitRecord> {
    SEED_FRUITS
        .iter()
        .map(|&(name, price, stock)| FruitRecord::new(name, price, stock))
        .collect()
}
