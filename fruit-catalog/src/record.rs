use serde::{Deserialize, Serialize};

/// One row of the `fruits` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitRecord {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl FruitRecord {
    pub fn new(name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}
