use fruit_catalog::FruitRecord;
use serde::Serialize;

/// Response payload for GET /fruits/{name}.
#[derive(Debug, Serialize)]
pub struct FruitResponse {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl From<FruitRecord> for FruitResponse {
    fn from(rec: FruitRecord) -> Self {
        Self {
            name: rec.name,
            price: rec.price,
            stock: rec.stock,
        }
    }
}
