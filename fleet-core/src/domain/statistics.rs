use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Statistics {
    pub total_vessels: u64,
    pub total_voyages: u64,
    pub active_voyages: u64,
    pub total_catch_amount: f64,
    pub total_auction_amount: f64,
}
