use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::serde_helpers::{any_as_string, timestamp};
use super::filter_value;
use crate::{Mmsi, VoyageId};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter)]
pub enum LedgerKind {
    Auction,
    PrivateSale,
    Expense,
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
pub enum ExpenseCategory {
    #[serde(rename = "유류비")]
    #[strum(serialize = "유류비")]
    Fuel,
    #[serde(rename = "인건비")]
    #[strum(serialize = "인건비")]
    Labor,
    #[serde(rename = "수리비")]
    #[strum(serialize = "수리비")]
    Repair,
    #[serde(rename = "어구비")]
    #[strum(serialize = "어구비")]
    FishingGear,
    #[serde(rename = "식비")]
    #[strum(serialize = "식비")]
    Food,
    #[serde(rename = "기타")]
    #[strum(serialize = "기타")]
    Other,
}

/// Sale of catch through a formal fish market (위판).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Auction {
    pub id: RecordId,
    pub voyage_id: VoyageId,
    #[serde(with = "timestamp")]
    pub auction_date: NaiveDateTime,
    pub auction_port: String,
    pub fish_species: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub buyer: Option<String>,
    pub note: Option<String>,
    /// Only set by the global listing.
    pub vessel_name: Option<String>,
    pub mmsi: Option<Mmsi>,
}

/// Direct sale of catch outside the auction market (사매).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrivateSale {
    pub id: RecordId,
    pub voyage_id: VoyageId,
    #[serde(with = "timestamp")]
    pub sale_date: NaiveDateTime,
    pub fish_species: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub buyer: Option<String>,
    pub note: Option<String>,
    pub vessel_name: Option<String>,
    pub mmsi: Option<Mmsi>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub id: RecordId,
    pub voyage_id: VoyageId,
    #[serde(with = "timestamp")]
    pub expense_date: NaiveDateTime,
    pub category: ExpenseCategory,
    pub description: Option<String>,
    pub amount: f64,
    pub note: Option<String>,
    pub vessel_name: Option<String>,
    pub mmsi: Option<Mmsi>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAuction {
    pub voyage_id: VoyageId,
    #[serde(with = "timestamp")]
    pub auction_date: NaiveDateTime,
    pub auction_port: String,
    pub fish_species: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub buyer: Option<String>,
    pub note: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrivateSale {
    pub voyage_id: VoyageId,
    #[serde(with = "timestamp")]
    pub sale_date: NaiveDateTime,
    pub fish_species: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub buyer: Option<String>,
    pub note: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub voyage_id: VoyageId,
    #[serde(with = "timestamp")]
    pub expense_date: NaiveDateTime,
    pub category: ExpenseCategory,
    pub description: Option<String>,
    pub amount: f64,
    pub note: Option<String>,
}

/// Filter of the global ledger listings (`/{ledger}/all`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub fish_species: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub vessel_name: Option<String>,
    pub mmsi: Option<Mmsi>,
}

/// Field level change of a ledger record, written by the server on every mutation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModificationHistory {
    pub id: Option<i64>,
    #[serde(default)]
    pub record_id: Option<RecordId>,
    pub field_name: String,
    #[serde(default, deserialize_with = "any_as_string")]
    pub old_value: Option<String>,
    #[serde(default, deserialize_with = "any_as_string")]
    pub new_value: Option<String>,
    #[serde(with = "timestamp")]
    pub modified_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerTotals {
    pub quantity: f64,
    pub amount: f64,
}

/// Common view of the three ledger entry types.
pub trait LedgerEntry {
    const KIND: LedgerKind;

    fn id(&self) -> &RecordId;
    fn voyage_id(&self) -> &VoyageId;
    fn amount(&self) -> f64;
    fn quantity(&self) -> f64 {
        0.0
    }
}

impl LedgerKind {
    /// Path segment of the ledger's endpoints.
    pub fn path(&self) -> &'static str {
        match self {
            LedgerKind::Auction => "auctions",
            LedgerKind::PrivateSale => "private-sales",
            LedgerKind::Expense => "expenses",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LedgerKind::Auction => "위판",
            LedgerKind::PrivateSale => "사매",
            LedgerKind::Expense => "경비",
        }
    }
}

impl LedgerFilter {
    /// Query parameters for the listing of `kind`. Only set filters are included, and only
    /// those the listing understands: `category` applies to expenses, `fish_species` to sales.
    pub fn query(&self, kind: LedgerKind) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(v) = self.start_date {
            query.push(("start_date", v.format("%Y-%m-%d").to_string()));
        }
        if let Some(v) = self.end_date {
            query.push(("end_date", v.format("%Y-%m-%d").to_string()));
        }
        match kind {
            LedgerKind::Auction | LedgerKind::PrivateSale => {
                if let Some(v) = filter_value(&self.fish_species) {
                    query.push(("fish_species", v.to_string()));
                }
            }
            LedgerKind::Expense => {
                if let Some(v) = self.category {
                    query.push(("category", v.to_string()));
                }
            }
        }
        if let Some(v) = filter_value(&self.vessel_name) {
            query.push(("vessel_name", v.to_string()));
        }
        if let Some(v) = &self.mmsi {
            query.push(("mmsi", v.to_string()));
        }

        query
    }
}

impl LedgerTotals {
    pub fn of<T: LedgerEntry>(entries: &[T]) -> Self {
        entries.iter().fold(Self::default(), |acc, e| Self {
            quantity: acc.quantity + e.quantity(),
            amount: acc.amount + e.amount(),
        })
    }
}

impl LedgerEntry for Auction {
    const KIND: LedgerKind = LedgerKind::Auction;

    fn id(&self) -> &RecordId {
        &self.id
    }
    fn voyage_id(&self) -> &VoyageId {
        &self.voyage_id
    }
    fn amount(&self) -> f64 {
        self.total_price
    }
    fn quantity(&self) -> f64 {
        self.quantity
    }
}

impl LedgerEntry for PrivateSale {
    const KIND: LedgerKind = LedgerKind::PrivateSale;

    fn id(&self) -> &RecordId {
        &self.id
    }
    fn voyage_id(&self) -> &VoyageId {
        &self.voyage_id
    }
    fn amount(&self) -> f64 {
        self.total_price
    }
    fn quantity(&self) -> f64 {
        self.quantity
    }
}

impl LedgerEntry for Expense {
    const KIND: LedgerKind = LedgerKind::Expense;

    fn id(&self) -> &RecordId {
        &self.id
    }
    fn voyage_id(&self) -> &VoyageId {
        &self.voyage_id
    }
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display label of a ledger field name, unknown names are returned as is.
pub fn field_label(field_name: &str) -> &str {
    match field_name {
        "auction_date" => "위판일시",
        "auction_port" => "위판장",
        "fish_species" => "어종",
        "quantity" => "수량",
        "unit_price" => "단가",
        "buyer" => "구매자",
        "note" => "비고",
        "sale_date" => "판매일시",
        "expense_date" => "지출일시",
        "category" => "카테고리",
        "description" => "내용",
        "amount" => "금액",
        other => other,
    }
}
