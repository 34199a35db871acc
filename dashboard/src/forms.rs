//! Form state of the create and edit dialogs.
//!
//! Inputs are kept as the raw text the user typed and only turned into api payloads on submit.

use std::str::FromStr;

use chrono::NaiveDateTime;
use fleet_core::{
    ExpenseCategory, GroupTags, NewAuction, NewExpense, NewPrivateSale, VesselRegistry,
    VesselRegistryUpdate, Voyage, VoyageId, VoyageStatus, VoyageUpdate, parse_timestamp,
};
use snafu::{Location, Snafu};

const INPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FormError {
    #[snafu(display("'{field}' is required"))]
    Required {
        #[snafu(implicit)]
        location: Location,
        field: &'static str,
    },
    #[snafu(display("'{value}' is not a valid timestamp for '{field}'"))]
    InvalidTimestamp {
        #[snafu(implicit)]
        location: Location,
        field: &'static str,
        value: String,
    },
    #[snafu(display("'{value}' is not an expense category"))]
    InvalidCategory {
        #[snafu(implicit)]
        location: Location,
        value: String,
    },
}

/// Parses a numeric input, thousands separators are ignored and unparsable input reads as `0`.
pub fn parse_number(value: &str) -> f64 {
    value
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or_default()
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        RequiredSnafu { field }.fail()
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, FormError> {
    if value.trim().is_empty() {
        return RequiredSnafu { field }.fail();
    }
    parse_timestamp(value).ok_or_else(|| {
        InvalidTimestampSnafu {
            field,
            value: value.to_string(),
        }
        .build()
    })
}

fn input_timestamp(value: NaiveDateTime) -> String {
    value.format(INPUT_TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuctionForm {
    pub auction_date: String,
    pub auction_port: String,
    pub fish_species: String,
    pub quantity: String,
    pub unit_price: String,
    pub buyer: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivateSaleForm {
    pub sale_date: String,
    pub fish_species: String,
    pub quantity: String,
    pub unit_price: String,
    pub buyer: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub expense_date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub note: String,
}

impl AuctionForm {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            auction_date: input_timestamp(now),
            ..Default::default()
        }
    }

    /// Preview of the total price shown while the form is filled in.
    pub fn expected_amount(&self) -> f64 {
        parse_number(&self.quantity) * parse_number(&self.unit_price)
    }

    pub fn validate(&self, voyage_id: &VoyageId) -> Result<NewAuction, FormError> {
        Ok(NewAuction {
            voyage_id: voyage_id.clone(),
            auction_date: timestamp("auction_date", &self.auction_date)?,
            auction_port: required("auction_port", &self.auction_port)?,
            fish_species: required("fish_species", &self.fish_species)?,
            quantity: parse_number(&self.quantity),
            unit_price: parse_number(&self.unit_price),
            buyer: optional(&self.buyer),
            note: optional(&self.note),
        })
    }
}

impl PrivateSaleForm {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            sale_date: input_timestamp(now),
            ..Default::default()
        }
    }

    pub fn expected_amount(&self) -> f64 {
        parse_number(&self.quantity) * parse_number(&self.unit_price)
    }

    pub fn validate(&self, voyage_id: &VoyageId) -> Result<NewPrivateSale, FormError> {
        Ok(NewPrivateSale {
            voyage_id: voyage_id.clone(),
            sale_date: timestamp("sale_date", &self.sale_date)?,
            fish_species: required("fish_species", &self.fish_species)?,
            quantity: parse_number(&self.quantity),
            unit_price: parse_number(&self.unit_price),
            buyer: optional(&self.buyer),
            note: optional(&self.note),
        })
    }
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            expense_date: String::new(),
            category: ExpenseCategory::Fuel.to_string(),
            description: String::new(),
            amount: String::new(),
            note: String::new(),
        }
    }
}

impl ExpenseForm {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            expense_date: input_timestamp(now),
            ..Default::default()
        }
    }

    pub fn validate(&self, voyage_id: &VoyageId) -> Result<NewExpense, FormError> {
        let category = required("category", &self.category)?;
        let category = ExpenseCategory::from_str(&category)
            .map_err(|_| InvalidCategorySnafu { value: category }.build())?;

        Ok(NewExpense {
            voyage_id: voyage_id.clone(),
            expense_date: timestamp("expense_date", &self.expense_date)?,
            category,
            description: optional(&self.description),
            amount: parse_number(&self.amount),
            note: optional(&self.note),
        })
    }
}

/// Edit dialog of a voyage on the inquiry page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyageEditForm {
    pub fishing_area: String,
    pub catch_amount: String,
    pub fish_species: String,
    pub status: VoyageStatus,
}

impl From<&Voyage> for VoyageEditForm {
    fn from(v: &Voyage) -> Self {
        let update = VoyageUpdate::from(v);
        Self {
            fishing_area: update.fishing_area.unwrap_or_default(),
            catch_amount: update.catch_amount.unwrap_or_default().to_string(),
            fish_species: update.fish_species.unwrap_or_default(),
            status: update.status.unwrap_or_default(),
        }
    }
}

impl VoyageEditForm {
    pub fn to_update(&self) -> VoyageUpdate {
        VoyageUpdate {
            fishing_area: Some(self.fishing_area.trim().to_string()),
            catch_amount: Some(parse_number(&self.catch_amount)),
            fish_species: Some(self.fish_species.trim().to_string()),
            status: Some(self.status),
            ..Default::default()
        }
    }
}

/// Edit dialog of a registry vessel. Group tags are edited separately from the other fields and
/// written back as a whole on save.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEditForm {
    pub update: VesselRegistryUpdate,
    pub tags: GroupTags,
    pub new_tag: String,
}

impl From<&VesselRegistry> for RegistryEditForm {
    fn from(v: &VesselRegistry) -> Self {
        Self {
            update: VesselRegistryUpdate::from(v),
            tags: v.group_tags(),
            new_tag: String::new(),
        }
    }
}

impl RegistryEditForm {
    /// Adds the pending tag input, the input is cleared when the tag was taken.
    pub fn add_tag(&mut self) -> bool {
        let added = self.tags.add(&self.new_tag);
        if added {
            self.new_tag.clear();
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn validate(&self) -> Result<VesselRegistryUpdate, FormError> {
        let mut update = self.update.clone();
        update.vessel_name = Some(required(
            "vessel_name",
            update.vessel_name.as_deref().unwrap_or_default(),
        )?);
        update.group_name = Some(self.tags.joined());
        Ok(update)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoForm {
    pub content: String,
}

impl MemoForm {
    pub fn validate(&self) -> Result<String, FormError> {
        required("content", &self.content)
    }
}
