use std::{convert::Infallible, fmt::Display, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{
    filter_value,
    serde_helpers::{empty_as_none, null_as_default, timestamp},
};

/// Maritime Mobile Service Identity, kept as the string the api uses as key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mmsi(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VesselRegistryId(pub i64);

/// Vessel as returned by `/vessels`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VesselInfo {
    pub mmsi: Mmsi,
    pub vessel_name: String,
    pub call_sign: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vessel_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tonnage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: String,
}

/// Vessel as stored in the national vessel registry (`/vessel-registry`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VesselRegistry {
    pub id: VesselRegistryId,
    pub vessel_name: String,
    pub tonnage: Option<f64>,
    pub length: Option<f64>,
    pub engine_type: Option<String>,
    pub engine_count: Option<i32>,
    pub engine_power_ps: Option<f64>,
    pub engine_power_kw: Option<f64>,
    pub engine_name: Option<String>,
    pub hull_material: Option<String>,
    pub registration_no: Option<String>,
    pub build_date: Option<String>,
    pub port: Option<String>,
    pub business_type: Option<String>,
    pub equipment_name: Option<String>,
    pub equipment_power: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub mmsi: Option<Mmsi>,
    pub license_local: Option<String>,
    pub license_start_local: Option<String>,
    pub license_end_local: Option<String>,
    pub license_province: Option<String>,
    pub license_start_province: Option<String>,
    pub license_end_province: Option<String>,
    pub group_name: Option<String>,
    pub fishing_hours: Option<f64>,
    pub organization: Option<String>,
    pub owner_name: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<NaiveDateTime>,
    pub photo_count: Option<u32>,
    pub file_count: Option<u32>,
}

/// Partial update of a registry vessel, fields left as `None` are not sent.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VesselRegistryUpdate {
    pub vessel_name: Option<String>,
    pub tonnage: Option<f64>,
    pub length: Option<f64>,
    pub engine_type: Option<String>,
    pub engine_count: Option<i32>,
    pub engine_power_ps: Option<f64>,
    pub engine_power_kw: Option<f64>,
    pub engine_name: Option<String>,
    pub hull_material: Option<String>,
    pub port: Option<String>,
    pub business_type: Option<String>,
    pub mmsi: Option<String>,
    pub license_local: Option<String>,
    pub license_start_local: Option<String>,
    pub license_end_local: Option<String>,
    pub group_name: Option<String>,
    pub fishing_hours: Option<f64>,
    pub organization: Option<String>,
    pub owner_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryFilter {
    pub search: Option<String>,
    pub port: Option<String>,
    pub business_type: Option<String>,
    pub group_name: Option<String>,
    pub organization: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegistryPage {
    pub data: Vec<VesselRegistry>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistryStatus {
    pub count: u64,
    pub has_data: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CsvImportResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub count: u64,
}

/// One option of a filter dropdown, e.g. a port and the number of vessels registered there.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Facet {
    #[serde(alias = "port", alias = "group_name", alias = "business_type", alias = "organization")]
    pub value: String,
    pub count: u64,
}

impl Mmsi {
    /// Returns `None` for blank input, a vessel without mmsi has no voyages or tracks.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == value.len() {
            Some(Self(value))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Mmsi {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Mmsi {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for Mmsi {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl Display for VesselRegistryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl RegistryFilter {
    /// Query parameters of the registry search, unset and `all` filters are left out.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = [
            ("search", &self.search),
            ("port", &self.port),
            ("business_type", &self.business_type),
            ("group_name", &self.group_name),
            ("organization", &self.organization),
        ]
        .into_iter()
        .filter_map(|(k, v)| filter_value(v).map(|v| (k, v.to_string())))
        .collect::<Vec<_>>();

        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("page_size", page_size.to_string()));
        }

        query
    }

    /// Whether any of the facet filters that require a registry lookup is set.
    pub fn has_facet_filter(&self) -> bool {
        [&self.business_type, &self.group_name, &self.organization]
            .into_iter()
            .any(|v| filter_value(v).is_some())
    }
}

impl VesselRegistry {
    pub fn group_tags(&self) -> super::GroupTags {
        super::GroupTags::parse(self.group_name.as_deref().unwrap_or_default())
    }
}

impl From<&VesselRegistry> for VesselRegistryUpdate {
    /// The fields exposed by the registry edit form, pre-populated from the vessel.
    fn from(v: &VesselRegistry) -> Self {
        Self {
            vessel_name: Some(v.vessel_name.clone()),
            tonnage: v.tonnage,
            length: v.length,
            engine_type: v.engine_type.clone(),
            hull_material: v.hull_material.clone(),
            port: v.port.clone(),
            business_type: v.business_type.clone(),
            mmsi: v.mmsi.as_ref().map(|m| m.to_string()),
            group_name: v.group_name.clone(),
            fishing_hours: v.fishing_hours,
            organization: v.organization.clone(),
            ..Default::default()
        }
    }
}


#[cfg(any(test, feature = "test"))]
mod test {
    use super::*;

    impl VesselInfo {
        pub fn test_default(mmsi: &str, vessel_name: &str) -> Self {
            Self {
                mmsi: Mmsi(mmsi.to_string()),
                vessel_name: vessel_name.to_string(),
                call_sign: None,
                vessel_type: "연안어선".to_string(),
                tonnage: 15.5,
                owner: "김철수".to_string(),
                port: "부산".to_string(),
            }
        }
    }

    impl VesselRegistry {
        pub fn test_default(id: i64, vessel_name: &str, mmsi: Option<&str>) -> Self {
            Self {
                id: VesselRegistryId(id),
                vessel_name: vessel_name.to_string(),
                tonnage: Some(9.77),
                length: Some(14.2),
                engine_type: Some("디젤".to_string()),
                engine_count: Some(1),
                engine_power_ps: Some(450.0),
                engine_power_kw: Some(331.0),
                engine_name: None,
                hull_material: Some("FRP".to_string()),
                registration_no: Some(format!("REG-{id:05}")),
                build_date: None,
                port: Some("부산".to_string()),
                business_type: Some("연안복합".to_string()),
                equipment_name: None,
                equipment_power: None,
                mmsi: mmsi.and_then(Mmsi::new),
                license_local: None,
                license_start_local: None,
                license_end_local: None,
                license_province: None,
                license_start_province: None,
                license_end_province: None,
                group_name: None,
                fishing_hours: Some(0.0),
                organization: None,
                owner_name: None,
                created_at: None,
                updated_at: None,
                photo_count: Some(0),
                file_count: Some(0),
            }
        }
    }
}
