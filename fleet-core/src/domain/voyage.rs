use chrono::NaiveDateTime;
use serde::{
    Deserialize, Serialize,
    de::{self, Visitor},
};
use serde_with::skip_serializing_none;
use snafu::ResultExt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::serde_helpers::{null_as_default, timestamp};
use crate::{
    Mmsi, VoyageIdError,
    voyage_id_error::{FormatSnafu, ParseSnafu},
};

/// Key of a voyage, always of the form `{mmsi}-{year}-{voyage_no}`.
///
/// The original string is kept so that an id read from the api is written back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct VoyageId {
    #[serde(skip)]
    mmsi: Mmsi,
    #[serde(skip)]
    year: i32,
    #[serde(skip)]
    voyage_no: u32,
    val: String,
}

#[derive(
    Debug,
    Default,
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
pub enum VoyageStatus {
    #[default]
    #[serde(rename = "조업중")]
    #[strum(serialize = "조업중")]
    InProgress,
    #[serde(rename = "입항")]
    #[strum(serialize = "입항")]
    Docked,
    #[serde(rename = "완료")]
    #[strum(serialize = "완료")]
    Complete,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackPoint {
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course: f64,
}

/// One fishing trip. Year and voyage number are read from [`Voyage::id`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Voyage {
    pub id: VoyageId,
    pub mmsi: Mmsi,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vessel_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub departure_port: String,
    #[serde(default, with = "timestamp::option")]
    pub departure_date: Option<NaiveDateTime>,
    pub arrival_port: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub arrival_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fishing_area: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub track_points: Vec<TrackPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub catch_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fish_species: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: VoyageStatus,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VoyageUpdate {
    pub arrival_port: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub arrival_date: Option<NaiveDateTime>,
    pub fishing_area: Option<String>,
    pub catch_amount: Option<f64>,
    pub fish_species: Option<String>,
    pub status: Option<VoyageStatus>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoyageFilter {
    pub mmsi: Option<Mmsi>,
    pub year: Option<i32>,
    pub status: Option<VoyageStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyVoyageRequest {
    pub mmsi: Mmsi,
    pub year: i32,
    pub month: u32,
    pub vessel_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonthlyVoyage {
    #[serde(rename = "data")]
    pub voyage: Voyage,
    pub created: bool,
}

impl VoyageId {
    pub fn new(mmsi: Mmsi, year: i32, voyage_no: u32) -> Self {
        Self {
            val: format!("{mmsi}-{year}-{voyage_no:03}"),
            mmsi,
            year,
            voyage_no,
        }
    }

    pub fn mmsi(&self) -> &Mmsi {
        &self.mmsi
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn voyage_no(&self) -> u32 {
        self.voyage_no
    }

    pub fn into_inner(self) -> String {
        self.val
    }
}

impl std::fmt::Display for VoyageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.val)
    }
}

impl AsRef<str> for VoyageId {
    fn as_ref(&self) -> &str {
        &self.val
    }
}

impl TryFrom<&str> for VoyageId {
    type Error = VoyageIdError;

    fn try_from(v: &str) -> Result<Self, Self::Error> {
        let mut split = v.rsplitn(3, '-');
        let (Some(voyage_no), Some(year), Some(mmsi)) = (split.next(), split.next(), split.next())
        else {
            return FormatSnafu { id: v }.fail();
        };

        let Some(mmsi) = Mmsi::new(mmsi) else {
            return FormatSnafu { id: v }.fail();
        };
        if mmsi.as_ref().len() != v.len() - voyage_no.len() - year.len() - 2 {
            return FormatSnafu { id: v }.fail();
        }

        let year = year.parse::<i32>().with_context(|_| ParseSnafu { id: v })?;
        let voyage_no = voyage_no
            .parse::<u32>()
            .with_context(|_| ParseSnafu { id: v })?;

        Ok(Self {
            mmsi,
            year,
            voyage_no,
            val: v.to_string(),
        })
    }
}

impl TryFrom<String> for VoyageId {
    type Error = VoyageIdError;

    fn try_from(v: String) -> Result<Self, Self::Error> {
        VoyageId::try_from(v.as_ref())
    }
}

impl<'de> Deserialize<'de> for VoyageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(VoyageIdVisitor)
    }
}

struct VoyageIdVisitor;
impl Visitor<'_> for VoyageIdVisitor {
    type Value = VoyageId;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a voyage id of the form 'mmsi-year-voyage_no'")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        VoyageId::try_from(v).map_err(|e| E::custom(format!("{e}")))
    }
}

impl Voyage {
    pub fn year(&self) -> i32 {
        self.id.year()
    }

    pub fn voyage_no(&self) -> u32 {
        self.id.voyage_no()
    }
}

impl From<&Voyage> for VoyageUpdate {
    /// The fields of the voyage edit form, pre-populated from the voyage.
    fn from(v: &Voyage) -> Self {
        Self {
            fishing_area: Some(v.fishing_area.clone()),
            catch_amount: Some(v.catch_amount),
            fish_species: Some(v.fish_species.clone()),
            status: Some(v.status),
            ..Default::default()
        }
    }
}

#[cfg(any(test, feature = "test"))]
mod test {
    use chrono::NaiveDate;

    use super::*;

    impl Voyage {
        pub fn test_default(mmsi: &str, year: i32, voyage_no: u32) -> Self {
            let mmsi = Mmsi::from(mmsi.to_string());
            let departure = NaiveDate::from_ymd_opt(year, 1, voyage_no.clamp(1, 28))
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap();
            Self {
                id: VoyageId::new(mmsi.clone(), year, voyage_no),
                mmsi,
                vessel_name: "해양호".to_string(),
                departure_port: "부산".to_string(),
                departure_date: Some(departure),
                arrival_port: None,
                arrival_date: None,
                fishing_area: "동해 남부".to_string(),
                track_points: vec![],
                catch_amount: 0.0,
                fish_species: "오징어".to_string(),
                status: VoyageStatus::InProgress,
            }
        }
    }
}
