use serde::{Deserialize, Serialize};

/// Monthly track rendering stored for a vessel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackFile {
    pub filename: String,
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackMonth {
    pub month: u32,
    pub count: u64,
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackList {
    #[serde(default, rename = "data")]
    pub files: Vec<TrackFile>,
    #[serde(default)]
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackHtml {
    pub html: String,
    pub filename: String,
}

impl TrackList {
    pub fn files_of_year(&self, year: i32) -> impl Iterator<Item = &TrackFile> {
        self.files.iter().filter(move |f| f.year == year)
    }
}
