use async_trait::async_trait;
use fleet_core::{Mmsi, Result, TrackHtml, TrackList, TrackMonth, TrackPort};
use serde::Deserialize;
use tracing::instrument;

use crate::FleetApiClient;

#[derive(Debug, Deserialize)]
struct Years {
    #[serde(default)]
    years: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct Months {
    #[serde(default)]
    months: Vec<TrackMonth>,
}

#[async_trait]
impl TrackPort for FleetApiClient {
    #[instrument(skip(self))]
    async fn track_list(&self, mmsi: &Mmsi) -> Result<TrackList> {
        self.get(&format!("/tracks/list/{mmsi}")).await
    }

    #[instrument(skip(self))]
    async fn track_years(&self, mmsi: &Mmsi) -> Result<Vec<i32>> {
        Ok(self
            .get::<Years>(&format!("/tracks/years/{mmsi}"))
            .await?
            .years)
    }

    #[instrument(skip(self))]
    async fn track_months(&self, mmsi: &Mmsi, year: i32) -> Result<Vec<TrackMonth>> {
        Ok(self
            .get::<Months>(&format!("/tracks/months/{mmsi}/{year}"))
            .await?
            .months)
    }

    #[instrument(skip(self))]
    async fn track_html(&self, mmsi: &Mmsi, filename: &str) -> Result<TrackHtml> {
        self.get(&format!("/tracks/html/{mmsi}/{filename}")).await
    }
}
