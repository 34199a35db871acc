use std::sync::Arc;

use fleet_core::{
    DashboardOutbound, Mmsi, TrackHtml, TrackList, TrackPoint, TrackPort, VesselInfo, VesselPort,
    Voyage, VoyageId, VoyagePort,
};
use tracing::instrument;

use super::{apply_voyage, apply_voyages};
use crate::{
    ViewStatus,
    forms::VoyageEditForm,
    selection::{
        CascadeVessel, Loaded, SelectionCascade, VoyageRequest, VoyagesRequest, fetch_voyages,
    },
};

type Cascade = SelectionCascade<VesselInfo, Option<Voyage>>;

/// Monthly track renderings of the selected vessel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackBrowser {
    pub mmsi: Option<Mmsi>,
    pub list: TrackList,
    pub year: Option<i32>,
    pub html: Option<TrackHtml>,
}

/// Vessel search, voyage list and voyage detail with its edit dialog.
pub struct VoyageInquiryPage {
    api: Arc<dyn DashboardOutbound>,
    pub search: String,
    vessels: Vec<VesselInfo>,
    cascade: Cascade,
    edit: Option<VoyageEditForm>,
    track_dialog: bool,
    tracks: TrackBrowser,
    pub status: ViewStatus,
}

#[instrument(skip(api))]
pub async fn fetch_voyage<A: VoyagePort + ?Sized>(
    api: &A,
    request: VoyageRequest,
) -> Loaded<Option<Voyage>> {
    Loaded {
        ticket: request.ticket,
        result: api.voyage(&request.voyage_id).await.map(Some),
    }
}

impl VoyageInquiryPage {
    pub fn new(api: Arc<dyn DashboardOutbound>) -> Self {
        Self {
            api,
            search: String::new(),
            vessels: Vec::new(),
            cascade: Cascade::new(),
            edit: None,
            track_dialog: false,
            tracks: TrackBrowser::default(),
            status: ViewStatus::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.search().await;
    }

    /// Searches vessels by name or mmsi and drops the current selection.
    /// A failed search keeps the previous results.
    #[instrument(skip(self), fields(search = %self.search))]
    pub async fn search(&mut self) {
        self.status.start();

        let search = Some(self.search.trim()).filter(|s| !s.is_empty());
        if let Some(vessels) = self
            .status
            .check("search vessels", self.api.vessels(search).await)
        {
            self.vessels = vessels;
            self.cascade.reset();
            self.edit = None;
        }

        self.status.finish();
    }

    pub fn select_vessel(&mut self, vessel: VesselInfo) -> Option<VoyagesRequest> {
        self.edit = None;
        self.track_dialog = false;
        self.tracks = TrackBrowser::default();
        self.cascade.select_vessel(vessel)
    }

    pub fn apply_voyages(&mut self, loaded: Loaded<Vec<Voyage>>) -> bool {
        apply_voyages(&mut self.cascade, &mut self.status, loaded)
    }

    #[instrument(skip(self, vessel), fields(mmsi = %vessel.mmsi))]
    pub async fn choose_vessel(&mut self, vessel: VesselInfo) {
        self.status.start();
        if let Some(request) = self.select_vessel(vessel) {
            let loaded = fetch_voyages(&*self.api, request).await;
            self.apply_voyages(loaded);
        }
        self.status.finish();
    }

    pub fn select_year(&mut self, year: Option<i32>) {
        self.edit = None;
        self.cascade.select_year(year);
    }

    pub fn select_voyage(&mut self, voyage_id: VoyageId) -> Option<VoyageRequest> {
        self.edit = None;
        self.track_dialog = false;
        self.cascade.select_voyage(voyage_id)
    }

    pub fn apply_voyage(&mut self, loaded: Loaded<Option<Voyage>>) -> bool {
        apply_voyage(&mut self.cascade, &mut self.status, "load voyage", loaded)
    }

    /// Selects a voyage and fetches its detail, including the track points.
    #[instrument(skip(self))]
    pub async fn choose_voyage(&mut self, voyage_id: VoyageId) {
        self.status.start();
        if let Some(request) = self.select_voyage(voyage_id) {
            let loaded = fetch_voyage(&*self.api, request).await;
            self.apply_voyage(loaded);
        }
        self.status.finish();
    }

    pub fn open_edit(&mut self) -> bool {
        self.edit = self.voyage().map(VoyageEditForm::from);
        self.edit.is_some()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut VoyageEditForm> {
        self.edit.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Saves the edit dialog, then shows the updated voyage and fetches the voyage list again.
    /// The dialog stays open if saving fails.
    #[instrument(skip(self))]
    pub async fn save_edit(&mut self) {
        let Some(update) = self.edit.as_ref().map(VoyageEditForm::to_update) else {
            return;
        };
        let Some(request) = self.cascade.reload_voyage() else {
            return;
        };

        self.status.start();
        match self.api.update_voyage(&request.voyage_id, &update).await {
            Ok(voyage) => {
                self.cascade.finish_voyage(request.ticket, Some(voyage));
                self.edit = None;
                if let Some(request) = self.cascade.reload_voyages() {
                    let loaded = fetch_voyages(&*self.api, request).await;
                    self.apply_voyages(loaded);
                }
            }
            Err(e) => {
                self.cascade.abandon_voyage(request.ticket);
                self.status.fail("update voyage", &e);
            }
        }
        self.status.finish();
    }

    pub fn open_track_dialog(&mut self) -> bool {
        self.track_dialog = self.voyage().is_some();
        self.track_dialog
    }

    pub fn close_track_dialog(&mut self) {
        self.track_dialog = false;
    }

    pub fn track_points(&self) -> &[TrackPoint] {
        self.voyage()
            .map(|v| v.track_points.as_slice())
            .unwrap_or_default()
    }

    /// Loads the monthly track files of the selected vessel, the newest year is preselected.
    #[instrument(skip(self))]
    pub async fn open_tracks(&mut self) {
        let Some(mmsi) = self.cascade.vessel().and_then(CascadeVessel::mmsi).cloned() else {
            return;
        };

        self.status.start();
        if let Some(list) = self
            .status
            .check("load tracks", self.api.track_list(&mmsi).await)
        {
            self.tracks = TrackBrowser {
                year: list.years.first().copied(),
                mmsi: Some(mmsi),
                list,
                html: None,
            };
        }
        self.status.finish();
    }

    pub fn select_track_year(&mut self, year: i32) {
        self.tracks.year = Some(year);
        self.tracks.html = None;
    }

    #[instrument(skip(self))]
    pub async fn open_track(&mut self, filename: &str) {
        let Some(mmsi) = self.tracks.mmsi.clone() else {
            return;
        };

        self.status.start();
        if let Some(html) = self
            .status
            .check("load track", self.api.track_html(&mmsi, filename).await)
        {
            self.tracks.html = Some(html);
        }
        self.status.finish();
    }

    pub fn vessels(&self) -> &[VesselInfo] {
        &self.vessels
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Detail of the selected voyage.
    pub fn voyage(&self) -> Option<&Voyage> {
        self.cascade.downstream().as_ref()
    }

    pub fn edit_form(&self) -> Option<&VoyageEditForm> {
        self.edit.as_ref()
    }

    pub fn is_track_dialog_open(&self) -> bool {
        self.track_dialog
    }

    pub fn tracks(&self) -> &TrackBrowser {
        &self.tracks
    }
}
