//! Vessel → year → voyage selection shared by the voyage inquiry and ledger entry pages.
//!
//! Every selection clears the state below it. Requests issued for a selection carry a [`Ticket`],
//! a result is only applied while its ticket is still the current one, so a late response for a
//! previously selected vessel or voyage is dropped.

use fleet_core::{Mmsi, VesselInfo, VesselRegistry, Voyage, VoyageFilter, VoyageId, VoyagePort};
use itertools::Itertools;
use tracing::instrument;

/// A vessel that can head the selection chain.
pub trait CascadeVessel: Clone {
    fn mmsi(&self) -> Option<&Mmsi>;
    fn vessel_name(&self) -> &str;
}

impl CascadeVessel for VesselInfo {
    /// `/vessels` returns blank mmsis as empty strings, they are no key.
    fn mmsi(&self) -> Option<&Mmsi> {
        Some(&self.mmsi).filter(|m| !m.as_str().trim().is_empty())
    }
    fn vessel_name(&self) -> &str {
        &self.vessel_name
    }
}

impl CascadeVessel for VesselRegistry {
    fn mmsi(&self) -> Option<&Mmsi> {
        self.mmsi.as_ref()
    }
    fn vessel_name(&self) -> &str {
        &self.vessel_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    NoVessel,
    VesselSelected,
    YearSelected,
    VoyageSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Fetch of the voyages of the selected vessel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyagesRequest {
    pub ticket: Ticket,
    pub mmsi: Mmsi,
}

/// Fetch of whatever hangs below the selected voyage, e.g. its ledger lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyageRequest {
    pub ticket: Ticket,
    pub voyage_id: VoyageId,
}

/// Outcome of a request, to be applied to the cascade that issued it.
#[derive(Debug)]
pub struct Loaded<T> {
    pub ticket: Ticket,
    pub result: fleet_core::Result<T>,
}

#[instrument(skip(api))]
pub async fn fetch_voyages<A: VoyagePort + ?Sized>(
    api: &A,
    request: VoyagesRequest,
) -> Loaded<Vec<Voyage>> {
    let filter = VoyageFilter {
        mmsi: Some(request.mmsi),
        ..Default::default()
    };
    Loaded {
        ticket: request.ticket,
        result: api.voyages(&filter).await,
    }
}

#[derive(Debug, Clone)]
pub struct SelectionCascade<V, D = ()> {
    vessel: Option<V>,
    voyages: Vec<Voyage>,
    year: Option<i32>,
    voyage: Option<VoyageId>,
    downstream: D,
    voyages_ticket: Option<Ticket>,
    voyage_ticket: Option<Ticket>,
    generation: u64,
}

impl<V: CascadeVessel, D: Default> Default for SelectionCascade<V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: CascadeVessel, D: Default> SelectionCascade<V, D> {
    pub fn new() -> Self {
        Self {
            vessel: None,
            voyages: Vec::new(),
            year: None,
            voyage: None,
            downstream: D::default(),
            voyages_ticket: None,
            voyage_ticket: None,
            generation: 0,
        }
    }

    pub fn level(&self) -> Level {
        match (&self.vessel, self.year, &self.voyage) {
            (None, _, _) => Level::NoVessel,
            (Some(_), _, Some(_)) => Level::VoyageSelected,
            (Some(_), Some(_), None) => Level::YearSelected,
            (Some(_), None, None) => Level::VesselSelected,
        }
    }

    /// Selects `vessel` and drops everything selected or loaded below it.
    ///
    /// Returns the voyage fetch to issue, a vessel without mmsi has no voyages and gets none.
    pub fn select_vessel(&mut self, vessel: V) -> Option<VoyagesRequest> {
        self.clear_below_vessel();
        let mmsi = vessel.mmsi().cloned();
        self.vessel = Some(vessel);

        let mmsi = mmsi?;
        let ticket = self.next_ticket();
        self.voyages_ticket = Some(ticket);
        Some(VoyagesRequest { ticket, mmsi })
    }

    /// Fetches the voyages of the selected vessel again while keeping the year and voyage.
    pub fn reload_voyages(&mut self) -> Option<VoyagesRequest> {
        let mmsi = self.vessel.as_ref()?.mmsi()?.clone();
        let ticket = self.next_ticket();
        self.voyages_ticket = Some(ticket);
        Some(VoyagesRequest { ticket, mmsi })
    }

    /// Applies a voyage fetch result, returns false if the result is stale.
    pub fn finish_voyages(&mut self, ticket: Ticket, voyages: Vec<Voyage>) -> bool {
        if self.voyages_ticket != Some(ticket) {
            return false;
        }
        self.voyages_ticket = None;
        self.voyages = voyages;
        true
    }

    pub fn abandon_voyages(&mut self, ticket: Ticket) -> bool {
        if self.voyages_ticket != Some(ticket) {
            return false;
        }
        self.voyages_ticket = None;
        true
    }

    /// Narrows the fetched voyages to `year`, nothing is fetched.
    pub fn select_year(&mut self, year: Option<i32>) {
        self.year = year;
        self.clear_voyage();
    }

    pub fn select_voyage(&mut self, voyage_id: VoyageId) -> Option<VoyageRequest> {
        self.vessel.as_ref()?;
        self.downstream = D::default();
        self.voyage = Some(voyage_id.clone());
        let ticket = self.next_ticket();
        self.voyage_ticket = Some(ticket);
        Some(VoyageRequest { ticket, voyage_id })
    }

    /// Fetches the downstream state of the selected voyage again, e.g. after a write.
    /// The current state is kept until the result arrives.
    pub fn reload_voyage(&mut self) -> Option<VoyageRequest> {
        let voyage_id = self.voyage.clone()?;
        let ticket = self.next_ticket();
        self.voyage_ticket = Some(ticket);
        Some(VoyageRequest { ticket, voyage_id })
    }

    pub fn finish_voyage(&mut self, ticket: Ticket, downstream: D) -> bool {
        if self.voyage_ticket != Some(ticket) {
            return false;
        }
        self.voyage_ticket = None;
        self.downstream = downstream;
        true
    }

    pub fn abandon_voyage(&mut self, ticket: Ticket) -> bool {
        if self.voyage_ticket != Some(ticket) {
            return false;
        }
        self.voyage_ticket = None;
        true
    }

    pub fn clear_voyage(&mut self) {
        self.voyage = None;
        self.voyage_ticket = None;
        self.downstream = D::default();
    }

    /// Returns the chain to [`Level::NoVessel`], in flight results are dropped.
    pub fn reset(&mut self) {
        self.clear_below_vessel();
        self.vessel = None;
    }

    pub fn vessel(&self) -> Option<&V> {
        self.vessel.as_ref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn voyage_id(&self) -> Option<&VoyageId> {
        self.voyage.as_ref()
    }

    pub fn selected_voyage(&self) -> Option<&Voyage> {
        let id = self.voyage.as_ref()?;
        self.voyages.iter().find(|v| &v.id == id)
    }

    pub fn voyages(&self) -> &[Voyage] {
        &self.voyages
    }

    /// Voyages of the selected year, all voyages if no year is selected.
    pub fn visible_voyages(&self) -> impl Iterator<Item = &Voyage> {
        self.voyages
            .iter()
            .filter(|v| self.year.is_none_or(|y| v.year() == y))
    }

    /// Distinct years of the fetched voyages, newest first.
    pub fn years(&self) -> Vec<i32> {
        self.voyages
            .iter()
            .map(Voyage::year)
            .unique()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect()
    }

    pub fn downstream(&self) -> &D {
        &self.downstream
    }

    pub fn is_loading_voyages(&self) -> bool {
        self.voyages_ticket.is_some()
    }

    pub fn is_loading_voyage(&self) -> bool {
        self.voyage_ticket.is_some()
    }

    fn clear_below_vessel(&mut self) {
        self.voyages.clear();
        self.voyages_ticket = None;
        self.year = None;
        self.clear_voyage();
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }
}
