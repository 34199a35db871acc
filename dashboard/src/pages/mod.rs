//! Page controllers. Each page owns its view state and exposes one handler per user action,
//! failures end up in the page's [`ViewStatus`](crate::ViewStatus).

pub mod auction_entry;
pub mod ledger_list;
pub mod overview;
pub mod vessel_registry;
pub mod voyage_inquiry;

pub use auction_entry::AuctionEntryPage;
pub use ledger_list::LedgerListPage;
pub use overview::OverviewPage;
pub use vessel_registry::VesselRegistryPage;
pub use voyage_inquiry::VoyageInquiryPage;

use fleet_core::Voyage;

use crate::{
    ViewStatus,
    selection::{CascadeVessel, Loaded, SelectionCascade},
};

/// Applies fetched voyages, a failure is only reported if the request is still current.
fn apply_voyages<V: CascadeVessel, D: Default>(
    cascade: &mut SelectionCascade<V, D>,
    status: &mut ViewStatus,
    loaded: Loaded<Vec<Voyage>>,
) -> bool {
    match loaded.result {
        Ok(voyages) => cascade.finish_voyages(loaded.ticket, voyages),
        Err(e) => {
            if cascade.abandon_voyages(loaded.ticket) {
                status.fail("load voyages", &e);
            }
            false
        }
    }
}

/// Applies the state fetched for the selected voyage, see [`apply_voyages`].
fn apply_voyage<V: CascadeVessel, D: Default>(
    cascade: &mut SelectionCascade<V, D>,
    status: &mut ViewStatus,
    action: &'static str,
    loaded: Loaded<D>,
) -> bool {
    match loaded.result {
        Ok(downstream) => cascade.finish_voyage(loaded.ticket, downstream),
        Err(e) => {
            if cascade.abandon_voyage(loaded.ticket) {
                status.fail(action, &e);
            }
            false
        }
    }
}
