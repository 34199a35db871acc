use fleet_core::{Facet, RegistryPort, Result};
use futures::try_join;
use tracing::instrument;

/// Options of the registry filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetLists {
    pub ports: Vec<Facet>,
    pub groups: Vec<Facet>,
    pub organizations: Vec<Facet>,
    pub business_types: Vec<Facet>,
}

impl FacetLists {
    /// Groups, organizations and business types, the filters of the ledger listing.
    #[instrument(skip(api))]
    pub async fn load<A: RegistryPort + ?Sized>(api: &A) -> Result<Self> {
        let (groups, organizations, business_types) =
            try_join!(api.groups(), api.organizations(), api.business_types())?;

        Ok(Self {
            ports: Vec::new(),
            groups,
            organizations,
            business_types,
        })
    }

    /// All four facets, the registry page also filters by port.
    #[instrument(skip(api))]
    pub async fn load_with_ports<A: RegistryPort + ?Sized>(api: &A) -> Result<Self> {
        let (ports, groups, organizations, business_types) = try_join!(
            api.ports(),
            api.groups(),
            api.organizations(),
            api.business_types()
        )?;

        Ok(Self {
            ports,
            groups,
            organizations,
            business_types,
        })
    }
}
