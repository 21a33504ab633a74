//! pr-substances: critical-constant data for the Peng-Robinson engine.
//!
//! Provides:
//! - A built-in catalog of common pure fluids
//! - YAML/JSON substance tables supplied by the user
//! - [`Layered`] lookup so a user table can shadow the catalog
//!
//! Every source stores critical pressure in MPa and hands the engine Pa.

pub mod catalog;
pub mod error;
pub mod table;

pub use catalog::{
    BuiltinCatalog, CatalogEntry, builtin_catalog, filter_builtin_catalog, find_builtin,
};
pub use error::{SubstanceError, SubstanceResult};
pub use table::{SubstanceRecord, SubstanceTable};

use pr_eos::{SubstanceLookup, SubstanceParameters};

/// Tries `primary` first, then `fallback`.
#[derive(Debug, Clone)]
pub struct Layered<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P, F> Layered<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: SubstanceLookup, F: SubstanceLookup> SubstanceLookup for Layered<P, F> {
    fn lookup(&self, name: &str) -> Option<SubstanceParameters> {
        self.primary
            .lookup(name)
            .or_else(|| self.fallback.lookup(name))
    }
}

/// The user table at `path` layered over the built-in catalog, or the
/// catalog alone when no path is given.
pub fn default_lookup(path: Option<&std::path::Path>) -> SubstanceResult<Box<dyn SubstanceLookup>> {
    match path {
        Some(path) => Ok(Box::new(Layered::new(
            SubstanceTable::load(path)?,
            BuiltinCatalog,
        ))),
        None => Ok(Box::new(BuiltinCatalog)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_shadows_fallback() {
        let table = SubstanceTable::from_yaml_str(
            "substances:\n  - {name: methane, tc_k: 190.6, pc_mpa: 4.6, omega: 0.011}\n",
        )
        .unwrap();
        let lookup = Layered::new(table, BuiltinCatalog);

        assert_eq!(lookup.lookup("Methane").unwrap().tc, 190.6);
        assert_eq!(lookup.lookup("propane").unwrap().tc, 369.83);
        assert!(lookup.lookup("unobtainium").is_none());
    }

    #[test]
    fn catalog_alone_without_path() {
        let lookup = default_lookup(None).unwrap();
        assert!(lookup.lookup("water").is_some());
    }
}
