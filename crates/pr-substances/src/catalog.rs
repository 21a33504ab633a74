//! Built-in critical constants for common pure fluids.
//!
//! Critical pressures are tabulated in MPa and converted to Pa by
//! [`CatalogEntry::parameters`].

use pr_eos::{SubstanceLookup, SubstanceParameters};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    /// Critical temperature [K]
    pub tc_k: f64,
    /// Critical pressure [MPa]
    pub pc_mpa: f64,
    /// Acentric factor
    pub omega: f64,
}

impl CatalogEntry {
    /// Case-insensitive exact match on id, display name or any alias.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self.display_name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive substring match; an empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }
        std::iter::once(self.canonical_id)
            .chain(std::iter::once(self.display_name))
            .chain(self.aliases.iter().copied())
            .any(|s| s.to_ascii_lowercase().contains(&query))
    }

    /// Critical constants in engine units (`pc` in Pa).
    pub fn parameters(&self) -> SubstanceParameters {
        SubstanceParameters::new(self.tc_k, self.pc_mpa * 1.0e6, self.omega)
    }
}

const fn entry(
    canonical_id: &'static str,
    display_name: &'static str,
    aliases: &'static [&'static str],
    tc_k: f64,
    pc_mpa: f64,
    omega: f64,
) -> CatalogEntry {
    CatalogEntry {
        canonical_id,
        display_name,
        aliases,
        tc_k,
        pc_mpa,
        omega,
    }
}

const BUILTIN_CATALOG: [CatalogEntry; 30] = [
    // Hydrocarbons
    entry("CH4", "Methane", &["methane"], 190.56, 4.599, 0.011),
    entry("C2H6", "Ethane", &["ethane"], 305.32, 4.872, 0.099),
    entry("C2H4", "Ethylene", &["ethylene", "ethene"], 282.34, 5.041, 0.087),
    entry("C3H8", "Propane", &["propane", "n-propane"], 369.83, 4.248, 0.152),
    entry("C3H6", "Propylene", &["propylene", "propene"], 364.90, 4.600, 0.142),
    entry("nC4H10", "n-Butane", &["butane", "nbutane"], 425.12, 3.796, 0.200),
    entry("iC4H10", "Isobutane", &["i-butane", "ibutane"], 407.80, 3.640, 0.184),
    entry("nC5H12", "n-Pentane", &["pentane", "npentane"], 469.70, 3.370, 0.252),
    entry("iC5H12", "Isopentane", &["i-pentane", "ipentane"], 460.40, 3.380, 0.229),
    entry("nC6H14", "n-Hexane", &["hexane", "nhexane"], 507.60, 3.025, 0.300),
    entry("nC7H16", "n-Heptane", &["heptane", "nheptane"], 540.20, 2.740, 0.350),
    entry("nC8H18", "n-Octane", &["octane", "noctane"], 568.70, 2.490, 0.399),
    entry("C6H6", "Benzene", &["benzene"], 562.05, 4.895, 0.210),
    entry("C7H8", "Toluene", &["toluene"], 591.75, 4.108, 0.264),
    // Permanent gases
    entry("N2", "Nitrogen", &["nitrogen"], 126.20, 3.398, 0.037),
    entry("O2", "Oxygen", &["oxygen"], 154.58, 5.043, 0.022),
    entry("Ar", "Argon", &["argon"], 150.86, 4.898, -0.002),
    entry("H2", "Hydrogen", &["hydrogen"], 33.19, 1.313, -0.216),
    entry("He", "Helium", &["helium", "helium-4"], 5.19, 0.227, -0.390),
    entry("Kr", "Krypton", &["krypton"], 209.40, 5.502, 0.005),
    entry("Xe", "Xenon", &["xenon"], 289.73, 5.840, 0.008),
    entry("CO", "Carbon Monoxide", &["carbon monoxide"], 132.85, 3.494, 0.045),
    entry("CO2", "Carbon Dioxide", &["carbon dioxide"], 304.12, 7.374, 0.225),
    // Polar and other
    entry("H2O", "Water", &["water", "steam"], 647.14, 22.064, 0.344),
    entry("NH3", "Ammonia", &["ammonia", "R717"], 405.40, 11.353, 0.257),
    entry("H2S", "Hydrogen Sulfide", &["hydrogen sulfide"], 373.40, 8.963, 0.090),
    entry("SO2", "Sulfur Dioxide", &["sulfur dioxide"], 430.80, 7.884, 0.245),
    entry("CH3OH", "Methanol", &["methanol"], 512.64, 8.097, 0.565),
    entry("C2H5OH", "Ethanol", &["ethanol"], 513.92, 6.148, 0.649),
    entry("R134a", "R134a", &["hfc-134a", "tetrafluoroethane"], 374.21, 4.059, 0.327),
];

pub fn builtin_catalog() -> &'static [CatalogEntry] {
    &BUILTIN_CATALOG
}

pub fn filter_builtin_catalog(query: &str) -> Vec<&'static CatalogEntry> {
    BUILTIN_CATALOG
        .iter()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

pub fn find_builtin(name: &str) -> Option<&'static CatalogEntry> {
    BUILTIN_CATALOG.iter().find(|entry| entry.matches_name(name))
}

/// [`SubstanceLookup`] over the built-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl SubstanceLookup for BuiltinCatalog {
    fn lookup(&self, name: &str) -> Option<SubstanceParameters> {
        find_builtin(name).map(CatalogEntry::parameters)
    }
}
