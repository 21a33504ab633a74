//! User-supplied substance tables (YAML or JSON).
//!
//! ```yaml
//! substances:
//!   - name: methane
//!     aliases: [CH4]
//!     tc_k: 190.6
//!     pc_mpa: 4.6
//!     omega: 0.011
//! ```

use crate::catalog::builtin_catalog;
use crate::error::{SubstanceError, SubstanceResult};
use pr_eos::{SubstanceLookup, SubstanceParameters};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One table row. Critical pressure is stored in MPa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub tc_k: f64,
    pub pc_mpa: f64,
    pub omega: f64,
}

impl SubstanceRecord {
    pub fn parameters(&self) -> SubstanceParameters {
        SubstanceParameters::new(self.tc_k, self.pc_mpa * 1.0e6, self.omega)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TableFile {
    #[serde(default)]
    substances: Vec<SubstanceRecord>,
}

/// Validated, case-insensitively indexed substance table.
#[derive(Debug, Clone, Default)]
pub struct SubstanceTable {
    records: Vec<SubstanceRecord>,
    index: HashMap<String, usize>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl SubstanceTable {
    pub fn new(records: Vec<SubstanceRecord>) -> SubstanceResult<Self> {
        let mut index = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(SubstanceError::InvalidRecord {
                    name: record.name.clone(),
                    reason: "empty name".to_string(),
                });
            }
            record
                .parameters()
                .validate()
                .map_err(|e| SubstanceError::InvalidRecord {
                    name: record.name.clone(),
                    reason: e.to_string(),
                })?;

            let names = std::iter::once(&record.name).chain(&record.aliases);
            for name in names {
                if index.insert(key(name), i).is_some_and(|prev| prev != i) {
                    return Err(SubstanceError::DuplicateName { name: name.clone() });
                }
            }
        }
        Ok(Self { records, index })
    }

    /// Table holding a copy of the built-in catalog.
    pub fn builtin() -> Self {
        let records = builtin_catalog()
            .iter()
            .map(|entry| SubstanceRecord {
                name: entry.display_name.to_string(),
                aliases: std::iter::once(entry.canonical_id)
                    .chain(entry.aliases.iter().copied())
                    .filter(|alias| !alias.eq_ignore_ascii_case(entry.display_name))
                    .map(str::to_string)
                    .collect(),
                tc_k: entry.tc_k,
                pc_mpa: entry.pc_mpa,
                omega: entry.omega,
            })
            .collect();
        // Catalog names are checked unambiguous by its own tests.
        Self::new(records).unwrap_or_default()
    }

    pub fn from_yaml_str(text: &str) -> SubstanceResult<Self> {
        let file: TableFile = serde_yaml::from_str(text)?;
        Self::new(file.substances)
    }

    pub fn from_json_str(text: &str) -> SubstanceResult<Self> {
        let file: TableFile = serde_json::from_str(text)?;
        Self::new(file.substances)
    }

    /// Load a table, choosing the format from the file extension.
    pub fn load(path: &Path) -> SubstanceResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;
        let table = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            "json" => Self::from_json_str(&content)?,
            _ => return Err(SubstanceError::UnsupportedFormat { extension }),
        };
        tracing::debug!(
            path = %path.display(),
            substances = table.len(),
            "loaded substance table"
        );
        Ok(table)
    }

    pub fn to_yaml_string(&self) -> SubstanceResult<String> {
        Ok(serde_yaml::to_string(&TableFile {
            substances: self.records.clone(),
        })?)
    }

    pub fn to_json_string(&self) -> SubstanceResult<String> {
        Ok(serde_json::to_string_pretty(&TableFile {
            substances: self.records.clone(),
        })?)
    }

    pub fn records(&self) -> &[SubstanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SubstanceRecord> {
        self.index.get(&key(name)).map(|&i| &self.records[i])
    }
}

impl SubstanceLookup for SubstanceTable {
    fn lookup(&self, name: &str) -> Option<SubstanceParameters> {
        self.get(name).map(SubstanceRecord::parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = "\
substances:
  - name: Methane
    aliases: [CH4]
    tc_k: 190.6
    pc_mpa: 4.6
    omega: 0.011
  - name: refrigerant-x
    tc_k: 350.0
    pc_mpa: 4.0
    omega: 0.3
";

    #[test]
    fn yaml_table_lookup() {
        let table = SubstanceTable::from_yaml_str(YAML).unwrap();
        assert_eq!(table.len(), 2);
        let params = table.lookup("ch4").unwrap();
        assert_eq!(params.tc, 190.6);
        assert!((params.pc - 4.6e6).abs() < 1e-6);
        assert_eq!(table.lookup("METHANE"), Some(params));
        assert!(table.lookup("unobtainium").is_none());
    }

    #[test]
    fn json_table_lookup() {
        let json = r#"{"substances": [{"name": "argon", "tc_k": 150.86, "pc_mpa": 4.898, "omega": -0.002}]}"#;
        let table = SubstanceTable::from_json_str(json).unwrap();
        assert_eq!(table.get("Argon").unwrap().omega, -0.002);
    }

    #[test]
    fn duplicate_names_rejected() {
        let yaml = "\
substances:
  - {name: a, tc_k: 100.0, pc_mpa: 1.0, omega: 0.0}
  - {name: b, aliases: [A], tc_k: 100.0, pc_mpa: 1.0, omega: 0.0}
";
        let err = SubstanceTable::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SubstanceError::DuplicateName { name } if name == "A"));
    }

    #[test]
    fn alias_repeating_own_name_is_fine() {
        let yaml = "substances:\n  - {name: Water, aliases: [water], tc_k: 647.1, pc_mpa: 22.055, omega: 0.345}\n";
        assert!(SubstanceTable::from_yaml_str(yaml).is_ok());
    }

    #[test]
    fn invalid_constants_rejected() {
        let yaml = "substances:\n  - {name: bad, tc_k: 0.0, pc_mpa: 1.0, omega: 0.0}\n";
        let err = SubstanceTable::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SubstanceError::InvalidRecord { name, .. } if name == "bad"));
    }

    #[test]
    fn builtin_table_mirrors_catalog() {
        let table = SubstanceTable::builtin();
        assert_eq!(table.len(), builtin_catalog().len());
        assert_eq!(
            table.lookup("CO2"),
            crate::BuiltinCatalog.lookup("carbon dioxide")
        );
    }

    #[test]
    fn yaml_roundtrip() {
        let table = SubstanceTable::from_yaml_str(YAML).unwrap();
        let again = SubstanceTable::from_yaml_str(&table.to_yaml_string().unwrap()).unwrap();
        assert_eq!(again.records(), table.records());
    }
}
