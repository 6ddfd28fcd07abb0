//! Personal genotype calls keyed by rsID

use std::collections::HashMap;

/// Raw calls meaning "position not determined"
pub const NO_CALLS: [&str; 4] = ["--", "II", "DD", "NN"];

/// Check if a raw genotype string is a no-call marker
pub fn is_no_call(genotype: &str) -> bool {
    NO_CALLS.contains(&genotype)
}

/// Check if an identifier is an rsID or a 23andMe internal (`i`) id
///
/// Expects a lowercased identifier.
pub fn is_accepted_identifier(rsid: &str) -> bool {
    rsid.starts_with("rs") || rsid.starts_with('i')
}

/// One genotype call from a personal data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserGenotype {
    /// Raw call such as `"AG"`
    pub genotype: String,
    pub chromosome: String,
    pub position: String,
}

/// Why a genotype row was not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenotypeSkip {
    /// Empty rsID or genotype
    MissingField,
    /// Identifier is neither `rs…` nor `i…`
    UnsupportedId,
    /// One of [`NO_CALLS`]
    NoCall,
}

/// rsID → call, iterating in first-insertion order
///
/// Re-inserting an rsID replaces its call but keeps its original position
/// in iteration order.
#[derive(Debug, Clone, Default)]
pub struct GenotypeMap {
    positions: HashMap<String, usize>,
    entries: Vec<(String, UserGenotype)>,
}

impl GenotypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store one raw row
    ///
    /// The rsID is lowercased. No-calls are dropped entirely rather than
    /// stored empty.
    pub fn insert_raw(
        &mut self,
        rsid: &str,
        genotype: &str,
        chromosome: &str,
        position: &str,
    ) -> Result<(), GenotypeSkip> {
        if rsid.is_empty() || genotype.is_empty() {
            return Err(GenotypeSkip::MissingField);
        }
        let rsid = rsid.to_lowercase();
        if !is_accepted_identifier(&rsid) {
            return Err(GenotypeSkip::UnsupportedId);
        }
        if is_no_call(genotype) {
            return Err(GenotypeSkip::NoCall);
        }

        self.insert(
            rsid,
            UserGenotype {
                genotype: genotype.to_string(),
                chromosome: chromosome.to_string(),
                position: position.to_string(),
            },
        );
        Ok(())
    }

    /// Store a call under an already-normalized rsID
    pub fn insert(&mut self, rsid: String, call: UserGenotype) {
        match self.positions.get(&rsid) {
            Some(&idx) => self.entries[idx].1 = call,
            None => {
                self.positions.insert(rsid.clone(), self.entries.len());
                self.entries.push((rsid, call));
            }
        }
    }

    pub fn get(&self, rsid: &str) -> Option<&UserGenotype> {
        self.positions.get(rsid).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, rsid: &str) -> bool {
        self.positions.contains_key(rsid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserGenotype)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
