use serde::Serialize;

/// Field spelling as captured from the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTokens {
    pub wavelength: String,
    pub oscillator_strength: String,
}

/// One computed electronic transition: wavelength (nm) and oscillator strength.
/// Records extracted from text keep the original tokens so `input.dat` repeats
/// them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcitedStateRecord {
    wavelength: f64,
    oscillator_strength: f64,
    #[serde(skip)]
    tokens: Option<RecordTokens>,
}

impl ExcitedStateRecord {
    pub const fn new(wavelength: f64, oscillator_strength: f64) -> Self {
        Self {
            wavelength,
            oscillator_strength,
            tokens: None,
        }
    }

    pub fn with_tokens(mut self, wavelength: &str, oscillator_strength: &str) -> Self {
        self.tokens = Some(RecordTokens {
            wavelength: wavelength.to_string(),
            oscillator_strength: oscillator_strength.to_string(),
        });
        self
    }

    pub const fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub const fn oscillator_strength(&self) -> f64 {
        self.oscillator_strength
    }

    pub fn tokens(&self) -> Option<&RecordTokens> {
        self.tokens.as_ref()
    }
}

/// Excited states extracted from one analyzed input file.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDataset {
    label: String,
    records: Vec<ExcitedStateRecord>,
}

impl StructureDataset {
    pub fn new(label: impl Into<String>, records: Vec<ExcitedStateRecord>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn records(&self) -> &[ExcitedStateRecord] {
        &self.records
    }

    pub fn excited_state_count(&self) -> usize {
        self.records.len()
    }
}

/// Ordered set of structures; the unit persisted to the intermediate dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Corpus {
    structures: Vec<StructureDataset>,
}

impl Corpus {
    pub fn new(structures: Vec<StructureDataset>) -> Self {
        Self { structures }
    }

    pub fn push(&mut self, structure: StructureDataset) {
        self.structures.push(structure);
    }

    pub fn structures(&self) -> &[StructureDataset] {
        &self.structures
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn excited_state_counts(&self) -> Vec<usize> {
        self.structures
            .iter()
            .map(StructureDataset::excited_state_count)
            .collect()
    }

    pub fn total_records(&self) -> usize {
        self.structures
            .iter()
            .map(StructureDataset::excited_state_count)
            .sum()
    }

    /// Records of every structure, concatenated in structure order.
    pub fn flattened_records(&self) -> impl Iterator<Item = &ExcitedStateRecord> + '_ {
        self.structures
            .iter()
            .flat_map(|structure| structure.records().iter())
    }
}
