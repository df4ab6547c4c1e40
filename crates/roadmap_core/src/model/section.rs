//! Top-level document sections.
//!
//! # Responsibility
//! - Name the six record arrays of the roadmap document.
//! - Describe per-section ID generation and floatable item lists.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Record array keys that hold floatable items inside a record.
pub const FLOATABLE_ITEM_KEYS: &[&str] = &[
    "roadmap",
    "designTools",
    "documentation",
    "specialNDT",
    "partAcceptance",
    "milestones",
];

/// One top-level array of the roadmap document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Programs,
    Products,
    MaterialSystems,
    PrintingSuppliers,
    PostProcessingSuppliers,
    FundingOpps,
}

/// Prefix-based record ID generation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdScheme {
    pub prefix: &'static str,
    /// Minimum digit count; `0` means no padding.
    pub width: usize,
}

impl IdScheme {
    /// Extracts the numeric suffix of `id` when it carries this prefix.
    pub fn numeric_suffix(&self, id: &str) -> Option<u64> {
        let digits = id.strip_prefix(self.prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    pub fn format(&self, number: u64) -> String {
        format!("{}{:0width$}", self.prefix, number, width = self.width)
    }

    /// Formats the ID after the highest suffix among `ids`.
    ///
    /// Returns `None` when the highest suffix is already `u64::MAX`.
    pub fn next_after<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Option<String> {
        let highest = ids
            .into_iter()
            .filter_map(|id| self.numeric_suffix(id))
            .max()
            .unwrap_or(0);
        highest.checked_add(1).map(|next| self.format(next))
    }
}

/// Scheme of `pursuitID` values nested in funding opportunities.
pub const PURSUIT_ID_SCHEME: IdScheme = IdScheme {
    prefix: "PUR",
    width: 0,
};

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Programs,
        Section::Products,
        Section::MaterialSystems,
        Section::PrintingSuppliers,
        Section::PostProcessingSuppliers,
        Section::FundingOpps,
    ];

    /// JSON key of this section in the document root.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Programs => "programs",
            Self::Products => "products",
            Self::MaterialSystems => "materialSystems",
            Self::PrintingSuppliers => "printingSuppliers",
            Self::PostProcessingSuppliers => "postProcessingSuppliers",
            Self::FundingOpps => "fundingOpps",
        }
    }

    /// Generated-ID scheme, if records of this section get automatic IDs.
    pub fn id_scheme(&self) -> Option<IdScheme> {
        match self {
            Self::Programs => Some(IdScheme {
                prefix: "PRG",
                width: 0,
            }),
            Self::Products => Some(IdScheme {
                prefix: "P",
                width: 3,
            }),
            _ => None,
        }
    }

    /// Whether records of this section carry roadmap items that may float.
    pub fn has_floatable_items(&self) -> bool {
        matches!(
            self,
            Self::Programs | Self::Products | Self::MaterialSystems
        )
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for unknown section names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl Display for UnknownSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown section `{}`", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for Section {
    type Err = UnknownSection;

    /// Accepts the JSON key (`materialSystems`) or a kebab/snake spelling
    /// (`material-systems`, `material_systems`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.key().to_ascii_lowercase() == folded)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
