use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{ConditionId, LimbType, TriggerTag};

/// One selectable condition with the schedular tiers it can be rated at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: ConditionId,
    pub name: String,
    pub ratings: Vec<u8>,
    #[serde(default)]
    pub bilateral_eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limb_type: Option<LimbType>,
    #[serde(default)]
    pub triggers: Vec<TriggerTag>,
}

impl CatalogEntry {
    /// Define an entry, deriving its trigger tags from the display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>, ratings: &[u8]) -> Self {
        let name = name.into();
        let triggers = infer_triggers(&name);
        Self {
            id: ConditionId::new(id),
            name,
            ratings: ratings.to_vec(),
            bilateral_eligible: false,
            limb_type: None,
            triggers,
        }
    }

    pub fn paired(mut self, limb_type: LimbType) -> Self {
        self.bilateral_eligible = true;
        self.limb_type = Some(limb_type);
        self
    }

    pub fn offers(&self, value: u8) -> bool {
        self.ratings.contains(&value)
    }
}

const EXTREMITY_WORDS: [&str; 9] = [
    "hand", "hands", "foot", "feet", "arm", "arms", "leg", "legs", "extremity",
];

/// Derive trigger tags from a display name.
///
/// Runs when a catalog entry or a free-form selection arrives without explicit tags;
/// evaluation never looks at names.
pub fn infer_triggers(name: &str) -> Vec<TriggerTag> {
    let lowered = name.to_ascii_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    let has_word = |needle: &str| words.iter().any(|word| *word == needle);

    let mut tags = Vec::new();
    let creative_organ =
        lowered.contains("creative organ") || lowered.contains("erectile dysfunction");
    if creative_organ {
        tags.push(TriggerTag::LossOfUseCreativeOrgan);
    }
    if lowered.contains("loss of use") {
        let extremity = EXTREMITY_WORDS.iter().any(|limb| has_word(*limb));
        if extremity {
            tags.push(TriggerTag::LossOfUseExtremity);
        } else if !creative_organ {
            tags.push(TriggerTag::LossOfUse);
        }
    }
    if lowered.contains("amputat") || lowered.contains("amputee") {
        tags.push(TriggerTag::Amputation);
    }
    if has_word("blindness") || lowered.contains("loss of one eye") {
        tags.push(TriggerTag::BlindnessOneEye);
    }
    if has_word("deafness") {
        tags.push(TriggerTag::DeafnessBothEars);
    }
    if has_word("aphonia") || lowered.contains("loss of voice") {
        tags.push(TriggerTag::Aphonia);
    }
    if lowered.contains("traumatic brain injury") || has_word("tbi") {
        tags.push(TriggerTag::TraumaticBrainInjury);
    }
    tags
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read condition catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid condition catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("condition {id}: rating tier '{value}' is not a 10% step between 0 and 100")]
    InvalidRating { id: String, value: String },
    #[error("condition {id}: unknown limb type '{value}'")]
    UnknownLimb { id: String, value: String },
    #[error("condition {id}: unknown trigger tag '{value}'")]
    UnknownTrigger { id: String, value: String },
    #[error("condition {0} is defined more than once")]
    Duplicate(String),
}

fn is_schedular_tier(rating: u8) -> bool {
    rating <= 100 && rating % 10 == 0
}

/// Ordered set of selectable conditions keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCatalog {
    entries: BTreeMap<ConditionId, CatalogEntry>,
}

impl ConditionCatalog {
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, entry: CatalogEntry) -> Result<(), CatalogError> {
        if let Some(tier) = entry.ratings.iter().find(|tier| !is_schedular_tier(**tier)) {
            return Err(CatalogError::InvalidRating {
                id: entry.id.0.clone(),
                value: tier.to_string(),
            });
        }
        if self.entries.contains_key(&entry.id) {
            return Err(CatalogError::Duplicate(entry.id.0));
        }
        self.entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    pub fn get(&self, id: &ConditionId) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A small built-in catalog covering the common claim patterns.
    pub fn standard() -> Self {
        let entries = [
            CatalogEntry::new("ptsd", "Post-traumatic stress disorder", &[0, 10, 30, 50, 70, 100]),
            CatalogEntry::new("tbi", "Traumatic brain injury residuals", &[0, 10, 40, 70, 100]),
            CatalogEntry::new("lumbar", "Lumbosacral strain", &[0, 10, 20, 40, 50, 100]),
            CatalogEntry::new("migraine", "Migraine headaches", &[0, 10, 30, 50]),
            CatalogEntry::new("sleep-apnea", "Obstructive sleep apnea", &[0, 30, 50, 100]),
            CatalogEntry::new("tinnitus", "Tinnitus", &[10]),
            CatalogEntry::new("hearing", "Bilateral hearing loss", &[0, 10, 20, 30, 40, 50]),
            CatalogEntry::new(
                "ed",
                "Erectile dysfunction (loss of use of creative organ)",
                &[0, 20],
            ),
            CatalogEntry::new("knee-left", "Left knee instability", &[0, 10, 20, 30])
                .paired(LimbType::Knee),
            CatalogEntry::new("knee-right", "Right knee instability", &[0, 10, 20, 30])
                .paired(LimbType::Knee),
            CatalogEntry::new("shoulder-left", "Left shoulder impingement", &[0, 10, 20, 30])
                .paired(LimbType::Shoulder),
            CatalogEntry::new("shoulder-right", "Right shoulder impingement", &[0, 10, 20, 30])
                .paired(LimbType::Shoulder),
            CatalogEntry::new(
                "amputation-leg-left",
                "Below-knee amputation, left leg",
                &[40, 60],
            )
            .paired(LimbType::Leg),
            CatalogEntry::new(
                "amputation-leg-right",
                "Below-knee amputation, right leg",
                &[40, 60],
            )
            .paired(LimbType::Leg),
        ];

        let mut catalog = Self::default();
        for entry in entries {
            catalog.entries.insert(entry.id.clone(), entry);
        }
        catalog
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a catalog from CSV with `id,name,ratings,bilateral,limb_type,triggers`
    /// columns. Multi-valued cells are `|`-separated; a blank `triggers` cell derives the
    /// tags from the name.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut catalog = Self::default();

        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = record?;
            catalog.insert(row.into_entry()?)?;
        }

        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    ratings: String,
    #[serde(default, deserialize_with = "flag")]
    bilateral: bool,
    #[serde(default)]
    limb_type: Option<String>,
    #[serde(default)]
    triggers: Option<String>,
}

impl CatalogRow {
    fn into_entry(self) -> Result<CatalogEntry, CatalogError> {
        let ratings = split_cell(&self.ratings)
            .map(|value| {
                value
                    .parse::<u8>()
                    .ok()
                    .filter(|rating| is_schedular_tier(*rating))
                    .ok_or_else(|| CatalogError::InvalidRating {
                        id: self.id.clone(),
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let limb_type = match self.limb_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(LimbType::parse(raw).ok_or_else(|| CatalogError::UnknownLimb {
                id: self.id.clone(),
                value: raw.to_string(),
            })?),
        };

        let triggers = match self.triggers.as_deref().map(str::trim) {
            None | Some("") => infer_triggers(&self.name),
            Some(raw) => split_cell(raw)
                .map(|value| {
                    TriggerTag::parse(value).ok_or_else(|| CatalogError::UnknownTrigger {
                        id: self.id.clone(),
                        value: value.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(CatalogEntry {
            id: ConditionId::new(self.id),
            name: self.name,
            ratings,
            bilateral_eligible: self.bilateral && limb_type.is_some(),
            limb_type,
            triggers,
        })
    }
}

fn split_cell(cell: &str) -> impl Iterator<Item = &str> {
    cell.split('|')
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        raw.as_deref().map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "yes" | "y" | "1")
    ))
}
