use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Whole-cent monetary amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Convert a dollar figure as published in rate tables, rounding to the nearest cent.
    pub fn from_dollars(dollars: f64) -> Self {
        if !dollars.is_finite() || dollars <= 0.0 {
            return Self::ZERO;
        }
        Self((dollars * 100.0).round() as u64)
    }

    pub fn dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn times(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }
}

impl std::ops::Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Self {
        iter.fold(Cents::ZERO, |acc, value| acc + value)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (index, digit) in whole.chars().enumerate() {
            if index > 0 && (whole.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        write!(f, "${}.{:02}", grouped, self.0 % 100)
    }
}

/// Monthly amounts for one 10% rating tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRates {
    pub base: Cents,
    #[serde(default)]
    pub spouse: Cents,
    #[serde(default)]
    pub first_child: Cents,
    #[serde(default)]
    pub additional_child: Cents,
}

/// Fixed monthly amounts for the special monthly compensation awards the engine grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmcRates {
    pub k: Cents,
    pub s: Cents,
    pub t: Cents,
    pub l: Cents,
}

/// A versioned compensation schedule injected into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub schedule: String,
    pub effective_date: NaiveDate,
    pub cola_percent: f64,
    pub tiers: BTreeMap<u8, TierRates>,
    /// Flat amount per dependent parent. Not tier-sensitive; placeholder pending review.
    pub parent_monthly: Cents,
    pub smc: SmcRates,
}

/// Errors raised while loading a caller-supplied rate table.
#[derive(Debug, thiserror::Error)]
pub enum RateTableError {
    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rate table CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid rate table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rate table row {kind}/{key}: {detail}")]
    InvalidRow {
        kind: String,
        key: String,
        detail: String,
    },
    #[error("rate table is missing the {0}% tier")]
    MissingTier(u8),
    #[error("rate table tier {0}% is not a 10% step between 0 and 100")]
    InvalidTier(u8),
    #[error("unsupported rate table format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),
}

/// Every tier a schedule must price.
pub const RATING_TIERS: [u8; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

impl RateTable {
    /// 2024 schedule (3.2% cost-of-living increase, effective 2023-12-01).
    pub fn standard() -> Self {
        const ROWS: [(u8, f64, f64, f64, f64); 11] = [
            (0, 0.0, 0.0, 0.0, 0.0),
            (10, 171.23, 0.0, 0.0, 0.0),
            (20, 338.49, 0.0, 0.0, 0.0),
            (30, 524.31, 62.00, 41.00, 31.00),
            (40, 755.28, 83.00, 55.00, 41.00),
            (50, 1075.16, 104.00, 69.00, 52.00),
            (60, 1361.88, 125.00, 83.00, 62.00),
            (70, 1716.28, 145.00, 97.00, 72.00),
            (80, 1995.01, 166.00, 110.00, 83.00),
            (90, 2241.91, 187.00, 124.00, 93.00),
            (100, 3737.85, 208.40, 139.37, 103.55),
        ];

        let tiers = ROWS
            .iter()
            .map(|(tier, base, spouse, first_child, additional_child)| {
                (
                    *tier,
                    TierRates {
                        base: Cents::from_dollars(*base),
                        spouse: Cents::from_dollars(*spouse),
                        first_child: Cents::from_dollars(*first_child),
                        additional_child: Cents::from_dollars(*additional_child),
                    },
                )
            })
            .collect();

        Self {
            schedule: "2024".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap_or_default(),
            cola_percent: 3.2,
            tiers,
            parent_monthly: Cents::from_dollars(50.00),
            smc: SmcRates {
                k: Cents::from_dollars(132.74),
                s: Cents::from_dollars(4183.28),
                t: Cents::from_dollars(10236.08),
                l: Cents::from_dollars(4667.78),
            },
        }
    }

    /// Calendar year the cost-of-living figures belong to.
    pub fn cola_year(&self) -> i32 {
        // Adjustments take effect each December for the following year.
        if self.effective_date.month() == 12 {
            self.effective_date.year() + 1
        } else {
            self.effective_date.year()
        }
    }

    /// Rates for the tier at or below `rating`.
    pub fn tier(&self, rating: u8) -> TierRates {
        let step = (rating.min(100) / 10) * 10;
        self.tiers
            .range(..=step)
            .next_back()
            .map(|(_, rates)| *rates)
            .unwrap_or_default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateTableError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let file = std::fs::File::open(path)?;

        match extension.as_str() {
            "csv" => Self::from_csv_reader(file),
            "json" => Self::from_json_reader(file),
            other => Err(RateTableError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let table: RateTable = serde_json::from_reader(reader)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from CSV: one row per tier plus `meta` rows for the schedule-wide
    /// amounts.
    ///
    /// ```text
    /// kind,key,base,spouse,first_child,additional_child
    /// meta,schedule,2025,,,
    /// meta,effective_date,2024-12-01,,,
    /// meta,cola_percent,2.5,,,
    /// meta,parent,51.00,,,
    /// smc,k,136.06,,,
    /// tier,30,537.42,63.00,42.00,32.00
    /// ```
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = RateTable {
            schedule: String::new(),
            effective_date: NaiveDate::default(),
            cola_percent: 0.0,
            tiers: BTreeMap::new(),
            parent_monthly: Cents::ZERO,
            smc: SmcRates::default(),
        };

        for record in csv_reader.deserialize::<RateRow>() {
            let row = record?;
            row.apply(&mut table)?;
        }

        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), RateTableError> {
        if let Some(tier) = self.tiers.keys().find(|tier| **tier > 100 || **tier % 10 != 0) {
            return Err(RateTableError::InvalidTier(*tier));
        }
        if let Some(missing) = RATING_TIERS
            .iter()
            .find(|tier| !self.tiers.contains_key(*tier))
        {
            return Err(RateTableError::MissingTier(*missing));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RateRow {
    kind: String,
    key: String,
    base: String,
    #[serde(default)]
    spouse: Option<f64>,
    #[serde(default)]
    first_child: Option<f64>,
    #[serde(default)]
    additional_child: Option<f64>,
}

impl RateRow {
    fn amount(&self) -> Result<Cents, RateTableError> {
        self.base
            .parse::<f64>()
            .map(Cents::from_dollars)
            .map_err(|_| self.invalid("base amount must be numeric"))
    }

    fn invalid(&self, detail: &str) -> RateTableError {
        RateTableError::InvalidRow {
            kind: self.kind.clone(),
            key: self.key.clone(),
            detail: detail.to_string(),
        }
    }

    fn apply(&self, table: &mut RateTable) -> Result<(), RateTableError> {
        match (self.kind.to_ascii_lowercase().as_str(), self.key.as_str()) {
            ("meta", "schedule") => table.schedule = self.base.clone(),
            ("meta", "effective_date") => {
                table.effective_date = NaiveDate::parse_from_str(&self.base, "%Y-%m-%d")
                    .map_err(|_| self.invalid("effective_date must be YYYY-MM-DD"))?;
            }
            ("meta", "cola_percent") => {
                table.cola_percent = self
                    .base
                    .parse()
                    .map_err(|_| self.invalid("cola_percent must be numeric"))?;
            }
            ("meta", "parent") => table.parent_monthly = self.amount()?,
            ("smc", "k") => table.smc.k = self.amount()?,
            ("smc", "s") => table.smc.s = self.amount()?,
            ("smc", "t") => table.smc.t = self.amount()?,
            ("smc", "l") => table.smc.l = self.amount()?,
            ("tier", key) => {
                let tier: u8 = key
                    .parse()
                    .map_err(|_| self.invalid("tier key must be a percentage"))?;
                table.tiers.insert(
                    tier,
                    TierRates {
                        base: self.amount()?,
                        spouse: Cents::from_dollars(self.spouse.unwrap_or_default()),
                        first_child: Cents::from_dollars(self.first_child.unwrap_or_default()),
                        additional_child: Cents::from_dollars(
                            self.additional_child.unwrap_or_default(),
                        ),
                    },
                );
            }
            _ => return Err(self.invalid("unknown row")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
kind,key,base,spouse,first_child,additional_child
meta,schedule,2025,,,
meta,effective_date,2024-12-01,,,
meta,cola_percent,2.5,,,
meta,parent,51.00,,,
smc,k,136.06,,,
smc,s,4287.86,,,
smc,t,10491.98,,,
smc,l,4784.47,,,
tier,0,0,,,
tier,10,175.51,,,
tier,20,346.95,,,
tier,30,537.42,63.00,42.00,32.00
tier,40,774.16,85.00,57.00,42.00
tier,50,1102.04,107.00,71.00,53.00
tier,60,1395.93,128.00,85.00,64.00
tier,70,1759.19,149.00,99.00,74.00
tier,80,2044.89,170.00,113.00,85.00
tier,90,2297.96,192.00,127.00,95.00
tier,100,3831.30,213.61,142.85,106.14
";

    #[test]
    fn formats_cents_with_grouping() {
        assert_eq!(Cents(373_785).to_string(), "$3,737.85");
        assert_eq!(Cents(1_023_608).to_string(), "$10,236.08");
        assert_eq!(Cents(5).to_string(), "$0.05");
        assert_eq!(Cents(100_000_000).to_string(), "$1,000,000.00");
    }

    #[test]
    fn standard_schedule_prices_every_tier() {
        let table = RateTable::standard();
        assert!(table.validate().is_ok());
        assert_eq!(table.tier(100).base, Cents(373_785));
        assert_eq!(table.cola_year(), 2024);
    }

    #[test]
    fn tier_lookup_snaps_down_to_step() {
        let table = RateTable::standard();
        assert_eq!(table.tier(35), table.tier(30));
        assert_eq!(table.tier(9), table.tier(0));
        assert_eq!(table.tier(250), table.tier(100));
    }

    #[test]
    fn loads_csv_schedule() {
        let table = RateTable::from_csv_reader(CSV.as_bytes()).expect("csv loads");
        assert_eq!(table.schedule, "2025");
        assert_eq!(table.cola_year(), 2025);
        assert_eq!(table.parent_monthly, Cents(5_100));
        assert_eq!(table.smc.k, Cents(13_606));
        assert_eq!(table.tier(30).first_child, Cents(4_200));
    }

    #[test]
    fn csv_missing_tier_is_rejected() {
        let truncated: String = CSV
            .lines()
            .filter(|line| !line.starts_with("tier,70"))
            .map(|line| format!("{line}\n"))
            .collect();
        match RateTable::from_csv_reader(truncated.as_bytes()) {
            Err(RateTableError::MissingTier(70)) => {}
            other => panic!("expected missing tier, got {other:?}"),
        }
    }

    #[test]
    fn csv_rejects_unknown_rows() {
        let bad = format!("{CSV}bonus,x,1.00,,,\n");
        match RateTable::from_csv_reader(bad.as_bytes()) {
            Err(RateTableError::InvalidRow { kind, .. }) => assert_eq!(kind, "bonus"),
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn json_round_trips_standard_schedule() {
        let json = serde_json::to_string(&RateTable::standard()).expect("serializes");
        let table = RateTable::from_json_reader(json.as_bytes()).expect("json loads");
        assert_eq!(table, RateTable::standard());
    }
}
