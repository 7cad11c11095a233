use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a selectable condition, carried unchanged through recomputation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(pub String);

impl ConditionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the body a paired-limb rating affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Bilateral,
}

impl Side {
    pub const fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Bilateral => "bilateral",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Some(Side::Left),
            "right" | "r" => Some(Side::Right),
            "bilateral" | "both" => Some(Side::Bilateral),
            _ => None,
        }
    }
}

/// Paired-extremity category used to group left/right ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbType {
    Arm,
    Elbow,
    Wrist,
    Hand,
    Shoulder,
    Hip,
    Knee,
    Ankle,
    Foot,
    Leg,
}

impl LimbType {
    pub const fn label(self) -> &'static str {
        match self {
            LimbType::Arm => "arm",
            LimbType::Elbow => "elbow",
            LimbType::Wrist => "wrist",
            LimbType::Hand => "hand",
            LimbType::Shoulder => "shoulder",
            LimbType::Hip => "hip",
            LimbType::Knee => "knee",
            LimbType::Ankle => "ankle",
            LimbType::Foot => "foot",
            LimbType::Leg => "leg",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let limb = match value.trim().to_ascii_lowercase().as_str() {
            "arm" => LimbType::Arm,
            "elbow" => LimbType::Elbow,
            "wrist" => LimbType::Wrist,
            "hand" => LimbType::Hand,
            "shoulder" => LimbType::Shoulder,
            "hip" => LimbType::Hip,
            "knee" => LimbType::Knee,
            "ankle" => LimbType::Ankle,
            "foot" => LimbType::Foot,
            "leg" => LimbType::Leg,
            _ => return None,
        };
        Some(limb)
    }
}

/// Entitlement capabilities attached to a condition when the catalog is defined.
///
/// Rule evaluators dispatch on these tags; the display name never takes part in
/// eligibility decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTag {
    LossOfUse,
    LossOfUseCreativeOrgan,
    LossOfUseExtremity,
    Amputation,
    BlindnessOneEye,
    DeafnessBothEars,
    Aphonia,
    TraumaticBrainInjury,
}

impl TriggerTag {
    pub const ALL: [TriggerTag; 8] = [
        TriggerTag::LossOfUse,
        TriggerTag::LossOfUseCreativeOrgan,
        TriggerTag::LossOfUseExtremity,
        TriggerTag::Amputation,
        TriggerTag::BlindnessOneEye,
        TriggerTag::DeafnessBothEars,
        TriggerTag::Aphonia,
        TriggerTag::TraumaticBrainInjury,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            TriggerTag::LossOfUse => "loss_of_use",
            TriggerTag::LossOfUseCreativeOrgan => "loss_of_use_creative_organ",
            TriggerTag::LossOfUseExtremity => "loss_of_use_extremity",
            TriggerTag::Amputation => "amputation",
            TriggerTag::BlindnessOneEye => "blindness_one_eye",
            TriggerTag::DeafnessBothEars => "deafness_both_ears",
            TriggerTag::Aphonia => "aphonia",
            TriggerTag::TraumaticBrainInjury => "traumatic_brain_injury",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.label() == normalized)
    }

    /// Anatomical loss or loss of use that supports the (k) award.
    pub const fn supports_k_award(self) -> bool {
        !matches!(self, TriggerTag::TraumaticBrainInjury)
    }

    /// Extremity loss counted toward the (l) review flag.
    pub const fn is_extremity_loss(self) -> bool {
        matches!(self, TriggerTag::Amputation | TriggerTag::LossOfUseExtremity)
    }
}

/// One disability's numeric contribution to the combined rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingInput {
    pub id: ConditionId,
    pub name: String,
    pub value: u8,
    #[serde(default)]
    pub is_bilateral: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limb_type: Option<LimbType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<TriggerTag>,
}

impl RatingInput {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: u8) -> Self {
        Self {
            id: ConditionId::new(id),
            name: name.into(),
            value,
            is_bilateral: false,
            side: None,
            limb_type: None,
            triggers: Vec::new(),
        }
    }

    /// Mark the rating as a paired-limb entry.
    pub fn paired(mut self, limb_type: LimbType, side: Side) -> Self {
        self.is_bilateral = true;
        self.limb_type = Some(limb_type);
        self.side = Some(side);
        self
    }

    pub fn with_triggers(mut self, triggers: impl IntoIterator<Item = TriggerTag>) -> Self {
        self.triggers.extend(triggers);
        self
    }

    pub fn has_trigger(&self, predicate: impl Fn(TriggerTag) -> bool) -> bool {
        self.triggers.iter().any(|tag| predicate(*tag))
    }
}

/// Household members who raise the monthly compensation amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependents {
    #[serde(default)]
    pub spouse: bool,
    #[serde(default)]
    pub children: u8,
    #[serde(default)]
    pub parents: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_tags_round_trip_through_labels() {
        for tag in TriggerTag::ALL {
            assert_eq!(TriggerTag::parse(tag.label()), Some(tag));
        }
        assert_eq!(TriggerTag::parse(" Amputation "), Some(TriggerTag::Amputation));
        assert_eq!(TriggerTag::parse("unknown"), None);
    }

    #[test]
    fn rating_input_deserializes_with_defaults() {
        let input: RatingInput = serde_json::from_str(
            r#"{"id":"knee-l","name":"Left knee strain","value":10,"isBilateral":true,"side":"left","limbType":"knee"}"#,
        )
        .expect("valid rating json");

        assert_eq!(input.id, ConditionId::new("knee-l"));
        assert!(input.is_bilateral);
        assert_eq!(input.side, Some(Side::Left));
        assert_eq!(input.limb_type, Some(LimbType::Knee));
        assert!(input.triggers.is_empty());
    }

    #[test]
    fn side_and_limb_parsers_accept_loose_input() {
        assert_eq!(Side::parse("BOTH"), Some(Side::Bilateral));
        assert_eq!(Side::parse("r"), Some(Side::Right));
        assert_eq!(LimbType::parse(" Knee"), Some(LimbType::Knee));
        assert_eq!(LimbType::parse("tail"), None);
    }
}
