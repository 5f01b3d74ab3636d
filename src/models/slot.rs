use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use super::RecommendationItem;

/// One of the four carousel regions on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Featured,
    Popular,
    Adventure,
    Action,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Featured, Slot::Popular, Slot::Adventure, Slot::Action];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Featured => "featured",
            Slot::Popular => "popular",
            Slot::Adventure => "adventure",
            Slot::Action => "action",
        }
    }

    /// Labels this slot can legitimately end up with
    pub fn labels(&self) -> &'static [SourceLabel] {
        match self {
            Slot::Featured => &[
                SourceLabel::ColdStart,
                SourceLabel::CollaborativeUserBased,
                SourceLabel::General,
            ],
            Slot::Popular => &[
                SourceLabel::Association,
                SourceLabel::TopRatedFallback,
                SourceLabel::General,
            ],
            Slot::Adventure => &[SourceLabel::ItemBased, SourceLabel::TopRatedFallback],
            Slot::Action => &[SourceLabel::ContentBased, SourceLabel::General],
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "featured" => Ok(Slot::Featured),
            "popular" => Ok(Slot::Popular),
            "adventure" => Ok(Slot::Adventure),
            "action" => Ok(Slot::Action),
            other => Err(format!("unknown slot '{}'", other)),
        }
    }
}

/// Which strategy ultimately produced a slot's items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceLabel {
    General,
    ColdStart,
    CollaborativeUserBased,
    Association,
    TopRatedFallback,
    ItemBased,
    ContentBased,
}

impl Display for SourceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceLabel::General => "general",
            SourceLabel::ColdStart => "cold-start",
            SourceLabel::CollaborativeUserBased => "collaborative-user-based",
            SourceLabel::Association => "association",
            SourceLabel::TopRatedFallback => "top-rated-fallback",
            SourceLabel::ItemBased => "item-based",
            SourceLabel::ContentBased => "content-based",
        };
        f.write_str(name)
    }
}

/// Items and label for one slot, always produced together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotResult {
    pub slot: Slot,
    pub label: SourceLabel,
    pub items: Vec<RecommendationItem>,
}

impl SlotResult {
    pub fn new(slot: Slot, label: SourceLabel, items: Vec<RecommendationItem>) -> Self {
        debug_assert!(
            slot.labels().contains(&label),
            "label {} is not valid for slot {}",
            label,
            slot
        );
        Self { slot, label, items }
    }

    pub fn empty(slot: Slot, label: SourceLabel) -> Self {
        Self::new(slot, label, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_parsing() {
        assert_eq!("featured".parse::<Slot>().unwrap(), Slot::Featured);
        assert_eq!("Action".parse::<Slot>().unwrap(), Slot::Action);
        assert!("sidebar".parse::<Slot>().is_err());
    }

    #[test]
    fn test_label_serialization_matches_display() {
        for label in [
            SourceLabel::General,
            SourceLabel::ColdStart,
            SourceLabel::CollaborativeUserBased,
            SourceLabel::Association,
            SourceLabel::TopRatedFallback,
            SourceLabel::ItemBased,
            SourceLabel::ContentBased,
        ] {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label));
        }
    }

    #[test]
    fn test_every_slot_has_a_general_or_fallback_label() {
        assert!(Slot::Featured.labels().contains(&SourceLabel::General));
        assert!(Slot::Popular.labels().contains(&SourceLabel::TopRatedFallback));
        assert!(Slot::Adventure.labels().contains(&SourceLabel::TopRatedFallback));
        assert!(Slot::Action.labels().contains(&SourceLabel::General));
    }
}
