use serde::{Deserialize, Serialize};

/// Clinical severity categories used across prompts, results and the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    NoVisibleSigns,
    SpiderVeins,
    ReticularVeins,
    VaricoseVeins,
    SkinChanges,
    Ulcers,
}

/// Display tone for a stage badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageTone {
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::NoVisibleSigns,
        Stage::SpiderVeins,
        Stage::ReticularVeins,
        Stage::VaricoseVeins,
        Stage::SkinChanges,
        Stage::Ulcers,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::NoVisibleSigns => "No Visible Signs",
            Stage::SpiderVeins => "Stage 1 – Spider Veins",
            Stage::ReticularVeins => "Stage 2 – Reticular Veins",
            Stage::VaricoseVeins => "Stage 3 – Varicose Veins",
            Stage::SkinChanges => "Stage 4 – Skin Changes",
            Stage::Ulcers => "Stage 5 – Ulcers",
        }
    }

    /// Short clinical description, as used in the model prompt.
    pub fn description(self) -> &'static str {
        match self {
            Stage::NoVisibleSigns => "Clear, normal appearance",
            Stage::SpiderVeins => "Thin, web-like surface veins",
            Stage::ReticularVeins => "Blue-green veins 1-3mm diameter",
            Stage::VaricoseVeins => "Bulging veins ≥3mm diameter",
            Stage::SkinChanges => "Pigmentation, eczema, inflammation",
            Stage::Ulcers => "Open wounds, severe complications",
        }
    }

    /// Best-effort match of a free-text label, which may come straight from the model.
    pub fn from_label(label: &str) -> Option<Stage> {
        if label.contains("No Visible") {
            return Some(Stage::NoVisibleSigns);
        }
        Stage::ALL
            .into_iter()
            .skip(1)
            .zip(1..)
            .find(|(_, n)| label.contains(&format!("Stage {n}")))
            .map(|(stage, _)| stage)
    }

    pub fn tone(self) -> StageTone {
        match self {
            Stage::NoVisibleSigns => StageTone::Green,
            Stage::SpiderVeins => StageTone::Yellow,
            Stage::ReticularVeins => StageTone::Orange,
            Stage::VaricoseVeins => StageTone::Red,
            Stage::SkinChanges | Stage::Ulcers => StageTone::Gray,
        }
    }

    /// Tone for an arbitrary label; unknown labels render gray.
    pub fn tone_for_label(label: &str) -> StageTone {
        Stage::from_label(label)
            .map(Stage::tone)
            .unwrap_or(StageTone::Gray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_label(stage.label()), Some(stage));
        }
    }

    #[test]
    fn free_text_labels_are_classified_by_substring() {
        assert_eq!(Stage::from_label("Stage 2 - reticular"), Some(Stage::ReticularVeins));
        assert_eq!(Stage::from_label("No Visible Signs detected"), Some(Stage::NoVisibleSigns));
        assert_eq!(Stage::from_label("Unclear"), None);
    }

    #[test]
    fn tones_follow_severity() {
        assert_eq!(Stage::tone_for_label("No Visible Signs"), StageTone::Green);
        assert_eq!(Stage::tone_for_label("Stage 1 – Spider Veins"), StageTone::Yellow);
        assert_eq!(Stage::tone_for_label("Stage 3 – Varicose Veins"), StageTone::Red);
        assert_eq!(Stage::tone_for_label("Stage 5 – Ulcers"), StageTone::Gray);
        assert_eq!(Stage::tone_for_label("something else"), StageTone::Gray);
    }
}
