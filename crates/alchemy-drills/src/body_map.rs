//! Body-map somatic tracking: which zones were marked, how intensely, and with
//! what sensation. A snapshot is saved as a history payload.

use serde::{Deserialize, Serialize};

pub const MAX_INTENSITY: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyZone {
    Head,
    Throat,
    Shoulders,
    Chest,
    Belly,
    Back,
    Arms,
    Hands,
    Legs,
    Feet,
}

impl BodyZone {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Head => "ראש",
            Self::Throat => "גרון",
            Self::Shoulders => "כתפיים",
            Self::Chest => "חזה",
            Self::Belly => "בטן",
            Self::Back => "גב",
            Self::Arms => "ידיים",
            Self::Hands => "כפות ידיים",
            Self::Legs => "רגליים",
            Self::Feet => "כפות רגליים",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyMark {
    pub zone: BodyZone,
    /// 0–10.
    pub intensity: u8,
    #[serde(default)]
    pub sensation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SomaticSnapshot {
    #[serde(default)]
    pub marks: Vec<BodyMark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SomaticSnapshot {
    /// One mark per zone (the most intense wins), intensities clamped, zero-intensity marks dropped.
    pub fn normalized(&self) -> Self {
        let mut marks: Vec<BodyMark> = Vec::new();
        for mark in &self.marks {
            let intensity = mark.intensity.min(MAX_INTENSITY);
            if intensity == 0 {
                continue;
            }
            match marks.iter_mut().find(|m| m.zone == mark.zone) {
                Some(existing) if existing.intensity >= intensity => {}
                Some(existing) => {
                    existing.intensity = intensity;
                    existing.sensation = mark.sensation.trim().to_string();
                }
                None => marks.push(BodyMark {
                    zone: mark.zone,
                    intensity,
                    sensation: mark.sensation.trim().to_string(),
                }),
            }
        }
        marks.sort_by_key(|m| m.zone);
        Self {
            marks,
            note: self
                .note
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }

    /// Most intense zone; the earliest mark wins ties.
    pub fn peak(&self) -> Option<&BodyMark> {
        self.marks
            .iter()
            .filter(|m| m.intensity > 0)
            .fold(None, |best: Option<&BodyMark>, m| match best {
                Some(b) if b.intensity >= m.intensity => Some(b),
                _ => Some(m),
            })
    }

    pub fn peak_zone(&self) -> Option<BodyZone> {
        self.peak().map(|m| m.zone)
    }

    pub fn total_load(&self) -> u32 {
        self.marks
            .iter()
            .map(|m| u32::from(m.intensity.min(MAX_INTENSITY)))
            .sum()
    }

    /// One-line summary used as the history entry title.
    pub fn summarize(&self) -> String {
        let snapshot = self.normalized();
        match snapshot.peak() {
            None => "לא סומנו תחושות בגוף".to_string(),
            Some(peak) => {
                let mut line = format!(
                    "{} אזורים סומנו; השיא ב{} ({}/{})",
                    snapshot.marks.len(),
                    peak.zone.label(),
                    peak.intensity,
                    MAX_INTENSITY
                );
                if !peak.sensation.is_empty() {
                    line.push_str(&format!(": {}", peak.sensation));
                }
                line
            }
        }
    }
}
