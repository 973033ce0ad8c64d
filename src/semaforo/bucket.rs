use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deadline urgency category, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    PossibleLoss,
    Critical,
    Attention,
    Upcoming,
    Normal,
}

/// Presentation data for a bucket, kept apart from the domain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketDisplay {
    pub bucket: Bucket,
    pub label: &'static str,
    pub color: &'static str,
    pub order: u8,
}

const DISPLAY: [BucketDisplay; 5] = [
    BucketDisplay { bucket: Bucket::PossibleLoss, label: "Possível perda", color: "#ec4899", order: 0 },
    BucketDisplay { bucket: Bucket::Critical, label: "Crítico", color: "#ef4444", order: 1 },
    BucketDisplay { bucket: Bucket::Attention, label: "Atenção", color: "#eab308", order: 2 },
    BucketDisplay { bucket: Bucket::Upcoming, label: "Próximo", color: "#3b82f6", order: 3 },
    BucketDisplay { bucket: Bucket::Normal, label: "Normal", color: "#22c55e", order: 4 },
];

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::PossibleLoss,
        Bucket::Critical,
        Bucket::Attention,
        Bucket::Upcoming,
        Bucket::Normal,
    ];

    pub fn display(self) -> &'static BucketDisplay {
        &DISPLAY[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.display().label
    }

    pub fn color(self) -> &'static str {
        self.display().color
    }

    pub fn order(self) -> u8 {
        self.display().order
    }

    pub fn from_label(label: &str) -> Option<Bucket> {
        DISPLAY.iter().find(|d| d.label == label).map(|d| d.bucket)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Bucket {
    type Err = String;

    /// Accepts the display label or the snake_case identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(bucket) = Bucket::from_label(s.trim()) {
            return Ok(bucket);
        }
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "possible_loss" => Ok(Bucket::PossibleLoss),
            "critical" => Ok(Bucket::Critical),
            "attention" => Ok(Bucket::Attention),
            "upcoming" => Ok(Bucket::Upcoming),
            "normal" => Ok(Bucket::Normal),
            other => Err(format!("unknown bucket: {}", other)),
        }
    }
}
