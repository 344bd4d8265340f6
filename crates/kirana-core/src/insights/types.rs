//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Something needs attention now (stock-outs, runaway expenses)
    Alert,
    /// Something is going well worth leaning into
    Success,
    /// Observation or tip, no urgency
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alert" => Ok(Self::Alert),
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// How important an insight is to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Numeric rank (higher = more urgent). For display badges only;
    /// insight ordering follows rule order, not priority.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Action tag the UI can turn into a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Reorder from a known supplier
    Restock,
    /// No supplier covers the product yet
    AddSupplier,
    /// Move slow stock with a promotion
    Promote,
    /// Lean into high-margin products
    ReviewPricing,
    /// Expenses are eating revenue
    ReviewExpenses,
    /// Start logging expenses
    TrackExpenses,
    /// Nothing recorded yet
    RecordSale,
}

impl SuggestedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restock => "restock",
            Self::AddSupplier => "add_supplier",
            Self::Promote => "promote",
            Self::ReviewPricing => "review_pricing",
            Self::ReviewExpenses => "review_expenses",
            Self::TrackExpenses => "track_expenses",
            Self::RecordSale => "record_sale",
        }
    }
}

impl fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A generated recommendation. Produced fresh on every engine run and never
/// persisted; `key` only gives list renderers a stable handle within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub key: String,
    pub kind: InsightKind,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub action: Option<SuggestedAction>,
}

impl Insight {
    pub fn new(
        key: impl Into<String>,
        kind: InsightKind,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            priority,
            title: title.into(),
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: SuggestedAction) -> Self {
        self.action = Some(action);
        self
    }
}
