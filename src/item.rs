//! The [`Item`] entity and the scoring-adjacent queries it exposes.
//!
//! Items do not carry their own clock: every query that depends on "now"
//! (expiry, days remaining) takes the logical current date explicitly, since
//! the current date is process-wide state owned by [`crate::simulator::Simulator`]
//! rather than by any one item. See [`ExpiryDate`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Dimensions, Position};
use crate::ids::{ContainerId, ItemId};

/// Either an absolute calendar date, or the `"N/A"` sentinel meaning the
/// item never expires. A first-class value, not an error case (Design Notes
/// §9): ingest is expected to pass the literal string `"N/A"` through
/// [`ExpiryDate::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryDate {
    Date(NaiveDate),
    None,
}

impl ExpiryDate {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw == "N/A" {
            return Ok(ExpiryDate::None);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(ExpiryDate::Date)
            .map_err(|_| Error::InvalidInput(format!("unparseable expiry date {raw:?}")))
    }

    /// Days remaining until expiry relative to `today`; negative once past
    /// due. `None` (no expiry) has no day count.
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        match self {
            ExpiryDate::Date(d) => Some((*d - today).num_days()),
            ExpiryDate::None => None,
        }
    }

    /// True once `today` has reached or passed the expiry date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.days_until(today).map(|d| d <= 0).unwrap_or(false)
    }
}

/// Where an item currently sits, if anywhere. Truth for the item/container
/// relationship lives here; `Container::items` is a derived index (Design
/// Notes §9) kept in sync by [`crate::store`]'s mutation primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentLocation {
    pub container_id: ContainerId,
    pub position: Position,
    pub rotation: Dimensions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub native_dims: Dimensions,
    pub mass: f64,
    pub priority: i32,
    pub expiry: ExpiryDate,
    pub usage_limit: u32,
    pub preferred_zone: String,
    pub is_waste: bool,
    pub current_location: Option<CurrentLocation>,
}

impl Item {
    /// Validates and constructs an item from an ingest record. Dimensions
    /// and mass must be strictly positive, priority in `[1,100]`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ItemId,
        name: String,
        native_dims: Dimensions,
        mass: f64,
        priority: i32,
        expiry: ExpiryDate,
        usage_limit: u32,
        preferred_zone: String,
    ) -> Result<Self> {
        if !native_dims.is_positive() {
            return Err(Error::InvalidInput(format!(
                "item {id} dimensions must be strictly positive"
            )));
        }
        if mass <= 0.0 {
            return Err(Error::InvalidInput(format!("item {id} mass must be strictly positive")));
        }
        if !(1..=100).contains(&priority) {
            return Err(Error::InvalidInput(format!(
                "item {id} priority {priority} out of range [1,100]"
            )));
        }
        Ok(Item {
            id,
            name,
            native_dims,
            mass,
            priority,
            expiry,
            usage_limit,
            preferred_zone,
            is_waste: false,
            current_location: None,
        })
    }

    pub fn volume(&self) -> f64 {
        self.native_dims.volume()
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry.is_expired(today)
    }

    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry.days_until(today)
    }

    /// Effective priority used for ordering and urgency displays (§4.3).
    /// Pure: unlike the source this never mutates `is_waste` as a side
    /// effect of being read for display; [`crate::waste::WasteCollector::identify_waste`]
    /// is the sole place that flips the flag (see `DESIGN.md`).
    pub fn effective_priority(&self, today: NaiveDate) -> f64 {
        let mut score = self.priority as f64;

        match self.days_until_expiry(today) {
            Some(days) if days <= 0 => score += 20.0,
            Some(days) if days < 30 => score += (30 - days) as f64 / 3.0,
            _ => {}
        }

        if self.usage_limit == 0 {
            score += 10.0;
        } else if self.usage_limit <= 5 {
            score += (5 - self.usage_limit) as f64 * 3.0;
        }

        score.min(130.0)
    }
}
