//! Fixed pedal table
//!
//! The controller has a fixed number of jacks. The table is filled once
//! while loading configuration and is read-only afterwards.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pedal::{ConfigError, PedalConfig};

/// Number of pedal slots (jacks) on the controller
pub const PEDAL_COUNT: usize = 3;

/// Configuration of all pedal slots
///
/// A `PedalTable` can only be obtained through validation, so the engine
/// never has to deal with inconsistent ranges at runtime. Deserializing
/// goes through [`PedalTable::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "[PedalConfig; PEDAL_COUNT]",
        into = "[PedalConfig; PEDAL_COUNT]"
    )
)]
pub struct PedalTable {
    slots: [PedalConfig; PEDAL_COUNT],
}

impl PedalTable {
    /// Validate and build a table
    ///
    /// Checks every slot on its own, then makes sure no pin is claimed by
    /// two slots.
    pub fn new(slots: [PedalConfig; PEDAL_COUNT]) -> Result<Self, ConfigError> {
        for (index, slot) in slots.iter().enumerate() {
            slot.validate(index)?;
        }

        for (index, slot) in slots.iter().enumerate() {
            if slot.is_unused() {
                continue;
            }
            for pin in slot.pins() {
                let taken = slots[..index]
                    .iter()
                    .filter(|other| !other.is_unused())
                    .any(|other| other.pins().any(|p| p == pin));
                if taken {
                    return Err(ConfigError::PinConflict(index, pin));
                }
            }
        }

        Ok(Self { slots })
    }

    /// Table with every slot unused
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the configuration of one slot
    pub fn get(&self, slot: usize) -> Option<&PedalConfig> {
        self.slots.get(slot)
    }

    /// Iterate over all slots in index order
    pub fn iter(&self) -> impl Iterator<Item = &PedalConfig> {
        self.slots.iter()
    }

    /// Number of slots with a pedal configured
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_unused()).count()
    }
}

impl TryFrom<[PedalConfig; PEDAL_COUNT]> for PedalTable {
    type Error = ConfigError;

    fn try_from(slots: [PedalConfig; PEDAL_COUNT]) -> Result<Self, Self::Error> {
        Self::new(slots)
    }
}

impl From<PedalTable> for [PedalConfig; PEDAL_COUNT] {
    fn from(table: PedalTable) -> Self {
        table.slots
    }
}
