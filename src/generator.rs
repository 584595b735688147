//! Random outfit generation with a staggered reveal.
//!
//! A run picks one random item per slot category and hands back a reveal
//! schedule. The caller feeds due [`RevealEvent`]s back through
//! [`OutfitGenerator::reveal`]; events carry the generation id of the run that
//! scheduled them, so anything left over from an earlier run is ignored.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::{Category, ClothingItem, Occasion, Outfit};
use crate::store::WardrobeStore;
use crate::wardrobe::{self, ValidationError, WardrobeError};

/// Slots filled by the generator, in reveal order
pub const SLOT_ORDER: [Category; 4] = [
    Category::Top,
    Category::Bottom,
    Category::Shoes,
    Category::Outerwear,
];

pub const INITIAL_REVEAL_DELAY: Duration = Duration::from_millis(300);
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(350);

/// Uniformly pick one item per slot. Slots with no items are left out.
pub fn pick_outfit<R: Rng + ?Sized>(
    items: &[ClothingItem],
    rng: &mut R,
) -> Vec<(Category, ClothingItem)> {
    SLOT_ORDER
        .iter()
        .filter_map(|&category| {
            let candidates: Vec<&ClothingItem> =
                items.iter().filter(|item| item.category == category).collect();
            candidates
                .choose(&mut *rng)
                .map(|item| (category, (*item).clone()))
        })
        .collect()
}

/// Delay of the reveal at `index` in the populated-slot sequence
pub fn reveal_delay(index: usize) -> Duration {
    INITIAL_REVEAL_DELAY + REVEAL_INTERVAL * index as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealEvent {
    pub generation: u64,
    pub slot: Category,
}

/// A reveal to fire `delay` after the run started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReveal {
    pub delay: Duration,
    pub event: RevealEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub slot: Category,
    pub item: ClothingItem,
    pub revealed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutfitDraft {
    pub generation: u64,
    pub picks: Vec<Pick>, // slot order
}

impl OutfitDraft {
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn revealed_count(&self) -> usize {
        self.picks.iter().filter(|p| p.revealed).count()
    }

    pub fn pick(&self, slot: Category) -> Option<&Pick> {
        self.picks.iter().find(|p| p.slot == slot)
    }
}

#[derive(Debug, Default)]
pub struct OutfitGenerator {
    generation: u64,
    draft: Option<OutfitDraft>,
}

impl OutfitGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new run, discarding any previous draft and its reveal state.
    /// Returns the reveals to schedule, in slot order with increasing delays.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        items: &[ClothingItem],
        rng: &mut R,
    ) -> Vec<ScheduledReveal> {
        self.generation += 1;
        let generation = self.generation;

        let picks: Vec<Pick> = pick_outfit(items, rng)
            .into_iter()
            .map(|(slot, item)| Pick {
                slot,
                item,
                revealed: false,
            })
            .collect();

        let schedule = picks
            .iter()
            .enumerate()
            .map(|(index, pick)| ScheduledReveal {
                delay: reveal_delay(index),
                event: RevealEvent {
                    generation,
                    slot: pick.slot,
                },
            })
            .collect();

        info!(generation, picks = picks.len(), "generated outfit draft");
        self.draft = Some(OutfitDraft { generation, picks });
        schedule
    }

    /// Apply a reveal. Returns false for events from an earlier run or for
    /// slots that are not part of the current draft.
    pub fn reveal(&mut self, event: RevealEvent) -> bool {
        if event.generation != self.generation {
            debug!(
                stale = event.generation,
                current = self.generation,
                "ignoring reveal from a previous run"
            );
            return false;
        }
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        match draft.picks.iter_mut().find(|p| p.slot == event.slot) {
            Some(pick) => {
                pick.revealed = true;
                true
            }
            None => false,
        }
    }

    pub fn draft(&self) -> Option<&OutfitDraft> {
        self.draft.as_ref()
    }

    /// Every populated slot has been revealed (immediately true for an empty draft)
    pub fn is_complete(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|draft| draft.picks.iter().all(|p| p.revealed))
    }

    pub fn is_revealing(&self) -> bool {
        self.draft.is_some() && !self.is_complete()
    }

    /// Saving is allowed once a non-empty draft is fully revealed
    pub fn can_save(&self) -> bool {
        self.is_complete() && self.draft.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Items of the current draft in slot order
    pub fn picked_items(&self) -> Vec<ClothingItem> {
        self.draft
            .as_ref()
            .map(|draft| draft.picks.iter().map(|p| p.item.clone()).collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.draft = None;
    }

    /// Save exactly the current picks as a new outfit
    pub fn save<S: WardrobeStore>(
        &self,
        store: &S,
        name: &str,
        occasion: Occasion,
        now: DateTime<Utc>,
    ) -> Result<Outfit, WardrobeError> {
        match self.draft.as_ref() {
            None => return Err(ValidationError::NoItems.into()),
            Some(draft) if draft.is_empty() => return Err(ValidationError::NoItems.into()),
            Some(_) if !self.is_complete() => return Err(ValidationError::DraftNotReady.into()),
            Some(_) => {}
        }
        wardrobe::save_outfit(store, name, occasion, self.picked_items(), now)
    }
}
