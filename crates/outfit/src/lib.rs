//! Outfit domain module (event-sourced).
//!
//! This crate contains the selection-state engine for the multi-part outfit
//! picker, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage): three single-select wear slots plus a bounded accessory list
//! with oldest-first eviction.

pub mod outfit;

pub use outfit::{
    ACCESSORY_LIMIT, AbandonCustomization, AccessoryAdded, AccessoryRemoved,
    CompleteCustomization, CustomizationAbandoned, CustomizationCompleted, CustomizationStarted,
    Outfit, OutfitCommand, OutfitEvent, OutfitId, OutfitStatus, SelectionState, SlotSelected,
    StartCustomization, ToggleSelection, WearSlot,
};
