use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use figforge_catalog::{Category, ProductId};
use figforge_core::{Aggregate, AggregateId, AggregateRoot, DomainError, SessionId};
use figforge_events::Event;

/// Upper bound on simultaneously selected accessories.
pub const ACCESSORY_LIMIT: usize = 2;

/// Outfit identifier (session-scoped via `session_id` fields in events/commands).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutfitId(pub AggregateId);

impl OutfitId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OutfitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Customization lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutfitStatus {
    Active,
    Completed,
    Abandoned,
}

/// One of the three single-select outfit slots.
///
/// `Accessories` is deliberately not a wear slot: it holds an ordered list
/// rather than a single id, and its toggle semantics differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WearSlot {
    Top,
    Bottom,
    Headwear,
}

impl WearSlot {
    pub fn category(self) -> Category {
        match self {
            WearSlot::Top => Category::Top,
            WearSlot::Bottom => Category::Bottom,
            WearSlot::Headwear => Category::Headwear,
        }
    }

    pub fn from_category(category: Category) -> Option<Self> {
        match category {
            Category::Top => Some(WearSlot::Top),
            Category::Bottom => Some(WearSlot::Bottom),
            Category::Headwear => Some(WearSlot::Headwear),
            Category::Accessories | Category::Other => None,
        }
    }
}

/// The user's current per-category selection.
///
/// A value type with no identity: replaced wholesale by applying events,
/// never mutated in place by callers. Invariant: `accessories` holds at most
/// `ACCESSORY_LIMIT` ids, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    top: Option<ProductId>,
    bottom: Option<ProductId>,
    headwear: Option<ProductId>,
    accessories: Vec<ProductId>,
}

impl SelectionState {
    pub fn wear(&self, slot: WearSlot) -> Option<&ProductId> {
        match slot {
            WearSlot::Top => self.top.as_ref(),
            WearSlot::Bottom => self.bottom.as_ref(),
            WearSlot::Headwear => self.headwear.as_ref(),
        }
    }

    /// Selected accessories in insertion order.
    pub fn accessories(&self) -> &[ProductId] {
        &self.accessories
    }

    /// Whether the given product is selected in any slot (UI highlight).
    pub fn contains(&self, product_id: &ProductId) -> bool {
        [&self.top, &self.bottom, &self.headwear]
            .into_iter()
            .any(|slot| slot.as_ref() == Some(product_id))
            || self.accessories.contains(product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
            && self.bottom.is_none()
            && self.headwear.is_none()
            && self.accessories.is_empty()
    }

    /// Evolve the selection from a single outfit event.
    ///
    /// Shared by the aggregate and by read-model projections so both evolve
    /// state identically. Lifecycle events are no-ops here.
    pub fn apply_event(&mut self, event: &OutfitEvent) {
        match event {
            OutfitEvent::SlotSelected(e) => match e.slot {
                WearSlot::Top => self.top = Some(e.product_id.clone()),
                WearSlot::Bottom => self.bottom = Some(e.product_id.clone()),
                WearSlot::Headwear => self.headwear = Some(e.product_id.clone()),
            },
            OutfitEvent::AccessoryAdded(e) => {
                if self.accessories.contains(&e.product_id) {
                    return;
                }
                // Oldest-first eviction keeps the bound on any stream shape.
                if self.accessories.len() == ACCESSORY_LIMIT {
                    self.accessories.remove(0);
                }
                self.accessories.push(e.product_id.clone());
            }
            OutfitEvent::AccessoryRemoved(e) => {
                self.accessories.retain(|id| id != &e.product_id);
            }
            OutfitEvent::CustomizationStarted(_)
            | OutfitEvent::CustomizationCompleted(_)
            | OutfitEvent::CustomizationAbandoned(_) => {}
        }
    }
}

/// Aggregate root: Outfit (one customization session's selection state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outfit {
    id: OutfitId,
    session_id: Option<SessionId>,
    status: OutfitStatus,
    selection: SelectionState,
    version: u64,
    created: bool,
}

impl Outfit {
    /// Create an empty, not-yet-started aggregate instance for rehydration.
    pub fn empty(id: OutfitId) -> Self {
        Self {
            id,
            session_id: None,
            status: OutfitStatus::Active,
            selection: SelectionState::default(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> OutfitId {
        self.id
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn status(&self) -> OutfitStatus {
        self.status
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Whether toggles are still accepted.
    pub fn is_open(&self) -> bool {
        self.created && self.status == OutfitStatus::Active
    }
}

impl AggregateRoot for Outfit {
    type Id = OutfitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: StartCustomization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCustomization {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ToggleSelection.
///
/// The single user-facing mutation: tapping a product tile in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSelection {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub category: Category,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CompleteCustomization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteCustomization {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AbandonCustomization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbandonCustomization {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutfitCommand {
    StartCustomization(StartCustomization),
    ToggleSelection(ToggleSelection),
    CompleteCustomization(CompleteCustomization),
    AbandonCustomization(AbandonCustomization),
}

/// Event: CustomizationStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationStarted {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SlotSelected (a single-select slot was set or replaced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelected {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub slot: WearSlot,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AccessoryAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryAdded {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AccessoryRemoved (deselected, or evicted as the oldest of a full list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryRemoved {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CustomizationCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationCompleted {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CustomizationAbandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationAbandoned {
    pub session_id: SessionId,
    pub outfit_id: OutfitId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutfitEvent {
    CustomizationStarted(CustomizationStarted),
    SlotSelected(SlotSelected),
    AccessoryAdded(AccessoryAdded),
    AccessoryRemoved(AccessoryRemoved),
    CustomizationCompleted(CustomizationCompleted),
    CustomizationAbandoned(CustomizationAbandoned),
}

impl Event for OutfitEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OutfitEvent::CustomizationStarted(_) => "outfit.customization.started",
            OutfitEvent::SlotSelected(_) => "outfit.slot.selected",
            OutfitEvent::AccessoryAdded(_) => "outfit.accessory.added",
            OutfitEvent::AccessoryRemoved(_) => "outfit.accessory.removed",
            OutfitEvent::CustomizationCompleted(_) => "outfit.customization.completed",
            OutfitEvent::CustomizationAbandoned(_) => "outfit.customization.abandoned",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OutfitEvent::CustomizationStarted(e) => e.occurred_at,
            OutfitEvent::SlotSelected(e) => e.occurred_at,
            OutfitEvent::AccessoryAdded(e) => e.occurred_at,
            OutfitEvent::AccessoryRemoved(e) => e.occurred_at,
            OutfitEvent::CustomizationCompleted(e) => e.occurred_at,
            OutfitEvent::CustomizationAbandoned(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Outfit {
    type Command = OutfitCommand;
    type Event = OutfitEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OutfitEvent::CustomizationStarted(e) => {
                self.id = e.outfit_id;
                self.session_id = Some(e.session_id);
                self.status = OutfitStatus::Active;
                self.selection = SelectionState::default();
                self.created = true;
            }
            OutfitEvent::CustomizationCompleted(_) => {
                self.status = OutfitStatus::Completed;
            }
            OutfitEvent::CustomizationAbandoned(_) => {
                self.status = OutfitStatus::Abandoned;
            }
            selection_event => self.selection.apply_event(selection_event),
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OutfitCommand::StartCustomization(cmd) => self.handle_start(cmd),
            OutfitCommand::ToggleSelection(cmd) => self.handle_toggle(cmd),
            OutfitCommand::CompleteCustomization(cmd) => self.handle_complete(cmd),
            OutfitCommand::AbandonCustomization(cmd) => self.handle_abandon(cmd),
        }
    }
}

impl Outfit {
    fn ensure_session(&self, session_id: SessionId) -> Result<(), DomainError> {
        if !self.created {
            return Ok(());
        }
        if self.session_id != Some(session_id) {
            return Err(DomainError::invariant("session mismatch"));
        }
        Ok(())
    }

    fn ensure_outfit_id(&self, outfit_id: OutfitId) -> Result<(), DomainError> {
        if self.id != outfit_id {
            return Err(DomainError::invariant("outfit_id mismatch"));
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        match self.status {
            OutfitStatus::Active => Ok(()),
            OutfitStatus::Completed => Err(DomainError::conflict("customization already completed")),
            OutfitStatus::Abandoned => Err(DomainError::conflict("customization already abandoned")),
        }
    }

    fn handle_start(&self, cmd: &StartCustomization) -> Result<Vec<OutfitEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("customization already started"));
        }

        Ok(vec![OutfitEvent::CustomizationStarted(CustomizationStarted {
            session_id: cmd.session_id,
            outfit_id: cmd.outfit_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    /// Toggle semantics per category:
    ///
    /// - single-select slots: re-toggling the stored id keeps it set (no
    ///   deselect-on-repeat); a different id replaces it
    /// - accessories: present id is removed; otherwise appended, evicting
    ///   the oldest entry when the list is full
    /// - `Other`: no slot exists, nothing happens
    ///
    /// Never fails on an open customization.
    fn handle_toggle(&self, cmd: &ToggleSelection) -> Result<Vec<OutfitEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_session(cmd.session_id)?;
        self.ensure_outfit_id(cmd.outfit_id)?;
        self.ensure_open()?;

        if let Some(slot) = WearSlot::from_category(cmd.category) {
            if self.selection.wear(slot) == Some(&cmd.product_id) {
                return Ok(vec![]);
            }
            return Ok(vec![OutfitEvent::SlotSelected(SlotSelected {
                session_id: cmd.session_id,
                outfit_id: cmd.outfit_id,
                slot,
                product_id: cmd.product_id.clone(),
                occurred_at: cmd.occurred_at,
            })]);
        }

        if cmd.category != Category::Accessories {
            return Ok(vec![]);
        }

        let removed = |product_id: ProductId| {
            OutfitEvent::AccessoryRemoved(AccessoryRemoved {
                session_id: cmd.session_id,
                outfit_id: cmd.outfit_id,
                product_id,
                occurred_at: cmd.occurred_at,
            })
        };
        let added = OutfitEvent::AccessoryAdded(AccessoryAdded {
            session_id: cmd.session_id,
            outfit_id: cmd.outfit_id,
            product_id: cmd.product_id.clone(),
            occurred_at: cmd.occurred_at,
        });

        let accessories = self.selection.accessories();
        if accessories.contains(&cmd.product_id) {
            return Ok(vec![removed(cmd.product_id.clone())]);
        }
        if accessories.len() < ACCESSORY_LIMIT {
            return Ok(vec![added]);
        }

        // Full list: ring-buffer-of-2, evict the oldest rather than reject.
        Ok(vec![removed(accessories[0].clone()), added])
    }

    fn handle_complete(&self, cmd: &CompleteCustomization) -> Result<Vec<OutfitEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_session(cmd.session_id)?;
        self.ensure_outfit_id(cmd.outfit_id)?;
        self.ensure_open()?;

        Ok(vec![OutfitEvent::CustomizationCompleted(CustomizationCompleted {
            session_id: cmd.session_id,
            outfit_id: cmd.outfit_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_abandon(&self, cmd: &AbandonCustomization) -> Result<Vec<OutfitEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_session(cmd.session_id)?;
        self.ensure_outfit_id(cmd.outfit_id)?;
        self.ensure_open()?;

        Ok(vec![OutfitEvent::CustomizationAbandoned(CustomizationAbandoned {
            session_id: cmd.session_id,
            outfit_id: cmd.outfit_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
