//! Session-scoped controller: the single writer for one customization flow.
//!
//! Pipeline per user tap: decide events through the aggregate, wrap them in
//! envelopes with monotonically increasing sequence numbers, apply them to
//! the aggregate and to the selection read model. Reads (rack, look images)
//! are served from immutable snapshots taken after each update.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use figforge_catalog::{Category, CatalogSnapshot, CategoryBuckets, ImageRef, Product, ProductId};
use figforge_core::{Aggregate, AggregateId, DomainError, SessionId};
use figforge_events::{Event, EventEnvelope};
use figforge_look::{DEFAULT_HEAD_ASSET, resolve_look_images};
use figforge_outfit::{
    AbandonCustomization, CompleteCustomization, Outfit, OutfitCommand, OutfitEvent, OutfitId,
    SelectionState, StartCustomization, ToggleSelection,
};

use crate::projection::{OUTFIT_AGGREGATE_TYPE, SelectionProjection};
use crate::providers::{CatalogError, CatalogProvider, IdentityProvider};

/// Fallback display name when the host identity has none.
pub const DEFAULT_DISPLAY_NAME: &str = "Builder";

/// Session-level failure: either the host catalog was unusable, or a
/// lifecycle command was rejected by the aggregate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One user's customization flow, from catalog snapshot to finished look.
///
/// Owns the outfit aggregate exclusively (single writer); state is discarded
/// with the session on completion or abandonment, nothing persists.
#[derive(Debug)]
pub struct CustomizerSession {
    session_id: SessionId,
    outfit_id: OutfitId,
    outfit: Outfit,
    catalog: CatalogSnapshot,
    buckets: CategoryBuckets,
    view: SelectionProjection,
    history: Vec<EventEnvelope<OutfitEvent>>,
    head_asset: ImageRef,
    title: String,
    next_sequence: u64,
}

impl CustomizerSession {
    /// Begin a customization session against the host-provided collaborators.
    ///
    /// Fetches the catalog snapshot (loading/error states are terminal and
    /// propagate unchanged), partitions it into the rack buckets, and starts
    /// an empty outfit.
    pub fn begin(
        catalog_provider: &dyn CatalogProvider,
        identity_provider: &dyn IdentityProvider,
    ) -> Result<Self, SessionError> {
        let catalog = catalog_provider.snapshot()?;
        let buckets = catalog.buckets();

        let session_id = SessionId::new();
        let outfit_id = OutfitId::new(AggregateId::new());

        let display_name = identity_provider
            .display_name()
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        let mut session = Self {
            session_id,
            outfit_id,
            outfit: Outfit::empty(outfit_id),
            catalog,
            buckets,
            view: SelectionProjection::new(session_id, outfit_id.0),
            history: Vec::new(),
            head_asset: ImageRef::new(DEFAULT_HEAD_ASSET),
            title: format!("{display_name}'s Avatar"),
            next_sequence: 1,
        };

        session.execute(OutfitCommand::StartCustomization(StartCustomization {
            session_id,
            outfit_id,
            occurred_at: Utc::now(),
        }))?;

        tracing::info!(
            session_id = %session.session_id,
            products = session.catalog.len(),
            "customization session started"
        );

        Ok(session)
    }

    /// Replace the head asset the look composes under (host-specific sheets).
    pub fn with_head_asset(mut self, head_asset: ImageRef) -> Self {
        self.head_asset = head_asset;
        self
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn outfit_id(&self) -> OutfitId {
        self.outfit_id
    }

    /// Cosmetic header label, derived from the host identity.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rack buckets in display order; `Other` is never included.
    pub fn rack(&self) -> [(Category, &[Product]); 4] {
        self.buckets.visible()
    }

    /// Immutable snapshot of the current selection.
    pub fn selection(&self) -> &SelectionState {
        self.view.state()
    }

    /// Whether the given product is currently part of the look.
    pub fn is_selected(&self, product_id: &ProductId) -> bool {
        self.view.state().contains(product_id)
    }

    /// The ordered image list representing the current complete look.
    ///
    /// Recomputed fresh on every call; stale selections resolve to nothing
    /// and are omitted.
    pub fn look_images(&self) -> Vec<ImageRef> {
        resolve_look_images(self.view.state(), &self.catalog, &self.head_asset)
    }

    /// Every envelope applied so far, in sequence order.
    pub fn history(&self) -> &[EventEnvelope<OutfitEvent>] {
        &self.history
    }

    /// Toggle a product in the given category.
    ///
    /// Total on an open session: unknown categories and repeat taps on
    /// single-select slots simply produce no events.
    pub fn toggle(&mut self, category: Category, product_id: ProductId) -> Result<(), SessionError> {
        self.execute(OutfitCommand::ToggleSelection(ToggleSelection {
            session_id: self.session_id,
            outfit_id: self.outfit_id,
            category,
            product_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Close the session, keeping the finished look. State is dropped.
    pub fn complete(mut self) -> Result<(), SessionError> {
        self.execute(OutfitCommand::CompleteCustomization(CompleteCustomization {
            session_id: self.session_id,
            outfit_id: self.outfit_id,
            occurred_at: Utc::now(),
        }))?;
        tracing::info!(session_id = %self.session_id, "customization completed");
        Ok(())
    }

    /// Close the session, discarding the look.
    pub fn abandon(mut self) -> Result<(), SessionError> {
        self.execute(OutfitCommand::AbandonCustomization(AbandonCustomization {
            session_id: self.session_id,
            outfit_id: self.outfit_id,
            occurred_at: Utc::now(),
        }))?;
        tracing::info!(session_id = %self.session_id, "customization abandoned");
        Ok(())
    }

    /// Decide → envelope → apply, the whole write path for one command.
    fn execute(&mut self, command: OutfitCommand) -> Result<(), DomainError> {
        let decided = self.outfit.handle(&command)?;
        if decided.is_empty() {
            return Ok(());
        }

        for event in decided {
            let envelope = EventEnvelope::new(
                Uuid::now_v7(),
                self.session_id,
                self.outfit_id.0,
                OUTFIT_AGGREGATE_TYPE,
                self.next_sequence,
                event.clone(),
            );
            self.next_sequence += 1;

            self.outfit.apply(&event);
            figforge_events::Projection::apply(&mut self.view, &envelope);

            tracing::debug!(
                session_id = %self.session_id,
                event = event.event_type(),
                sequence = envelope.sequence_number(),
                "applied outfit event"
            );
            self.history.push(envelope);
        }

        Ok(())
    }
}
