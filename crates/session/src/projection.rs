//! Read model of the current selection, rebuilt from the outfit stream.

use thiserror::Error;

use figforge_core::{AggregateId, SessionId};
use figforge_events::{EventEnvelope, Projection};
use figforge_outfit::{OutfitEvent, SelectionState};

/// Stream identifier for outfit customization aggregates.
pub const OUTFIT_AGGREGATE_TYPE: &str = "outfit.customization";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("session isolation violation: {0}")]
    SessionIsolation(String),

    #[error("non-monotonic sequence number (last={last}, found={found})")]
    NonMonotonicSequence { last: u64, found: u64 },
}

/// Queryable selection read model for a single customization session.
///
/// Idempotent: envelopes at or below the last applied sequence number are
/// skipped, so duplicate delivery is safe. Envelopes from a different
/// session or stream are rejected rather than silently merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionProjection {
    session_id: SessionId,
    aggregate_id: AggregateId,
    state: SelectionState,
    last_sequence: u64,
}

impl SelectionProjection {
    pub fn new(session_id: SessionId, aggregate_id: AggregateId) -> Self {
        Self {
            session_id,
            aggregate_id,
            state: SelectionState::default(),
            last_sequence: 0,
        }
    }

    /// The immutable selection snapshot readers observe.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    pub fn apply_envelope(
        &mut self,
        envelope: &EventEnvelope<OutfitEvent>,
    ) -> Result<(), ProjectionError> {
        if envelope.aggregate_type() != OUTFIT_AGGREGATE_TYPE {
            return Ok(());
        }

        if envelope.session_id() != self.session_id {
            return Err(ProjectionError::SessionIsolation(
                "envelope session_id does not match projection session".to_string(),
            ));
        }
        if envelope.aggregate_id() != self.aggregate_id {
            return Err(ProjectionError::SessionIsolation(
                "envelope aggregate_id does not match projection stream".to_string(),
            ));
        }

        let seq = envelope.sequence_number();
        let last = self.last_sequence;
        if seq == 0 {
            return Err(ProjectionError::NonMonotonicSequence { last, found: seq });
        }
        if seq <= last {
            return Ok(());
        }
        if seq != last + 1 && last != 0 {
            return Err(ProjectionError::NonMonotonicSequence { last, found: seq });
        }

        let (event_session, event_outfit) = match envelope.payload() {
            OutfitEvent::CustomizationStarted(e) => (e.session_id, e.outfit_id),
            OutfitEvent::SlotSelected(e) => (e.session_id, e.outfit_id),
            OutfitEvent::AccessoryAdded(e) => (e.session_id, e.outfit_id),
            OutfitEvent::AccessoryRemoved(e) => (e.session_id, e.outfit_id),
            OutfitEvent::CustomizationCompleted(e) => (e.session_id, e.outfit_id),
            OutfitEvent::CustomizationAbandoned(e) => (e.session_id, e.outfit_id),
        };
        if event_session != envelope.session_id() {
            return Err(ProjectionError::SessionIsolation(
                "event session_id does not match envelope session_id".to_string(),
            ));
        }
        if event_outfit.0 != envelope.aggregate_id() {
            return Err(ProjectionError::SessionIsolation(
                "event outfit_id does not match envelope aggregate_id".to_string(),
            ));
        }

        self.state.apply_event(envelope.payload());
        self.last_sequence = seq;
        Ok(())
    }
}

impl Projection for SelectionProjection {
    type Ev = OutfitEvent;

    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>) {
        if let Err(err) = self.apply_envelope(envelope) {
            tracing::warn!(error = %err, "dropped outfit envelope");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use figforge_outfit::{AccessoryAdded, OutfitId, SlotSelected, WearSlot};
    use figforge_catalog::ProductId;
    use uuid::Uuid;

    fn envelope(
        session_id: SessionId,
        outfit_id: OutfitId,
        seq: u64,
        payload: OutfitEvent,
    ) -> EventEnvelope<OutfitEvent> {
        EventEnvelope::new(
            Uuid::now_v7(),
            session_id,
            outfit_id.0,
            OUTFIT_AGGREGATE_TYPE,
            seq,
            payload,
        )
    }

    fn slot_selected(session_id: SessionId, outfit_id: OutfitId, id: &str) -> OutfitEvent {
        OutfitEvent::SlotSelected(SlotSelected {
            session_id,
            outfit_id,
            slot: WearSlot::Top,
            product_id: ProductId::new(id),
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn applies_events_in_sequence() {
        let session_id = SessionId::new();
        let outfit_id = OutfitId::new(AggregateId::new());
        let mut projection = SelectionProjection::new(session_id, outfit_id.0);

        projection
            .apply_envelope(&envelope(
                session_id,
                outfit_id,
                1,
                slot_selected(session_id, outfit_id, "p1"),
            ))
            .unwrap();

        assert_eq!(
            projection.state().wear(WearSlot::Top),
            Some(&ProductId::new("p1"))
        );
        assert_eq!(projection.last_sequence(), 1);
    }

    #[test]
    fn duplicate_envelopes_are_skipped_idempotently() {
        let session_id = SessionId::new();
        let outfit_id = OutfitId::new(AggregateId::new());
        let mut projection = SelectionProjection::new(session_id, outfit_id.0);

        let env = envelope(
            session_id,
            outfit_id,
            1,
            OutfitEvent::AccessoryAdded(AccessoryAdded {
                session_id,
                outfit_id,
                product_id: ProductId::new("a1"),
                occurred_at: Utc::now(),
            }),
        );

        projection.apply_envelope(&env).unwrap();
        projection.apply_envelope(&env).unwrap();

        assert_eq!(projection.state().accessories().len(), 1);
    }

    #[test]
    fn rejects_envelopes_from_another_session() {
        let session_id = SessionId::new();
        let outfit_id = OutfitId::new(AggregateId::new());
        let mut projection = SelectionProjection::new(session_id, outfit_id.0);

        let foreign_session = SessionId::new();
        let err = projection
            .apply_envelope(&envelope(
                foreign_session,
                outfit_id,
                1,
                slot_selected(foreign_session, outfit_id, "p1"),
            ))
            .unwrap_err();

        match err {
            ProjectionError::SessionIsolation(_) => {}
            other => panic!("expected SessionIsolation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_sequence_gaps() {
        let session_id = SessionId::new();
        let outfit_id = OutfitId::new(AggregateId::new());
        let mut projection = SelectionProjection::new(session_id, outfit_id.0);

        projection
            .apply_envelope(&envelope(
                session_id,
                outfit_id,
                1,
                slot_selected(session_id, outfit_id, "p1"),
            ))
            .unwrap();

        let err = projection
            .apply_envelope(&envelope(
                session_id,
                outfit_id,
                3,
                slot_selected(session_id, outfit_id, "p2"),
            ))
            .unwrap_err();

        match err {
            ProjectionError::NonMonotonicSequence { last: 1, found: 3 } => {}
            other => panic!("expected NonMonotonicSequence, got {other:?}"),
        }
    }

    #[test]
    fn foreign_aggregate_types_are_ignored() {
        let session_id = SessionId::new();
        let outfit_id = OutfitId::new(AggregateId::new());
        let mut projection = SelectionProjection::new(session_id, outfit_id.0);

        let env = EventEnvelope::new(
            Uuid::now_v7(),
            session_id,
            outfit_id.0,
            "catalog.snapshot",
            7,
            slot_selected(session_id, outfit_id, "p1"),
        );

        projection.apply_envelope(&env).unwrap();
        assert!(projection.state().is_empty());
        assert_eq!(projection.last_sequence(), 0);
    }
}
