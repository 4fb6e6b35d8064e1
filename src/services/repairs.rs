//! Repair ticket lifecycle service
//!
//! Tickets move `quote-pending → repair-pending → completed` (a direct jump
//! to completed is also legal); `completed` is terminal. Every transition
//! appends to the ticket's immutable timeline and forces the owning asset's
//! status in the same transaction. While any open ticket exists the asset is
//! in maintenance and the usage-log reconciler leaves it alone.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, BusinessRule},
    models::asset::StatusWrite,
    models::enums::{AssetStatus, RepairStatus},
    models::repair_ticket::{
        CreateRepairTicket, RepairTicket, TicketOutcome, TicketTransition,
        TransitionRepairTicket, UpdateRepairTicket,
    },
    repository::repair_tickets::creation_timeline,
    repository::Repository,
    scheduling::parse_instant,
};

use super::clock::Clock;

#[derive(Clone)]
pub struct RepairsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

/// Check a requested state change against the machine's rules.
///
/// `completed` is terminal and states only move forward; entering
/// repair-pending needs vendor and quote supplied together with the
/// transition (both-or-neither).
fn validate_transition(
    current: RepairStatus,
    to: RepairStatus,
    vendor_name: Option<&str>,
    quote_amount: Option<Decimal>,
) -> Result<(), BusinessRule> {
    if current == RepairStatus::Completed {
        return Err(BusinessRule::TicketCompleted);
    }
    if (to as i16) <= (current as i16) {
        return Err(BusinessRule::BackwardTransition);
    }
    if to == RepairStatus::RepairPending {
        let vendor_ok = vendor_name.is_some_and(|v| !v.trim().is_empty());
        if !vendor_ok || quote_amount.is_none() {
            return Err(BusinessRule::QuoteRequired);
        }
    }
    Ok(())
}

/// Asset status once a ticket stops being open: another open ticket keeps
/// the asset in maintenance, otherwise a freshly repaired asset is always
/// available (never silently in-use; the next reconcile pass may flip it).
fn asset_status_after_close(has_other_open: bool) -> AssetStatus {
    if has_other_open {
        AssetStatus::Maintenance
    } else {
        AssetStatus::Available
    }
}

impl RepairsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// List tickets with optional filters
    pub async fn list(
        &self,
        status: Option<RepairStatus>,
        asset_id: Option<Uuid>,
    ) -> AppResult<Vec<RepairTicket>> {
        self.repository.repair_tickets.list(status, asset_id).await
    }

    /// Get one ticket
    pub async fn get(&self, id: Uuid) -> AppResult<RepairTicket> {
        self.repository.repair_tickets.get_by_id(id).await
    }

    /// Open a ticket for an asset that is neither in use nor already under
    /// an open ticket; the asset is forced into maintenance atomically.
    pub async fn create(&self, data: CreateRepairTicket) -> AppResult<TicketOutcome> {
        let asset = self.repository.assets.get_by_id(data.asset_id).await?;
        if asset.status == AssetStatus::InUse {
            return Err(BusinessRule::AssetInUse.into());
        }
        if self
            .repository
            .repair_tickets
            .has_open_for_asset(data.asset_id, None)
            .await?
        {
            return Err(BusinessRule::OpenTicketExists.into());
        }

        let now = self.clock.now();
        let ticket = RepairTicket {
            id: Uuid::new_v4(),
            asset_id: data.asset_id,
            status: RepairStatus::QuotePending,
            problem_desc: data.problem_desc,
            vendor_name: None,
            quote_amount: None,
            quote_at: None,
            expected_return_at: data.expected_return_at.as_deref().and_then(parse_instant),
            completed_at: None,
            timeline: creation_timeline(now),
            created_at: now,
            updated_at: Some(now),
        };

        let mut tx = self.repository.begin().await?;
        let ticket = self.repository.repair_tickets.insert_tx(&mut tx, &ticket).await?;
        self.repository
            .assets
            .set_status_tx(&mut tx, ticket.asset_id, AssetStatus::Maintenance)
            .await?;
        tx.commit().await?;

        Ok(TicketOutcome {
            asset_status_write: Some(StatusWrite {
                asset_id: ticket.asset_id,
                new_status: AssetStatus::Maintenance,
            }),
            ticket,
        })
    }

    /// Edit a ticket's descriptive fields. Never touches the state machine
    /// or the timeline.
    pub async fn update(&self, id: Uuid, data: UpdateRepairTicket) -> AppResult<RepairTicket> {
        let mut ticket = self.repository.repair_tickets.get_by_id(id).await?;

        if let Some(desc) = data.problem_desc {
            ticket.problem_desc = desc;
        }
        if let Some(vendor) = data.vendor_name {
            ticket.vendor_name = Some(vendor);
        }
        if let Some(amount) = data.quote_amount {
            ticket.quote_amount = Some(amount);
        }
        match data.expected_return_at {
            Some(Some(s)) => {
                if let Some(at) = parse_instant(&s) {
                    ticket.expected_return_at = Some(at);
                }
            }
            Some(None) => ticket.expected_return_at = None,
            None => {}
        }

        let mut tx = self.repository.begin().await?;
        let saved = self.repository.repair_tickets.save_tx(&mut tx, &ticket).await?;
        tx.commit().await?;
        Ok(saved)
    }

    /// Run a state machine transition, appending to the audit timeline and
    /// deriving the asset's status in the same transaction.
    pub async fn transition(
        &self,
        id: Uuid,
        data: TransitionRepairTicket,
    ) -> AppResult<TicketOutcome> {
        let mut ticket = self.repository.repair_tickets.get_by_id(id).await?;
        validate_transition(
            ticket.status,
            data.to,
            data.vendor_name.as_deref(),
            data.quote_amount,
        )?;

        let now = self.clock.now();
        let from = ticket.status;

        ticket.timeline.0.push(TicketTransition {
            at: now,
            from: Some(from),
            to: data.to,
            note: data.note,
        });
        ticket.status = data.to;

        if data.to == RepairStatus::RepairPending {
            ticket.quote_at = Some(now);
            ticket.vendor_name = data.vendor_name;
            ticket.quote_amount = data.quote_amount;
        }
        if data.to == RepairStatus::Completed {
            ticket.completed_at = Some(now);
        }

        let mut tx = self.repository.begin().await?;
        let asset_status = if data.to == RepairStatus::Completed {
            let has_other_open = self
                .repository
                .repair_tickets
                .has_open_for_asset_tx(&mut tx, ticket.asset_id, Some(id))
                .await?;
            asset_status_after_close(has_other_open)
        } else {
            AssetStatus::Maintenance
        };

        let ticket = self.repository.repair_tickets.save_tx(&mut tx, &ticket).await?;
        self.repository
            .assets
            .set_status_tx(&mut tx, ticket.asset_id, asset_status)
            .await?;
        tx.commit().await?;

        Ok(TicketOutcome {
            asset_status_write: Some(StatusWrite {
                asset_id: ticket.asset_id,
                new_status: asset_status,
            }),
            ticket,
        })
    }

    /// Delete a ticket at any state and re-derive the asset's status
    pub async fn delete(&self, id: Uuid) -> AppResult<Option<StatusWrite>> {
        let ticket = self.repository.repair_tickets.get_by_id(id).await?;

        let mut tx = self.repository.begin().await?;
        self.repository.repair_tickets.delete_tx(&mut tx, id).await?;
        let has_other_open = self
            .repository
            .repair_tickets
            .has_open_for_asset_tx(&mut tx, ticket.asset_id, Some(id))
            .await?;
        let status = asset_status_after_close(has_other_open);
        self.repository
            .assets
            .set_status_tx(&mut tx, ticket.asset_id, status)
            .await?;
        tx.commit().await?;

        Ok(Some(StatusWrite {
            asset_id: ticket.asset_id,
            new_status: status,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_completed_is_terminal() {
        for to in [RepairStatus::QuotePending, RepairStatus::RepairPending] {
            assert_eq!(
                validate_transition(RepairStatus::Completed, to, None, None),
                Err(BusinessRule::TicketCompleted)
            );
        }
    }

    #[test]
    fn test_no_backward_or_self_transition() {
        assert_eq!(
            validate_transition(RepairStatus::RepairPending, RepairStatus::QuotePending, None, None),
            Err(BusinessRule::BackwardTransition)
        );
        assert_eq!(
            validate_transition(RepairStatus::QuotePending, RepairStatus::QuotePending, None, None),
            Err(BusinessRule::BackwardTransition)
        );
    }

    #[test]
    fn test_repair_pending_requires_vendor_and_quote() {
        let quote = Some(Decimal::new(500, 0));
        // neither
        assert_eq!(
            validate_transition(RepairStatus::QuotePending, RepairStatus::RepairPending, None, None),
            Err(BusinessRule::QuoteRequired)
        );
        // vendor only
        assert_eq!(
            validate_transition(
                RepairStatus::QuotePending,
                RepairStatus::RepairPending,
                Some("Acme"),
                None
            ),
            Err(BusinessRule::QuoteRequired)
        );
        // quote only
        assert_eq!(
            validate_transition(RepairStatus::QuotePending, RepairStatus::RepairPending, None, quote),
            Err(BusinessRule::QuoteRequired)
        );
        // blank vendor does not count
        assert_eq!(
            validate_transition(
                RepairStatus::QuotePending,
                RepairStatus::RepairPending,
                Some("  "),
                quote
            ),
            Err(BusinessRule::QuoteRequired)
        );
        // both
        assert!(validate_transition(
            RepairStatus::QuotePending,
            RepairStatus::RepairPending,
            Some("Acme"),
            quote
        )
        .is_ok());
    }

    #[test]
    fn test_direct_completion_is_legal() {
        assert!(validate_transition(
            RepairStatus::QuotePending,
            RepairStatus::Completed,
            None,
            None
        )
        .is_ok());
        assert!(validate_transition(
            RepairStatus::RepairPending,
            RepairStatus::Completed,
            None,
            None
        )
        .is_ok());
    }

    #[test]
    fn test_asset_status_after_close() {
        assert_eq!(asset_status_after_close(false), AssetStatus::Available);
        assert_eq!(asset_status_after_close(true), AssetStatus::Maintenance);
    }
}
