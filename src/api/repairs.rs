//! Repair ticket endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::asset::StatusWrite,
    models::enums::RepairStatus,
    models::repair_ticket::{
        CreateRepairTicket, RepairTicket, TicketOutcome, TransitionRepairTicket,
        UpdateRepairTicket,
    },
};

use super::validate_body;

/// Query parameters for ticket listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct TicketListQuery {
    pub status: Option<RepairStatus>,
    pub asset_id: Option<Uuid>,
}

/// Deletion response
#[derive(Serialize, ToSchema)]
pub struct TicketDeleted {
    pub asset_status_write: Option<StatusWrite>,
}

/// List repair tickets
#[utoipa::path(
    get,
    path = "/repair-tickets",
    tag = "repairs",
    params(TicketListQuery),
    responses(
        (status = 200, description = "Ticket list", body = Vec<RepairTicket>)
    )
)]
pub async fn list_tickets(
    State(state): State<crate::AppState>,
    Query(query): Query<TicketListQuery>,
) -> AppResult<Json<Vec<RepairTicket>>> {
    Ok(Json(
        state.services.repairs.list(query.status, query.asset_id).await?,
    ))
}

/// Get one repair ticket
#[utoipa::path(
    get,
    path = "/repair-tickets/{id}",
    tag = "repairs",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket", body = RepairTicket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RepairTicket>> {
    Ok(Json(state.services.repairs.get(id).await?))
}

/// Create a repair ticket (puts the asset into maintenance)
#[utoipa::path(
    post,
    path = "/repair-tickets",
    tag = "repairs",
    request_body = CreateRepairTicket,
    responses(
        (status = 201, description = "Ticket created", body = TicketOutcome),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Asset in use or already has an open ticket")
    )
)]
pub async fn create_ticket(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateRepairTicket>,
) -> AppResult<(StatusCode, Json<TicketOutcome>)> {
    validate_body(&request)?;
    let outcome = state.services.repairs.create(request).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Edit a ticket's descriptive fields
#[utoipa::path(
    put,
    path = "/repair-tickets/{id}",
    tag = "repairs",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = UpdateRepairTicket,
    responses(
        (status = 200, description = "Ticket updated", body = RepairTicket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn update_ticket(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRepairTicket>,
) -> AppResult<Json<RepairTicket>> {
    validate_body(&request)?;
    Ok(Json(state.services.repairs.update(id, request).await?))
}

/// Run a state machine transition on a ticket
#[utoipa::path(
    post,
    path = "/repair-tickets/{id}/transition",
    tag = "repairs",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = TransitionRepairTicket,
    responses(
        (status = 200, description = "Transition applied", body = TicketOutcome),
        (status = 404, description = "Ticket not found"),
        (status = 422, description = "Transition rejected")
    )
)]
pub async fn transition_ticket(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRepairTicket>,
) -> AppResult<Json<TicketOutcome>> {
    Ok(Json(state.services.repairs.transition(id, request).await?))
}

/// Delete a repair ticket (restores the asset's derived status)
#[utoipa::path(
    delete,
    path = "/repair-tickets/{id}",
    tag = "repairs",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket deleted", body = TicketDeleted),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn delete_ticket(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TicketDeleted>> {
    let write = state.services.repairs.delete(id).await?;
    Ok(Json(TicketDeleted {
        asset_status_write: write,
    }))
}
