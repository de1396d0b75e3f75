//! # Appointment Handlers
//!
//! Booking goes through the same slot grid the availability endpoint
//! publishes. The insert itself is conditional on a partial unique index, so
//! two customers racing for one slot end with exactly one booking and one 409.
//!
//! An appointment is visible to, and editable by, the customer who booked it
//! and the user owning the master profile it was booked with.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use beep_core::{
    availability::{is_schedule_slot, schedule_day_of_week},
    errors::BeepError,
    models::{
        account::{
            NOTIFICATION_APPOINTMENT_CANCELLED, NOTIFICATION_APPOINTMENT_CREATED,
            NOTIFICATION_APPOINTMENT_UPDATED, NOTIFICATION_GUARANTEE_ISSUED, guarantee_expiry,
        },
        appointment::{
            Appointment, AppointmentStatus, AppointmentWithDetails, CreateAppointmentRequest,
            UpdateAppointmentRequest,
        },
        clock::{format_clock, parse_date, parse_slot},
    },
};
use beep_db::{
    models::DbAppointment,
    repositories::{appointment, catalog, guarantee, master, notification, schedule},
};

use crate::{
    ApiState,
    handlers::parse_id,
    middleware::{
        auth::AuthUser,
        error_handling::{AppError, conflict_or_database},
    },
};

const SLOT_TAKEN: &str = "Time slot is already booked";

/// Which side of an appointment the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentParty {
    Customer,
    Master,
}

/// Resolves the caller's relation to an appointment, `None` for outsiders.
pub fn appointment_party(
    caller_id: i32,
    customer_id: i32,
    master_user_id: Option<i32>,
) -> Option<AppointmentParty> {
    if caller_id == customer_id {
        Some(AppointmentParty::Customer)
    } else if master_user_id == Some(caller_id) {
        Some(AppointmentParty::Master)
    } else {
        None
    }
}

/// Checks that `party` may move an appointment from `from` to `to`.
///
/// Completed and cancelled appointments are final. Either side may cancel;
/// every other status is set by the master.
pub fn check_status_change(
    party: AppointmentParty,
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), BeepError> {
    if from == to {
        return Ok(());
    }
    if matches!(from, AppointmentStatus::Completed | AppointmentStatus::Cancelled) {
        return Err(BeepError::Validation(format!(
            "Cannot change the status of a {} appointment",
            from
        )));
    }
    if to != AppointmentStatus::Cancelled && party != AppointmentParty::Master {
        return Err(BeepError::Authorization(format!(
            "Only the master can mark an appointment as {}",
            to
        )));
    }
    Ok(())
}

/// Loads an appointment and checks that `user` may act on it.
async fn load_for_party(
    state: &ApiState,
    user: &AuthUser,
    appointment_id: i32,
) -> Result<(DbAppointment, AppointmentParty), BeepError> {
    let found = appointment::get_appointment_by_id(&state.db_pool, appointment_id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound("Appointment not found".to_string()))?;

    let master_user_id = if found.user_id == user.id {
        None
    } else {
        master::get_master_by_id(&state.db_pool, found.master_id)
            .await
            .map_err(BeepError::Database)?
            .and_then(|m| m.user_id)
    };

    let party = appointment_party(user.id, found.user_id, master_user_id).ok_or_else(|| {
        BeepError::Authorization("You don't have access to this appointment".to_string())
    })?;

    Ok((found, party))
}

/// Notifications are a side effect; a failure is logged, not returned.
async fn notify(
    state: &ApiState,
    user_id: i32,
    kind: &str,
    title: &str,
    message: &str,
    related_id: i32,
) {
    if let Err(e) = notification::create_notification(
        &state.db_pool,
        user_id,
        kind,
        title,
        Some(message),
        Some(related_id),
    )
    .await
    {
        tracing::warn!("Failed to create {} notification for user {}: {:?}", kind, user_id, e);
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    if payload.master_id <= 0 || payload.service_id <= 0 {
        return Err(
            BeepError::Validation("master_id and service_id are required".to_string()).into(),
        );
    }
    let date = parse_date(&payload.date)?;
    let time = parse_slot(&payload.time)?;

    let booked_master = master::get_master_by_id(&state.db_pool, payload.master_id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| {
            BeepError::NotFound(format!("Master with ID {} not found", payload.master_id))
        })?;

    let service = catalog::get_service_by_id(&state.db_pool, payload.service_id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| {
            BeepError::NotFound(format!("Service with ID {} not found", payload.service_id))
        })?;

    let window = schedule::get_active_schedule_for_day(
        &state.db_pool,
        booked_master.id,
        schedule_day_of_week(date),
    )
    .await
    .map_err(BeepError::Database)?
    .map(|entry| entry.window());

    if !is_schedule_slot(window, time) {
        return Err(BeepError::Validation(format!(
            "{} on {} is outside the master's working hours",
            format_clock(time),
            date
        ))
        .into());
    }

    let comment = payload
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|comment| !comment.is_empty());

    let created = appointment::create_appointment(
        &state.db_pool,
        user.id,
        booked_master.id,
        service.id,
        date,
        time,
        comment,
    )
    .await
    .map_err(BeepError::Database)?
    .ok_or_else(|| BeepError::Conflict(SLOT_TAKEN.to_string()))?;

    tracing::info!(
        "Appointment booked: id={}, master_id={}, date={}, time={}",
        created.id,
        created.master_id,
        created.date,
        format_clock(created.time)
    );

    notify(
        &state,
        user.id,
        NOTIFICATION_APPOINTMENT_CREATED,
        "Appointment booked",
        &format!(
            "{} with {} on {} at {}",
            service.name,
            booked_master.name,
            date,
            format_clock(time)
        ),
        created.id,
    )
    .await;

    Ok((StatusCode::CREATED, Json(Appointment::try_from(created)?)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<AppointmentWithDetails>>, AppError> {
    let appointments = appointment::get_user_appointments(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?
        .into_iter()
        .map(AppointmentWithDetails::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(BeepError::Database)?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment_id = parse_id(&id, "appointment")?;
    let (found, _) = load_for_party(&state, &user, appointment_id).await?;

    Ok(Json(Appointment::try_from(found)?))
}

/// Issues the guarantee for a freshly completed appointment.
async fn issue_guarantee(state: &ApiState, completed: &DbAppointment) -> Result<(), BeepError> {
    let service_name = catalog::get_service_by_id(&state.db_pool, completed.service_id)
        .await
        .map_err(BeepError::Database)?
        .map(|service| service.name)
        .unwrap_or_else(|| format!("Service #{}", completed.service_id));
    let master_name = master::get_master_by_id(&state.db_pool, completed.master_id)
        .await
        .map_err(BeepError::Database)?
        .map(|m| m.name);

    let expiry = guarantee_expiry(completed.date);
    let issued = guarantee::create_guarantee(
        &state.db_pool,
        completed.user_id,
        completed.id,
        &service_name,
        master_name.as_deref(),
        completed.date,
        expiry,
    )
    .await
    .map_err(BeepError::Database)?;

    // Completing twice keeps the first guarantee.
    if let Some(issued) = issued {
        tracing::info!(
            "Guarantee issued: id={}, appointment_id={}, expires={}",
            issued.id,
            completed.id,
            expiry
        );
        notify(
            state,
            completed.user_id,
            NOTIFICATION_GUARANTEE_ISSUED,
            "Guarantee issued",
            &format!("{} is covered until {}", service_name, expiry),
            completed.id,
        )
        .await;
    }

    Ok(())
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment_id = parse_id(&id, "appointment")?;
    let status = payload
        .status
        .as_deref()
        .map(|raw| raw.trim().parse::<AppointmentStatus>())
        .transpose()?;

    let (current, party) = load_for_party(&state, &user, appointment_id).await?;
    if let Some(status) = status {
        let from = current.status.parse::<AppointmentStatus>()?;
        check_status_change(party, from, status)?;
    }

    let updated = appointment::update_appointment(
        &state.db_pool,
        current.id,
        payload.comment.as_deref(),
        status.map(|s| s.as_str()),
    )
    .await
    .map_err(|e| conflict_or_database(e, SLOT_TAKEN))?
    .ok_or_else(|| BeepError::NotFound("Appointment not found".to_string()))?;

    if let Some(status) = status {
        if current.status != status.as_str() {
            tracing::info!(
                "Appointment {} moved from {} to {} by {:?}",
                updated.id,
                current.status,
                status,
                party
            );
            notify(
                &state,
                updated.user_id,
                NOTIFICATION_APPOINTMENT_UPDATED,
                "Appointment updated",
                &format!("Your appointment on {} is now {}", updated.date, status),
                updated.id,
            )
            .await;

            if status == AppointmentStatus::Completed {
                issue_guarantee(&state, &updated).await?;
            }
        }
    }

    Ok(Json(Appointment::try_from(updated)?))
}

/// Cancels instead of deleting so the slot frees up and history stays.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment_id = parse_id(&id, "appointment")?;
    let (current, party) = load_for_party(&state, &user, appointment_id).await?;
    let from = current.status.parse::<AppointmentStatus>()?;
    check_status_change(party, from, AppointmentStatus::Cancelled)?;

    let cancelled = appointment::cancel_appointment(&state.db_pool, current.id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound("Appointment not found".to_string()))?;

    tracing::info!("Appointment {} cancelled by {:?}", cancelled.id, party);

    if party == AppointmentParty::Master {
        notify(
            &state,
            cancelled.user_id,
            NOTIFICATION_APPOINTMENT_CANCELLED,
            "Appointment cancelled",
            &format!(
                "Your appointment on {} at {} was cancelled by the master",
                cancelled.date,
                format_clock(cancelled.time)
            ),
            cancelled.id,
        )
        .await;
    }

    Ok(Json(Appointment::try_from(cancelled)?))
}
