use crate::models::{DbAppointment, DbAppointmentWithDetails, DbMasterAppointment};
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use sqlx::{Pool, Postgres};

const APPOINTMENT_COLUMNS: &str =
    "id, user_id, master_id, service_id, date, time, status, comment, created_at, updated_at";

/// Times already held by non-cancelled appointments of a master on a date.
pub async fn get_booked_times(
    pool: &Pool<Postgres>,
    master_id: i32,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>> {
    let times = sqlx::query_scalar::<_, NaiveTime>(
        r#"
        SELECT time
        FROM appointments
        WHERE master_id = $1 AND date = $2 AND status <> 'cancelled'
        ORDER BY time
        "#,
    )
    .bind(master_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Booked times: master_id={}, date={}, count={}",
        master_id,
        date,
        times.len()
    );

    Ok(times)
}

/// Books a slot. Returns `None` when the slot is already taken.
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    user_id: i32,
    master_id: i32,
    service_id: i32,
    date: NaiveDate,
    time: NaiveTime,
    comment: Option<&str>,
) -> Result<Option<DbAppointment>> {
    tracing::debug!(
        "Creating appointment: user_id={}, master_id={}, date={}, time={}",
        user_id,
        master_id,
        date,
        time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (user_id, master_id, service_id, date, time, status, comment)
        VALUES ($1, $2, $3, $4, $5, 'pending', $6)
        ON CONFLICT DO NOTHING
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(master_id)
    .bind(service_id)
    .bind(date)
    .bind(time)
    .bind(comment)
    .fetch_optional(pool)
    .await?;

    match &appointment {
        Some(a) => tracing::debug!("Appointment created successfully: id={}", a.id),
        None => tracing::debug!(
            "Slot already taken: master_id={}, date={}, time={}",
            master_id,
            date,
            time
        ),
    }

    Ok(appointment)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: i32,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_user_appointments(
    pool: &Pool<Postgres>,
    user_id: i32,
) -> Result<Vec<DbAppointmentWithDetails>> {
    let appointments = sqlx::query_as::<_, DbAppointmentWithDetails>(
        r#"
        SELECT
            a.id, a.user_id, a.master_id, a.service_id, a.date, a.time, a.status, a.comment,
            a.created_at, a.updated_at,
            s.name AS service_name,
            m.name AS master_name
        FROM appointments a
        LEFT JOIN services s ON s.id = a.service_id
        LEFT JOIN masters m ON m.id = a.master_id
        WHERE a.user_id = $1
        ORDER BY a.date DESC, a.time DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Appointments booked with a master, with the customer's contacts.
pub async fn get_master_appointments(
    pool: &Pool<Postgres>,
    master_id: i32,
) -> Result<Vec<DbMasterAppointment>> {
    let appointments = sqlx::query_as::<_, DbMasterAppointment>(
        r#"
        SELECT
            a.id, a.user_id, a.master_id, a.service_id, a.date, a.time, a.status, a.comment,
            a.created_at, a.updated_at,
            s.name AS service_name,
            u.name AS customer_name,
            u.email AS customer_email,
            u.phone AS customer_phone
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        JOIN users u ON u.id = a.user_id
        WHERE a.master_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(master_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Updates comment and/or status; `None` keeps the stored value.
pub async fn update_appointment(
    pool: &Pool<Postgres>,
    id: i32,
    comment: Option<&str>,
    status: Option<&str>,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Updating appointment {}: status={:?}", id, status);

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET comment = COALESCE($2, comment),
            status = COALESCE($3, status),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(comment)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Marks an appointment cancelled, which releases its slot.
pub async fn cancel_appointment(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbAppointment>> {
    tracing::debug!("Cancelling appointment {}", id);

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = 'cancelled', updated_at = NOW()
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
