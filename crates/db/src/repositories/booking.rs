use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::debug;

use staybot_core::domain::booking::{
    Booking, BookingId, BookingStatus, BookingSubmission, NewBooking,
};
use staybot_core::ports::{BookingSink, BookingSinkError};

use super::{BookingRepository, RepositoryError};
use crate::DbPool;

const BOOKING_COLUMNS: &str = "id, user_id, resort_name, check_in, check_out, guests, total_price,
     status, payment_date, customer_name, phone_number, created_at";

pub struct SqlBookingRepository {
    pool: DbPool,
}

impl SqlBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        predicate: &str,
        binds: &[Bind<'_>],
    ) -> Result<Vec<Booking>, RepositoryError> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings {predicate} ORDER BY id");
        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = match bind {
                Bind::Int(value) => query.bind(*value),
                Bind::Text(value) => query.bind(*value),
            };
        }

        query.fetch_all(&self.pool).await?.into_iter().map(booking_from_row).collect()
    }
}

enum Bind<'a> {
    Int(i64),
    Text(&'a str),
}

#[async_trait]
impl BookingRepository for SqlBookingRepository {
    async fn create(&self, booking: NewBooking) -> Result<Booking, RepositoryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO bookings (
                user_id, resort_name, check_in, check_out, guests, total_price,
                status, payment_date, customer_name, phone_number, created_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(booking.user_id)
        .bind(&booking.resort_name)
        .bind(&booking.check_in)
        .bind(&booking.check_out)
        .bind(booking.guests)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(&booking.payment_date)
        .bind(&booking.customer_name)
        .bind(&booking.phone_number)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = BookingId(result.last_insert_rowid());
        debug!(event_name = "db.booking.created", booking_id = id.0, "booking row inserted");
        Ok(booking.into_booking(id, created_at))
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(booking_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        self.fetch_where("", &[]).await
    }

    async fn list_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, RepositoryError> {
        self.fetch_where("WHERE status = ?", &[Bind::Text(status.as_str())]).await
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>, RepositoryError> {
        self.fetch_where("WHERE user_id = ?", &[Bind::Int(user_id)]).await
    }

    async fn list_by_customer(
        &self,
        customer_name: &str,
        phone_number: &str,
    ) -> Result<Vec<Booking>, RepositoryError> {
        self.fetch_where(
            "WHERE customer_name = ? AND phone_number = ?",
            &[Bind::Text(customer_name), Bind::Text(phone_number)],
        )
        .await
    }

    async fn update(&self, booking: &Booking) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE bookings SET
                user_id = ?, resort_name = ?, check_in = ?, check_out = ?, guests = ?,
                total_price = ?, status = ?, payment_date = ?, customer_name = ?, phone_number = ?
             WHERE id = ?",
        )
        .bind(booking.user_id)
        .bind(&booking.resort_name)
        .bind(&booking.check_in)
        .bind(&booking.check_out)
        .bind(booking.guests)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(&booking.payment_date)
        .bind(&booking.customer_name)
        .bind(&booking.phone_number)
        .bind(booking.id.0)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: BookingId) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM bookings WHERE id = ?").bind(id.0).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM bookings")
            .fetch_one(&self.pool)
            .await?
            .try_get("count")?;
        u64::try_from(count)
            .map_err(|_| RepositoryError::Decode(format!("negative booking count: {count}")))
    }
}

#[async_trait]
impl BookingSink for SqlBookingRepository {
    async fn save_booking(&self, submission: BookingSubmission) -> Result<(), BookingSinkError> {
        self.create(NewBooking::from(submission))
            .await
            .map(|_| ())
            .map_err(|error| BookingSinkError(error.to_string()))
    }
}

fn booking_from_row(row: SqliteRow) -> Result<Booking, RepositoryError> {
    let status_raw = row.try_get::<String, _>("status")?;
    let status = status_raw
        .parse::<BookingStatus>()
        .map_err(|error| RepositoryError::Decode(error.to_string()))?;

    Ok(Booking {
        id: BookingId(row.try_get("id")?),
        user_id: row.try_get("user_id")?,
        resort_name: row.try_get("resort_name")?,
        check_in: row.try_get("check_in")?,
        check_out: row.try_get("check_out")?,
        guests: row.try_get("guests")?,
        total_price: row.try_get("total_price")?,
        status,
        payment_date: row.try_get("payment_date")?,
        customer_name: row.try_get("customer_name")?,
        phone_number: row.try_get("phone_number")?,
        created_at: parse_timestamp("created_at", row.try_get("created_at")?)?,
    })
}

fn parse_timestamp(column: &str, value: String) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(&value).map(|timestamp| timestamp.with_timezone(&Utc)).map_err(
        |error| {
            RepositoryError::Decode(format!("invalid timestamp in `{column}`: `{value}` ({error})"))
        },
    )
}
