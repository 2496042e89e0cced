use tracing::info;

use staybot_core::domain::booking::{BookingStatus, NewBooking};

use crate::connection::DbPool;
use crate::repositories::{BookingRepository, RepositoryError, SqlBookingRepository};

/// Demo reservations covering the paid, confirmed and pending states.
const SAMPLE_BOOKINGS: &[SampleBooking] = &[
    SampleBooking {
        user_id: 101,
        resort_name: "Paradise Beach Resort",
        check_in: "2025-10-15",
        check_out: "2025-10-20",
        guests: 2,
        total_price: 1200.0,
        status: BookingStatus::Paid,
        payment_date: Some("2025-09-01"),
        customer_name: "John Smith",
        phone_number: "+1234567890",
    },
    SampleBooking {
        user_id: 102,
        resort_name: "Mountain View Lodge",
        check_in: "2025-11-05",
        check_out: "2025-11-10",
        guests: 4,
        total_price: 2100.0,
        status: BookingStatus::Confirmed,
        payment_date: None,
        customer_name: "Jane Doe",
        phone_number: "+0987654321",
    },
    SampleBooking {
        user_id: 103,
        resort_name: "Urban Luxury Hotel",
        check_in: "2025-09-20",
        check_out: "2025-09-25",
        guests: 2,
        total_price: 1500.0,
        status: BookingStatus::Pending,
        payment_date: None,
        customer_name: "Bob Johnson",
        phone_number: "+1122334455",
    },
];

struct SampleBooking {
    user_id: i64,
    resort_name: &'static str,
    check_in: &'static str,
    check_out: &'static str,
    guests: i64,
    total_price: f64,
    status: BookingStatus,
    payment_date: Option<&'static str>,
    customer_name: &'static str,
    phone_number: &'static str,
}

impl SampleBooking {
    fn to_new_booking(&self) -> NewBooking {
        NewBooking {
            user_id: Some(self.user_id),
            resort_name: self.resort_name.to_string(),
            check_in: self.check_in.to_string(),
            check_out: self.check_out.to_string(),
            guests: self.guests,
            total_price: self.total_price,
            status: self.status,
            payment_date: self.payment_date.map(str::to_string),
            customer_name: self.customer_name.to_string(),
            phone_number: self.phone_number.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub inserted: usize,
    pub skipped_existing: bool,
}

pub struct SampleBookings;

impl SampleBookings {
    pub fn count() -> usize {
        SAMPLE_BOOKINGS.len()
    }

    /// Inserts the sample reservations into an empty `bookings` table. A table
    /// that already holds rows is left untouched.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let repository = SqlBookingRepository::new(pool.clone());
        if repository.count().await? > 0 {
            info!(event_name = "db.seed.skipped", "bookings table already populated");
            return Ok(SeedResult { inserted: 0, skipped_existing: true });
        }

        let mut tx = pool.begin().await?;
        for sample in SAMPLE_BOOKINGS {
            let booking = sample.to_new_booking();
            sqlx::query(
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
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!(event_name = "db.seed.loaded", inserted = SAMPLE_BOOKINGS.len(), "sample bookings loaded");
        Ok(SeedResult { inserted: SAMPLE_BOOKINGS.len(), skipped_existing: false })
    }
}
