use crate::commands::{load_config, runtime, CommandResult};
use staybot_db::{connect_with_config, migrations, SampleBookings, SeedResult};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let seeded = SampleBookings::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 6u8));
        pool.close().await;
        seeded
    });

    match result {
        Ok(seeded) => CommandResult::success("seed", seed_message(&seeded)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn seed_message(result: &SeedResult) -> String {
    if result.skipped_existing {
        "bookings table already has data; sample bookings not loaded".to_string()
    } else {
        format!("loaded {} sample bookings", result.inserted)
    }
}

#[cfg(test)]
mod tests {
    use staybot_db::SeedResult;

    use super::seed_message;

    #[test]
    fn message_reports_skip_or_count() {
        assert_eq!(
            seed_message(&SeedResult { inserted: 3, skipped_existing: false }),
            "loaded 3 sample bookings"
        );
        assert!(seed_message(&SeedResult { inserted: 0, skipped_existing: true })
            .contains("already has data"));
    }
}
