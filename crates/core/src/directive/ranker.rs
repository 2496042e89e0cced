use std::cmp::Ordering;

use crate::domain::accommodation::{AccommodationOption, AccommodationRecord};

#[derive(Clone, Debug, PartialEq)]
pub enum Ranking {
    Ranked(Vec<AccommodationOption>),
    NoMatch { guests: i64 },
}

impl Ranking {
    pub fn options(&self) -> &[AccommodationOption] {
        match self {
            Self::Ranked(options) => options,
            Self::NoMatch { .. } => &[],
        }
    }
}

/// Records that seat at least `guests`, exact-capacity matches first, each
/// group by ascending nightly price. Ties keep catalog order.
pub fn matching_records(catalog: &[AccommodationRecord], guests: i64) -> Vec<&AccommodationRecord> {
    let mut matches =
        catalog.iter().filter(|record| record.seats(guests)).collect::<Vec<_>>();
    matches.sort_by(|left, right| compare(left, right, guests));
    matches
}

pub fn rank(catalog: &[AccommodationRecord], guests: i64) -> Ranking {
    let options = matching_records(catalog, guests)
        .into_iter()
        .map(AccommodationRecord::as_option)
        .collect::<Vec<_>>();

    if options.is_empty() {
        Ranking::NoMatch { guests }
    } else {
        Ranking::Ranked(options)
    }
}

fn compare(left: &AccommodationRecord, right: &AccommodationRecord, guests: i64) -> Ordering {
    let left_oversized = !left.seats_exactly(guests);
    let right_oversized = !right.seats_exactly(guests);
    left_oversized
        .cmp(&right_oversized)
        .then_with(|| left.nightly_price.total_cmp(&right.nightly_price))
}
