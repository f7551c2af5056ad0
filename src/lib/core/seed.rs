use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::core::{TodoError, TodoFields};
use crate::storage::TodoStore;

pub const SEED: u64 = 42;
pub const SEED_COUNT: usize = 100;

const TITLES: [&str; 6] = [
    "仕様書レビュー",
    "UI調整",
    "API実装",
    "バグ修正",
    "テスト追加",
    "ドキュメント更新",
];
const ASSIGNEES: [&str; 5] = ["Tanaka", "Sato", "Suzuki", "Yamada", "Kato"];

/// Due-date offsets in days, inclusive on both ends.
const MIN_OFFSET: i64 = -10;
const MAX_OFFSET: i64 = 30;

/// Builds the demo dataset. Offsets are drawn one per record in index order,
/// so the output depends only on `today` and `seed`.
pub fn generate(today: NaiveDate, seed: u64) -> Vec<TodoFields> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..SEED_COUNT)
        .map(|i| {
            let offset = rng.random_range(MIN_OFFSET..=MAX_OFFSET);
            TodoFields {
                due_date: shift(today, offset),
                title: format!("{} #{}", TITLES[i % TITLES.len()], i + 1),
                assignee: ASSIGNEES[i % ASSIGNEES.len()].to_string(),
                completed: false,
                favorite: false,
            }
        })
        .collect()
}

fn shift(date: NaiveDate, offset: i64) -> NaiveDate {
    let days = Days::new(offset.unsigned_abs());
    let shifted = if offset < 0 {
        date.checked_sub_days(days)
    } else {
        date.checked_add_days(days)
    };
    shifted.unwrap_or(date)
}

/// Fills an empty store with the demo dataset in one batch. Returns how many
/// rows were inserted, 0 when the store already had data.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(store)))]
pub async fn seed_if_empty<S: TodoStore + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> Result<usize, TodoError> {
    if store.has_any().await? {
        #[cfg(feature = "tracing")]
        debug!("Store already has todos, skipping seed");
        return Ok(0);
    }
    let batch = generate(today, SEED);
    let ids = store.insert_batch(&batch).await?;
    #[cfg(feature = "tracing")]
    info!(count = ids.len(), "Seeded demo todos");
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn generates_exactly_one_hundred() {
        assert_eq!(generate(today(), SEED).len(), SEED_COUNT);
    }

    #[test]
    fn same_seed_same_dataset() {
        assert_eq!(generate(today(), SEED), generate(today(), SEED));
    }

    #[test]
    fn titles_and_assignees_cycle_by_index() {
        let todos = generate(today(), SEED);
        assert_eq!(todos[0].title, "仕様書レビュー #1");
        assert_eq!(todos[5].title, "ドキュメント更新 #6");
        assert_eq!(todos[6].title, "仕様書レビュー #7");
        assert_eq!(todos[99].title, "バグ修正 #100");
        assert_eq!(todos[0].assignee, "Tanaka");
        assert_eq!(todos[4].assignee, "Kato");
        assert_eq!(todos[5].assignee, "Tanaka");
        assert_eq!(todos[98].assignee, "Yamada");
    }

    #[test]
    fn due_dates_stay_within_window() {
        let start = today() - Days::new(10);
        let end = today() + Days::new(30);
        for todo in generate(today(), SEED) {
            assert!(todo.due_date >= start && todo.due_date <= end, "{todo:?}");
            assert!(!todo.completed);
            assert!(!todo.favorite);
        }
    }

    #[test]
    fn shift_handles_both_directions() {
        assert_eq!(shift(today(), -10), NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
        assert_eq!(shift(today(), 30), NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(shift(today(), 0), today());
    }
}
