//! Example data for a fresh database.
//!
//! Mirrors the fixture the blog ships with: three users and six boards
//! written by `ssar`.

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use super::Database;
use crate::auth::hash_password;
use crate::{BlogError, Result};

/// Plain-text password shared by every example user.
pub const SEED_PASSWORD: &str = "1234";

const SEED_USERS: &[(&str, &str)] = &[
    ("ssar", "ssar@nate.com"),
    ("cos", "cos@nate.com"),
    ("love", "love@nate.com"),
];

const SEED_BOARD_COUNT: i64 = 6;

/// Insert the example users and boards.
///
/// Does nothing unless both the users and boards tables are empty. Board
/// `n` is stamped `n - 1` minutes before a fixed base time, so board 1 is
/// the most recent one. Returns whether anything was inserted.
pub async fn seed_example_data(db: &Database) -> Result<bool> {
    let (users, boards): (i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM users), (SELECT COUNT(*) FROM boards)",
    )
    .fetch_one(db.pool())
    .await?;

    if users > 0 || boards > 0 {
        debug!(users, boards, "Database already has data, skipping seed");
        return Ok(false);
    }

    let password_hash =
        hash_password(SEED_PASSWORD).map_err(|e| BlogError::Validation(e.to_string()))?;

    let base = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .ok_or_else(|| BlogError::Config("invalid seed base time".to_string()))?;

    let mut tx = db.pool().begin().await?;

    let mut owner_id = 0;
    for &(username, email) in SEED_USERS {
        let result = sqlx::query("INSERT INTO users (username, password, email) VALUES (?, ?, ?)")
            .bind(username)
            .bind(&password_hash)
            .bind(email)
            .execute(&mut *tx)
            .await?;
        if owner_id == 0 {
            owner_id = result.last_insert_rowid();
        }
    }

    for n in 1..=SEED_BOARD_COUNT {
        let created_at = base - Duration::minutes(n - 1);
        sqlx::query("INSERT INTO boards (title, content, user_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(format!("{n}번째 제목"))
            .bind(format!("{n}번째 내용"))
            .bind(owner_id)
            .bind(created_at.format("%Y-%m-%d %H:%M:%S").to_string())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        users = SEED_USERS.len(),
        boards = SEED_BOARD_COUNT,
        "Seeded example data"
    );
    Ok(true)
}
