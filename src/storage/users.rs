//! User region preference store
//!
//! One row per user; at most one active region per user. `clear_region`
//! NULLs the fields but keeps the row, so the row itself records that the
//! user has been through the flow before.

use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::AppResult;

/// Durable region subscription of a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegionPreference {
    /// Telegram ID пользователя
    pub user_id: i64,
    /// Отображаемое имя выбранного региона
    pub region_name: String,
    /// Идентификатор региона в API тревог
    pub region_id: String,
}

/// Returns the stored preference, or `None` if the user has no row or the
/// fields have been cleared by a reset.
pub fn get_region(conn: &Connection, user_id: i64) -> AppResult<Option<UserRegionPreference>> {
    let row: Option<(Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT region_name, region_id FROM users WHERE user_id = ?1",
            params![user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    Ok(match row {
        Some((Some(region_name), Some(region_id))) => Some(UserRegionPreference {
            user_id,
            region_name,
            region_id,
        }),
        _ => None,
    })
}

/// Creates or overwrites the user's region preference (last write wins).
pub fn upsert_region(conn: &Connection, user_id: i64, region_name: &str, region_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (user_id, region_name, region_id) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id) DO UPDATE SET region_name = excluded.region_name, region_id = excluded.region_id",
        params![user_id, region_name, region_id],
    )?;
    Ok(())
}

/// Clears the preference fields while keeping the row.
pub fn clear_region(conn: &Connection, user_id: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (user_id, region_name, region_id) VALUES (?1, NULL, NULL)
         ON CONFLICT(user_id) DO UPDATE SET region_name = NULL, region_id = NULL",
        params![user_id],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::db::create_pool;
    use pretty_assertions::assert_eq;

    fn test_conn() -> (tempfile::TempDir, crate::storage::db::DbPool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        (dir, pool)
    }

    #[test]
    fn test_upsert_then_get_roundtrips() {
        let (_dir, pool) = test_conn();
        let conn = pool.get().unwrap();

        upsert_region(&conn, 42, "Kyiv", "2").unwrap();
        let pref = get_region(&conn, 42).unwrap().unwrap();
        assert_eq!(pref.region_name, "Kyiv");
        assert_eq!(pref.region_id, "2");
    }

    #[test]
    fn test_second_upsert_overwrites_not_duplicates() {
        let (_dir, pool) = test_conn();
        let conn = pool.get().unwrap();

        upsert_region(&conn, 42, "Kyiv", "2").unwrap();
        upsert_region(&conn, 42, "Lviv", "27").unwrap();

        let pref = get_region(&conn, 42).unwrap().unwrap();
        assert_eq!(pref.region_name, "Lviv");
        assert_eq!(pref.region_id, "27");

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM users WHERE user_id = 42", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_clear_keeps_row_but_hides_preference() {
        let (_dir, pool) = test_conn();
        let conn = pool.get().unwrap();

        upsert_region(&conn, 42, "Kyiv", "2").unwrap();
        clear_region(&conn, 42).unwrap();

        assert_eq!(get_region(&conn, 42).unwrap(), None);
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM users WHERE user_id = 42", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_clear_unknown_user_creates_empty_row() {
        let (_dir, pool) = test_conn();
        let conn = pool.get().unwrap();

        clear_region(&conn, 7).unwrap();
        assert_eq!(get_region(&conn, 7).unwrap(), None);
    }

    #[test]
    fn test_get_unknown_user_is_none() {
        let (_dir, pool) = test_conn();
        let conn = pool.get().unwrap();
        assert_eq!(get_region(&conn, 999).unwrap(), None);
    }
}
