//! Free-text plan entries, scoped by owning user.
//!
//! Edit and delete match on `(id, user_id)` together, so a plan id that
//! belongs to someone else behaves exactly like a missing id.

use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::AppResult;

/// Одна запись плана пользователя.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
}

/// Inserts a new plan and returns its id.
pub fn add_plan(conn: &Connection, user_id: i64, text: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO plans (user_id, plan) VALUES (?1, ?2)",
        params![user_id, text],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All plans of a user, in insertion order.
pub fn list_plans(conn: &Connection, user_id: i64) -> AppResult<Vec<PlanEntry>> {
    let mut stmt = conn.prepare("SELECT id, user_id, plan FROM plans WHERE user_id = ?1 ORDER BY id")?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(PlanEntry {
            id: row.get(0)?,
            user_id: row.get(1)?,
            text: row.get(2)?,
        })
    })?;

    let mut plans = Vec::new();
    for row in rows {
        plans.push(row?);
    }
    Ok(plans)
}

/// Fetches a single plan if it exists and belongs to `user_id`.
pub fn get_plan(conn: &Connection, id: i64, user_id: i64) -> AppResult<Option<PlanEntry>> {
    let entry = conn
        .query_row(
            "SELECT id, user_id, plan FROM plans WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
            |row| {
                Ok(PlanEntry {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    text: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(entry)
}

/// Replaces the text of a plan. Returns `false` when no row matches both the
/// id and the owning user.
pub fn update_plan(conn: &Connection, id: i64, user_id: i64, new_text: &str) -> AppResult<bool> {
    let affected = conn.execute(
        "UPDATE plans SET plan = ?1 WHERE id = ?2 AND user_id = ?3",
        params![new_text, id, user_id],
    )?;
    Ok(affected > 0)
}

/// Deletes a plan. Returns `false` when no row matches both the id and the
/// owning user.
pub fn delete_plan(conn: &Connection, id: i64, user_id: i64) -> AppResult<bool> {
    let affected = conn.execute(
        "DELETE FROM plans WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::db::create_pool;
    use pretty_assertions::assert_eq;

    fn test_pool() -> (tempfile::TempDir, crate::storage::db::DbPool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        (dir, pool)
    }

    #[test]
    fn test_add_and_list_in_insertion_order() {
        let (_dir, pool) = test_pool();
        let conn = pool.get().unwrap();

        let first = add_plan(&conn, 1, "купить хлеб").unwrap();
        let second = add_plan(&conn, 1, "позвонить маме").unwrap();
        assert!(second > first);

        let plans = list_plans(&conn, 1).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].text, "купить хлеб");
        assert_eq!(plans[1].text, "позвонить маме");
    }

    #[test]
    fn test_list_is_scoped_by_user() {
        let (_dir, pool) = test_pool();
        let conn = pool.get().unwrap();

        add_plan(&conn, 1, "mine").unwrap();
        add_plan(&conn, 2, "theirs").unwrap();

        let plans = list_plans(&conn, 1).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].text, "mine");
    }

    #[test]
    fn test_update_own_plan() {
        let (_dir, pool) = test_pool();
        let conn = pool.get().unwrap();

        let id = add_plan(&conn, 1, "old").unwrap();
        assert!(update_plan(&conn, id, 1, "new").unwrap());
        assert_eq!(get_plan(&conn, id, 1).unwrap().unwrap().text, "new");
    }

    #[test]
    fn test_cross_user_update_misses_and_mutates_nothing() {
        let (_dir, pool) = test_pool();
        let conn = pool.get().unwrap();

        let id = add_plan(&conn, 1, "original").unwrap();
        assert!(!update_plan(&conn, id, 2, "hijacked").unwrap());
        assert_eq!(get_plan(&conn, id, 1).unwrap().unwrap().text, "original");
    }

    #[test]
    fn test_cross_user_delete_misses_and_mutates_nothing() {
        let (_dir, pool) = test_pool();
        let conn = pool.get().unwrap();

        let id = add_plan(&conn, 1, "keep me").unwrap();
        assert!(!delete_plan(&conn, id, 2).unwrap());
        assert!(get_plan(&conn, id, 1).unwrap().is_some());
    }

    #[test]
    fn test_delete_own_plan() {
        let (_dir, pool) = test_pool();
        let conn = pool.get().unwrap();

        let id = add_plan(&conn, 1, "done soon").unwrap();
        assert!(delete_plan(&conn, id, 1).unwrap());
        assert!(get_plan(&conn, id, 1).unwrap().is_none());
        assert!(!delete_plan(&conn, id, 1).unwrap());
    }
}
