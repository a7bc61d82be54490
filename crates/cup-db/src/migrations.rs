use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (teams, users)");
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS teams (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS users (
                id                  TEXT PRIMARY KEY,
                team_id             TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                first_name          TEXT NOT NULL,
                initials            TEXT NOT NULL DEFAULT '',
                parent_names        TEXT NOT NULL DEFAULT '[]',
                grandparent_names   TEXT NOT NULL DEFAULT '[]',
                country             TEXT NOT NULL DEFAULT '',
                created_at          TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_users_team
                ON users(team_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rerunning_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
