use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result, params};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name = ?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Create the attendance tables (modern schema).
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id               INTEGER PRIMARY KEY,
            name             TEXT NOT NULL,
            admission_number TEXT NOT NULL DEFAULT '',
            status           TEXT NOT NULL DEFAULT 'absent',
            last_reset_date  TEXT DEFAULT NULL,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS student_sections (
            student_id INTEGER NOT NULL,
            section    TEXT NOT NULL,
            position   INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (student_id, section)
        );

        -- append-only: rows are never updated or deleted
        CREATE TABLE IF NOT EXISTS attendance_log (
            seq        INTEGER PRIMARY KEY AUTOINCREMENT,
            id         TEXT NOT NULL UNIQUE,
            student_id INTEGER,
            date       TEXT NOT NULL,
            timestamp  INTEGER NOT NULL,
            status     TEXT,
            section    TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS notes (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL,
            text       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sections_section ON student_sections(section);
        CREATE INDEX IF NOT EXISTS idx_log_date ON attendance_log(date, timestamp);
        CREATE INDEX IF NOT EXISTS idx_log_student ON attendance_log(student_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_notes_student ON notes(student_id);
        "#,
    )?;
    Ok(())
}

fn backup_before_migration(db_path: &str, tag: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let to_sql_err = |what: &str, e: String| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed ({what}): {e}"
        ))))
    };

    let backup_name = format!("{}-backup_db_pre_{tag}.zip", Local::now().format("%Y%m%d_%H%M%S"));

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let file = File::create(&backup_path).map_err(|e| to_sql_err("create", e.to_string()))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| to_sql_err("start_file", e.to_string()))?;

    let db_content = fs::read(db_path).map_err(|e| to_sql_err("read", e.to_string()))?;

    zip.write_all(&db_content)
        .map_err(|e| to_sql_err("write_all", e.to_string()))?;

    zip.finish().map_err(|e| to_sql_err("finish", e.to_string()))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Older databases stored one section per student in `students.section`.
/// Move every value into `student_sections` and drop the column.
fn migrate_split_legacy_sections(conn: &Connection) -> Result<()> {
    let version = "20250727_0002_split_legacy_sections";

    if is_applied(conn, version)? || !column_exists(conn, "students", "section")? {
        return Ok(());
    }

    warning("Legacy single-section column detected — creating safety backup before migration...");

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if db_path.is_empty() {
        warning("Could not determine DB path — backup skipped.");
    } else {
        backup_before_migration(&db_path, "multisection")?;
    }

    conn.execute_batch(
        r#"
        BEGIN;

        INSERT OR IGNORE INTO student_sections (student_id, section, position)
        SELECT s.id,
               TRIM(s.section),
               COALESCE((SELECT MAX(position) + 1 FROM student_sections ss WHERE ss.student_id = s.id), 0)
        FROM students s
        WHERE s.section IS NOT NULL AND TRIM(s.section) <> '';

        ALTER TABLE students DROP COLUMN section;

        COMMIT;
        "#,
    )?;

    mark_applied(conn, version, "Moved students.section into student_sections")?;

    success(format!(
        "Migration applied: {} → legacy sections moved to student_sections",
        version
    ));

    Ok(())
}

/// Databases created before the daily reset existed lack `last_reset_date`.
fn migrate_add_last_reset_date(conn: &Connection) -> Result<()> {
    let version = "20250801_0003_add_last_reset_date";

    if is_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "students", "last_reset_date")? {
        conn.execute(
            "ALTER TABLE students ADD COLUMN last_reset_date TEXT DEFAULT NULL;",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'last_reset_date' column: {}", e)),
            )
        })?;

        success(format!(
            "Migration applied: {} → added 'last_reset_date' to students table",
            version
        ));
    }

    mark_applied(conn, version, "Added last_reset_date to students")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "students")?;

    create_core_tables(conn)?;

    if fresh {
        success("Created attendance tables (modern schema).");
    }

    migrate_split_legacy_sections(conn)?;
    migrate_add_last_reset_date(conn)?;

    Ok(())
}
