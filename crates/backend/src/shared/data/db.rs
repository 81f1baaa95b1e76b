use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

async fn execute(conn: &DatabaseConnection, sql: &str) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        sql.to_string(),
    ))
    .await?;
    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let sql = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, sql))
        .await?;
    Ok(!rows.is_empty())
}

async fn column_exists(
    conn: &DatabaseConnection,
    table: &str,
    column: &str,
) -> anyhow::Result<bool> {
    let pragma = format!("PRAGMA table_info('{}');", table);
    let cols = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?;
    for row in cols {
        let name: String = row.try_get("", "name").unwrap_or_default();
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    // Cascade delete of ledger rows relies on this
    execute(&conn, "PRAGMA foreign_keys = ON;").await?;

    if !table_exists(&conn, "a001_trabajador").await? {
        tracing::info!("Creating a001_trabajador table");
        execute(
            &conn,
            r#"
            CREATE TABLE a001_trabajador (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                nombres TEXT NOT NULL,
                apellidos TEXT NOT NULL,
                documento TEXT NOT NULL DEFAULT '',
                cargo TEXT NOT NULL DEFAULT '',
                telefono TEXT,
                email TEXT,
                salario_actual REAL,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
        )
        .await?;
    }

    if !table_exists(&conn, "a002_tipo_contrato").await? {
        tracing::info!("Creating a002_tipo_contrato table");
        execute(
            &conn,
            r#"
            CREATE TABLE a002_tipo_contrato (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
        )
        .await?;
    }

    if !table_exists(&conn, "a003_contrato").await? {
        tracing::info!("Creating a003_contrato table");
        execute(
            &conn,
            r#"
            CREATE TABLE a003_contrato (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                trabajador_id TEXT NOT NULL,
                tipo_contrato_id TEXT NOT NULL,
                remuneracion REAL NOT NULL,
                fecha_inicio TEXT NOT NULL,
                fecha_fin TEXT NOT NULL,
                estado TEXT NOT NULL DEFAULT 'ACTIVO',
                renovado INTEGER NOT NULL DEFAULT 0,
                fecha_renovacion TEXT,
                motivo_terminacion TEXT,
                documento_url TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
        )
        .await?;
        execute(
            &conn,
            "CREATE INDEX idx_a003_contrato_trabajador_estado ON a003_contrato (trabajador_id, estado);",
        )
        .await?;
    } else if !column_exists(&conn, "a003_contrato", "documento_url").await? {
        tracing::info!("Adding documento_url column to a003_contrato");
        execute(
            &conn,
            "ALTER TABLE a003_contrato ADD COLUMN documento_url TEXT;",
        )
        .await?;
    }

    if !table_exists(&conn, "a004_historial_contrato").await? {
        tracing::info!("Creating a004_historial_contrato table");
        execute(
            &conn,
            r#"
            CREATE TABLE a004_historial_contrato (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                contrato_id TEXT NOT NULL REFERENCES a003_contrato(id) ON DELETE CASCADE,
                accion TEXT NOT NULL,
                descripcion TEXT NOT NULL,
                estado_anterior TEXT,
                estado_nuevo TEXT,
                usuario TEXT,
                ip_origen TEXT,
                observaciones TEXT,
                fecha_accion TEXT NOT NULL
            );
        "#,
        )
        .await?;
        execute(
            &conn,
            "CREATE INDEX idx_a004_historial_contrato_contrato ON a004_historial_contrato (contrato_id);",
        )
        .await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
