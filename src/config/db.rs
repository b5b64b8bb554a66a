//! Database pool construction and embedded migrations.

use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type Connection = PgConnection;
pub type Pool = r2d2::Pool<ConnectionManager<Connection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Build an r2d2 pool for the given Postgres URL. Panics when the database is
/// unreachable; pool construction only happens during bootstrap and tests.
pub fn init_db_pool(url: &str) -> Pool {
    log::info!("Configuring database connection pool");
    let manager = ConnectionManager::<Connection>::new(url);
    r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create database pool")
}

/// Apply any pending embedded migrations.
pub fn run_migration(
    conn: &mut Connection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}
