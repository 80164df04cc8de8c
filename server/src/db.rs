use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

const DEFAULT_POOL_SIZE: u32 = 10;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Build the connection pool and bring the schema up to date. Pool size
/// comes from `DATABASE_POOL_SIZE` when set to a positive integer.
pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(parse_pool_size(std::env::var("DATABASE_POOL_SIZE").ok()))
        .build(manager)
        .expect("Failed to build the recipe database pool");

    // Run pending migrations on startup
    let mut conn = pool
        .get()
        .expect("Failed to check out a connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to migrate the recipe database");

    pool
}

fn parse_pool_size(raw: Option<String>) -> u32 {
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_POOL_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_reads_explicit_value() {
        assert_eq!(parse_pool_size(Some("4".to_string())), 4);
        assert_eq!(parse_pool_size(Some(" 32 ".to_string())), 32);
    }

    #[test]
    fn test_pool_size_falls_back_when_unset_or_invalid() {
        assert_eq!(parse_pool_size(None), DEFAULT_POOL_SIZE);
        assert_eq!(parse_pool_size(Some("lots".to_string())), DEFAULT_POOL_SIZE);
        assert_eq!(parse_pool_size(Some("0".to_string())), DEFAULT_POOL_SIZE);
    }
}
