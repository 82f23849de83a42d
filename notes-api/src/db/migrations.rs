use lazy_static::lazy_static;
use rusqlite_migration::{Migrations, M};

lazy_static! {
    pub static ref MIGRATIONS: Migrations<'static> = Migrations::new(vec![
        M::up(
            r#"
            CREATE TABLE users (
                email_id TEXT PRIMARY KEY NOT NULL,
                password TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active', -- active
                created_at INTEGER NOT NULL
            );
        "#
        ),
        M::up(
            r#"
            CREATE TABLE notes (
                id BLOB PRIMARY KEY CHECK(length(id) = 16) NOT NULL UNIQUE DEFAULT (uuid7_now()),

                title TEXT NOT NULL,
                description TEXT NOT NULL,

                created_by TEXT NOT NULL,
                shared_by TEXT NOT NULL DEFAULT '',
                created_at INTEGER NOT NULL
            );
        "#
        ),
        M::up("CREATE INDEX notes_created_by ON notes (created_by, created_at);"),
    ]);
}

