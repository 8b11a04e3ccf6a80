//! Non-destructive schema synchronization.
//!
//! Runs at startup, before the server accepts traffic. Every statement is
//! additive: enum types are created only when absent and tables use
//! `CREATE TABLE IF NOT EXISTS`. Existing rows and columns are never
//! touched, so a restart against a populated database is safe.
//!
//! Cascades are declared here, in the schema, rather than emerging from
//! handler code: deleting a user removes their teacher/parent rows.

use anyhow::Context;
use sqlx::PgPool;
use tracing::info;

const ENUM_TYPES: &[(&str, &str)] = &[
    ("user_role", "('admin', 'teacher', 'parent')"),
    ("gender", "('male', 'female', 'other')"),
    ("authorization_status", "('pending', 'approved', 'rejected')"),
    ("newsletter_status", "('draft', 'published')"),
    ("notification_type", "('general', 'personal', 'announcement')"),
    ("mood_level", "('happy', 'neutral', 'sad')"),
    ("quality_level", "('good', 'fair', 'poor')"),
];

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        role user_role NOT NULL,
        photo_url TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS classrooms (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        capacity INTEGER NOT NULL DEFAULT 20,
        age_group TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        date_of_birth DATE NOT NULL,
        gender gender NOT NULL,
        allergies TEXT,
        medical_notes TEXT,
        enrollment_date DATE NOT NULL DEFAULT CURRENT_DATE,
        classroom_id INTEGER NOT NULL REFERENCES classrooms(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teachers (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        specialization TEXT,
        bio TEXT,
        phone TEXT,
        classroom_id INTEGER REFERENCES classrooms(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS parents (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        phone_number TEXT NOT NULL,
        address TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS authorizations (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        status authorization_status NOT NULL DEFAULT 'pending',
        response_date TIMESTAMPTZ,
        response_notes TEXT,
        expiry_date TIMESTAMPTZ,
        student_id INTEGER NOT NULL REFERENCES students(id),
        parent_id INTEGER NOT NULL REFERENCES parents(id),
        requested_by_id INTEGER NOT NULL REFERENCES users(id),
        responded_by_id INTEGER REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS newsletters (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        attachments TEXT,
        published_at TIMESTAMPTZ,
        status newsletter_status NOT NULL DEFAULT 'draft',
        author_id INTEGER NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notifications (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        message TEXT NOT NULL,
        notification_type notification_type NOT NULL DEFAULT 'general',
        is_read BOOLEAN NOT NULL DEFAULT FALSE,
        sender_id INTEGER NOT NULL REFERENCES users(id),
        recipient_id INTEGER NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monthly_menus (
        id SERIAL PRIMARY KEY,
        month INTEGER NOT NULL,
        year INTEGER NOT NULL,
        file_url TEXT NOT NULL,
        description TEXT,
        uploaded_by_id INTEGER NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        file_url TEXT NOT NULL,
        file_type TEXT NOT NULL,
        file_size INTEGER,
        is_public BOOLEAN NOT NULL DEFAULT TRUE,
        category TEXT,
        uploaded_by_id INTEGER NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS follow_ups (
        id SERIAL PRIMARY KEY,
        date DATE NOT NULL DEFAULT CURRENT_DATE,
        notes TEXT NOT NULL,
        activities TEXT,
        mood mood_level,
        sleep_quality quality_level,
        appetite quality_level,
        behavior TEXT,
        learning_progress TEXT,
        student_id INTEGER NOT NULL REFERENCES students(id),
        teacher_id INTEGER NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

pub async fn sync_schema(db: &PgPool) -> anyhow::Result<()> {
    for (name, variants) in ENUM_TYPES {
        // CREATE TYPE has no IF NOT EXISTS; swallow duplicate_object instead.
        let stmt = format!(
            "DO $$ BEGIN CREATE TYPE {name} AS ENUM {variants}; \
             EXCEPTION WHEN duplicate_object THEN NULL; END $$;"
        );
        sqlx::query(&stmt)
            .execute(db)
            .await
            .with_context(|| format!("Failed to create enum type {name}"))?;
    }

    for table in TABLES {
        sqlx::query(table)
            .execute(db)
            .await
            .context("Failed to synchronize table")?;
    }

    info!("Database schema synchronized");
    Ok(())
}
