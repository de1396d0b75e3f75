use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(50),
            photo_url TEXT,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            description TEXT,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "services",
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id SERIAL PRIMARY KEY,
            category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
            name VARCHAR(255) NOT NULL UNIQUE,
            description TEXT,
            base_price DOUBLE PRECISION NOT NULL,
            min_price DOUBLE PRECISION NOT NULL,
            max_price DOUBLE PRECISION NOT NULL,
            duration_minutes INTEGER,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "cars",
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id SERIAL PRIMARY KEY,
            brand VARCHAR(100) NOT NULL,
            model VARCHAR(100) NOT NULL,
            year INTEGER NOT NULL,
            type VARCHAR(20) NOT NULL,
            CONSTRAINT valid_car_type CHECK (type IN ('Standard', 'Premium', 'Luxury')),
            CONSTRAINT unique_car UNIQUE (brand, model, year)
        );
        "#,
    ),
    (
        "masters",
        r#"
        CREATE TABLE IF NOT EXISTS masters (
            id SERIAL PRIMARY KEY,
            user_id INTEGER UNIQUE REFERENCES users(id) ON DELETE SET NULL,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(50) NOT NULL,
            specialization TEXT,
            rating DOUBLE PRECISION NOT NULL DEFAULT 0,
            photo_url TEXT,
            location_lat DOUBLE PRECISION,
            location_lng DOUBLE PRECISION,
            address TEXT,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "master_schedule",
        r#"
        CREATE TABLE IF NOT EXISTS master_schedule (
            id SERIAL PRIMARY KEY,
            master_id INTEGER NOT NULL REFERENCES masters(id) ON DELETE CASCADE,
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_working_hours CHECK (end_time > start_time),
            CONSTRAINT unique_master_day UNIQUE (master_id, day_of_week)
        );
        "#,
    ),
    (
        "appointments",
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            master_id INTEGER NOT NULL REFERENCES masters(id) ON DELETE CASCADE,
            service_id INTEGER NOT NULL REFERENCES services(id),
            date DATE NOT NULL,
            time TIME NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            comment TEXT,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed'))
        );
        "#,
    ),
    (
        "master_works",
        r#"
        CREATE TABLE IF NOT EXISTS master_works (
            id SERIAL PRIMARY KEY,
            master_id INTEGER NOT NULL REFERENCES masters(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            work_date DATE NOT NULL,
            customer_name VARCHAR(255) NOT NULL,
            amount DOUBLE PRECISION,
            photo_urls TEXT[],
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "master_payment_info",
        r#"
        CREATE TABLE IF NOT EXISTS master_payment_info (
            id SERIAL PRIMARY KEY,
            master_id INTEGER NOT NULL UNIQUE REFERENCES masters(id) ON DELETE CASCADE,
            kaspi_card VARCHAR(32),
            freedom_card VARCHAR(32),
            halyk_card VARCHAR(32),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "reviews",
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id SERIAL PRIMARY KEY,
            master_id INTEGER NOT NULL REFERENCES masters(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            rating INTEGER NOT NULL,
            comment TEXT,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_rating CHECK (rating BETWEEN 1 AND 5)
        );
        "#,
    ),
    (
        "user_subscriptions",
        r#"
        CREATE TABLE IF NOT EXISTS user_subscriptions (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            plan VARCHAR(20) NOT NULL DEFAULT 'basic',
            trial_start_date TIMESTAMP WITH TIME ZONE,
            trial_end_date TIMESTAMP WITH TIME ZONE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_plan CHECK (plan IN ('basic', 'premium', 'trial'))
        );
        "#,
    ),
    (
        "favorite_masters",
        r#"
        CREATE TABLE IF NOT EXISTS favorite_masters (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            master_id INTEGER NOT NULL REFERENCES masters(id) ON DELETE CASCADE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_favorite UNIQUE (user_id, master_id)
        );
        "#,
    ),
    (
        "user_cars",
        r#"
        CREATE TABLE IF NOT EXISTS user_cars (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            year INTEGER,
            comment TEXT,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "guarantees",
        r#"
        CREATE TABLE IF NOT EXISTS guarantees (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            appointment_id INTEGER NOT NULL UNIQUE REFERENCES appointments(id) ON DELETE CASCADE,
            service_name VARCHAR(255) NOT NULL,
            master_name VARCHAR(255),
            service_date DATE NOT NULL,
            expiry_date DATE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "notifications",
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            type VARCHAR(50) NOT NULL,
            title VARCHAR(255) NOT NULL,
            message TEXT,
            related_id INTEGER,
            is_read BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
];

// One statement per entry: prepared statements cannot carry several commands.
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_services_category_id ON services(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_master_schedule_master_id ON master_schedule(master_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_user_id ON appointments(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_master_date ON appointments(master_id, date)",
    // A slot stays taken until its appointment is cancelled.
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_active_slot ON appointments(master_id, date, time) WHERE status <> 'cancelled'",
    "CREATE INDEX IF NOT EXISTS idx_master_works_master_id ON master_works(master_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_master_id ON reviews(master_id)",
    "CREATE INDEX IF NOT EXISTS idx_user_cars_user_id ON user_cars(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_guarantees_user_id ON guarantees(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for (table, statement) in TABLES {
        tracing::debug!("Creating table {}", table);
        sqlx::query(statement).execute(pool).await?;
    }

    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
