//! Reference catalog and demo masters for local development.
//!
//! Every insert is idempotent so the seed can be re-run against a populated
//! database.

use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use tracing::{info, warn};

const CATEGORIES: &[(&str, &str)] = &[
    ("Car wash", "Exterior and interior washing"),
    ("Detailing", "Detailed body and interior treatment"),
    ("Polishing", "Body and headlight polishing"),
    ("Interior cleaning", "Deep cleaning of the cabin"),
    ("Protective coatings", "Ceramic coatings and protective films"),
    ("Maintenance", "Scheduled maintenance"),
    ("Repair", "Mechanical and electrical repair"),
    ("Tire service", "Tire change and repair"),
    ("Diagnostics", "Diagnostic checks"),
];

/// (category, name, description, base, min, max, minutes)
const SERVICES: &[(&str, &str, &str, f64, f64, f64, i32)] = &[
    ("Car wash", "Basic wash", "Body and wheels", 2000.0, 1500.0, 3000.0, 30),
    ("Car wash", "Full wash", "Body, wheels and interior", 3500.0, 2500.0, 5000.0, 60),
    ("Car wash", "Premium wash", "Full wash with interior treatment", 5000.0, 4000.0, 7000.0, 90),
    ("Car wash", "Engine bay wash", "Cleaning under the hood", 3000.0, 2000.0, 4000.0, 45),
    ("Detailing", "Body detailing", "Detailed body treatment", 8000.0, 6000.0, 12000.0, 180),
    ("Detailing", "Interior detailing", "Detailed interior treatment", 6000.0, 4500.0, 9000.0, 150),
    ("Detailing", "Full detailing", "Body and interior in one visit", 12000.0, 10000.0, 18000.0, 300),
    ("Polishing", "Body polishing", "Paintwork polishing", 12000.0, 10000.0, 18000.0, 240),
    ("Polishing", "Headlight polishing", "Headlights and tail lights", 3000.0, 2000.0, 5000.0, 60),
    ("Interior cleaning", "Interior dry cleaning", "Complete cabin cleaning", 4000.0, 3000.0, 6000.0, 120),
    ("Interior cleaning", "Seat cleaning", "Front and rear seats", 2500.0, 2000.0, 4000.0, 90),
    ("Protective coatings", "Ceramic coating", "Ceramic paint protection", 25000.0, 20000.0, 35000.0, 480),
    ("Protective coatings", "Paint protection film", "Anti-chip film", 15000.0, 12000.0, 25000.0, 360),
    ("Maintenance", "Oil change", "Engine oil and filter", 2000.0, 1500.0, 3000.0, 60),
    ("Maintenance", "Filter replacement", "Air and cabin filters", 1500.0, 1000.0, 2500.0, 45),
    ("Maintenance", "Spark plug replacement", "Ignition spark plugs", 3000.0, 2000.0, 5000.0, 90),
    ("Repair", "Engine repair", "Engine diagnostics and repair", 15000.0, 10000.0, 30000.0, 480),
    ("Repair", "Brake repair", "Pads, discs and brake fluid", 8000.0, 5000.0, 15000.0, 240),
    ("Repair", "Suspension repair", "Suspension components", 10000.0, 7000.0, 20000.0, 300),
    ("Repair", "Electrical repair", "Vehicle electrics", 5000.0, 3000.0, 10000.0, 150),
    ("Tire service", "Tire change", "Wheel removal and mounting", 5000.0, 3000.0, 8000.0, 120),
    ("Tire service", "Wheel balancing", "Balancing of all wheels", 1500.0, 1000.0, 2500.0, 60),
    ("Tire service", "Puncture repair", "Tire puncture repair", 1000.0, 500.0, 2000.0, 30),
    ("Diagnostics", "Computer diagnostics", "All vehicle systems", 2000.0, 1500.0, 3500.0, 90),
    ("Diagnostics", "Engine diagnostics", "Engine health check", 2500.0, 2000.0, 4000.0, 60),
    ("Diagnostics", "Transmission diagnostics", "Automatic gearbox check", 3000.0, 2500.0, 5000.0, 120),
];

const CARS: &[(&str, &str, i32, &str)] = &[
    ("Toyota", "Camry", 2020, "Standard"),
    ("BMW", "X5", 2021, "Premium"),
    ("Lada", "Granta", 2018, "Standard"),
    ("Mercedes-Benz", "S-Class", 2022, "Luxury"),
    ("Volkswagen", "Passat", 2010, "Standard"),
];

struct DemoMaster {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    specialization: &'static str,
    lat: f64,
    lng: f64,
    address: &'static str,
    hours: (&'static str, &'static str),
    works: &'static [(&'static str, i32, &'static str, f64)],
}

const MASTERS: &[DemoMaster] = &[
    DemoMaster {
        name: "Ivan Petrov",
        email: "master1@beep.kz",
        phone: "+77001234567",
        specialization: "Maintenance, engine repair",
        lat: 43.2220,
        lng: 76.8512,
        address: "Almaty, Abay st. 1",
        hours: ("09:00", "18:00"),
        works: &[
            ("Oil and filter change", 5, "Alexander Ivanov", 3000.0),
            ("Cooling system repair", 10, "Maria Petrova", 8000.0),
            ("Timing belt replacement", 15, "Dmitry Sidorov", 15000.0),
        ],
    },
    DemoMaster {
        name: "Sergey Smirnov",
        email: "master2@beep.kz",
        phone: "+77001234568",
        specialization: "Tire service",
        lat: 43.2200,
        lng: 76.8500,
        address: "Almaty, Dostyk st. 2",
        hours: ("08:00", "17:00"),
        works: &[
            ("Wheel balancing", 3, "Elena Kozlova", 2000.0),
            ("Tire change", 7, "Igor Morozov", 5000.0),
            ("Puncture repair", 12, "Olga Volkova", 1000.0),
        ],
    },
    DemoMaster {
        name: "Anna Kozlova",
        email: "master3@beep.kz",
        phone: "+77001234569",
        specialization: "Diagnostics, electrical repair",
        lat: 43.2180,
        lng: 76.8488,
        address: "Almaty, Abay ave. 3",
        hours: ("10:00", "19:00"),
        works: &[
            ("Computer diagnostics", 2, "Anton Novikov", 2500.0),
            ("Alternator repair", 8, "Tatiana Lebedeva", 8000.0),
            ("Battery replacement", 14, "Vadim Orlov", 5000.0),
        ],
    },
];

/// Monday to Friday.
const WORKING_DAYS: std::ops::RangeInclusive<i16> = 1..=5;

pub async fn seed_sample_data(pool: &Pool<Postgres>, master_password_hash: &str) -> Result<()> {
    info!("Seeding sample data...");

    seed_catalog(pool).await?;

    let mut master_ids = Vec::with_capacity(MASTERS.len());
    for demo in MASTERS {
        let (user_id, master_id) = seed_master(pool, demo, master_password_hash).await?;
        master_ids.push((user_id, master_id));
    }

    seed_reviews(pool, &master_ids).await?;

    info!("Sample data seeded successfully.");
    Ok(())
}

async fn seed_catalog(pool: &Pool<Postgres>) -> Result<()> {
    for (name, description) in CATEGORIES {
        sqlx::query(
            "INSERT INTO categories (name, description) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    }

    for (category, name, description, base, min, max, minutes) in SERVICES {
        sqlx::query(
            r#"
            INSERT INTO services (category_id, name, description, base_price, min_price, max_price, duration_minutes)
            SELECT id, $2, $3, $4, $5, $6, $7 FROM categories WHERE name = $1
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(category)
        .bind(name)
        .bind(description)
        .bind(base)
        .bind(min)
        .bind(max)
        .bind(minutes)
        .execute(pool)
        .await?;
    }

    for (brand, model, year, car_type) in CARS {
        sqlx::query(
            r#"
            INSERT INTO cars (brand, model, year, type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (brand, model, year) DO NOTHING
            "#,
        )
        .bind(brand)
        .bind(model)
        .bind(year)
        .bind(car_type)
        .execute(pool)
        .await?;
    }

    info!(
        "Catalog ready: {} categories, {} services, {} cars",
        CATEGORIES.len(),
        SERVICES.len(),
        CARS.len()
    );
    Ok(())
}

async fn seed_master(
    pool: &Pool<Postgres>,
    demo: &DemoMaster,
    password_hash: &str,
) -> Result<(i32, i32)> {
    let user_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO users (name, email, phone, password_hash)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(demo.name)
    .bind(demo.email)
    .bind(demo.phone)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    let master_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO masters (user_id, name, email, phone, specialization, location_lat, location_lng, address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (email) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(demo.name)
    .bind(demo.email)
    .bind(demo.phone)
    .bind(demo.specialization)
    .bind(demo.lat)
    .bind(demo.lng)
    .bind(demo.address)
    .fetch_one(pool)
    .await?;

    let (start, end) = demo.hours;
    for day in WORKING_DAYS {
        sqlx::query(
            r#"
            INSERT INTO master_schedule (master_id, day_of_week, start_time, end_time, is_active)
            VALUES ($1, $2, $3::TIME, $4::TIME, TRUE)
            ON CONFLICT (master_id, day_of_week) DO NOTHING
            "#,
        )
        .bind(master_id)
        .bind(day)
        .bind(start)
        .bind(end)
        .execute(pool)
        .await?;
    }

    let existing_works =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM master_works WHERE master_id = $1")
            .bind(master_id)
            .fetch_one(pool)
            .await?;

    if existing_works == 0 {
        for (title, days_ago, customer, amount) in demo.works {
            sqlx::query(
                r#"
                INSERT INTO master_works (master_id, title, work_date, customer_name, amount)
                VALUES ($1, $2, CURRENT_DATE - $3::INTEGER, $4, $5)
                "#,
            )
            .bind(master_id)
            .bind(title)
            .bind(days_ago)
            .bind(customer)
            .bind(amount)
            .execute(pool)
            .await?;
        }
    }

    tracing::debug!("Seeded master {} (user {})", master_id, user_id);
    Ok((user_id, master_id))
}

/// Each demo master reviews the other two, then ratings are recomputed.
async fn seed_reviews(pool: &Pool<Postgres>, masters: &[(i32, i32)]) -> Result<()> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        warn!("Reviews already present, skipping review seed");
        return Ok(());
    }

    for (_, master_id) in masters {
        for (user_id, other_master) in masters {
            if other_master == master_id {
                continue;
            }
            sqlx::query(
                "INSERT INTO reviews (master_id, user_id, rating, comment) VALUES ($1, $2, 5, $3)",
            )
            .bind(master_id)
            .bind(user_id)
            .bind("Great work, quick and professional.")
            .execute(pool)
            .await?;
        }
    }

    let master_ids: Vec<i32> = masters.iter().map(|(_, master_id)| *master_id).collect();
    let updated = sqlx::query(
        r#"
        UPDATE masters
        SET rating = (
            SELECT COALESCE(AVG(rating)::DOUBLE PRECISION, 0)
            FROM reviews
            WHERE reviews.master_id = masters.id
        )
        WHERE id = ANY($1)
        "#,
    )
    .bind(&master_ids)
    .execute(pool)
    .await?;

    if updated.rows_affected() != master_ids.len() as u64 {
        return Err(eyre!(
            "Expected to rate {} masters, updated {}",
            master_ids.len(),
            updated.rows_affected()
        ));
    }

    Ok(())
}
