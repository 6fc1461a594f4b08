//! Seed script for development: populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = nurstem::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    nurstem::db::migrate(&pool).await?;

    println!("=== Nurstem Seed Script ===");

    seed_roles(&pool).await?;
    seed_shift_types(&pool).await?;
    seed_areas(&pool).await?;
    seed_physicians(&pool).await?;
    seed_staff(&pool).await?;
    seed_stock_items(&pool).await?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

async fn table_count(pool: &PgPool, table: &str) -> anyhow::Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

async fn seed_roles(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "nursing_roles").await?;
    if count > 0 {
        println!("[skip] Nursing roles already exist ({count})");
        return Ok(());
    }

    let roles = [
        ("Jefe de Piso", "Alto"),
        ("Enfermero General", "Medio"),
        ("Auxiliar", "Bajo"),
    ];

    for (name, level) in roles {
        sqlx::query("INSERT INTO nursing_roles (id, name, authority_level) VALUES ($1, $2, $3)")
            .bind(Uuid::now_v7())
            .bind(name)
            .bind(level)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} nursing roles", roles.len());
    Ok(())
}

async fn seed_shift_types(pool: &PgPool) -> anyhow::Result<()> {
    let shifts = [
        ("Matutino", "07:00", "15:00"),
        ("Vespertino", "15:00", "23:00"),
        ("Nocturno", "23:00", "07:00"),
    ];

    for (name, starts, ends) in shifts {
        sqlx::query(
            "INSERT INTO shift_types (name, starts_at, ends_at) VALUES ($1, $2::time, $3::time)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(starts)
        .bind(ends)
        .execute(pool)
        .await?;
    }

    println!("[done] Ensured {} shift types", shifts.len());
    Ok(())
}

async fn seed_areas(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "areas").await?;
    if count > 0 {
        println!("[skip] Areas already exist ({count})");
        return Ok(());
    }

    let areas = [
        ("Urgencias", Some(12)),
        ("Hospitalización Piso 2", Some(20)),
        ("Terapia Intensiva", Some(6)),
        ("Pediatría", Some(10)),
        ("Sala de Espera", None),
    ];

    for (name, capacity) in areas {
        sqlx::query("INSERT INTO areas (id, name, capacity) VALUES ($1, $2, $3)")
            .bind(Uuid::now_v7())
            .bind(name)
            .bind(capacity)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} areas", areas.len());
    Ok(())
}

async fn seed_physicians(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "physicians").await?;
    if count > 0 {
        println!("[skip] Physicians already exist ({count})");
        return Ok(());
    }

    let physicians = [
        ("Dra. Elena Castillo", "Medicina Interna"),
        ("Dr. Raúl Mendoza", "Urgencias Médicas"),
        ("Dra. Sofía Herrera", "Pediatría"),
    ];

    for (name, specialty) in physicians {
        sqlx::query("INSERT INTO physicians (id, full_name, specialty) VALUES ($1, $2, $3)")
            .bind(Uuid::now_v7())
            .bind(name)
            .bind(specialty)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} physicians", physicians.len());
    Ok(())
}

async fn seed_staff(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "staff_members").await?;
    if count > 0 {
        println!("[skip] Staff already exist ({count})");
        return Ok(());
    }

    let staff = [
        ("Ana", "López García", "Jefe de Piso"),
        ("Carlos", "Pérez Ruiz", "Enfermero General"),
        ("María", "Torres Vega", "Enfermero General"),
        ("Jorge", "Sánchez Mora", "Auxiliar"),
    ];

    let mut first_id = None;
    for (first, last, role) in staff {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO staff_members (id, first_name, last_name, role_id)
             VALUES ($1, $2, $3, (SELECT id FROM nursing_roles WHERE name = $4))",
        )
        .bind(id)
        .bind(first)
        .bind(last)
        .bind(role)
        .execute(pool)
        .await?;
        first_id.get_or_insert(id);
    }

    println!("[done] Created {} staff members", staff.len());
    if let Some(id) = first_id {
        println!("       Set DEFAULT_ACTING_STAFF_ID={id} to act as the floor lead");
    }
    Ok(())
}

async fn seed_stock_items(pool: &PgPool) -> anyhow::Result<()> {
    let count = table_count(pool, "stock_items").await?;
    if count > 0 {
        println!("[skip] Stock items already exist ({count})");
        return Ok(());
    }

    let items = [
        ("Paracetamol 500mg", 120, 30, "tabletas"),
        ("Ketorolaco 30mg", 14, 20, "ampolletas"),
        ("Gasas estériles", 60, 25, "paquetes"),
        ("Jeringas 5ml", 9, 40, "piezas"),
        ("Solución salina 0.9%", 35, 15, "bolsas"),
    ];

    for (name, stock, threshold, unit) in items {
        sqlx::query(
            "INSERT INTO stock_items (id, name, stock, reorder_threshold, unit)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(stock)
        .bind(threshold)
        .bind(unit)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} stock items", items.len());
    Ok(())
}
