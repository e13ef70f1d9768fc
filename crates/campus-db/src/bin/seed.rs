//! # Seed Data Generator
//!
//! Populates the database with campus Points of Sale for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p campus-db --bin seed
//!
//! # Specify database path
//! cargo run -p campus-db --bin seed -- --db ./data/campus-coffee.db
//!
//! # Seed a database the server runs with case-insensitive names
//! cargo run -p campus-db --bin seed -- --name-matching case_insensitive
//! ```
//!
//! Every record goes through the same validation as API input, so the seed
//! can never store something the service would reject.
//!
//! `--name-matching` must agree with the server's `domain.name_matching`.
//! The policy is recorded in the database on first open, so seeding an
//! existing database under a different policy fails instead of writing
//! name keys the server would not find.

use anyhow::{bail, Context};
use campus_core::{validate_pos_input, NameMatching, PosInput, ValidationRules};
use campus_db::{Database, DbConfig};
use chrono::Utc;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_PATH: &str = "./campus-coffee.db";

/// (name, description, type, campus, street, house number, postal code)
const SEED: &[(&str, &str, &str, &str, &str, &str, i64)] = &[
    (
        "Schmelzpunkt",
        "Great waffles",
        "CAFE",
        "ALTSTADT",
        "Hauptstraße",
        "90",
        69117,
    ),
    (
        "Bäcker Görtz",
        "Bakery with a small seating area",
        "BAKERY",
        "INF",
        "Berliner Str.",
        "43",
        69120,
    ),
    (
        "Café Botanik",
        "Cafeteria next to the botanical garden",
        "CAFETERIA",
        "INF",
        "Im Neuenheimer Feld",
        "304",
        69120,
    ),
    (
        "New Vending Machine",
        "",
        "VENDING",
        "INF",
        "Im Neuenheimer Feld",
        "368",
        69120,
    ),
    (
        "Bergheim Kiosk",
        "Newspapers, snacks, filter coffee",
        "KIOSK",
        "BERGHEIM",
        "Bergheimer Str.",
        "58a",
        69115,
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from(DEFAULT_DB_PATH);
    let mut name_matching = NameMatching::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => match args.get(i + 1) {
                Some(path) => {
                    db_path = path.clone();
                    i += 1;
                }
                None => bail!("--db needs a path"),
            },
            "--name-matching" | "-n" => match args.get(i + 1) {
                Some(value) => {
                    name_matching = value.parse().map_err(anyhow::Error::msg)?;
                    i += 1;
                }
                None => bail!("--name-matching needs 'exact' or 'case_insensitive'"),
            },
            "--help" | "-h" => {
                println!("Campus Coffee Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -n, --name-matching <POLICY>");
                println!("                     exact | case_insensitive (default: exact)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %db_path, %name_matching, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path).name_matching(name_matching))
        .await
        .with_context(|| format!("opening {db_path}"))?;
    let repo = db.points_of_sale();

    let existing = repo.count().await?;
    if existing > 0 {
        info!(existing, "Database already has points of sale, skipping seed");
        return Ok(());
    }

    let rules = ValidationRules::default();
    let mut inserted = 0;

    for (name, description, pos_type, campus, street, house_number, postal_code) in SEED {
        let input = PosInput {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            pos_type: pos_type.to_string(),
            campus: campus.to_string(),
            street: street.to_string(),
            house_number: house_number.to_string(),
            postal_code: *postal_code,
            city: "Heidelberg".to_string(),
        };

        let draft = validate_pos_input(&input, &rules)
            .with_context(|| format!("seed record '{name}' is invalid"))?;
        let pos = repo.insert(&draft, Utc::now()).await?;

        info!(id = pos.id, name = %pos.name, "Inserted");
        inserted += 1;
    }

    info!(inserted, "Seed complete");
    db.close().await;

    Ok(())
}
