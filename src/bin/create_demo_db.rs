use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use rewards_wallet::{
    CreditCard, MerchantName, NewUser, count_users, create_credit_card, create_merchant,
    create_user, initialize_db,
};

/// A utility for creating a demo database for the rewards_wallet server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database with the demo user and sample records.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    if count_users(&conn)? > 0 {
        eprintln!("The database already contains users, not seeding.");
        exit(1);
    }

    println!("Creating demo user...");

    let user = create_user(
        NewUser {
            username: "testuser".to_string(),
            password: "password123".to_string(),
            email: "user@example.com".to_string(),
        },
        &conn,
    )?;

    println!("Creating sample credit cards...");

    create_credit_card(
        CreditCard::build("VISA", "1234", "12/26", 1.0)
            .nickname("Main Card")
            .issuer("Rakuten Card")
            .logo_url("https://example.com/rakuten-logo.png"),
        user.id,
        &conn,
    )?;

    create_credit_card(
        CreditCard::build("MasterCard", "5678", "03/27", 0.5)
            .nickname("Backup Card")
            .issuer("Aeon Card")
            .logo_url("https://example.com/aeon-logo.png"),
        user.id,
        &conn,
    )?;

    println!("Creating sample merchants...");

    create_merchant(
        MerchantName::new("Amazon")?,
        Some("https://example.com/amazon-logo.png"),
        Some("Online Shopping"),
        &conn,
    )?;

    create_merchant(
        MerchantName::new("Seven Eleven")?,
        Some("https://example.com/seven-logo.png"),
        Some("Convenience Store"),
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
