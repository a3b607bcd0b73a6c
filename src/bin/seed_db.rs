use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finance_tracker::{
    Amount, CategoryName, NewCategory, NewTransaction, create_category, create_transaction,
    initialize,
};

/// A utility for creating a database with sample categories and transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const CATEGORIES: [(&str, &str); 4] = [
    ("Groceries", "Supermarket and produce"),
    ("Rent", "Monthly rent"),
    ("Salary", "Income from work"),
    ("Eating Out", "Restaurants and takeaways"),
];

/// Sample transactions as (category index, amount, description, days ago).
const TRANSACTIONS: [(Option<usize>, f64, &str, i64); 10] = [
    (Some(2), 4250.00, "Monthly pay", 28),
    (Some(1), -1800.00, "Rent for the month", 27),
    (Some(0), -142.37, "Weekly shop", 21),
    (Some(3), -38.50, "Dinner with friends", 18),
    (Some(0), -96.10, "Weekly shop", 14),
    (None, 25.00, "Refund", 12),
    (Some(3), -12.80, "Lunch", 9),
    (Some(0), -118.45, "Weekly shop", 7),
    (None, -60.00, "Gift", 3),
    (Some(3), -6.20, "Coffee", 1),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize(&connection)?;

    println!("Creating categories...");
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = create_category(
            &NewCategory {
                name: CategoryName::new(name)?,
                description: Some(description.to_owned()),
            },
            &connection,
        )?;
        category_ids.push(category.id);
    }

    println!("Creating transactions...");
    let today = OffsetDateTime::now_utc();
    for (category_index, amount, description, days_ago) in TRANSACTIONS {
        create_transaction(
            &NewTransaction {
                amount: Amount::new(amount)?,
                description: Some(description.to_owned()),
                date: Some(today - Duration::days(days_ago)),
                category_id: category_index.map(|index| category_ids[index]),
            },
            &connection,
        )?;
    }

    println!("Success!");

    Ok(())
}
