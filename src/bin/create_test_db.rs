use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::UtcOffset;

use finance_tracker::{
    AppState, BudgetForm, BudgetStore, Category, Period, TransactionForm, TransactionStore,
    close_db, open_db,
};

/// A utility for creating a test database for the REST API server of finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many months of sample transactions to create, ending at the current month.
    #[arg(long, short, default_value_t = 6)]
    months: usize,
}

/// (day of month, amount, description, category, is expense)
const MONTHLY_TRANSACTIONS: [(u8, f64, &str, Category, bool); 10] = [
    (1, 4200.0, "Salary", Category::Income, false),
    (2, 1450.0, "Rent", Category::Housing, true),
    (4, 86.4, "Groceries", Category::FoodAndDining, true),
    (7, 45.0, "Bus pass", Category::Transportation, true),
    (9, 17.99, "Streaming service", Category::Subscriptions, true),
    (12, 132.75, "Power bill", Category::Utilities, true),
    (15, 64.2, "Dinner out", Category::FoodAndDining, true),
    (18, 220.0, "Index fund", Category::Investments, true),
    (21, 39.5, "Cinema tickets", Category::Entertainment, true),
    (26, 121.3, "Groceries", Category::FoodAndDining, true),
];

/// (category, amount, notes)
const MONTHLY_BUDGETS: [(Category, f64, Option<&str>); 5] = [
    (Category::Housing, 1450.0, Some("Rent only")),
    (Category::FoodAndDining, 300.0, None),
    (Category::Transportation, 60.0, None),
    (Category::Entertainment, 30.0, Some("Keep it cheap this month")),
    (Category::Utilities, 150.0, None),
];

/// Create and populate a database for manual testing.
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
    let conn = open_db(Some(output_path))?;
    let state = AppState::new(conn, "Etc/UTC")?;

    let periods = Period::current(UtcOffset::UTC).last_n(args.months);

    println!("Creating test transactions...");
    let mut transaction_count = 0;
    for period in &periods {
        for (day, amount, description, category, is_expense) in MONTHLY_TRANSACTIONS {
            let date = period.first_day().replace_day(day)?;
            let form = TransactionForm {
                amount: Some(amount),
                date: Some(date.to_string()),
                description: Some(description.to_owned()),
                category: Some(category.as_str().to_owned()),
                is_expense: Some(is_expense),
            };

            state.transaction_store.create(&form, UtcOffset::UTC)?;
            transaction_count += 1;
        }
    }
    println!("Created {transaction_count} transactions.");

    println!("Creating test budgets...");
    let mut budget_count = 0;
    // The oldest month is left without budgets so the empty state can be checked.
    for period in periods.iter().skip(1) {
        for (category, amount, notes) in MONTHLY_BUDGETS {
            let form = BudgetForm {
                category: Some(category.as_str().to_owned()),
                amount: Some(amount),
                month: Some(period.to_string()),
                notes: notes.map(str::to_owned),
            };

            state.budget_store.create(&form)?;
            budget_count += 1;
        }
    }
    println!("Created {budget_count} budgets.");

    let db_connection = state.db_connection.clone();
    drop(state);
    close_db(db_connection);

    println!("Success!");

    Ok(())
}
