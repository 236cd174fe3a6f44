use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::analyzer::Analyzer;
use crate::charts;
use crate::record::{format_usd, money_to_decimal_str, SalesRecord};

/// Dataset path offered when the load prompt is left blank and no
/// path was given on the command line.
const DEFAULT_DATA_PATH: &str = "retail_sales.csv";

/// Run the interactive session loop until exit or end of input.
///
/// Every analysis failure is reported and the loop keeps going; the
/// only errors that escape are terminal i/o ones.
pub fn the_app() -> io::Result<()> {
    // begin preprocessing
    let args: Vec<String> = env::args().collect();
    let default_path = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_owned());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut analyzer = Analyzer::new();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Enter your choice (1-5): ")? else {
            // stdin closed under us; leave as if exit was chosen
            break;
        };

        match choice.as_str() {
            "1" => handle_load(&mut input, &mut analyzer, &default_path)?,
            "2" => handle_summary(&mut analyzer),
            "3" => handle_filter(&mut input, &analyzer)?,
            "4" => handle_charts(&analyzer),
            "5" => {
                println!("Exiting the retail sales analyzer. Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please enter a number between 1 and 5."),
        }
    }

    Ok(())
}

fn print_menu() {
    println!("\n----- Retail Sales Data Analyzer -----");
    println!("1. Load sales data");
    println!("2. Display summary report");
    println!("3. Filter and view data");
    println!("4. Generate visualizations");
    println!("5. Exit");
}

/// Print a prompt and read one trimmed line; None once stdin closes.
fn prompt<R: BufRead>(input: &mut R, message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Blank prompt input means the predicate was skipped.
fn skippable(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn handle_load<R: BufRead>(
    input: &mut R,
    analyzer: &mut Analyzer,
    default_path: &str,
) -> io::Result<()> {
    let message = format!("Enter the path to the CSV file (default: {default_path}): ");
    let Some(path) = prompt(input, &message)? else {
        return Ok(());
    };
    let path = if path.is_empty() { default_path } else { &path };

    match analyzer.load(Path::new(path)) {
        Ok(report) => {
            println!("Data loaded and processed successfully.");
            println!(
                "{} valid rows kept, {} dropped during cleaning.",
                report.kept_rows(),
                report.dropped_rows
            );
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn handle_summary(analyzer: &mut Analyzer) {
    match analyzer.compute_metrics() {
        Ok(metrics) => {
            println!("\n--- Retail Analysis Summary ---");
            println!("Total Sales: ${}", format_usd(metrics.total_sales));
            println!(
                "Average Sale Value: ${}",
                format_usd(metrics.average_sale_value)
            );
            println!("Most Popular Product: {}", metrics.most_popular_product);
            println!("-------------------------------\n");
        }
        Err(err) => println!("{err}. Please load data first (option 1)."),
    }
}

fn handle_filter<R: BufRead>(input: &mut R, analyzer: &Analyzer) -> io::Result<()> {
    if analyzer.is_empty() {
        println!("Please load data first (option 1).");
        return Ok(());
    }

    let Some(category) = prompt(input, "Filter by category (or press Enter to skip): ")? else {
        return Ok(());
    };
    let Some(start) = prompt(input, "Enter start date (YYYY-MM-DD) or press Enter to skip: ")?
    else {
        return Ok(());
    };
    let Some(end) = prompt(input, "Enter end date (YYYY-MM-DD) or press Enter to skip: ")? else {
        return Ok(());
    };

    match analyzer.filter(skippable(&category), skippable(&start), skippable(&end)) {
        Ok(matched) if matched.is_empty() => {
            println!("\nNo results found for the given criteria.");
        }
        Ok(matched) => {
            println!("\nFiltered Sales Data:");
            print_records(&matched);
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn handle_charts(analyzer: &Analyzer) {
    if analyzer.is_empty() {
        println!("No data available for visualization.");
        return;
    }
    charts::render_dashboard(analyzer.records());
}

fn print_records(records: &[SalesRecord]) {
    println!(
        "{: >10},{: >16},{: >12},{: >12},{: >8},{: >12}",
        "date", "product", "category", "price", "qty", "total"
    );
    for record in records {
        println!(
            "{: >10},{: >16},{: >12},{: >12},{: >8},{: >12}",
            record.date,
            record.product,
            record.category,
            money_to_decimal_str(record.price),
            record.quantity_sold,
            money_to_decimal_str(record.total_sales),
        );
    }
}
