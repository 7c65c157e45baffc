//! CLI tool for skuroll - consolidates POS XLSX exports into ranked SKU
//! sales totals.
//!
//! Usage:
//!   skuroll_cli <file.xlsx>...                 # Print ranked table
//!   skuroll_cli <file.xlsx>... -o out.xlsx     # Also write consolidated workbook
//!   skuroll_cli <file.xlsx>... --top 5         # Size of the top slice (default 10)
//!   skuroll_cli <file.xlsx>... --json          # Machine-readable output
//!
//! Files are processed in argument order; that order breaks ranking ties.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use skuroll::export::write_workbook;
use skuroll::{consolidate_paths, rank, ChartSeries};

struct Args {
    inputs: Vec<String>,
    output: Option<String>,
    top: usize,
    json: bool,
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut inputs = Vec::new();
    let mut output = None;
    let mut top = 10;
    let mut json = false;

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-o" => {
                i += 1;
                output = Some(
                    argv.get(i)
                        .ok_or_else(|| "-o requires a path".to_string())?
                        .clone(),
                );
            }
            "--top" => {
                i += 1;
                top = argv
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| "--top requires a number".to_string())?;
            }
            "--json" => json = true,
            other => inputs.push(other.to_string()),
        }
        i += 1;
    }

    Ok(Args {
        inputs,
        output,
        top,
        json,
    })
}

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();

    if argv.is_empty() {
        eprintln!("Usage: skuroll_cli <file.xlsx>... [-o output.xlsx] [--top N] [--json]");
        std::process::exit(1);
    }

    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let totals = match consolidate_paths(&args.inputs) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let view = rank(&totals);
    let top = view.top_n(args.top);

    if args.json {
        let payload = serde_json::json!({
            "totals": totals,
            "ranked": view,
            "top": ChartSeries::from_view(&top),
        });
        let json = match serde_json::to_string_pretty(&payload) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing JSON: {}", e);
                std::process::exit(1);
            }
        };
        io::stdout().write_all(json.as_bytes()).unwrap();
        println!();
    } else {
        println!("{:<32} {:>14}", "SKU", "Sales");
        for entry in view.iter() {
            println!("{:<32} {:>14}", entry.sku, entry.amount);
        }
        eprintln!("{} SKUs from {} file(s)", view.len(), args.inputs.len());
    }

    if let Some(path) = args.output {
        let bytes = match write_workbook(&view) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Error building workbook: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = fs::write(&path, bytes) {
            eprintln!("Error writing {}: {}", path, e);
            std::process::exit(1);
        }
        eprintln!("Written: {}", path);
    }
}
