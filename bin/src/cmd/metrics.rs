//! `jerez metrics` subcommand.

use anyhow::Result;

use jerez_metrics::{MetricCategory, metrics_by_category};
use jerez_traits::Direction;

pub(crate) fn run(category: Option<String>, verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Available Metrics                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let categories = [
        (MetricCategory::Quality, "Quality"),
        (MetricCategory::Value, "Value"),
        (MetricCategory::Growth, "Growth"),
    ];

    for (cat, cat_name) in categories {
        if let Some(ref filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let cat_metrics = metrics_by_category(&cat);
        if cat_metrics.is_empty() {
            continue;
        }

        println!("{cat_name}:");
        println!("{}", "-".repeat(60));

        for info in cat_metrics {
            if verbose {
                let direction = match info.direction {
                    Direction::HigherIsBetter => "higher is better",
                    Direction::LowerIsBetter => "lower is better",
                };
                println!(
                    "  {:20} - {} ({direction}, needs {} quarters)",
                    info.name, info.description, info.requires_history_quarters
                );
            } else {
                println!("  {}", info.name);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for detailed metric descriptions.\n");
    }

    Ok(())
}
