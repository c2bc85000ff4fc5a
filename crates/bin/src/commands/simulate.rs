//! In-memory walkthrough of a three-page booking flow.
//!
//! A customer lands on an engine page, fills it in, then moves on to an
//! availability page. Each level prints the request, the stored basket and
//! the view handed back to the page.

use harvest::{SharedBasket, SharedView, StoredBasket};
use serde_json::json;

use crate::output::{OutputFormat, print_shared_view};

fn print_level(title: &str, story: &str) {
    println!("{title}");
    println!("{}", "#".repeat(title.len()));
    println!();
    println!("{story}");
    println!();
}

fn print_state(
    requested: &SharedBasket,
    stored: &StoredBasket,
    shared: &SharedView,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "The new passed down data is {}",
        serde_json::to_string_pretty(requested)?
    );
    println!("The stored data is {}", stored.to_json()?);
    println!("The returned data is");
    print_shared_view(shared, format)?;
    println!();
    Ok(())
}

/// Run the `simulate` command
pub fn run(format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("##################");
    println!("Harvest Simulation");
    println!("##################");
    println!();

    print_level(
        "Level 1 - Generating a basket",
        "A customer has requested a page with an engine on it and needs a basket to store their needs",
    );
    let requested = SharedBasket::new(json!({"park": "PB", "agent": "PDP01"})).with_tag("engine");
    let mut stored = StoredBasket::create(&requested)?;
    let shared = stored.materialize(Some("engine"))?;
    print_state(&requested, &stored, &shared, format)?;

    print_level(
        "Level 2 - Selecting Stuff on Engine ready for an availability page",
        "The customer has filled out the engine, with some info.",
    );
    let requested = SharedBasket {
        data: json!({
            "agent": "PDP01",
            "adults": 1,
            "children": 2,
            "infants": 0
        }),
        ..shared.to_request()
    };
    stored.save(&requested)?;
    let shared = stored.materialize(Some("engine"))?;
    print_state(&requested, &stored, &shared, format)?;

    print_level(
        "Level 3 - Availability Generation",
        "The customer has landed on the availability page - we need a new version of the basket.",
    );
    stored.branch(&shared.version, "availability")?;
    let shared = stored.materialize(Some("availability"))?;
    print_state(&requested, &stored, &shared, format)?;

    Ok(())
}
