//! Dev runner: verifies realistic place-listing payloads against a spec built
//! once at startup and prints what passed, what failed, and why.
//!
//! Usage: `dev-test-runner [OPTIONS_JSON]`, e.g.
//! `dev-test-runner '{"collect_all_errors": true, "reason_format": "named"}'`.
//! Set `RUST_LOG=json_spec=trace` to watch the engine.
use anyhow::{Context, Result};
use json_spec::constraint::{array, generic, number, string, Bounds};
use json_spec::{
    adjust, alias, constrain, either, optional, GlobalOptions, Outcome, Spec, SpecOptions, Type,
    Value, Verifier,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static PLACE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0ahUKE[A-Za-z0-9]{4}$").expect("place id pattern"));

static PLACE: Lazy<Spec> = Lazy::new(|| {
    let coordinate = |lo: i32, hi: i32| {
        constrain(Type::Number, [number::finite(), number::at_least(lo), number::at_most(hi)])
    };
    let location = alias("location", Type::object([
        ("lat", coordinate(-90, 90)),
        ("lon", coordinate(-180, 180)),
    ]));
    let tag = alias("tag", constrain(Type::String, [
        string::not_empty(),
        generic::one_of(["hardware", "store", "tools", "outlet"]),
    ]));
    // "4" and 4 both show up in the wild
    let rating = either([
        constrain(Type::Number, [number::at_least(0), number::at_most(5)]),
        adjust(
            constrain(Type::String, [string::length(Bounds::between(1, 3))]),
            |v| {
                let parsed = v.as_str().and_then(|s| s.parse::<f64>().ok());
                parsed.map(Value::from).unwrap_or(v)
            },
        ),
    ]);
    let url = constrain(Type::String, [string::starts_with("https://")]);

    alias("place", Type::object([
        ("id", constrain(Type::String, [string::matches(PLACE_ID.clone())])),
        ("name", optional(constrain(Type::String, [string::not_empty()]))),
        ("location", optional(location)),
        ("url", optional(url)),
        ("rating", optional(rating)),
        ("open", optional(Type::Boolean)),
        ("tags", constrain(Type::array(tag), [array::length(Bounds::max(4))])),
    ]))
});

/// What a verified place reads back into.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Place {
    id: String,
    name: Option<String>,
    location: Option<Location>,
    url: Option<String>,
    rating: Option<f64>,
    open: Option<bool>,
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Location {
    lat: f64,
    lon: f64,
}

fn realistic_samples() -> Vec<Value> {
    vec![
        json!({
            "id": "0ahUKEa1ZQ", "name": "Acme Widgets",
            "location": {"lat": 37.4219, "lon": -122.0840},
            "url": "https://example.com/a", "rating": 4.3, "open": true,
            "tags": ["hardware", "store"]
        }),
        json!({
            "id": "0ahUKEa2ZQ", "name": "Acme Widgets - East",
            "location": {"lat": 37.4200, "lon": -122.0830},
            "rating": "4.5", "tags": ["hardware"]
        }),
        json!({"id": "0ahUKEa3ZQ", "url": "http://example.com/c", "open": false, "tags": []}),
        json!({
            "id": "0ahUKEa4ZQ", "name": "",
            "location": {"lat": 137.0, "lon": -122.0},
            "rating": 9, "tags": ["store", "toys"]
        }),
        json!({"id": "bogus", "name": "Acme Central", "tags": "tools"}),
    ]
    .into_iter()
    .map(Value::from)
    .collect()
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let global = match std::env::args().nth(1) {
        Some(src) => GlobalOptions::from_json_str(&src).context("failed to read options")?,
        None => GlobalOptions::default(),
    };
    info!(?global, aliases = ?PLACE.aliases().keys().collect::<Vec<_>>(), "verifying samples");

    let verifier = Verifier::new(global);
    let samples = realistic_samples();
    let outcomes = verifier.verify_batch(&PLACE, &samples, &SpecOptions::default());

    for (i, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Outcome::Valid(_) => {
                let place: Place = outcome
                    .deserialize()
                    .with_context(|| format!("sample {i} verified but did not read back"))?;
                println!("✅ sample {i}: {place:?}");
            }
            Outcome::Invalid(err) => {
                println!("❌ sample {i}:");
                print!("{}", err.report());
            }
        }
    }
    Ok(())
}
