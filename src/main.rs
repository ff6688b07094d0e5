use duet_algo::config::Settings;
use duet_algo::core::{score_matrix, Matcher};
use duet_algo::models::{Gender, GenderPref, Pairing, ScoreMatrix};
use duet_algo::services::{
    load_gender_identities, load_gender_preferences, load_roster, load_score_matrix,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Duet matching run...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    let policy = settings.matching.policy().unwrap_or_else(|e| {
        error!("Invalid matching configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Load engine inputs
    let (scores, genders, prefs) = load_inputs(&settings).unwrap_or_else(|e| {
        error!("Failed to load inputs: {}", e);
        panic!("Input error: {}", e);
    });

    info!(
        "Loaded {} participants (input mode: {})",
        genders.len(),
        settings.input.mode
    );

    // Run the matching
    let matcher = Matcher::new(policy);
    info!("Matcher initialized with policy: {:?}", policy);

    let result = matcher.run(&scores, &genders, &prefs).unwrap_or_else(|e| {
        error!("Matching failed: {}", e);
        panic!("Matching error: {}", e);
    });

    info!(
        "Matched {} of {} participants in {} proposals",
        result.matched_count(),
        result.total_participants,
        result.proposals
    );

    match settings.output.format.as_str() {
        "json" => {
            let body = serde_json::to_string_pretty(&result.pairings)
                .expect("pairings serialize to JSON");
            println!("{}", body);
        }
        _ => print_table(&result.pairings),
    }
}

/// Assemble the engine's three inputs per the configured input mode
fn load_inputs(
    settings: &Settings,
) -> Result<(ScoreMatrix, Vec<Gender>, Vec<GenderPref>), Box<dyn std::error::Error>> {
    match settings.input.mode.as_str() {
        "matrix" => {
            let scores = load_score_matrix(&settings.input.scores_path)?;
            let genders = load_gender_identities(&settings.input.genders_path)?;
            let prefs = load_gender_preferences(&settings.input.preferences_path)?;
            Ok((scores, genders, prefs))
        }
        "roster" => {
            let roster = load_roster(&settings.input.roster_path)?;
            let scores = score_matrix(&roster);
            let genders = roster.iter().map(|p| p.gender).collect();
            let prefs = roster
                .iter()
                .map(|p| GenderPref::from_attraction(&p.preferences))
                .collect();
            Ok((scores, genders, prefs))
        }
        other => Err(format!(
            "unknown input mode {:?} (expected \"matrix\" or \"roster\")",
            other
        )
        .into()),
    }
}

fn print_table(pairings: &[Pairing]) {
    for pairing in pairings {
        match pairing.partner {
            Some(partner) => println!("{:>5}  {:>5}", pairing.participant, partner),
            None => println!("{:>5}  unmatched", pairing.participant),
        }
    }
}
