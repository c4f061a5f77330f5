use smartroute::config::ClientConfig;
use smartroute::constants::PLACE_UNRESOLVED_MESSAGE;
use smartroute::models::{
    AutocompleteResult, Coordinates, FeatureFlag, LocationField, LocationInput, PlaceSelection,
    RawTripFields, RouteCandidate,
};
use smartroute::services::candidate_source::RouteCandidateSource;
use smartroute::services::emission_tracker::{EmissionTracker, TrackerEvent, TrackerSettings};
use smartroute::services::planner_client::PlannerClient;
use smartroute::services::session::PlanningSession;
use std::env;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_TICKS: usize = 5;

fn print_help() {
    eprintln!(
        "\
Usage: smartroute-client [OPTIONS]

Options:
  --from=TEXT           Start location (default: Current Location)
  --to=TEXT             End location (default: Target Warehouse)
  --from-at=LAT,LNG     Resolve the start location to these coordinates
  --to-at=LAT,LNG       Resolve the end location to these coordinates
  --vehicle=MODE        car, bike, van, truck or bus (default: car)
  --fuel=TYPE           petrol, diesel, Electric or CNG (default: petrol)
  --weight=KG           Cargo weight in kg (default: 0)
  --priority=P          time, cost or eco (default: time)
  --traffic             Enable traffic awareness
  --reroute             Enable re-route alerts
  --select=ID           Select this candidate after planning
  --ticks=N             Number of live tracking samples to show (default: 5)
  --help                Show this help message

Environment:
  API_BASE_URL, PLAN_REQUEST_TIMEOUT_MS, SAMPLE_TIMEOUT_MS,
  TRACKING_INTERVAL_MS, PLAN_FALLBACK (surface|mock)"
    );
}

/// Resolve a location the way the autocomplete widget would: coordinates
/// that don't parse leave the field unresolved.
fn resolve_place(field: LocationField, text: &str, at: Option<&str>) -> Option<PlaceSelection> {
    let at = at?;
    let geometry = at.split_once(',').and_then(|(lat, lng)| {
        let lat = lat.trim().parse().ok()?;
        let lng = lng.trim().parse().ok()?;
        Coordinates::new(lat, lng).ok()
    });

    let mut input = LocationInput::new(field);
    input.set_text(text);
    let result = AutocompleteResult {
        formatted_address: Some(text.to_string()),
        geometry,
        ..Default::default()
    };

    match input.apply_autocomplete(result) {
        Ok(place) => Some(place.clone()),
        Err(e) => {
            eprintln!("{} ({})", PLACE_UNRESOLVED_MESSAGE, e);
            None
        }
    }
}

fn print_candidates(candidates: &[RouteCandidate], selected: Option<&str>) {
    for (i, c) in candidates.iter().enumerate() {
        let marker = if Some(c.id.as_str()) == selected { '*' } else { ' ' };
        let recommended = if i == 0 { " (recommended)" } else { "" };
        println!(
            "{} [{}] {}{}: {}, {}, {} L, {} kg CO2, risk {}, score {}, {} {:?}",
            marker,
            c.id,
            c.name,
            recommended,
            c.eta_label(),
            c.distance_label(),
            c.fuel,
            c.co2,
            c.risk,
            c.score,
            c.cost,
            c.labels
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smartroute=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let flag = |name: &str| args.iter().find_map(|a| a.strip_prefix(name));
    let from = flag("--from=").unwrap_or_default();
    let to = flag("--to=").unwrap_or_default();
    let ticks: usize = flag("--ticks=")
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let raw = RawTripFields {
        start_location: from.to_string(),
        start_place: resolve_place(LocationField::Start, from, flag("--from-at=")),
        end_location: to.to_string(),
        end_place: resolve_place(LocationField::End, to, flag("--to-at=")),
        vehicle_mode: flag("--vehicle=").unwrap_or_default().to_string(),
        fuel_type: flag("--fuel=").unwrap_or_default().to_string(),
        cargo_weight: flag("--weight=").unwrap_or_default().to_string(),
        optimization_priority: flag("--priority=").map(str::to_string),
        traffic_enabled: args.iter().any(|a| a == "--traffic"),
        reroute_enabled: args.iter().any(|a| a == "--reroute"),
    };

    let config = ClientConfig::from_env().map_err(|e| format!("Config error: {}", e))?;
    let client = Arc::new(PlannerClient::with_config(&config));
    tracing::info!("Using planning service at {}", client.base_url());

    let source = RouteCandidateSource::new(client.clone(), config.plan_fallback);
    let tracker = EmissionTracker::new(
        client,
        TrackerSettings::from(&config),
        FeatureFlag::new(false),
        FeatureFlag::new(false),
    );
    let mut session = PlanningSession::new(source, tracker);
    let mut events = session.tracker().subscribe();

    let recommended = session.plan(&raw).await?;
    println!("{}\n  {}", recommended.explanation_heading(), recommended.explanation);

    if let Some(id) = flag("--select=") {
        if let Err(e) = session.select(id) {
            eprintln!("{}", e);
        }
    }

    let selected = session.selection().current().map(|c| c.id.clone());
    print_candidates(session.selection().candidates(), selected.as_deref());

    let mut samples = 0;
    while samples < ticks {
        match events.recv().await {
            Ok(TrackerEvent::Sample(sample)) => {
                samples += 1;
                let score = sample
                    .efficiency_score
                    .map(|s| format!("{:.1}%", s))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "{:>6.2} km  {}  efficiency {}  ({:?})",
                    sample.distance_km,
                    sample.co2_label(),
                    score,
                    sample.origin
                );
            }
            Ok(TrackerEvent::RerouteDetected) => println!("Re-route advised"),
            Ok(TrackerEvent::RerouteCleared) => println!("Re-route alert cleared"),
            Ok(TrackerEvent::Deactivated) | Err(RecvError::Closed) => break,
            Err(RecvError::Lagged(n)) => tracing::warn!("Missed {} tracker events", n),
        }
    }

    session.leave_results();
    Ok(())
}
