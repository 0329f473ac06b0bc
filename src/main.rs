use clap::{Parser, Subcommand};
use orbit_track::crew::{enrich, parse_roster, CrewSummary, DEFAULT_GREETING};
use orbit_track::{
    ConfigurationManager, EstimateFormatter, GroundTracker, OutputFormat, PositionSample,
    TrackUpdate, TrajectoryEstimator,
};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "orbit-track", version, about = "Estimate orbital ground-track speed and heading")]
struct Args {
    /// JSON tracker configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate motion between two fixes given as LAT,LON,EPOCH_SECONDS
    Estimate {
        #[arg(long, value_parser = parse_sample, allow_hyphen_values = true)]
        from: PositionSample,
        #[arg(long, value_parser = parse_sample, allow_hyphen_values = true)]
        to: PositionSample,
        /// Validate the fixes and reject reversed timestamps
        #[arg(long)]
        strict: bool,
    },
    /// Feed a JSON array of fixes through the rolling tracker
    Track { input: PathBuf },
    /// Enrich an Open Notify astros.json document
    Crew {
        input: PathBuf,
        /// Text appended to each crew member's line
        #[arg(long, default_value = DEFAULT_GREETING)]
        greeting: String,
    },
}

fn parse_sample(s: &str) -> Result<PositionSample, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [lat, lon, t] = parts.as_slice() else {
        return Err(format!("expected LAT,LON,EPOCH_SECONDS, got '{}'", s));
    };
    let latitude = lat.parse::<f64>().map_err(|e| format!("bad latitude '{}': {}", lat, e))?;
    let longitude = lon.parse::<f64>().map_err(|e| format!("bad longitude '{}': {}", lon, e))?;
    let timestamp = t.parse::<i64>().map_err(|e| format!("bad timestamp '{}': {}", t, e))?;
    Ok(PositionSample::new(latitude, longitude, timestamp))
}

/// Feed every fix to the tracker; invalid fixes are logged and skipped.
fn track_samples(tracker: &mut GroundTracker, samples: Vec<PositionSample>) -> (Vec<TrackUpdate>, usize) {
    let mut updates = Vec::with_capacity(samples.len());
    let mut skipped = 0;
    for sample in samples {
        match tracker.observe(sample) {
            Ok(update) => updates.push(update),
            Err(e) => {
                warn!(timestamp = sample.timestamp, "skipping fix: {}", e);
                skipped += 1;
            }
        }
    }
    (updates, skipped)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let manager = match &args.config {
        Some(path) => ConfigurationManager::from_file(path)?,
        None => ConfigurationManager::new(),
    };
    let config = manager.get_config().clone();
    let formatter = EstimateFormatter::new().with_precision(config.output_precision);

    match args.command {
        Command::Estimate { from, to, strict } => {
            let estimator = TrajectoryEstimator::from_config(&config);
            let estimate = if strict {
                estimator.estimate_checked(&from, &to)?
            } else {
                estimator.estimate(&from, &to)
            };
            println!("{}", args.format.render(&formatter.format(&estimate))?);
        }
        Command::Track { input } => {
            let samples: Vec<PositionSample> = serde_json::from_str(&fs::read_to_string(&input)?)?;
            let mut tracker = GroundTracker::new(config);
            let (updates, skipped) = track_samples(&mut tracker, samples);
            for update in &updates {
                if let Some(formatted) = formatter.format_update(update) {
                    println!("{}", args.format.render(&formatted)?);
                }
            }
            if let Some(mean) = tracker.mean_speed_kmh() {
                info!(
                    estimates = tracker.len(),
                    skipped,
                    mean_speed_kmh = mean,
                    distance_km = tracker.total_distance_km(),
                    "track complete"
                );
            }
        }
        Command::Crew { input, greeting } => {
            let roster = parse_roster(&fs::read_to_string(&input)?)?;
            let members = enrich(&roster.people);
            match args.format {
                OutputFormat::Text => {
                    for member in &members {
                        println!("{}", member.greeting_line(&greeting));
                    }
                    let summary = CrewSummary::from_roster(&roster);
                    println!(
                        "{} people in space | countries: {} | agencies: {}",
                        summary.headcount,
                        summary.countries.join(", "),
                        summary.agencies.join(", ")
                    );
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&members)?),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample() {
        assert_eq!(parse_sample("51.5,-0.1,0").unwrap(), PositionSample::new(51.5, -0.1, 0));
        assert_eq!(parse_sample(" 0 , 1 , 1005 ").unwrap(), PositionSample::new(0.0, 1.0, 1005));
        assert!(parse_sample("1,2").is_err());
        assert!(parse_sample("a,2,3").is_err());
        assert!(parse_sample("1,2,3.5").is_err());
    }

    #[test]
    fn test_cli_parses_estimate_command() {
        let args = Args::try_parse_from([
            "orbit-track", "--format", "json", "estimate", "--from", "0,0,1000", "--to", "0,1,1005", "--strict",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert!(matches!(args.command, Command::Estimate { strict: true, .. }));
    }

    #[test]
    fn test_cli_accepts_negative_coordinates() {
        let args = Args::try_parse_from([
            "orbit-track", "estimate", "--from", "-33.9,151.2,0", "--to", "-34.0,151.5,5",
        ])
        .unwrap();
        let Command::Estimate { from, .. } = args.command else {
            panic!("expected estimate command");
        };
        assert_eq!(from.latitude, -33.9);
    }

    #[test]
    fn test_cli_crew_greeting_defaults() {
        let args = Args::try_parse_from(["orbit-track", "crew", "astros.json"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        let Command::Crew { greeting, .. } = args.command else {
            panic!("expected crew command");
        };
        assert_eq!(greeting, "Hello! :)");

        let args = Args::try_parse_from(["orbit-track", "crew", "astros.json", "--greeting", "Hi"]).unwrap();
        assert!(matches!(args.command, Command::Crew { ref greeting, .. } if greeting == "Hi"));
    }

    #[test]
    fn test_track_skips_invalid_fixes() {
        let mut tracker = GroundTracker::default();
        let samples = vec![
            PositionSample::new(0.0, 0.0, 0),
            PositionSample::new(95.0, 0.5, 5),
            PositionSample::new(0.0, 1.0, 10),
        ];
        let (updates, skipped) = track_samples(&mut tracker, samples);

        assert_eq!(skipped, 1);
        assert_eq!(updates.len(), 2);
        assert!(matches!(updates[1], TrackUpdate::Measured(ref e) if e.elapsed_s == 10));
    }
}
