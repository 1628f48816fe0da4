use clap::Parser;
use earpoint_quiz::config::Command;
use earpoint_quiz::utils::{logger, validation::Validate};
use earpoint_quiz::{
    AnySource, BundledSource, CatalogLoader, CliConfig, LocalSource, QuizError, QuizSession,
    Verdict,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if let Err(e) = cli.validate() {
        exit_with(e);
    }

    let mut config = cli.load_config().unwrap_or_else(|e| exit_with(e));

    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else if cli.verbose {
        logger::init_cli_logger(true);
    } else {
        logger::init_cli_logger_with_level(config.log_level());
    }

    cli.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        exit_with(e);
    }

    tracing::info!("Starting ear-quiz");
    tracing::debug!("Resolved config: {:?}", config);

    let source = AnySource {
        local: LocalSource::new(config.base_path()),
        bundled: BundledSource::default(),
    };
    let loader = CatalogLoader::new(source);

    let catalog = match loader.load(config.source()).await {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => exit_with(e),
    };

    let mut session = match QuizSession::with_tolerance(catalog, config.tolerance()) {
        Ok(session) => session,
        Err(e) => exit_with(e),
    };

    match &cli.command {
        Command::List => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(session.catalog())?);
            } else {
                for point in session.catalog() {
                    match point.coordinate() {
                        Some(c) => println!("{:<24} ({:.3}, {:.3})", point.name, c.x, c.y),
                        None => println!("{:<24} (not authored)", point.name),
                    }
                }
            }
        }
        Command::Nearest { x, y } => {
            let tap = session.record_tap(*x, *y)?;
            match earpoint_quiz::nearest(session.catalog(), tap) {
                Some(matched) if cli.json => println!("{}", serde_json::to_string_pretty(&matched)?),
                Some(matched) => println!(
                    "Nearest point: {} (distance {:.4})",
                    matched.point.name, matched.distance
                ),
                None => println!("No authored points have coordinates"),
            }
        }
        Command::Grade { x, y, guess } => {
            session.record_tap(*x, *y)?;
            let verdict = session.submit_guess(guess);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                print_verdict(&verdict);
            }
            if !verdict.is_correct() {
                std::process::exit(4);
            }
        }
        Command::Export { out } => {
            let csv = session.catalog().to_csv().unwrap_or_else(|e| exit_with(e));
            tokio::fs::write(out, csv).await?;
            tracing::info!("Exported {} points to {}", session.catalog().len(), out);
            println!("📁 Catalog written to: {}", out);
        }
    }

    Ok(())
}

fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Graded(outcome) if outcome.correct => println!(
            "✅ Correct: {} (distance {:.4})",
            outcome.nearest.name, outcome.distance
        ),
        Verdict::Graded(outcome) => println!(
            "❌ Incorrect: you chose {}, nearest point is {} (distance {:.4}, tolerance {})",
            outcome.guess, outcome.nearest.name, outcome.distance, outcome.tolerance
        ),
        Verdict::NoQuery => println!("Tap the diagram before choosing a point"),
        Verdict::NoReferenceData => println!("This catalog has no authored coordinates to grade against"),
    }
}

fn exit_with(e: QuizError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.report());
    std::process::exit(e.exit_code());
}
