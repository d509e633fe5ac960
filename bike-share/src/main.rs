use bike_share::settings::Settings;
use bike_share::stations::{DirectoryEvent, FileSource, StationDirectory};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Input prefix that picks a suggestion by its row number.
const SELECT_PREFIX: char = '#';

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env()?;

    // Load stations (fail fast if the dataset is unreadable)
    info!(path = %settings.dataset_path.display(), "loading bike stations");
    let source = FileSource::new(&settings.dataset_path);
    let directory = StationDirectory::load(source).await?;
    info!(count = directory.len().await, "loaded bike stations");

    let mut events = directory.subscribe().await;

    // Spawn background task to reload the dataset periodically
    let refresher = directory.clone();
    let refresh_interval = settings.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            // Outcome is reported through the event channel
            let _ = refresher.refresh().await;
        }
    });

    println!("Type a station name prefix to search, or {SELECT_PREFIX}N to pick row N.");
    print_suggestions(&directory).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                handle_line(&directory, &line).await;
            }
            Some(event) = events.recv() => {
                handle_event(&directory, event).await;
            }
        }
    }

    Ok(())
}

async fn handle_line(directory: &StationDirectory<FileSource>, line: &str) {
    let Some(row) = line.strip_prefix(SELECT_PREFIX) else {
        directory.set_filter(line).await;
        print_suggestions(directory).await;
        return;
    };

    let Ok(row) = row.trim().parse::<usize>() else {
        println!("not a row number: {row:?}");
        return;
    };

    // A refresh may have reset the list since the user last saw it.
    match directory.select_filtered(row).await {
        Ok(selection) => {
            let station = &selection.station;
            println!(
                "{}: {} bikes at ({:.6}, {:.6})",
                station.feature_name,
                station.bikes,
                station.coordinate.latitude,
                station.coordinate.longitude
            );
        }
        Err(e) => println!("{e}"),
    }
}

async fn handle_event(directory: &StationDirectory<FileSource>, event: DirectoryEvent) {
    match event {
        DirectoryEvent::Refreshed { count } => {
            // A refresh shows every station again; narrow it back down.
            let filter = directory.filter().await;
            directory.set_filter(&filter).await;
            println!("stations refreshed ({count} stations)");
            print_suggestions(directory).await;
        }
        DirectoryEvent::Failed { message } => {
            warn!(%message, "station refresh failed, keeping previous data");
        }
    }
}

async fn print_suggestions(directory: &StationDirectory<FileSource>) {
    let suggestions = directory.suggestions().await;
    if suggestions.is_empty() {
        println!("No match found");
        return;
    }

    for (row, entry) in suggestions.iter().enumerate() {
        println!("{row:>3}  {entry}");
    }
}
