use std::error::Error;

use bioscope::stats::{ClientOptions, StatsClient, StatsQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = StatsClient::new(ClientOptions {
        base_url: "http://localhost:8080/api".to_string(),
        timeout_seconds: 5,
        proxy: None,
    })?;

    let query = StatsQuery {
        from: Some("2025-01-01".to_string()),
        to: Some("2025-06-30".to_string()),
        ..Default::default()
    };

    let overview = client.observations_overview(&query).await?;
    println!("Observations: {}", overview.stats.observation_count);
    println!("Species:      {}", overview.stats.species_count);
    println!("Native:       {}", overview.native_species_count);
    for (taxa, count) in overview.count_by_taxa.iter() {
        println!("  {taxa}: {count}");
    }

    Ok(())
}
