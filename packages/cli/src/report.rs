//! Terminal renditions of the charts and cluster detail pages.

use complaint_map_analytics::colors::status_color;
use complaint_map_analytics::rankings;
use complaint_map_analytics::sampling::{draw_size, sample_bounds, sample_comments};
use complaint_map_cluster_models::ClusterId;
use complaint_map_data::Dataset;
use complaint_map_server::locale::Locale;
use dialoguer::{Confirm, Input};

/// Prints the three ranked lists of the charts page, unfiltered.
pub fn print_rankings(dataset: &Dataset, top_n: u32) {
    let n = top_n as usize;

    println!();
    println!("Top {n} zones by total occurrences:");
    for (rank, total) in rankings::top_zones(dataset.clusters(), n).iter().enumerate() {
        println!("  {:>2}. {:<30} {:>6}", rank + 1, total.name, total.total);
    }

    println!();
    println!("Top {n} organizations by total occurrences:");
    for (rank, total) in rankings::top_organizations(dataset.clusters(), n)
        .iter()
        .enumerate()
    {
        println!("  {:>2}. {:<30} {:>6}", rank + 1, total.name, total.total);
    }

    println!();
    println!("Top {n} clusters by occurrences:");
    for (rank, record) in rankings::top_clusters(dataset.clusters(), n)
        .iter()
        .enumerate()
    {
        println!(
            "  {:>2}. {:<8} {:>6}  {}",
            rank + 1,
            record.cluster_id.to_string(),
            record.num_times,
            record.description
        );
    }
}

/// Prints one cluster and its sampled comments, offering to resample until
/// declined.
///
/// # Errors
///
/// Returns an error if `raw_id` is malformed, if neither table knows the
/// cluster, or if the terminal prompt fails.
pub fn inspect(
    dataset: &Dataset,
    raw_id: &str,
    samples: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let id: ClusterId = raw_id.parse()?;
    let comments = dataset.comments_for(id);
    let record = dataset.cluster(id);
    if record.is_none() && comments.is_empty() {
        return Err(format!("Cluster {id} not found").into());
    }

    let labels = Locale::thai()?.detail;

    println!();
    println!("{} {id}", labels.title);
    match record {
        Some(record) => {
            let color = status_color(&record.status);
            println!("  {}: {}", labels.description, record.description);
            println!("  {}: {} ({})", labels.status, record.status, color.css());
            println!("  {}: {}", labels.num_times, record.num_times);
            println!("  {}: {}", labels.organization, record.organization);
            println!("  {}: {}", labels.zone, record.zone);
            println!("  {}: {}", labels.latitude, record.latitude);
            println!("  {}: {}", labels.longitude, record.longitude);
        }
        None => log::warn!("Cluster {id} has comments but no cluster table row"),
    }
    println!("  {}: {}", labels.comment_count, comments.len());

    let bounds = sample_bounds(comments.len());
    let requested = match samples {
        Some(requested) => requested,
        None => Input::new()
            .with_prompt(format!(
                "{} ({}-{})",
                labels.sample_count, bounds.slider.min, bounds.slider.max
            ))
            .default(bounds.slider.default)
            .interact_text()?,
    };
    let k = draw_size(Some(requested), bounds);

    let mut rng = rand::rng();
    loop {
        println!();
        println!("{}:", labels.samples);
        for comment in sample_comments(comments, k, &mut rng) {
            println!("  - {comment}");
        }

        if !Confirm::new()
            .with_prompt(labels.resample.as_str())
            .default(false)
            .interact()?
        {
            break;
        }
    }

    Ok(())
}
