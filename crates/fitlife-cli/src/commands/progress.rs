use crate::context::AppContext;
use anyhow::{Result, anyhow};
use fitlife_application::{ProgressStat, ProgressTracker};

fn tracker(ctx: &AppContext) -> Result<ProgressTracker> {
    Ok(ProgressTracker::new(ctx.credentials.clone(), ctx.session_email()?))
}

pub async fn show(ctx: &AppContext) -> Result<()> {
    let tracker = tracker(ctx)?;

    for (stat, value) in tracker.snapshot().await? {
        println!("{stat:<8} {value}");
    }
    println!();
    println!("personal records:");
    for record in tracker.records().await? {
        println!("  [{}] {:<16} {} kg", record.index, record.name, record.weight);
    }
    Ok(())
}

pub async fn set(ctx: &AppContext, stat: &str, value: &str) -> Result<()> {
    let stat: ProgressStat = stat.parse().map_err(|e: String| anyhow!(e))?;
    if tracker(ctx)?.set(stat, value).await? {
        println!("{stat} = {}", value.trim());
    } else {
        println!("Ignored blank value");
    }
    Ok(())
}

pub async fn record(ctx: &AppContext, index: usize, weight: &str) -> Result<()> {
    if tracker(ctx)?.set_record_weight(index, weight).await? {
        println!("Record {index} = {} kg", weight.trim());
    } else {
        println!("Ignored: blank weight or unknown record {index}");
    }
    Ok(())
}
