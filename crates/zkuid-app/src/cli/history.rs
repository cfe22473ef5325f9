use super::commands::OutputFormat;
use super::utils::{hint, print_json};
use zkuid_app::AppContext;
use zkuid_types::ZkuidResult;

pub async fn show_history(ctx: &AppContext, format: OutputFormat) -> ZkuidResult<()> {
    let entries = ctx.history.entries().await;
    let stats = ctx.history.stats().await;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "stats": stats,
            "entries": entries,
        })),
        OutputFormat::Text => {
            if entries.is_empty() {
                hint("No proofs recorded yet");
                return Ok(());
            }

            println!("\x1b[1m{:<12} {:<16} {:<10} {}\x1b[0m", "DATE", "TYPE", "STATUS", "TX");
            for entry in &entries {
                let (colour, status) = if entry.verified { ("46", "verified") } else { ("196", "failed") };
                println!(
                    "{:<12} {:<16} \x1b[38;5;{}m{:<10}\x1b[0m {}",
                    entry.date.to_string(),
                    entry.verification_type.outcome_label(),
                    colour,
                    status,
                    entry.tx_hash.as_ref().map(|tx| tx.short()).unwrap_or_default(),
                );
            }
            println!();
            println!(
                "Total: {}  Verified: \x1b[38;5;46m{}\x1b[0m  Failed: \x1b[38;5;196m{}\x1b[0m",
                stats.total, stats.verified, stats.failed
            );
            Ok(())
        }
    }
}
