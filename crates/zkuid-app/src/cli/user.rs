use super::commands::OutputFormat;
use super::utils::print_json;
use zkuid_app::AppContext;
use zkuid_types::ZkuidResult;

pub async fn show_user(ctx: &AppContext, uid: &str, format: OutputFormat) -> ZkuidResult<()> {
    let record = ctx.controller.fetch_user_data(uid).await?;

    match format {
        OutputFormat::Json => print_json(&record),
        OutputFormat::Text => {
            println!("\x1b[1;38;5;46mUser {}\x1b[0m", record.uid);
            if let Some(ref cid) = record.content_address {
                println!(
                    "  Content: \x1b[38;5;51m{}\x1b[0m",
                    cid.gateway_url(&ctx.config.storage.ipfs_gateway)
                );
            }
            if let Some(wallet) = record.wallet {
                println!("  Wallet:  {}", wallet);
            }
            if let Some(at) = record.registered_at {
                println!("  Since:   {}", at.format("%Y-%m-%d %H:%M UTC"));
            }
            println!("  Proofs:  {}", record.proof_history.len());
            for entry in &record.proof_history {
                let status = if entry.verified {
                    "\x1b[38;5;46mverified\x1b[0m"
                } else {
                    "\x1b[38;5;196mfailed\x1b[0m"
                };
                println!("    {}  {:<16} {}", entry.date, entry.verification_type.outcome_label(), status);
            }
            Ok(())
        }
    }
}
