use super::commands::OutputFormat;
use super::utils::{hint, print_json, success};
use zkuid_app::AppContext;
use zkuid_types::{ProofOutcome, ProofRequest, VerificationType, ZkuidResult};

pub async fn handle_prove(
    ctx: &AppContext,
    uid: String,
    verification_type: VerificationType,
    verify: bool,
    format: OutputFormat,
) -> ZkuidResult<()> {
    let request = ProofRequest::new(uid, verification_type);

    let artifact = ctx.controller.generate_proof(&request).await?;
    success(format, "ZK proof generated successfully");

    if !verify {
        return match format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "type": verification_type,
                "proofId": artifact.proof_id,
                "outcome": ctx.controller.proof_outcome(),
            })),
            OutputFormat::Text => {
                println!("  Proof: \x1b[38;5;245m{}\x1b[0m", artifact.proof_id);
                hint("Verification skipped");
                Ok(())
            }
        };
    }

    ctx.controller.verify_proof().await?;
    let outcome = ctx.controller.proof_outcome();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "type": verification_type,
            "outcome": outcome,
        })),
        OutputFormat::Text => {
            print_outcome(&outcome, verification_type);
            Ok(())
        }
    }
}

fn print_outcome(outcome: &ProofOutcome, verification_type: VerificationType) {
    match outcome {
        ProofOutcome::Succeeded(proof) => {
            println!();
            println!("\x1b[38;5;46m  Verified: {}\x1b[0m", proof.label());
            println!("  Data revealed: \x1b[38;5;51mNone (zero-knowledge)\x1b[0m");
            if let Some(tx) = proof.tx_hash() {
                println!("  Tx:            \x1b[38;5;245m{}\x1b[0m", tx.short());
            }
        }
        ProofOutcome::Failed => {
            println!();
            println!(
                "\x1b[38;5;196m  Verification failed: {}\x1b[0m",
                verification_type.selection_label()
            );
        }
        ProofOutcome::NotStarted | ProofOutcome::Pending => {}
    }
}
