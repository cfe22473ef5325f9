use super::commands::{OutputFormat, WalletAction};
use super::utils::{hint, print_json, success};
use zkuid_app::AppContext;
use zkuid_types::ZkuidResult;
use zkuid_wallet::WalletSession;

pub async fn handle_wallet(
    ctx: &AppContext,
    action: WalletAction,
    format: OutputFormat,
) -> ZkuidResult<()> {
    match action {
        WalletAction::Status => {
            let session = ctx.start().await;
            print_session(&session, ctx.session.has_provider(), format)
        }
        WalletAction::Connect => {
            let address = ctx.session.connect().await?;
            success(format, &format!("Wallet connected: {}", address));
            print_session(&ctx.session.session(), true, format)
        }
        WalletAction::Disconnect => {
            ctx.start().await;
            ctx.session.disconnect().await;
            success(format, "Wallet session cleared");
            print_session(&ctx.session.session(), ctx.session.has_provider(), format)
        }
    }
}

fn print_session(session: &WalletSession, has_provider: bool, format: OutputFormat) -> ZkuidResult<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "provider": has_provider,
            "connected": session.is_connected(),
            "address": session.address.map(|a| a.to_checksum()),
            "short": session.short_address(),
        })),
        OutputFormat::Text => {
            match session.address {
                Some(address) => {
                    println!("Wallet:  \x1b[38;5;51m{}\x1b[0m", session.short_address());
                    println!("Address: \x1b[38;5;245m{}\x1b[0m", address);
                }
                None if has_provider => {
                    println!("Wallet:  \x1b[38;5;226mnot connected\x1b[0m");
                    hint("Run 'zkuid wallet connect' to connect");
                }
                None => {
                    println!("Wallet:  \x1b[38;5;196mno provider\x1b[0m");
                    hint("Set wallet.rpc_url or ZKUID_WALLET_RPC to use a wallet");
                }
            }
            Ok(())
        }
    }
}
