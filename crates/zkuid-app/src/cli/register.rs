use super::commands::OutputFormat;
use super::utils::{print_json, success};
use zkuid_app::AppContext;
use zkuid_types::{RegistrationForm, ZkuidResult};

pub async fn handle_register(
    ctx: &AppContext,
    form: RegistrationForm,
    format: OutputFormat,
) -> ZkuidResult<()> {
    ctx.start().await;
    let request = form.into_request()?;

    let result = ctx.controller.submit_registration(request).await?;
    let gateway_url = result.content_address.gateway_url(&ctx.config.storage.ipfs_gateway);

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "uid": result.uid.to_string(),
            "contentAddress": result.content_address.as_str(),
            "gatewayUrl": gateway_url,
        })),
        OutputFormat::Text => {
            success(format, "Registration complete");
            println!("  UID:             \x1b[38;5;226m{}\x1b[0m", result.uid);
            println!("  Content address: \x1b[38;5;51m{}\x1b[0m", result.content_address);
            println!("  View:            \x1b[38;5;245m{}\x1b[0m", gateway_url);
            println!();
            println!("Next: \x1b[38;5;51mzkuid prove --uid {} --type age\x1b[0m", result.uid);
            Ok(())
        }
    }
}
