use std::sync::Arc;

use common::env_config::{Config, SmtpConfig};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};

/// Queues the verification mail on the runtime and returns immediately.
/// A transport failure is logged and never affects the signup response;
/// the account already exists by the time this runs.
pub fn spawn_verification_email(config: Arc<Config>, to: String, token: String) {
    let verification_url = format!(
        "{}/verify-email?token={}",
        config.verification_base_url, token
    );

    let Some(smtp) = config.smtp.clone() else {
        log::info!(
            "SMTP not configured, verification link for {}: {}",
            to,
            verification_url
        );
        return;
    };

    actix_web::rt::spawn(async move {
        if let Err(e) = send_verification_email(&smtp, &to, &verification_url).await {
            log::warn!("Failed to send verification email to {}: {}", to, e);
        }
    });
}

async fn send_verification_email(
    smtp: &SmtpConfig,
    to: &str,
    verification_url: &str,
) -> Result<(), String> {
    let body = format!(
        "<h1>Email Verification</h1>\
         <p>Please click the link below to verify your email:</p>\
         <a href=\"{url}\">{url}</a>",
        url = verification_url
    );

    let message = Message::builder()
        .from(
            smtp.from_address
                .parse()
                .map_err(|e| format!("invalid from address: {}", e))?,
        )
        .to(to
            .parse()
            .map_err(|e| format!("invalid recipient address: {}", e))?)
        .subject("Verify your email")
        .header(ContentType::TEXT_HTML)
        .body(body)
        .map_err(|e| format!("failed to build message: {}", e))?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
        .map_err(|e| format!("invalid SMTP relay: {}", e))?
        .credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.clone(),
        ))
        .build();

    transport
        .send(message)
        .await
        .map_err(|e| format!("SMTP send failed: {}", e))?;
    Ok(())
}
