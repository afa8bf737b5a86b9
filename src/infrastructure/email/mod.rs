//! Email Module
//!
//! Outgoing SMTP mail. The only message the service sends today is the
//! password reset link.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpSettings;
use crate::shared::error::AppError;

/// SMTP mailer built from configuration.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    /// Build a mailer against the configured SMTP relay.
    pub fn new(settings: &SmtpSettings) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| AppError::Internal(format!("SMTP relay configuration: {}", e)))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: settings.from.clone(),
        })
    }

    /// Send the password reset link to a user.
    pub async fn send_password_reset(
        &self,
        to: &str,
        full_name: &str,
        reset_url: &str,
    ) -> Result<(), AppError> {
        let body = format!(
            "Hola {full_name},\n\n\
             Recibimos una solicitud para restablecer tu contraseña.\n\
             Abre el siguiente enlace para elegir una nueva (válido por 1 hora):\n\n\
             {reset_url}\n\n\
             Si no solicitaste este cambio, ignora este mensaje.\n"
        );

        let message = Message::builder()
            .from(self.from.parse().map_err(|e| {
                AppError::Internal(format!("Invalid sender address: {}", e))
            })?)
            .to(to.parse().map_err(|e| {
                AppError::Internal(format!("Invalid recipient address: {}", e))
            })?)
            .subject("Restablecer contraseña")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
