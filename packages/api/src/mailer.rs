//! # Outbound mail and the notification dispatcher
//!
//! [`Mailer`] is the transport seam. Two transports ship with the crate:
//!
//! | Type | Behaviour |
//! |------|-----------|
//! | [`HttpMailer`] | POSTs the message as JSON to a mail relay endpoint with basic auth (`mail.user` / `mail.password`). Non-2xx answers and network failures are errors. |
//! | [`DisabledMailer`] | Used when no mail account is configured; every send fails with [`MailError::NotConfigured`]. |
//!
//! [`Dispatcher::notify`] is best-effort: it builds the notification for a stored
//! [`ContactMessage`], sends it with a timeout, logs any failure and reports the
//! outcome as a [`Delivery`]. It never returns an error, so a failed mail can
//! neither undo nor fail the write that preceded it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use store::ContactMessage;
use thiserror::Error;

use crate::settings::Mail;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("mail transport not configured")]
    NotConfigured,

    #[error("mail relay rejected the message with status {0}")]
    Rejected(u16),

    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// A fully rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Mail relay reached over HTTP.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    user: String,
    password: String,
}

impl HttpMailer {
    pub fn new(settings: &Mail) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.password))
            .json(mail)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

/// Stand-in transport when no account is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// Pick the transport the settings call for.
pub fn from_settings(settings: &Mail) -> Arc<dyn Mailer> {
    if !settings.is_configured() {
        tracing::warn!("mail not configured; contact notifications will not be sent");
        return Arc::new(DisabledMailer);
    }
    match HttpMailer::new(settings) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            tracing::error!(error = %e, "failed to build mail client; notifications disabled");
            Arc::new(DisabledMailer)
        }
    }
}

/// Outcome of a best-effort notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The notification was not delivered; the failure has been logged.
    Degraded,
}

/// Sends the contact notification to the fixed recipient.
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
    from: String,
    recipient: String,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, settings: &Mail) -> Self {
        let from = if settings.user.is_empty() {
            "noreply@gestornotas.com".to_string()
        } else {
            settings.user.clone()
        };
        Self {
            mailer,
            from,
            recipient: settings.recipient.clone(),
            timeout: settings.timeout(),
        }
    }

    pub async fn notify(&self, contact: &ContactMessage) -> Delivery {
        let mail = render_notification(contact, &self.from, &self.recipient);
        let outcome = match tokio::time::timeout(self.timeout, self.mailer.send(&mail)).await {
            Ok(result) => result,
            Err(_) => Err(MailError::Transport(format!(
                "timed out after {}ms",
                self.timeout.as_millis()
            ))),
        };

        match outcome {
            Ok(()) => {
                tracing::info!(target: "contact", contact_id = %contact.id, "notification sent");
                Delivery::Sent
            }
            Err(e) => {
                tracing::error!(target: "contact", contact_id = %contact.id, error = %e, "notification failed");
                Delivery::Degraded
            }
        }
    }
}

/// Plain text and HTML versions of the contact notification.
pub fn render_notification(contact: &ContactMessage, from: &str, to: &str) -> OutgoingMail {
    let date = contact.created_at.format("%d/%m/%Y %H:%M:%S").to_string();
    let ip = contact.ip_address.as_deref().unwrap_or("No disponible");
    let (registered_text, registered_html) = match contact.user_id {
        Some(user_id) => (
            format!("Usuario registrado: {user_id}\n"),
            format!("<p><strong>Usuario registrado:</strong> {user_id}</p>"),
        ),
        None => (String::new(), String::new()),
    };

    let text = format!(
        "Nuevo mensaje de contacto\n\n\
         Asunto: {subject}\n\
         Nombre: {name}\n\
         Email: {email}\n\
         Fecha: {date}\n\
         {registered_text}\n\
         Mensaje:\n{message}\n\n\
         ---\n\
         IP: {ip}\n\
         ID: {id}\n",
        subject = contact.subject,
        name = contact.name,
        email = contact.email,
        message = contact.message,
        id = contact.id,
    );

    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2>Nuevo mensaje de contacto</h2>\
         <h3>{subject}</h3>\
         <p><strong>Nombre:</strong> {name}</p>\
         <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
         <p><strong>Fecha:</strong> {date}</p>\
         {registered_html}\
         <p style=\"white-space: pre-wrap;\">{message}</p>\
         <p style=\"color: #858796; font-size: 12px;\">IP: {ip} | ID: {id}</p>\
         </div>",
        subject = escape_html(&contact.subject),
        name = escape_html(&contact.name),
        email = escape_html(&contact.email),
        message = escape_html(&contact.message),
        ip = escape_html(ip),
        id = contact.id,
    );

    OutgoingMail {
        from: format!("Gestor de Notas - Contacto <{from}>"),
        to: to.to_string(),
        subject: format!("Nuevo mensaje de contacto: {}", contact.subject),
        text,
        html,
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
