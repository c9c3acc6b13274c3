//! Contact intake: validate, persist, then notify.
//!
//! The write is the primary effect. Notification runs only after it succeeded,
//! and its outcome is reported next to the stored message instead of failing
//! the call.

use std::sync::Arc;
use std::time::Duration;

use store::{ContactMessage, ContactStore, NewContact};
use uuid::Uuid;

use crate::error::{bounded, Error, FieldError, Result};
use crate::mailer::{Delivery, Dispatcher};

/// A validated contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission(NewContact);

impl ContactSubmission {
    pub fn parse(name: &str, email: &str, subject: &str, message: &str) -> Result<Self> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        let subject = subject.trim();
        let message = message.trim();

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError::new("name", "El nombre es obligatorio"));
        }
        if email.is_empty() {
            errors.push(FieldError::new("email", "El correo electrónico es obligatorio"));
        }
        if subject.is_empty() {
            errors.push(FieldError::new("subject", "El asunto es obligatorio"));
        }
        if message.is_empty() {
            errors.push(FieldError::new("message", "El mensaje es obligatorio"));
        }
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        Ok(Self(NewContact {
            name: name.to_string(),
            email,
            subject: subject.to_string(),
            message: message.to_string(),
        }))
    }
}

pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
    dispatcher: Dispatcher,
    timeout: Duration,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactStore>, dispatcher: Dispatcher, timeout: Duration) -> Self {
        Self {
            contacts,
            dispatcher,
            timeout,
        }
    }

    /// Store the message, then attempt the notification.
    ///
    /// A store failure is returned as is and no mail is attempted.
    pub async fn submit(
        &self,
        submission: ContactSubmission,
        ip_address: Option<String>,
        user_id: Option<Uuid>,
    ) -> Result<(ContactMessage, Delivery)> {
        let contact = ContactMessage::new(submission.0, ip_address, user_id);
        bounded(self.timeout, self.contacts.insert_contact(&contact)).await?;
        tracing::info!(target: "contact", contact_id = %contact.id, "contact message stored");

        let delivery = self.dispatcher.notify(&contact).await;
        Ok((contact, delivery))
    }
}
