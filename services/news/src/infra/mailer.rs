use anyhow::Context as _;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::{OTP_TTL_SECS, OutgoingEmail};
use crate::error::NewsServiceError;

#[derive(Clone)]
enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    /// No SMTP relay configured: emails are logged (without the code) and dropped.
    Disabled,
}

/// Sends workflow emails through an SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Transport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
        let from: Mailbox = config.from.parse().context("parse MAIL_FROM")?;
        let transport = match &config.host {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .context("build SMTP transport")?
                    .port(config.port);
                if let (Some(user), Some(pass)) = (&config.username, &config.password) {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
                }
                Transport::Smtp(builder.build())
            }
            None => Transport::Disabled,
        };
        Ok(Self { transport, from })
    }

    /// Mailer that never contacts a relay.
    pub fn disabled(from: Mailbox) -> Self {
        Self {
            transport: Transport::Disabled,
            from,
        }
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, email: &OutgoingEmail) -> Result<(), NewsServiceError> {
        let transport = match &self.transport {
            Transport::Smtp(transport) => transport,
            Transport::Disabled => {
                tracing::info!(to, subject = email.subject(), "mail relay disabled, email dropped");
                return Ok(());
            }
        };

        let recipient: Mailbox = to
            .parse()
            .context("parse recipient address")
            .map_err(NewsServiceError::EmailDelivery)?;
        let (text, html) = render(email);
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(email.subject())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )
            .context("build email")
            .map_err(NewsServiceError::EmailDelivery)?;

        transport
            .send(message)
            .await
            .context("smtp send")
            .map_err(NewsServiceError::EmailDelivery)?;
        tracing::debug!(to, subject = email.subject(), "email sent");
        Ok(())
    }
}

/// Plain-text and HTML bodies for `email`.
pub fn render(email: &OutgoingEmail) -> (String, String) {
    let minutes = OTP_TTL_SECS / 60;
    let (name, otp, action) = match email {
        OutgoingEmail::Verification { name, otp } => (name, otp, "verify your email address"),
        OutgoingEmail::PasswordReset { name, otp } => (name, otp, "reset your password"),
    };

    let text = format!(
        "Hi {name},\n\n\
         Use the code below to {action}:\n\n    {otp}\n\n\
         The code expires in {minutes} minutes. If you did not request it, ignore this email.\n"
    );

    let name = escape_html(name);
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>{subject}</title></head>
<body style="font-family: sans-serif; color: #333; max-width: 560px; margin: 0 auto;">
  <p>Hi {name},</p>
  <p>Use the code below to {action}:</p>
  <p style="font-size: 32px; font-weight: bold; letter-spacing: 6px; font-family: monospace;">{otp}</p>
  <p>The code expires in {minutes} minutes. If you did not request it, ignore this email.</p>
</body>
</html>
"#,
        subject = email.subject(),
    );
    (text, html)
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
