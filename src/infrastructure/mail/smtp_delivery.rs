use crate::config::MailEnvConfig;
use crate::domain::errors::DeliveryError;
use crate::domain::ports::{OutgoingReport, ReportBody, ReportDelivery};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use scraper::{Html, Selector};
use tracing::{error, info};

/// Plain-text rendition of an HTML report, one text node per line.
///
/// Only `<body>` is read so the stylesheet stays out of the text part.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    body.text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address.parse().map_err(|e: lettre::address::AddressError| DeliveryError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Sends reports through an SMTP relay with STARTTLS.
pub struct SmtpDelivery {
    config: MailEnvConfig,
}

impl SmtpDelivery {
    pub fn new(config: MailEnvConfig) -> Self {
        Self { config }
    }

    /// Builds the MIME message; HTML bodies get a plain-text alternative.
    pub fn build_message(&self, report: &OutgoingReport) -> Result<Message, DeliveryError> {
        let builder = Message::builder()
            .from(parse_mailbox(&self.config.from)?)
            .to(parse_mailbox(&self.config.to)?)
            .subject(report.subject.clone());

        let message = match &report.body {
            ReportBody::Html(html) => builder
                .multipart(MultiPart::alternative_plain_html(html_to_text(html), html.clone())),
            ReportBody::Text(text) => builder.header(ContentType::TEXT_PLAIN).body(text.clone()),
        };
        message.map_err(|e| DeliveryError::Build {
            reason: e.to_string(),
        })
    }

    fn create_smtp_transport(config: &MailEnvConfig) -> Result<SmtpTransport, DeliveryError> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| DeliveryError::Transport {
                reason: e.to_string(),
            })?
            .port(config.port)
            .credentials(creds)
            .build();
        Ok(transport)
    }
}

#[async_trait]
impl ReportDelivery for SmtpDelivery {
    async fn deliver(&self, report: &OutgoingReport) -> Result<(), DeliveryError> {
        let message = self.build_message(report)?;
        let config = self.config.clone();

        // lettre's SmtpTransport is blocking
        let result = tokio::task::spawn_blocking(move || {
            let transport = Self::create_smtp_transport(&config)?;
            transport
                .send(&message)
                .map(|_| ())
                .map_err(|e| DeliveryError::Transport {
                    reason: e.to_string(),
                })
        })
        .await
        .map_err(|e| DeliveryError::Transport {
            reason: format!("Delivery task failed: {}", e),
        })?;

        match &result {
            Ok(()) => info!("Mail sent to {}: {}", self.config.to, report.subject),
            Err(e) => error!("Mail delivery failed: {}", e),
        }
        result
    }
}
