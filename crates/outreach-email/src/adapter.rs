use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{info, warn};

use outreach_channels::{
    CampaignMessage, CampaignResult, Channel, ChannelError, DeliveryOutcome,
};
use outreach_core::{config::EmailConfig, BotConfig, Recipient};

use crate::message::build_email;

/// SMTP email channel.
///
/// One `deliver` call owns one delivery session: a STARTTLS transport against
/// the configured relay, authenticated up front so credential problems fail
/// the whole campaign before any recipient is attempted. The transport is
/// dropped before returning, releasing the connection.
pub struct EmailChannel {
    config: EmailConfig,
    contact_info: String,
}

impl EmailChannel {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            config: config.platforms.email.clone(),
            contact_info: config.contact_info.clone(),
        }
    }
}

#[async_trait]
impl Channel for EmailChannel {
    fn name(&self) -> &str {
        "email"
    }

    fn enabled(&self) -> bool {
        self.config.enabled
    }

    async fn deliver(&self, message: &CampaignMessage) -> Result<CampaignResult, ChannelError> {
        let recipients: Vec<Recipient> = self
            .config
            .recipients
            .iter()
            .map(|raw| Recipient::parse(raw))
            .collect();
        if recipients.is_empty() {
            return Err(ChannelError::NoRecipients);
        }

        let from: Mailbox = self.config.username.parse().map_err(|e| {
            ChannelError::Config(format!(
                "invalid sender address {:?}: {e}",
                self.config.username
            ))
        })?;

        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)
                .map_err(|e| ChannelError::Session(e.to_string()))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build();

        info!(
            server = %self.config.smtp_server,
            port = self.config.smtp_port,
            recipients = recipients.len(),
            "opening delivery session"
        );
        let result =
            run_session(&mailer, &from, &recipients, message, &self.contact_info).await?;
        info!(
            attempted = result.attempted,
            succeeded = result.succeeded,
            "email campaign completed"
        );
        Ok(result)
    }
}

/// A connected transport that can vouch for its own liveness before the
/// first message goes out.
#[async_trait]
trait MailSession: AsyncTransport + Sync {
    async fn verify(&self) -> Result<(), ChannelError>;
}

#[async_trait]
impl MailSession for AsyncSmtpTransport<Tokio1Executor> {
    async fn verify(&self) -> Result<(), ChannelError> {
        match self.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ChannelError::Session(
                "SMTP connection test failed".into(),
            )),
            Err(e) => Err(ChannelError::Session(e.to_string())),
        }
    }
}

/// Verify the session, then run the campaign over it. A session that cannot
/// be established fails the whole campaign with no recipient attempted.
async fn run_session<T>(
    transport: &T,
    from: &Mailbox,
    recipients: &[Recipient],
    message: &CampaignMessage,
    contact_info: &str,
) -> Result<CampaignResult, ChannelError>
where
    T: MailSession,
    T::Error: std::fmt::Display,
{
    transport.verify().await?;
    let outcomes = dispatch(transport, from, recipients, message, contact_info).await;
    Ok(CampaignResult::from_outcomes(&outcomes))
}

/// Send the campaign to each recipient over an open transport, in list order.
///
/// A failure for one recipient is recorded and the loop continues; nothing
/// here can abort the session.
async fn dispatch<T>(
    transport: &T,
    from: &Mailbox,
    recipients: &[Recipient],
    message: &CampaignMessage,
    contact_info: &str,
) -> Vec<DeliveryOutcome>
where
    T: AsyncTransport + Sync,
    T::Error: std::fmt::Display,
{
    let mut outcomes = Vec::with_capacity(recipients.len());

    for recipient in recipients {
        let email = match build_email(from, recipient, message, contact_info) {
            Ok(email) => email,
            Err(detail) => {
                warn!(recipient = %recipient, error = %detail, "recipient address unusable");
                outcomes.push(DeliveryOutcome::failed(recipient.clone(), detail));
                continue;
            }
        };

        match transport.send(email).await {
            Ok(_) => {
                info!(recipient = %recipient.address, "email sent");
                outcomes.push(DeliveryOutcome::delivered(recipient.clone()));
            }
            Err(e) => {
                warn!(recipient = %recipient.address, error = %e, "failed to send email");
                outcomes.push(DeliveryOutcome::failed(recipient.clone(), e.to_string()));
            }
        }
    }

    outcomes
}
