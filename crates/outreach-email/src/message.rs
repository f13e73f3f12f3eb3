//! Senior-friendly email rendering: large type, short lines, and a plain-text
//! twin for readers whose client does not load HTML.

use lettre::message::{Mailbox, MultiPart};
use lettre::Message;

use outreach_channels::CampaignMessage;
use outreach_core::Recipient;

/// Build the multipart (plain + HTML) message for one recipient.
///
/// The greeting uses the recipient's display name; the body is the shared
/// campaign text. Errors are returned as strings so the caller can record
/// them in the per-recipient outcome without aborting the session.
pub fn build_email(
    from: &Mailbox,
    recipient: &Recipient,
    message: &CampaignMessage,
    contact_info: &str,
) -> Result<Message, String> {
    let address = recipient
        .address
        .parse()
        .map_err(|e| format!("invalid address {:?}: {e}", recipient.address))?;
    let to = Mailbox::new(recipient.name.clone(), address);

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(message.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            plain_body(recipient.display_name(), &message.body, contact_info),
            html_body(recipient.display_name(), &message.body, contact_info),
        ))
        .map_err(|e| format!("failed to build message: {e}"))
}

fn plain_body(name: &str, body: &str, contact_info: &str) -> String {
    format!(
        "Hello {name}!\n\
         \n\
         {body}\n\
         \n\
         EASY WAYS TO REACH US:\n\
         {contact_info}\n\
         \n\
         ---\n\
         You received this email because you expressed interest in services for seniors.\n\
         If you'd prefer not to receive these emails, simply reply with \"UNSUBSCRIBE\"\n"
    )
}

fn html_body(name: &str, body: &str, contact_info: &str) -> String {
    let body_html = body.replace('\n', "<br>");
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; font-size: 16px; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #2c5aa0; font-size: 24px;">Hello {name}!</h2>
    <div style="background-color: #f9f9f9; padding: 20px; border-radius: 10px; margin: 20px 0;">
      {body_html}
    </div>
    <div style="margin: 30px 0; padding: 15px; background-color: #e8f4f8; border-left: 4px solid #2c5aa0;">
      <h3 style="margin-top: 0; color: #2c5aa0;">Easy Ways to Reach Us:</h3>
      <p style="margin: 10px 0; font-size: 18px;">{contact_info}</p>
    </div>
    <div style="margin: 30px 0; font-size: 14px; color: #888; border-top: 1px solid #ddd; padding-top: 20px;">
      <p>You received this email because you expressed interest in services for seniors.</p>
      <p>If you'd prefer not to receive these emails, simply reply with "UNSUBSCRIBE"</p>
    </div>
  </div>
</body>
</html>"#
    )
}
