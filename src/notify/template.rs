//! Contact notification message composition.

use lettre::Message;
use lettre::message::{Mailbox, MultiPart};

use super::NotifyError;
use crate::config::SmtpConfig;
use crate::domain::ContactForm;

const FOOTER: &str = "This email was sent from the Viridata contact form at viridata.eu";

/// Subject line naming the submitter's company.
#[must_use]
pub fn subject(form: &ContactForm) -> String {
    format!("New Contact Form Submission from {}", form.company)
}

/// Plain-text body.
#[must_use]
pub fn text_body(form: &ContactForm) -> String {
    format!(
        "New Contact Form Submission\n\n\
         Name: {}\n\
         Email: {}\n\
         Company: {}\n\n\
         Message:\n\
         {}\n\n\
         ---\n\
         {FOOTER}\n",
        form.name, form.email, form.company, form.message
    )
}

/// HTML body. Submitter text is escaped.
#[must_use]
pub fn html_body(form: &ContactForm) -> String {
    let name = escape_html(&form.name);
    let email = escape_html(&form.email);
    let company = escape_html(&form.company);
    let message = escape_html(&form.message);

    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f9f9f9; border-radius: 8px;">
      <h2 style="color: #6FD2C0; border-bottom: 2px solid #6FD2C0; padding-bottom: 10px;">New Contact Form Submission</h2>
      <div style="background-color: white; padding: 20px; border-radius: 4px; margin-top: 20px;">
        <p><strong>Name:</strong> {name}</p>
        <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
        <p><strong>Company:</strong> {company}</p>
        <div style="margin-top: 20px; padding: 15px; background-color: #f5f5f5; border-radius: 4px;">
          <strong>Message:</strong>
          <p style="margin-top: 10px; white-space: pre-wrap;">{message}</p>
        </div>
      </div>
      <p style="margin-top: 20px; font-size: 12px; color: #666;">{FOOTER}</p>
    </div>
  </body>
</html>
"#
    )
}

/// Builds the `multipart/alternative` notification for `form`.
///
/// `To` is the configured recipient. `From` is the SMTP user when it is a
/// mailbox and the recipient otherwise. `Reply-To` is the submitter, and is
/// left off when the submitted address does not parse.
///
/// # Errors
///
/// Returns [`NotifyError::Address`] if the recipient fails to parse, or
/// [`NotifyError::Message`] if the message cannot be assembled.
pub fn contact_message(config: &SmtpConfig, form: &ContactForm) -> Result<Message, NotifyError> {
    let to: Mailbox = config.recipient.parse()?;
    let from = match config.user.parse::<Mailbox>() {
        Ok(from) => from,
        Err(e) => {
            tracing::debug!(error = %e, "SMTP user is not a mailbox, sending from recipient");
            to.clone()
        }
    };

    let mut builder = Message::builder().from(from).to(to);
    match form.email.parse::<Mailbox>() {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(e) => {
            tracing::warn!(error = %e, "submitter email is not a mailbox, omitting Reply-To");
        }
    }

    let message = builder.subject(subject(form)).multipart(
        MultiPart::alternative_plain_html(text_body(form), html_body(form)),
    )?;

    Ok(message)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
