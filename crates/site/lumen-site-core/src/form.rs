//! Contact form validation and the mailto handoff.
//!
//! The page has no backend. A valid submission turns into a `mailto:`
//! link that opens the visitor's own mail client with the message
//! prefilled; everything else stays on the page as inline field errors.

use serde::{Deserialize, Serialize};

use crate::encode::percent_encode;

/// Message shown under an empty name field.
pub const NAME_REQUIRED: &str = "Please enter your name.";
/// Message shown under a missing or malformed email field.
pub const EMAIL_INVALID: &str = "Enter a valid email.";
/// Message shown under an empty subject field.
pub const SUBJECT_REQUIRED: &str = "Subject is required.";
/// Message shown under an empty message field.
pub const MESSAGE_REQUIRED: &str = "Message can’t be empty.";

/// Raw field values as read out of the form, untrimmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    /// Honeypot input, visually hidden in the markup. Humans never see
    /// it; a non-empty value marks the submission as automated.
    #[serde(default)]
    pub company: String,
}

/// Which input a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    /// The id of the input this field maps to in the page markup. The
    /// error slot sits right next to it as `#<id> + .error`.
    pub fn id(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }
}

/// A validation failure for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// What the page should do with a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Navigate to this `mailto:` URL.
    OpenMailto { href: String },
    /// Honeypot tripped. Drop the submission without any feedback.
    Discard,
    /// Show these messages next to their fields.
    Reject { errors: Vec<FieldError> },
}

impl ContactForm {
    /// Validate the form and, when it passes, build the mailto link
    /// addressed to `recipient`.
    ///
    /// Errors come back in field order so the page can focus the first
    /// one. A filled honeypot short-circuits to [`SubmitOutcome::Discard`]
    /// before any validation runs.
    pub fn submit(&self, recipient: &str) -> SubmitOutcome {
        if !self.company.trim().is_empty() {
            return SubmitOutcome::Discard;
        }

        let name = self.name.trim();
        let email = self.email.trim();
        let subject = self.subject.trim();
        let message = self.message.trim();

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError {
                field: FormField::Name,
                message: NAME_REQUIRED,
            });
        }
        if !looks_like_email(email) {
            errors.push(FieldError {
                field: FormField::Email,
                message: EMAIL_INVALID,
            });
        }
        if subject.is_empty() {
            errors.push(FieldError {
                field: FormField::Subject,
                message: SUBJECT_REQUIRED,
            });
        }
        if message.is_empty() {
            errors.push(FieldError {
                field: FormField::Message,
                message: MESSAGE_REQUIRED,
            });
        }
        if !errors.is_empty() {
            return SubmitOutcome::Reject { errors };
        }

        SubmitOutcome::OpenMailto {
            href: mailto_href(recipient, name, email, subject, message),
        }
    }
}

/// Shape check only, the page's unanchored `.+@.+\..+`: an `@` with at
/// least one character before it, then somewhere after it a dot with a
/// character on each side. Real validation happens when the visitor's
/// mail client sends the message.
fn looks_like_email(email: &str) -> bool {
    let at = match email.match_indices('@').find(|(at, _)| *at >= 1) {
        Some((at, _)) => at,
        None => return false,
    };
    let domain = &email[at + 1..];
    domain
        .match_indices('.')
        .any(|(dot, _)| dot >= 1 && dot + 1 < domain.len())
}

fn mailto_href(recipient: &str, name: &str, email: &str, subject: &str, message: &str) -> String {
    let body = format!("Name: {}\nEmail: {}\n\n{}", name, email, message);
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        percent_encode(subject),
        percent_encode(&body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Hello there".into(),
            message: "Nice site!".into(),
            company: String::new(),
        }
    }

    #[test]
    fn valid_submission_builds_mailto_link() {
        let outcome = filled().submit("hello@example.com");
        assert_eq!(
            outcome,
            SubmitOutcome::OpenMailto {
                href: "mailto:hello@example.com?subject=Hello%20there&body=Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.com%0A%0ANice%20site!".into(),
            }
        );
    }

    #[test]
    fn filled_honeypot_discards_silently() {
        let form = ContactForm {
            company: "Totally Real LLC".into(),
            ..filled()
        };
        assert_eq!(form.submit("hello@example.com"), SubmitOutcome::Discard);
    }

    #[test]
    fn empty_form_reports_every_field_in_order() {
        let outcome = ContactForm::default().submit("hello@example.com");
        let errors = match outcome {
            SubmitOutcome::Reject { errors } => errors,
            other => panic!("expected rejection, got {:?}", other),
        };
        assert_eq!(
            errors
                .iter()
                .map(|e| (e.field, e.message))
                .collect::<Vec<_>>(),
            vec![
                (FormField::Name, NAME_REQUIRED),
                (FormField::Email, EMAIL_INVALID),
                (FormField::Subject, SUBJECT_REQUIRED),
                (FormField::Message, MESSAGE_REQUIRED),
            ]
        );
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let form = ContactForm {
            message: "   \n  ".into(),
            ..filled()
        };
        let outcome = form.submit("hello@example.com");
        assert_eq!(
            outcome,
            SubmitOutcome::Reject {
                errors: vec![FieldError {
                    field: FormField::Message,
                    message: MESSAGE_REQUIRED,
                }],
            }
        );
    }

    #[test]
    fn fields_map_to_their_input_ids() {
        assert_eq!(FormField::Name.id(), "name");
        assert_eq!(FormField::Message.id(), "message");
    }

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last@sub.domain.org"));
        assert!(!looks_like_email(""));
        assert!(!looks_like_email("plain"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a@.c"));
    }

    // The page's check is an unanchored regex, so these odd shapes all
    // pass it; the port has to agree.
    #[test]
    fn email_shape_check_is_as_loose_as_the_page() {
        assert!(looks_like_email("a@b.c."));
        assert!(looks_like_email("a@b.."));
        assert!(looks_like_email("@a@b.c"));
        assert!(looks_like_email("a@.b.c"));
        assert!(looks_like_email("a@b.c@d"));
    }

    #[test]
    fn trailing_dot_email_still_reaches_the_mailto() {
        let form = ContactForm {
            email: "a@b.c.".into(),
            ..filled()
        };
        match form.submit("hello@example.com") {
            SubmitOutcome::OpenMailto { href } => {
                assert!(href.contains("Email%3A%20a%40b.c."), "href {}", href);
            }
            other => panic!("expected a mailto, got {:?}", other),
        }
    }

    #[test]
    fn bad_email_is_the_only_error_when_rest_is_filled() {
        let form = ContactForm {
            email: "not-an-email".into(),
            ..filled()
        };
        let outcome = form.submit("hello@example.com");
        assert_eq!(
            outcome,
            SubmitOutcome::Reject {
                errors: vec![FieldError {
                    field: FormField::Email,
                    message: EMAIL_INVALID,
                }],
            }
        );
    }
}
