//! Message bodies for confirmation codes

use ph_core::domain::entities::CodeKind;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{subject}}</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #395874; background-color: #F2E8DF; }
        .container { max-width: 600px; margin: 0 auto; padding: 20px; background-color: #FFFFFF; }
        .header { background-color: #6DD3E1; color: #395874; padding: 20px; text-align: center; }
        .content { padding: 20px; }
        .footer { background-color: #F2AD72; color: #26110C; padding: 10px; text-align: center; font-size: 0.8em; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{subject}}</h1>
        </div>
        <div class="content">
            {{content}}
        </div>
        <div class="footer">
            &copy; PetHome. All rights reserved.
        </div>
    </div>
</body>
</html>"#;

const REGISTRATION_BODY: &str = r#"<p>Dear User,</p>
<p>Thank you for registering with PetHome. To complete the registration process, please enter the following confirmation code:</p>
<p style="text-align: center; font-size: 24px; letter-spacing: 5px; color: #FF7700; font-weight: bold;">{{code}}</p>
<p>If you did not register on our site, please ignore this message.</p>
<p>Sincerely,<br>The PetHome Team</p>"#;

const PASSWORD_RESET_BODY: &str = r#"<p>Dear User,</p>
<p>You have requested a password reset for your PetHome account. To continue the password reset process, please use the following code:</p>
<p style="text-align: center; font-size: 24px; letter-spacing: 5px; color: #FF7700; font-weight: bold;">{{code}}</p>
<p>If you did not request a password reset, please ignore this message and ensure your account is secure.</p>
<p>Sincerely,<br>The PetHome Team</p>"#;

/// Rendered email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: &'static str,
    pub html: String,
}

pub fn email_subject(kind: CodeKind) -> &'static str {
    match kind {
        CodeKind::Registration => "PetHome registration confirmation",
        CodeKind::PasswordReset => "Resetting your password in PetHome",
    }
}

pub fn render_email(kind: CodeKind, code: &str) -> EmailContent {
    let body = match kind {
        CodeKind::Registration => REGISTRATION_BODY,
        CodeKind::PasswordReset => PASSWORD_RESET_BODY,
    };
    let subject = email_subject(kind);

    EmailContent {
        subject,
        html: LAYOUT
            .replace("{{subject}}", subject)
            .replace("{{content}}", &body.replace("{{code}}", code)),
    }
}

pub fn render_sms(kind: CodeKind, code: &str) -> String {
    match kind {
        CodeKind::Registration => format!("Your confirmation code from PetHome: {}", code),
        CodeKind::PasswordReset => format!("Your password reset code: {}", code),
    }
}
