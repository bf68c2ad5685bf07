//! Sign-in, sign-up and session commands.

use serde::Serialize;

use hotelops_core::{Hotel, RegisterRequest, Session};

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// What `whoami` prints. The token itself is never rendered.
#[derive(Debug, Serialize)]
struct Identity {
    user_id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<&Session> for Identity {
    fn from(session: &Session) -> Self {
        let user = session.user.as_ref();
        Self {
            user_id: session.user_id.clone(),
            email: user.and_then(|u| u.email.clone()),
            first_name: user.and_then(|u| u.first_name.clone()),
            last_name: user.and_then(|u| u.last_name.clone()),
        }
    }
}

impl Identity {
    fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| self.user_id.clone())
        } else {
            name
        }
    }
}

pub async fn login(hotel: &Hotel, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let password = util::password_or_prompt(args.password)?;
    let session = hotel.login(args.email.trim(), &password).await?;
    let identity = Identity::from(session.as_ref());
    output::notice(global, &format!("Signed in as {}", identity.display_name()));
    Ok(())
}

pub async fn register(
    hotel: &Hotel,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = util::password_or_prompt(args.password)?;
    let request = RegisterRequest {
        email: args.email.trim().to_owned(),
        password,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let session = hotel.register(&request).await?;
    let identity = Identity::from(session.as_ref());
    output::notice(
        global,
        &format!("Account created, signed in as {}", identity.display_name()),
    );
    Ok(())
}

pub async fn logout(hotel: &Hotel, global: &GlobalOpts) -> Result<(), CliError> {
    let was_signed_in = hotel.session().is_authenticated();
    hotel.logout().await?;
    if was_signed_in {
        output::notice(global, "Signed out");
    } else {
        output::notice(global, "Not signed in");
    }
    Ok(())
}

pub fn whoami(hotel: &Hotel, global: &GlobalOpts) -> Result<(), CliError> {
    let session = util::require_session(hotel)?;
    let identity = Identity::from(session.as_ref());
    let out = output::render_single(
        &global.output,
        &identity,
        |i| {
            output::detail(&[
                ("User", i.user_id.clone()),
                ("Name", i.display_name()),
                ("Email", i.email.clone().unwrap_or_default()),
            ])
        },
        |i| i.user_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(first: Option<&str>, last: Option<&str>, email: Option<&str>) -> Identity {
        Identity {
            user_id: "u-1".into(),
            email: email.map(Into::into),
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(
            identity(Some("Ada"), Some("Lovelace"), Some("ada@example.com")).display_name(),
            "Ada Lovelace"
        );
        assert_eq!(identity(None, None, Some("ada@example.com")).display_name(), "ada@example.com");
        assert_eq!(identity(None, None, None).display_name(), "u-1");
    }
}
