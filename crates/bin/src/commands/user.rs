//! User commands: registration, login and lookup.

use comicstore::UserKind;

use crate::cli::{LoginArgs, RegisterArgs, ShowUserArgs};
use crate::output::{OutputFormat, print_user};
use crate::store::Workspace;

/// Run `register-artist` or `register-viewer`
pub async fn register(
    workspace: &Workspace,
    kind: UserKind,
    args: &RegisterArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = &workspace.gateway;
    let user = match kind {
        UserKind::Artist => {
            gateway
                .register_artist(&args.username, &args.password, &args.email)
                .await?
        }
        UserKind::Viewer => {
            gateway
                .register_viewer(&args.username, &args.password, &args.email)
                .await?
        }
    };
    workspace.save().await?;

    print_user(&user, format)
}

/// Run the `login` command
pub async fn login(
    workspace: &Workspace,
    args: &LoginArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(user) = workspace
        .gateway
        .authenticate(&args.username, &args.password)
        .await?
    else {
        return Err("invalid username or password".into());
    };

    match format {
        OutputFormat::Human => println!("Logged in as {} ({})", user.username(), user.kind()),
        OutputFormat::Json => print_user(&user, format)?,
    }
    Ok(())
}

/// Run the `show-user` command
pub async fn show(
    workspace: &Workspace,
    args: &ShowUserArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(user) = workspace.gateway.fetch_user(&args.username).await? else {
        return Err(format!("no user named '{}'", args.username).into());
    };
    print_user(&user, format)
}
