//! Comic commands: creation, pages, panels and access lists.

use comicstore::Comic;

use crate::cli::{ComicArgs, CreateComicArgs, GrantArgs, InsertPanelArgs};
use crate::output::{OutputFormat, print_comic};
use crate::store::Workspace;

fn not_found(args: &ComicArgs) -> Box<dyn std::error::Error> {
    format!("'{}' has no comic '{}'", args.creator, args.uri).into()
}

/// Run the `create-comic` command
pub async fn create(
    workspace: &Workspace,
    args: &CreateComicArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = &workspace.gateway;
    let Some(creator) = gateway.fetch_user(&args.creator).await? else {
        return Err(format!("no user named '{}'", args.creator).into());
    };
    if !creator.is_artist() {
        return Err(format!("'{}' is not an artist", args.creator).into());
    }

    let comic = gateway
        .create_comic(&args.name, &args.creator, &args.description)
        .await?;
    workspace.save().await?;

    print_comic(&comic, format)
}

/// Run the `add-page` command
pub async fn add_page(
    workspace: &Workspace,
    args: &ComicArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_number = workspace
        .gateway
        .add_page(&args.creator, &args.uri)
        .await?
        .ok_or_else(|| not_found(args))?;
    workspace.save().await?;

    match format {
        OutputFormat::Human => println!("Added page {page_number}"),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "page": page_number }));
        }
    }
    Ok(())
}

/// Run the `insert-panel` command
pub async fn insert_panel(
    workspace: &Workspace,
    args: &InsertPanelArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = workspace
        .gateway
        .insert_panel(&args.comic.creator, &args.comic.uri, args.page, &args.locator)
        .await?
        .ok_or_else(|| not_found(&args.comic))?;
    workspace.save().await?;

    match format {
        OutputFormat::Human => println!("Inserted panel {id} on page {}", args.page),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "page": args.page, "panel": id }));
        }
    }
    Ok(())
}

/// Run the `grant` command
pub async fn grant(
    workspace: &Workspace,
    args: &GrantArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = &workspace.gateway;
    if gateway.fetch_user(&args.username).await?.is_none() {
        return Err(format!("no user named '{}'", args.username).into());
    }

    let comic: Comic = gateway
        .grant_access(
            &args.comic.creator,
            &args.comic.uri,
            args.access.into(),
            &args.username,
        )
        .await?
        .ok_or_else(|| not_found(&args.comic))?;
    workspace.save().await?;

    print_comic(&comic, format)
}

/// Run the `show-comic` command
pub async fn show(
    workspace: &Workspace,
    args: &ComicArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let comic = workspace
        .gateway
        .fetch_comic(&args.creator, &args.uri)
        .await?
        .ok_or_else(|| not_found(args))?;
    print_comic(&comic, format)
}
