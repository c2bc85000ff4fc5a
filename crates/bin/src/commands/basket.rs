//! File-backed basket commands: create, save, branch, show.

use harvest::{StoredBasket, VersionKey};

use crate::cli::{BranchArgs, CreateArgs, SaveArgs, ShowArgs};
use crate::output::{OutputFormat, print_delta, print_shared_view, print_versions};
use crate::store::{load_basket, parse_request, write_basket};

/// Run the `create` command
pub fn create(args: &CreateArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = &args.basket.file;
    if path.exists() && !args.force {
        return Err(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )
        .into());
    }

    let mut request = parse_request(&args.data)?;
    request.tag = args.tag.clone();
    request.id = Some(
        args.id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
    );

    let basket = StoredBasket::create(&request)?;
    write_basket(path, &basket)?;
    print_versions(&basket, format)?;
    Ok(())
}

/// Run the `save` command
pub fn save(args: &SaveArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = &args.basket.file;
    let mut basket = load_basket(path)?;

    let request = parse_request(&args.data)?.with_tag(args.tag.clone());
    let summary = basket.save(&request)?;

    write_basket(path, &basket)?;
    print_delta(&args.tag, &summary, format)?;
    Ok(())
}

/// Run the `branch` command
pub fn branch(args: &BranchArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = &args.basket.file;
    let mut basket = load_basket(path)?;

    let parent = match &args.from {
        Some(key) => VersionKey::from(key.as_str()),
        None => basket.head_version()?.clone(),
    };
    basket.branch(&parent, &args.tag)?;

    write_basket(path, &basket)?;
    print_shared_view(&basket.materialize(None)?, format)?;
    Ok(())
}

/// Run the `show` command
pub fn show(args: &ShowArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let basket = load_basket(&args.basket.file)?;
    let view = basket.materialize(args.tag.as_deref())?;
    print_shared_view(&view, format)?;
    Ok(())
}
