//! Loads one directory location and prints the resulting page as JSON.
//!
//! ```text
//! frontend '/directory/students?state=California&skills=AutoCAD&skills=Revit'
//! frontend options corporates [needle]
//! ```

use std::{collections::BTreeMap, time::Duration};

use anyhow::{Context, bail};
use client::{ApiClient, ClientConfig, ListingFetcher, OptionSource, option_source::narrow};
use common::{
    directory::Directory,
    directory_const::SEARCH_TERM_DEBOUNCE_MS,
    directory_records::{College, Corporate, DirectoryRecord, Professional, Student},
};
use dioxus_history::MemoryHistory;
use frontend::{
    data_definitions::directory_location::DirectoryLocation,
    pages::directory_page::DirectoryController,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = ClientConfig::load()?;
    let client = ApiClient::new(&config)?;

    match args.as_slice() {
        [command, directory, rest @ ..] if command == "options" => {
            let directory: Directory = directory.parse()?;
            let needle = rest.first().map(String::as_str).unwrap_or_default();
            print_options(client, &config, directory, needle).await
        }
        [href] => {
            let location = DirectoryLocation::parse(href)?;
            match location.directory() {
                Directory::Students => print_listing::<Student>(client, &config, href).await,
                Directory::Professionals => print_listing::<Professional>(client, &config, href).await,
                Directory::Corporates => print_listing::<Corporate>(client, &config, href).await,
                Directory::Colleges => print_listing::<College>(client, &config, href).await,
            }
        }
        _ => bail!("usage: frontend <location> | frontend options <directory> [needle]"),
    }
}

async fn print_listing<T: DirectoryRecord>(client: ApiClient, config: &ClientConfig, href: &str) -> anyhow::Result<()> {
    let fetcher = ListingFetcher::<T>::new(client, config.listing_cache_ttl);
    let page = DirectoryController::mount(MemoryHistory::with_initial_path(href), fetcher, Duration::from_millis(SEARCH_TERM_DEBOUNCE_MS))?;
    let state = page.settled().await;
    if let Some(e) = state.error {
        bail!("Failed to load {}: {e}", page.location());
    }
    let results = state.page.context("Listing settled without a page")?;
    println!("{}", serde_json::to_string_pretty(&*results)?);
    Ok(())
}

async fn print_options(client: ApiClient, config: &ClientConfig, directory: Directory, needle: &str) -> anyhow::Result<()> {
    let source = OptionSource::new(client, config.master_cache_ttl);
    let mut options = BTreeMap::new();
    for dimension in directory.dimensions() {
        let all = source
            .options(*dimension)
            .await
            .with_context(|| format!("Failed to load options for {dimension}"))?;
        options.insert(dimension.id(), narrow(&all, needle));
    }
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
