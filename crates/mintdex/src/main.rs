mod cli;

use std::collections::HashSet;
use std::sync::Arc;

use clap::Parser;
use eyre::{bail, WrapErr};
use serde_json::json;

use mintdex_core::mintlist::{load_mintlist_dir, load_mintlist_file};
use mintdex_core::{Mintlist, StaticFetcher, TokenRepository, TokenWithTags};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let fetcher = StaticFetcher::from_jsonl_file(&args.metadata)
        .with_context(|| format!("load token metadata from {}", args.metadata.display()))?;
    tracing::info!(
        path = %args.metadata.display(),
        tokens = fetcher.len(),
        "loaded token metadata"
    );

    let repo = build_repository(&args, Arc::new(fetcher))?;
    tracing::info!(
        mints = repo.len(),
        tags = repo.tags().len(),
        excluded = repo.excluded_count(),
        "token index ready"
    );

    match &args.command {
        cli::Command::All => print_records(&repo.get_all().await?)?,
        cli::Command::Get { mint } => {
            let record = repo.get(mint.as_str()).await?;
            println!("{}", serde_json::to_string(&record)?);
        }
        cli::Command::Many { mints } => print_records(&repo.get_many(mints).await?)?,
        cli::Command::Tag { tag } => print_records(&repo.get_by_tag(tag).await?)?,
        cli::Command::Tags => {
            for tag in repo.tags() {
                let line = json!({ "tag": tag, "mints": repo.mints_for_tag(tag).len() });
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn build_repository(
    args: &cli::Cli,
    fetcher: Arc<StaticFetcher>,
) -> eyre::Result<TokenRepository> {
    let mut mintlists: Vec<Mintlist> = Vec::new();
    for path in &args.mintlist {
        mintlists.push(load_mintlist_file(path).context("load mintlist")?);
    }
    for dir in &args.mintlist_dir {
        let loaded = load_mintlist_dir(dir).context("load mintlist directory")?;
        tracing::info!(
            path = %dir.display(),
            mintlists = loaded.len(),
            "loaded mintlist directory"
        );
        mintlists.extend(loaded);
    }

    // List names become tags, so two sources sharing a name would merge.
    let mut seen_names = HashSet::new();
    for mintlist in &mintlists {
        if !seen_names.insert(mintlist.name.as_str()) {
            bail!("mintlist name `{}` is loaded more than once", mintlist.name);
        }
    }

    let mut repo = TokenRepository::new(fetcher);
    for mintlist in &mintlists {
        repo.add_mintlist(mintlist, &[&mintlist.name])
            .add_mintlist(mintlist, &args.tag);
    }

    for path in &args.exclude_mintlist {
        let mintlist = load_mintlist_file(path).context("load exclusion mintlist")?;
        repo.exclude_mintlist(&mintlist);
    }
    repo.exclude_mints(&args.exclude);

    Ok(repo)
}

fn print_records(records: &[TokenWithTags]) -> eyre::Result<()> {
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mintlists_are_tagged_with_their_name_and_extra_tags() {
        let unique = format!(
            "mintdex-cli-test-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("system time before unix epoch")
                .as_nanos()
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).expect("create test dir");
        let stables = dir.join("stables.json");
        let blocked = dir.join("blocked.json");
        std::fs::write(&stables, r#"{"name":"stables","mints":["A","B"]}"#)
            .expect("write stables");
        std::fs::write(&blocked, r#"{"name":"blocked","mints":["B"]}"#).expect("write blocked");

        let args = cli::Cli::try_parse_from([
            "mintdex",
            "--metadata",
            "unused.jsonl",
            "--mintlist",
            stables.to_str().expect("utf-8 path"),
            "--tag",
            "whitelisted",
            "--exclude-mintlist",
            blocked.to_str().expect("utf-8 path"),
            "--exclude",
            "C",
            "all",
        ])
        .expect("valid arguments");

        let fetcher = Arc::new(StaticFetcher::builder().build());
        let repo = build_repository(&args, fetcher).expect("build repository");

        assert_eq!(repo.tags_for("A"), ["stables", "whitelisted"]);
        assert_eq!(repo.tags(), vec!["stables", "whitelisted"]);
        assert!(repo.is_excluded("B"));
        assert!(repo.is_excluded("C"));
        assert!(!repo.is_excluded("A"));

        std::fs::remove_dir_all(&dir).expect("cleanup test dir");
    }

    #[test]
    fn same_mintlist_name_from_two_sources_is_rejected() {
        let unique = format!(
            "mintdex-cli-dup-test-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("system time before unix epoch")
                .as_nanos()
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).expect("create test dir");
        let first = dir.join("first.json");
        let second = dir.join("second.json");
        std::fs::write(&first, r#"{"name":"core","mints":["A"]}"#).expect("write first");
        std::fs::write(&second, r#"{"name":"core","mints":["B"]}"#).expect("write second");

        let args = cli::Cli::try_parse_from([
            "mintdex",
            "--metadata",
            "unused.jsonl",
            "--mintlist",
            first.to_str().expect("utf-8 path"),
            "--mintlist",
            second.to_str().expect("utf-8 path"),
            "tags",
        ])
        .expect("valid arguments");

        let fetcher = Arc::new(StaticFetcher::builder().build());
        let err = build_repository(&args, fetcher)
            .err()
            .expect("duplicate names must fail");
        assert!(err.to_string().contains("`core`"), "unexpected error: {err}");

        std::fs::remove_dir_all(&dir).expect("cleanup test dir");
    }
}
