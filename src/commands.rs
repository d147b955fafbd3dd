use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli::{ArchiveArgs, ListingArgs, ListingFormat, WorkArgs, WorkFormat};
use crate::client::ArchiveClient;
use crate::formats::{FlatWorkSummary, project};

const RULE: &str = "========================================";

fn connect(archive: &ArchiveArgs) -> anyhow::Result<ArchiveClient> {
    ArchiveClient::new(&archive.to_config()).context("configure archive client")
}

pub async fn ping(archive: ArchiveArgs) -> anyhow::Result<()> {
    let client = connect(&archive)?;
    let outcome = client
        .test_connection()
        .await
        .with_context(|| format!("connect to {}", client.base_url()))?;

    let verdict = if outcome.success { "ok" } else { "failed" };
    println!("{} {verdict}", outcome.status);

    if !outcome.success {
        anyhow::bail!(
            "archive at {} answered with status {}",
            client.base_url(),
            outcome.status
        );
    }
    Ok(())
}

pub async fn listing(archive: ArchiveArgs, args: ListingArgs) -> anyhow::Result<()> {
    let client = connect(&archive)?;
    let works = client
        .get_listing(&args.tag, args.page)
        .await
        .with_context(|| format!("list works tagged {:?}", args.tag))?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        ListingFormat::Text => {
            for (index, work) in project(&works).iter().enumerate() {
                write_text_record(&mut stdout, index, work).context("write listing")?;
            }
        }
        ListingFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &project(&works))
                .context("serialize listing")?;
            stdout.write_all(b"\n").context("write listing newline")?;
        }
        ListingFormat::JsonRaw => {
            serde_json::to_writer_pretty(&mut stdout, &works).context("serialize listing")?;
            stdout.write_all(b"\n").context("write listing newline")?;
        }
    }
    stdout.flush().context("flush listing")?;

    Ok(())
}

fn write_text_record(
    out: &mut impl std::io::Write,
    index: usize,
    work: &FlatWorkSummary,
) -> std::io::Result<()> {
    writeln!(out, "[{index}] {}", work.title)?;
    writeln!(out, "  authors:       {}", work.authors)?;
    writeln!(out, "  work id:       {}", work.work_id)?;
    writeln!(out, "  fandoms:       {}", work.fandoms)?;
    writeln!(out, "  warnings:      {}", work.warnings)?;
    writeln!(out, "  relationships: {}", work.relationships)?;
    writeln!(out, "  characters:    {}", work.characters)?;
    writeln!(out, "  tags:          {}", work.tags)?;
    writeln!(out, "  summary:       {}", work.summary)?;
    writeln!(out, "  words:         {}", work.word_count)?;
    writeln!(out, "{RULE}")
}

pub async fn work(archive: ArchiveArgs, args: WorkArgs) -> anyhow::Result<()> {
    let client = connect(&archive)?;
    let rendered = match args.format {
        WorkFormat::Markdown => client.get_work_markdown(&args.id).await,
        WorkFormat::Html => client.get_work_html(&args.id).await,
    }
    .with_context(|| format!("fetch work {}", args.id))?;

    match args.out {
        Some(out) => {
            let out_path = PathBuf::from(out);
            let mut file = OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&out_path)
                .with_context(|| format!("create work output: {}", out_path.display()))?;
            file.write_all(rendered.as_bytes())
                .with_context(|| format!("write work output: {}", out_path.display()))?;
            tracing::info!(path = %out_path.display(), "wrote work");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("write work")?;
            stdout.write_all(b"\n").context("write work newline")?;
        }
    }

    Ok(())
}
