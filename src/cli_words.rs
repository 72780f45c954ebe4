use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use word_finder::cli_style::{dimmed, get_styles, summary, title};
use word_finder::config::UpstreamArgs;
use word_finder::crawler::{partition_by_keywords, AnalyzedSong, LyricsService};
use word_finder::genius::{GeniusClient, GeniusId};
use word_finder::lyrics::{load_keywords_file, split_keyword_args, KeywordSet, WordOccurrences};
use word_finder::server::RequestsLoggingLevel;

/// Finds which songs of an artist use (or avoid) some words.
#[derive(Parser, Debug)]
#[command(styles = get_styles(), version)]
struct CliArgs {
    /// Artist name, or song title with --song.
    #[clap(short, long, required_unless_present = "song_id")]
    pub query: Option<String>,

    /// Keywords to look for, repeatable and comma separated.
    #[clap(short, long)]
    pub keyword: Vec<String>,

    /// File of keywords separated by spaces, commas or new lines. Repeatable.
    #[clap(long)]
    pub keywords_file: Vec<PathBuf>,

    /// Print the songs containing none of the keywords instead.
    #[clap(long)]
    pub without_banned: bool,

    /// Only print the artist catalog, without fetching any lyrics.
    #[clap(long, conflicts_with_all = ["song", "song_id"])]
    pub list: bool,

    /// Look up a single song by title instead of a whole artist.
    #[clap(long, conflicts_with = "song_id")]
    pub song: bool,

    /// Look up songs by id instead of by artist. Repeatable.
    #[clap(long)]
    pub song_id: Vec<GeniusId>,

    /// Print the N most frequent words across all fetched songs.
    #[clap(long)]
    pub top: Option<usize>,

    /// Log crawl progress to stderr.
    #[clap(short, long)]
    pub verbose: bool,

    #[clap(flatten)]
    pub upstream: UpstreamArgs,
}

/// Merges `--keyword` values with the content of every keywords file. Files
/// that cannot be read or hold no words are reported and skipped.
fn collect_keywords(args: &CliArgs) -> KeywordSet {
    let mut words = split_keyword_args(&args.keyword);
    for path in &args.keywords_file {
        match load_keywords_file(path) {
            Ok(file_words) if file_words.is_empty() => {
                eprintln!("Keywords file {:?} is empty, skipping it", path)
            }
            Ok(file_words) => words.extend(file_words),
            Err(err) => eprintln!("{}, skipping it", err),
        }
    }
    KeywordSet::new(words)
}

fn total_occurrences(songs: &[AnalyzedSong]) -> WordOccurrences {
    let mut total = WordOccurrences::new();
    for song in songs {
        total.append(&song.words);
    }
    total
}

fn occurrence_summary(keywords: &KeywordSet, matching: usize, fetched: usize) -> String {
    let noun = if keywords.len() == 1 { "Keyword" } else { "Keywords" };
    format!(
        "{} \"{}\" occurred in {} out of {} songs",
        noun,
        keywords.keywords().join(", "),
        matching,
        fetched
    )
}

async fn print_catalog(service: &LyricsService, artist: &str) -> Result<()> {
    let infos = service.song_infos_by_artist(artist).await?;
    for info in &infos {
        println!("{}  {}", title(&info.title), dimmed(&service.song_url(info)));
    }
    println!("{}", summary(&format!("{} songs", infos.len())));
    Ok(())
}

async fn fetch_songs(service: &LyricsService, args: &CliArgs) -> Result<Vec<AnalyzedSong>> {
    if !args.song_id.is_empty() {
        let songs = service.songs_by_ids(args.song_id.clone()).await;
        return Ok(songs.into_iter().map(AnalyzedSong::from).collect());
    }

    let query = args.query.as_deref().context("No query given")?;
    if args.song {
        let song = service.song_by_name(query).await?;
        return Ok(vec![song.into()]);
    }
    Ok(service.analyzed_songs_by_artist(query).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let start = Instant::now();

    let default_level = if cli_args.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    let app_config = cli_args.upstream.resolve(0, RequestsLoggingLevel::None)?;
    let client = GeniusClient::new(app_config.genius.clone())
        .context("Failed to create the lyrics site client")?;
    let service = LyricsService::new(Arc::new(client), app_config.crawl.clone());

    if cli_args.list {
        let artist = cli_args.query.as_deref().context("No artist given")?;
        print_catalog(&service, artist).await?;
        eprintln!("{}", dimmed(&format!("Finished in {:.2?}", start.elapsed())));
        return Ok(());
    }

    let keywords = collect_keywords(&cli_args);
    if keywords.is_empty() && cli_args.top.is_none() {
        bail!("No keywords given, use --keyword, --keywords-file or --top");
    }

    let songs = fetch_songs(&service, &cli_args).await?;
    let fetched = songs.len();
    let totals = cli_args.top.map(|_| total_occurrences(&songs));

    if !keywords.is_empty() {
        let (with, without) = partition_by_keywords(songs, &keywords);
        let matching = with.len();
        let listed = if cli_args.without_banned { without } else { with };
        for song in &listed {
            println!("{}", title(&song.song.info.title));
        }
        println!();
        println!("{}", summary(&occurrence_summary(&keywords, matching, fetched)));
    }

    if let (Some(n), Some(totals)) = (cli_args.top, totals) {
        println!();
        println!("{}", summary(&format!("Top {} words in {} songs:", n, fetched)));
        for (word, count) in totals.most_frequent(n) {
            println!("{:>6}  {}", count, word);
        }
    }

    eprintln!("{}", dimmed(&format!("Finished in {:.2?}", start.elapsed())));
    Ok(())
}
