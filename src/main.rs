use clap::Parser;
use learnvault::cli::{Cli, Commands};
use learnvault::commands;
use learnvault::config::Config;
use learnvault::frontmatter::Origin;
use learnvault::render::MarkdownRenderer;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let root = commands::scan_root(&config, cli.vault.as_deref());
    let mut rng = rand::rng();

    match cli.command.unwrap_or(Commands::Daily) {
        Commands::Tags { json } => {
            let store = commands::load_store(&root)?;
            let tags = commands::tags(&store);
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else if tags.is_empty() {
                println!("No tags found.");
            } else {
                for tag in tags {
                    println!("{tag}");
                }
            }
        }
        Commands::List { tags, json } => {
            let store = commands::load_store(&root)?;
            let notes = commands::list(&store, &commands::parse_tags(&tags));
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else if notes.is_empty() {
                println!("No notes found.");
            } else {
                for note in &notes {
                    let marker = if note.origin == Origin::Unreadable {
                        " (unreadable)"
                    } else {
                        ""
                    };
                    println!("{}{marker}  [{}]", note.path.display(), note.tags.join(", "));
                }
                println!("\n{} note(s)", notes.len());
            }
        }
        Commands::Pick { tags, raw, strip_front_matter } => {
            let store = commands::load_store(&root)?;
            let note = commands::pick(&store, &commands::parse_tags(&tags), &mut rng)?;
            if raw {
                println!("{}", note.content);
            } else {
                let renderer = MarkdownRenderer::new();
                println!("{}", commands::render(&renderer, &note.content, strip_front_matter));
            }
        }
        Commands::Daily => {
            let store = commands::load_store(&root)?;
            println!("{}", commands::format_tag_list(&commands::tags(&store)));
            let daily = commands::daily(&config, &store, &MarkdownRenderer::new(), &mut rng)?;
            println!("{}", daily.html);
        }
    }

    Ok(())
}
