use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use mint_telegraph::config::Config;
use mint_telegraph::helper::log::LogContent;
use mint_telegraph::telegraph::request::{
    AccountField, CreatePageRequest, GetAccountInfoRequest, GetPageListRequest, ViewsScope,
};
use mint_telegraph::telegraph::{
    decode_content, validate_content, HttpTransport, Node, Telegraph, Vocabulary,
};

#[derive(Parser, Debug)]
#[command(name = "mint-telegraph")]
#[command(about = "Validate and publish Telegraph pages")]
#[command(version)]
struct Args {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode and validate a content JSON file without publishing it
    Validate { file: PathBuf },
    /// Publish a content JSON file as a new page
    Publish {
        title: String,
        file: PathBuf,
        #[arg(long)]
        author_name: Option<String>,
        #[arg(long)]
        author_url: Option<String>,
    },
    /// Show a page and its content
    Page { path: String },
    /// Show view count of a page, optionally narrowed to a year/month/day/hour
    Views {
        path: String,
        #[arg(long)]
        year: Option<u16>,
        #[arg(long, requires = "year")]
        month: Option<u8>,
        #[arg(long, requires = "month")]
        day: Option<u8>,
        #[arg(long, requires = "day")]
        hour: Option<u8>,
    },
    /// Show the account bound to the configured access token
    Account,
    /// List pages of the configured account
    Pages {
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() {
    let env = env_logger::Env::new().default_filter_or("info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = if args.config.exists() {
        Config::read_config(&args.config)
            .with_context(|| format!("Failed to load config {}", args.config.display()))?
    } else {
        log::debug!("Config {} not found, using defaults", args.config.display());
        Config::default()
    };

    let transport = HttpTransport::new(&config.telegraph.api_server, config.telegraph.timeout())?;
    let mut telegraph = Telegraph::new(transport);
    if config.telegraph.validate_content {
        telegraph = telegraph.with_vocabulary(Vocabulary::default());
    }

    match args.command {
        Command::Validate { file } => {
            let content = read_content(&file)?;
            validate_content(&content, &Vocabulary::default())?;
            println!("{} {}{}", "valid".green().bold(), file.display(), LogContent(&content));
        }
        Command::Publish { title, file, author_name, author_url } => {
            let content = read_content(&file)?;
            let request = CreatePageRequest {
                access_token: access_token(&config)?,
                title,
                author_name,
                author_url,
                content,
                return_content: false,
            };
            let page = telegraph.create_page(&request).await?;
            println!("{} {}", "published".green().bold(), page.url);
        }
        Command::Page { path } => {
            let page = telegraph.get_page(&path, true).await?;
            println!("{} ({} views)", page.title.bold(), page.views);
            println!("{}", page.url.underline());
            for node in page.content.unwrap_or_default() {
                print_node(&node, 0);
            }
        }
        Command::Views { path, year, month, day, hour } => {
            let scope = match (year, month, day, hour) {
                (None, _, _, _) => ViewsScope::Total,
                (Some(y), None, _, _) => ViewsScope::Year(y),
                (Some(y), Some(m), None, _) => ViewsScope::Month(y, m),
                (Some(y), Some(m), Some(d), None) => ViewsScope::Day(y, m, d),
                (Some(y), Some(m), Some(d), Some(h)) => ViewsScope::Hour(y, m, d, h),
            };
            let views = telegraph.get_views(&path, scope).await?;
            println!("{} {}", path.bold(), views.views);
        }
        Command::Account => {
            let request = GetAccountInfoRequest {
                access_token: access_token(&config)?,
                fields: vec![
                    AccountField::ShortName,
                    AccountField::AuthorName,
                    AccountField::AuthorUrl,
                    AccountField::PageCount,
                ],
            };
            let account = telegraph.get_account_info(&request).await?;
            println!("{} ({})", account.short_name.bold(), account.author_name);
            if !account.author_url.is_empty() {
                println!("{}", account.author_url.underline());
            }
            if let Some(count) = account.page_count {
                println!("{} pages", count);
            }
        }
        Command::Pages { offset, limit } => {
            let request = GetPageListRequest::new(access_token(&config)?)
                .offset(offset)
                .limit(limit);
            let list = telegraph.get_page_list(&request).await?;
            println!("{} pages in total", list.total_count);
            for page in list.pages {
                println!("{:>8}  {}  {}", page.views, page.title.bold(), page.path.dimmed());
            }
        }
    }

    Ok(())
}

fn access_token(config: &Config) -> anyhow::Result<String> {
    match config.telegraph.access_token.as_ref() {
        Some(token) => Ok(token.clone()),
        None => bail!("No access_token in config"),
    }
}

fn read_content(path: &Path) -> anyhow::Result<Vec<Node>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)?;
    let content = decode_content(&value)?;
    Ok(content)
}

fn print_node(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => println!("{}{:?}", indent, text),
        Node::Element(element) => {
            let attrs: Vec<String> = element.attrs.iter()
                .map(|(k, v)| format!("{}={:?}", k, v))
                .collect();
            if attrs.is_empty() {
                println!("{}<{}>", indent, element.tag.cyan());
            } else {
                println!("{}<{} {}>", indent, element.tag.cyan(), attrs.join(" "));
            }
            for child in &element.children {
                print_node(child, depth + 1);
            }
        }
    }
}
