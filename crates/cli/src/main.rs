use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshop_app::modules::catalog::models::{BookListParams, CategoryView};
use bookshop_kernel::settings::Settings;

/// BookShop catalog server and catalog browser
#[derive(Debug, Parser)]
#[command(name = "bookshop-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Print one page of the catalog as JSON
    Books {
        #[arg(long)]
        category_id: Option<i32>,
        #[arg(long)]
        author_id: Option<i32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i32>,
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i32>,
    },
    /// Print the active categories as JSON
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("failed to load BookShop settings")?;

    match cli.command {
        Command::Serve => {
            bookshop_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "bookshop-cli serving");
            bookshop_app::run(settings).await
        }
        Command::Books {
            category_id,
            author_id,
            search,
            page,
            page_size,
        } => {
            init_stderr_logging(&settings)?;
            let (services, _) = bookshop_app::bootstrap(&settings)?;
            let query = BookListParams {
                category_id,
                author_id,
                search_term: search,
                page,
                page_size,
            }
            .into_query(settings.catalog.default_page_size);

            let list = services.catalog.book_list(&query).await?;
            print_json(&list)
        }
        Command::Categories => {
            init_stderr_logging(&settings)?;
            let (services, _) = bookshop_app::bootstrap(&settings)?;
            let categories: Vec<CategoryView> = services
                .catalog
                .active_categories()
                .await?
                .iter()
                .map(CategoryView::from)
                .collect();
            print_json(&categories)
        }
    }
}

/// Keep stdout for JSON; logs go to stderr.
fn init_stderr_logging(settings: &Settings) -> anyhow::Result<()> {
    let filter = bookshop_telemetry::env_filter(&settings.telemetry)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{}", rendered);
    Ok(())
}
