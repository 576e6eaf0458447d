//! Condo CLI
//!
//! Command-line front end for the condominium backend:
//! - Sign in, sign out and register
//! - List, add, delete and import expenses
//! - Browse users, residents, shops and notifications
//! - Dashboard totals

use clap::{Parser, Subcommand};
use condo::api::{ApiClient, NewExpense, RegisterRequest, SessionStore};
use condo::config::{Config, LoggingConfig};
use condo::error::{user_message, AppResult, Screen};
use condo::expenses::{
    totals_by_category, totals_by_day, DescriptionFilter, ExpenseLedger, ListPresenter, SortField,
    EXPENSE_TYPES,
};
use condo::import::{normalize_date, parse_amount, parse_date, ImportPipeline};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "condo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Condominium management client")]
#[command(long_about = "Condo talks to the condominium backend.\nManage expenses, import them from CSV, and browse residents, shops and notifications.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/condo/config.toml or ./condo.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Create an account
    Register {
        username: String,
        email: String,
        #[arg(short, long)]
        password: String,
        /// Must match --password
        #[arg(long)]
        confirm: String,
    },

    /// Manage expenses
    #[command(subcommand)]
    Expenses(ExpenseCommands),

    /// List users
    Users,

    /// Delete a user
    DeleteUser { id: String },

    /// List residents
    Residents,

    /// List shop owners
    ShopOwners,

    /// List notifications
    Notifications,

    /// Expense totals, residents and notifications at a glance
    Dashboard,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Show one page of expenses
    List {
        /// Only expenses with exactly this description
        #[arg(long)]
        filter: Option<String>,
        /// Case-insensitive search over description, amount and date
        #[arg(short, long)]
        search: Option<String>,
        /// Sort column (description, amount, date); repeat to flip direction
        #[arg(long)]
        sort: Vec<String>,
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Create an expense
    Add {
        description: String,
        /// Amount, e.g. "R$ 1.234,56", "12,5" or 99.90. A lone period is a
        /// decimal point only with exactly two digits after it ("99.9" reads
        /// as 999); use a comma otherwise
        amount: String,
        /// Date (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete { id: String },

    /// Import expenses from a CSV with description, amount and date columns
    Import {
        path: PathBuf,
        /// Validate and show the rows without creating anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List the expense categories
    Types,
}

impl Commands {
    fn screen(&self) -> Screen {
        match self {
            Commands::Login { .. } | Commands::Logout | Commands::Config { .. } => Screen::Login,
            Commands::Register { .. } => Screen::Register,
            Commands::Expenses(cmd) => match cmd {
                ExpenseCommands::List { .. } | ExpenseCommands::Types => Screen::Expenses,
                ExpenseCommands::Add { .. } => Screen::CreateExpense,
                ExpenseCommands::Delete { .. } => Screen::DeleteExpense,
                ExpenseCommands::Import { .. } => Screen::Import,
            },
            Commands::Users => Screen::Users,
            Commands::DeleteUser { .. } => Screen::DeleteUser,
            Commands::Residents => Screen::Residents,
            Commands::ShopOwners => Screen::ShopOwners,
            Commands::Notifications => Screen::Notifications,
            Commands::Dashboard => Screen::Dashboard,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = condo::config::generate_default_config();

        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!(api = %config.api.base_url, "Condo v{}", env!("CARGO_PKG_VERSION"));

    let screen = cli.command.screen();
    if let Err(err) = run(cli, &config).await {
        eprintln!("{}", user_message(screen, &err));
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("condo={}", logging.level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output only
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: &Config) -> AppResult<()> {
    let store = SessionStore::new(config.session.path());
    let json = cli.format == "json";

    if let Commands::Logout = cli.command {
        store.clear()?;
        println!("Logged out");
        return Ok(());
    }

    let client = ApiClient::new(&config.api)?.with_session(store.hydrate()?);

    match cli.command {
        Commands::Login { username, password } => {
            let session = client.login(&username, &password).await?;
            store.save(&session)?;
            println!(
                "Logged in as {} ({})",
                username,
                session.role().unwrap_or("-")
            );
        }

        Commands::Register {
            username,
            email,
            password,
            confirm,
        } => {
            let request = RegisterRequest::new(username, email, password);
            let user = client.register(&request, &confirm).await?;
            println!("Account created for {}. You can now log in.", user.username);
        }

        Commands::Expenses(cmd) => run_expenses(cmd, client, config, json).await?,

        Commands::Users => {
            let users = client.fetch_users().await?;
            if json {
                print_json(&users)?;
            } else if users.is_empty() {
                println!("No users found.");
            } else {
                println!("{:<8} {:<20} {:<30} {}", "ID", "Username", "Email", "Roles");
                println!("{}", "-".repeat(80));
                for user in users {
                    println!(
                        "{:<8} {:<20} {:<30} {}",
                        user.id,
                        user.username,
                        user.email,
                        user.roles.join(",")
                    );
                }
            }
        }

        Commands::DeleteUser { id } => {
            client.delete_user(&id).await?;
            println!("Deleted user {}", id);
        }

        Commands::Residents => {
            let residents = client.fetch_residents().await?;
            if json {
                print_json(&residents)?;
            } else {
                print_directory(
                    "No residents found.",
                    residents.iter().map(|r| (&r.id, &r.name, &r.address)),
                );
            }
        }

        Commands::ShopOwners => {
            let shops = client.fetch_shop_owners().await?;
            if json {
                print_json(&shops)?;
            } else {
                print_directory(
                    "No shops found.",
                    shops.iter().map(|s| (&s.id, &s.name, &s.address)),
                );
            }
        }

        Commands::Notifications => {
            let notifications = client.fetch_notifications().await?;
            if json {
                print_json(&notifications)?;
            } else if notifications.is_empty() {
                println!("No notifications.");
            } else {
                for n in notifications {
                    println!("[{}] {}", n.id, n.title);
                    println!("    {}", n.message);
                }
            }
        }

        Commands::Dashboard => {
            let summary = client.fetch_summary().await?;
            if json {
                print_json(&summary)?;
                return Ok(());
            }

            println!("Expenses:      {}", summary.expenses.len());
            println!("Residents:     {}", summary.residents.len());
            println!("Notifications: {}", summary.notifications.len());

            let by_category = totals_by_category(&summary.expenses);
            if !by_category.is_empty() {
                println!();
                println!("By category:");
                for (description, total) in by_category {
                    println!("  {:<20} {:>12}", description, format_amount(total));
                }

                println!();
                println!("By day:");
                for (day, total) in totals_by_day(&summary.expenses) {
                    println!("  {:<20} {:>12}", day.format("%d/%m/%Y"), format_amount(total));
                }
            }
        }

        Commands::Logout | Commands::Config { .. } => {}
    }

    Ok(())
}

async fn run_expenses(
    cmd: ExpenseCommands,
    client: ApiClient,
    config: &Config,
    json: bool,
) -> AppResult<()> {
    let mut ledger = ExpenseLedger::new(client);

    match cmd {
        ExpenseCommands::List {
            filter,
            search,
            sort,
            page,
        } => {
            ledger.refresh().await?;

            let mut presenter = ListPresenter::new(config.listing.page_size);
            if let Some(description) = filter {
                presenter.set_filter(DescriptionFilter::Exact(description));
            }
            if let Some(term) = search {
                presenter.set_search(term);
            }
            for name in sort {
                match SortField::from_str(&name) {
                    Some(field) => presenter.select_sort(field),
                    None => tracing::warn!("Ignoring unknown sort column: {}", name),
                }
            }
            presenter.set_page(page);

            let view = presenter.view(ledger.expenses().as_slice());
            if json {
                print_json(&view.items)?;
            } else if view.items.is_empty() {
                println!("No expenses found.");
            } else {
                println!("{:<8} {:<20} {:>12}  {}", "ID", "Description", "Amount", "Date");
                println!("{}", "-".repeat(56));
                for expense in &view.items {
                    println!(
                        "{:<8} {:<20} {:>12}  {}",
                        expense.id,
                        expense.description,
                        format_amount(expense.amount),
                        format_date(&expense.date)
                    );
                }
                println!();
                println!(
                    "Page {} of {} ({} expenses)",
                    view.page, view.total_pages, view.total_items
                );
            }
        }

        ExpenseCommands::Add {
            description,
            amount,
            date,
        } => {
            if !EXPENSE_TYPES.contains(&description.as_str()) {
                tracing::warn!("{:?} is not a standard expense type", description);
            }

            let date = match date {
                Some(d) => normalize_date(&d)?,
                None => normalize_date(&chrono::Utc::now().format("%Y-%m-%d").to_string())?,
            };
            let expense = NewExpense {
                description,
                amount: parse_amount(&amount)?,
                date,
            };

            let created = ledger.create(expense).await?;
            println!(
                "Created expense {}: {} {}",
                created.id,
                created.description,
                format_amount(created.amount)
            );
        }

        ExpenseCommands::Delete { id } => {
            ledger.refresh().await?;
            match ledger.delete(&id).await? {
                Some(removed) => println!("Deleted expense {} ({})", id, removed.description),
                None => println!("Deleted expense {}", id),
            }
        }

        ExpenseCommands::Import { path, dry_run } => {
            let text = std::fs::read_to_string(&path)?;

            if dry_run {
                let payloads = ImportPipeline::new().prepare(&text)?;
                if json {
                    print_json(&payloads)?;
                } else {
                    println!("{} rows ready to import:", payloads.len());
                    for p in &payloads {
                        println!(
                            "  {:<20} {:>12}  {}",
                            p.description,
                            format_amount(p.amount),
                            format_date(&p.date)
                        );
                    }
                    println!();
                    println!("(Dry run - no expenses were created)");
                }
                return Ok(());
            }

            let created = ledger.import_csv(&text).await?;
            println!("Imported {} expenses from {:?}", created, path);
            println!("Total expenses: {}", ledger.expenses().len());
        }

        ExpenseCommands::Types => {
            if json {
                print_json(&EXPENSE_TYPES)?;
            } else {
                for name in EXPENSE_TYPES {
                    println!("{}", name);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", text);
    Ok(())
}

fn print_directory<'a>(
    empty: &str,
    rows: impl ExactSizeIterator<Item = (&'a String, &'a String, &'a String)>,
) {
    if rows.len() == 0 {
        println!("{}", empty);
        return;
    }

    println!("{:<8} {:<30} {}", "ID", "Name", "Address");
    println!("{}", "-".repeat(70));
    for (id, name, address) in rows {
        println!("{:<8} {:<30} {}", id, name, address);
    }
}

/// Brazilian currency display, e.g. `R$ 1.234,56`
fn format_amount(amount: f64) -> String {
    let cents = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

fn format_date(date: &str) -> String {
    parse_date(date)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}
