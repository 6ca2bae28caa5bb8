//! Interactive probe driving the directory engine against a live server.
//!
//! Reads one command per stdin line (`search`, `go`, `filter`, `page`,
//! `sort`, `reset`, `add`, `login`, `quit`) and prints the resulting view
//! after each intent. Useful for poking a deployment without a browser
//! attached.
#![expect(
    clippy::print_stdout,
    reason = "printing the view is the probe's purpose"
)]

use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use client::domain::ports::InMemoryAddressBar;
use client::domain::{
    AuthContext, DashboardController, EmployeeDraft, Phase, SessionRole, SessionToken, UserRole,
};
use client::outbound::DirectoryHttpClient;
use query_state::{FilterBy, SortKey};
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;
use url::Url;

/// `directory-probe` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "directory-probe",
    about = "Browse and administer a remote employee directory from the terminal",
    version
)]
struct CliArgs {
    /// Directory base URL, trailing slash included when it carries a path.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Url,
    /// Bearer token obtained from the auth provider.
    #[arg(long = "token", value_name = "token")]
    token: String,
    /// Role string the auth provider granted (`Admin` unlocks `add`).
    #[arg(long = "role", value_name = "role", default_value = "Employee")]
    role: String,
    /// Request timeout in seconds.
    #[arg(long = "timeout-seconds", value_name = "seconds", default_value_t = 30)]
    timeout_seconds: u64,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let token = SessionToken::new(args.token);
    let auth = AuthContext::new(token.clone(), SessionRole::from_role_str(&args.role));
    let directory = Arc::new(
        DirectoryHttpClient::new(
            args.base_url,
            token,
            Duration::from_secs(args.timeout_seconds),
        )
        .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?,
    );

    let mut controller =
        DashboardController::new(Arc::clone(&directory), InMemoryAddressBar::new(), &auth);
    controller.mount().await;
    render(&controller);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.split_whitespace().next() == Some("login") {
            let rest = trimmed.trim_start_matches("login").trim();
            relogin(&directory, &mut controller, rest).await;
        } else if !dispatch(&mut controller, trimmed).await {
            break;
        }
        render(&controller);
    }
    Ok(())
}

/// Swap the session after a re-login: the adapter gets the new bearer
/// first, then the controller rehydrates under the new capability.
async fn relogin<A>(
    directory: &Arc<DirectoryHttpClient>,
    controller: &mut DashboardController<DirectoryHttpClient, A>,
    rest: &str,
) where
    A: client::domain::ports::AddressBar,
{
    let mut words = rest.split_whitespace();
    let Some(raw_token) = words.next() else {
        println!("usage: login <token> [role]");
        return;
    };

    let token = SessionToken::new(raw_token);
    let role = SessionRole::from_role_str(words.next().unwrap_or("Employee"));
    directory.update_token(token.clone());
    controller.rehydrate(&AuthContext::new(token, role)).await;
}

/// Apply one command line; returns `false` on `quit`.
async fn dispatch<D, A>(controller: &mut DashboardController<D, A>, line: &str) -> bool
where
    D: client::domain::ports::EmployeeDirectory,
    A: client::domain::ports::AddressBar,
{
    let mut words = line.split_whitespace();
    match words.next() {
        Some("search") => {
            let text = words.collect::<Vec<_>>().join(" ");
            controller.set_search_text(text).await;
        }
        Some("go") => controller.submit_search().await,
        Some("filter") => {
            let raw = words.next().unwrap_or("all");
            controller.set_filter_by(FilterBy::parse(raw)).await;
        }
        Some("page") => {
            let page = words.next().and_then(|raw| raw.parse().ok()).unwrap_or(1);
            controller.set_page(page).await;
        }
        Some("sort") => match words.next().and_then(parse_sort_key) {
            Some(key) => controller.set_sort(key),
            None => println!("usage: sort <id|name|email|role|userrole|date>"),
        },
        Some("reset") => controller.reset().await,
        Some("add") => add_record(controller, &words.collect::<Vec<_>>().join(" ")).await,
        Some("quit") | Some("exit") => return false,
        Some(other) => println!("unknown command: {other}"),
        None => {}
    }
    true
}

async fn add_record<D, A>(controller: &mut DashboardController<D, A>, rest: &str)
where
    D: client::domain::ports::EmployeeDirectory,
    A: client::domain::ports::AddressBar,
{
    if !controller.can_add_employees() {
        println!("this session cannot add records");
        return;
    }

    let fields: Vec<&str> = rest.split(',').map(str::trim).collect();
    let [name, email, role, user_role, date] = fields.as_slice() else {
        println!("usage: add <name>,<email>,<role>,<Admin|Employee>,<YYYY-MM-DD>");
        return;
    };

    let draft = EmployeeDraft {
        name: (*name).to_owned(),
        email: (*email).to_owned(),
        role: (*role).to_owned(),
        user_role: parse_user_role(user_role),
        date_joined: date.parse().ok(),
    };

    match controller.add_employee(&draft).await {
        Ok(created) => println!("created record {}", created.id),
        Err(error) => println!("add failed: {error}"),
    }
}

fn parse_sort_key(raw: &str) -> Option<SortKey> {
    match raw {
        "id" => Some(SortKey::Id),
        "name" => Some(SortKey::Name),
        "email" => Some(SortKey::Email),
        "role" => Some(SortKey::Role),
        "userrole" => Some(SortKey::UserRole),
        "date" => Some(SortKey::DateJoined),
        _ => None,
    }
}

fn parse_user_role(raw: &str) -> Option<UserRole> {
    match raw {
        "Admin" | "admin" => Some(UserRole::Admin),
        "Employee" | "employee" => Some(UserRole::Employee),
        _ => None,
    }
}

fn render<D, A>(controller: &DashboardController<D, A>)
where
    D: client::domain::ports::EmployeeDirectory,
    A: client::domain::ports::AddressBar,
{
    match controller.phase() {
        Phase::Error { message } => println!("! {message}"),
        Phase::Idle | Phase::Fetching => {}
    }

    let query = controller.query();
    println!(
        "-- page {} of {} ({} records, search={:?}, filter={})",
        query.page,
        controller.total_pages().max(1),
        controller.total(),
        query.search,
        query.filter_by,
    );
    for record in controller.sorted_employees() {
        let joined = record
            .date_joined
            .map_or_else(|| "-".to_owned(), |date| date.to_string());
        println!(
            "{:>6}  {:<24} {:<28} {:<16} {:<8} {joined}",
            record.id, record.name, record.email, record.role, record.user_role,
        );
    }
}
