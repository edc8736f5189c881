//! Command-line entry point.
//!
//! One-shot subcommands call the gateway directly and print the result.
//! `browse` runs the listing controller in a line-driven loop:
//!
//! ```text
//! ┌──────────────┐  Event   ┌──────────────┐  Action::PostToWorker  ┌──────────────┐
//! │ stdin lines  │ ───────► │ handle_event │ ─────────────────────► │ GatewayWorker│
//! └──────────────┘          └──────────────┘                        └──────────────┘
//!                                  ▲        Event::WorkerResponse          │
//!                                  └───────────────────────────────────────┘
//! ```
//!
//! The gateway's [`ChannelNavigator`] feeds `Event::Navigate` into the same
//! channel, so a rejected session moves the loop to the login view.

#![allow(clippy::multiple_crate_versions)]

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use jobboard::app::{parse_command, ChannelNavigator, Command, FilterState, JobType};
use jobboard::domain::{CompanyRegistration, NewJob, UserRegistration};
use jobboard::observability::init_tracing;
use jobboard::ui::components;
use jobboard::worker::GatewayWorker;
use jobboard::{
    build_client, handle_event, initialize, Action, AppState, Config, Event, GatewayClient, JobBoardError, Result, Role,
};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::Instrument;

const DEFAULT_COLUMNS: usize = 100;

const BROWSE_HELP: &str = "\
commands:
  search <text> [@ <location>]   search title/description and location
  q <text> | loc <text>          change one field (no argument clears it)
  skill <name>                   toggle a skill filter
  type <full-time|part-time|contract|remote|any>
  salary <amount>                salary ceiling, e.g. 80k (0 disables)
  clear                          reset all filters
  jobs | companies               switch view
  job <id> | company <id>        open a single record
  logout | quit | help";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides JOBBOARD_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List jobs, optionally filtered.
    Jobs(JobFilterArgs),
    /// Show one job.
    Job { id: i64 },
    /// List companies.
    Companies,
    /// Show one company.
    Company { id: i64 },
    /// List skill tags.
    Tags,
    /// Sign in and persist the session.
    Login {
        #[arg(long = "as", default_value = "user")]
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session.
    Logout,
    /// Show the signed-in account.
    Whoami,
    /// Create a job-seeker account.
    RegisterUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
    },
    /// Create a company account.
    RegisterCompany {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        company_name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Post a job (company session required).
    PostJob(PostJobArgs),
    /// Check that the backend is reachable.
    Health,
    /// Interactive filterable listing.
    Browse,
}

impl Commands {
    /// Subcommand name for spans; arguments may hold credentials.
    const fn name(&self) -> &'static str {
        match self {
            Self::Jobs(_) => "jobs",
            Self::Job { .. } => "job",
            Self::Companies => "companies",
            Self::Company { .. } => "company",
            Self::Tags => "tags",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::RegisterUser { .. } => "register-user",
            Self::RegisterCompany { .. } => "register-company",
            Self::PostJob(_) => "post-job",
            Self::Health => "health",
            Self::Browse => "browse",
        }
    }
}

#[derive(Args, Debug)]
struct JobFilterArgs {
    /// Free-text search over titles and descriptions.
    #[arg(long)]
    search: Option<String>,
    /// Skill tag; repeat for several.
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long)]
    job_type: Option<JobType>,
    #[arg(long)]
    location: Option<String>,
    /// Salary ceiling; 0 disables the filter.
    #[arg(long)]
    salary: Option<u32>,
}

impl JobFilterArgs {
    fn to_filters(&self) -> FilterState {
        let mut filters = FilterState::new();
        if let Some(search) = &self.search {
            filters.set_query(search);
        }
        if let Some(location) = &self.location {
            filters.set_location(location);
        }
        for tag in &self.tags {
            filters.toggle_skill(tag);
        }
        if let Some(job_type) = self.job_type {
            filters.set_job_type(job_type);
        }
        if let Some(salary) = self.salary {
            filters.set_salary_ceiling(salary);
        }
        filters
    }
}

#[derive(Args, Debug)]
struct PostJobArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    job_type: Option<String>,
    #[arg(long)]
    job_level: Option<String>,
    #[arg(long)]
    salary_min: Option<i64>,
    #[arg(long)]
    salary_max: Option<i64>,
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl From<PostJobArgs> for NewJob {
    fn from(args: PostJobArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            location: args.location,
            job_type: args.job_type,
            job_level: args.job_level,
            salary_min: args.salary_min,
            salary_max: args.salary_max,
            tag_names: args.tags,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    let _tracing = init_tracing(&config);

    let span = tracing::debug_span!("cli_command", command = cli.command.name());
    match run(cli.command, &config).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            if e.is_session_expired() {
                eprintln!("error: {e}. Run `jobboard login` to sign in again.");
            } else {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let client = Arc::new(build_client(config, Arc::new(ChannelNavigator::new(events_tx.clone())))?);
    let theme = config.load_theme();
    let cols = terminal_width();
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Jobs(args) => {
            let filters = args.to_filters();
            let jobs = client.list_jobs(&jobboard::app::to_query_parameters(&filters)).await?;
            let mut state = AppState::new(theme);
            state.filters = filters;
            state.jobs = jobs;
            jobboard::ui::render(&mut out, &state, Utc::now(), cols)?;
        }
        Commands::Job { id } => {
            let job = client.get_job(id).await?;
            components::render_job_detail(&mut out, &job, &theme, Utc::now())?;
        }
        Commands::Companies => {
            let companies = client.list_companies().await?;
            components::render_company_list(&mut out, &companies, &theme, cols)?;
        }
        Commands::Company { id } => {
            let company = client.get_company(id).await?;
            components::render_company_detail(&mut out, &company, &theme)?;
        }
        Commands::Tags => {
            let tags = client.list_tags().await?;
            components::render_tag_list(&mut out, &tags, &theme)?;
        }
        Commands::Login { role, email, password } => {
            let user = client.login(role, &email, &password).await?;
            writeln!(out, "Signed in as {} ({})", user.email, user.role)?;
        }
        Commands::Logout => {
            client.logout()?;
            writeln!(out, "Signed out")?;
        }
        Commands::Whoami => match (client.session().user(), client.session().role()) {
            (Some(user), Some(role)) => writeln!(out, "{} ({role})", user.email)?,
            _ => writeln!(out, "Not signed in")?,
        },
        Commands::RegisterUser { email, password, full_name } => {
            let created = client.register_user(&UserRegistration { email, password, full_name }).await?;
            print_json(&mut out, &created)?;
        }
        Commands::RegisterCompany { email, password, company_name, description, website, location } => {
            let registration = CompanyRegistration { email, password, company_name, description, website, location };
            let created = client.register_company(&registration).await?;
            print_json(&mut out, &created)?;
        }
        Commands::PostJob(args) => {
            let job = client.create_job(&args.into()).await?;
            writeln!(out, "Created job #{}", job.id)?;
            components::render_job_detail(&mut out, &job, &theme, Utc::now())?;
        }
        Commands::Health => {
            let health = client.health().await?;
            writeln!(out, "{}: {}", config.api_url, health.status)?;
        }
        Commands::Browse => {
            drop(out);
            let mut browser = Browser {
                app: initialize(config),
                worker: GatewayWorker::new(Arc::clone(&client), events_tx),
                client,
                cols,
            };
            browser.run(events_rx).await?;
        }
    }

    Ok(())
}

fn print_json(out: &mut impl Write, value: &serde_json::Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).map_err(|e| JobBoardError::Parse(e.to_string()))?;
    writeln!(out, "{pretty}")?;
    Ok(())
}

/// `COLUMNS` if set, otherwise a fixed width.
fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse::<usize>().ok())
        .filter(|c| *c >= 40)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// Interactive loop state.
struct Browser {
    app: AppState,
    worker: GatewayWorker,
    client: Arc<GatewayClient>,
    cols: usize,
}

impl Browser {
    async fn run(&mut self, mut events: UnboundedReceiver<Event>) -> Result<()> {
        println!("{BROWSE_HELP}\n");
        if !self.dispatch(Event::Mount)? {
            return Ok(());
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let keep_going = tokio::select! {
                line = lines.next_line() => match line? {
                    None => false,
                    Some(line) => self.on_line(&line)?,
                },
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event)?,
                    None => return Err(JobBoardError::Worker("event channel closed".to_string())),
                },
                _ = tokio::signal::ctrl_c() => false,
            };
            if !keep_going {
                break;
            }
        }

        self.dispatch(Event::Unmount)?;
        Ok(())
    }

    fn on_line(&mut self, line: &str) -> Result<bool> {
        match parse_command(line) {
            Ok(None) => Ok(true),
            Ok(Some(Command::Help)) => {
                println!("{BROWSE_HELP}");
                Ok(true)
            }
            Ok(Some(Command::Dispatch(event))) => self.dispatch(event),
            Err(message) => {
                eprintln!("{message}");
                Ok(true)
            }
        }
    }

    /// Runs one event through the controller. Returns `false` once the loop
    /// should stop.
    fn dispatch(&mut self, event: Event) -> Result<bool> {
        let span = tracing::debug_span!("browse_event", event = ?event);
        let (should_render, actions) = {
            let _guard = span.enter();
            handle_event(&mut self.app, &event)?
        };

        for action in actions {
            if !self.execute_action(action)? {
                return Ok(false);
            }
        }

        if should_render {
            self.render()?;
        }
        Ok(true)
    }

    fn execute_action(&self, action: Action) -> Result<bool> {
        match action {
            Action::PostToWorker(message) => {
                tracing::debug!(message = ?message, "posting message to worker");
                self.worker.post(message);
            }
            Action::Logout => {
                self.client.logout()?;
                println!("Signed out");
            }
            Action::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Draws the current route from state.
    fn render(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        jobboard::ui::render(&mut stdout, &self.app, Utc::now(), self.cols)?;
        stdout.flush()?;
        Ok(())
    }
}
