//! `techsubs`: terminal client for the TechSubs subscription tracker.
//!
//! Uses the same core as the web app. The bearer token lives in a file
//! (default `<config dir>/techsubs/token`); a 401 clears it and prints a
//! hint to sign in again.

mod backend;
mod error;
mod input;
mod render;
mod terminal;
mod token_file;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use techsubs_api::config::{
    DEFAULT_API_BASE_URL, DEFAULT_RETRY_DELAY_SECS, DEFAULT_RETRY_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, ENV_BASE_URL,
    ENV_RETRY, ENV_RETRY_DELAY_SECS, ENV_RETRY_TIMEOUT_SECS, ENV_TIMEOUT_SECS,
};
use techsubs_api::dashboard::{DEFAULT_HORIZON_DAYS, summarize as summarize_dashboard};
use techsubs_api::navigation::{LOGIN_PATH, REGISTER_PATH};
use techsubs_api::reports::{ExportFormat, export, export_filename, summarize, with_service_names};
use techsubs_api::types::{Service, SubscriptionStatus};
use techsubs_api::validation::{PasswordForm, RegisterForm, ServiceForm, SubscriptionForm, validate_login};
use techsubs_api::{ApiClient, ApiConfig, ApiError, AuthOutcome, RetryPolicy, SessionStore};
use time::{Date, OffsetDateTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::backend::ReqwestBackend;
use crate::error::CliError;
use crate::input::{
    ProfileFields, ReportFilterFields, ServiceFields, SubscriptionFields, SubscriptionPatchFields, export_format,
    status_filter,
};
use crate::terminal::{CLI_PATH, LOGIN_HINT, TerminalNavigator};
use crate::token_file::FileTokenStore;

const ENV_TOKEN_FILE: &str = "TECHSUBS_TOKEN_FILE";

#[derive(Parser, Debug)]
#[command(name = "techsubs", version, about = "TechSubs subscription tracker CLI")]
struct Cli {
    #[arg(long, global = true, env = ENV_BASE_URL, default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Timeout of the first attempt, in seconds.
    #[arg(
        long,
        global = true,
        env = ENV_TIMEOUT_SECS,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Retry once after a timeout.
    #[arg(long, global = true, env = ENV_RETRY, default_value = "on", value_parser = ["on", "off"])]
    retry: String,

    #[arg(
        long,
        global = true,
        env = ENV_RETRY_DELAY_SECS,
        default_value_t = DEFAULT_RETRY_DELAY_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    retry_delay_secs: u64,

    #[arg(
        long,
        global = true,
        env = ENV_RETRY_TIMEOUT_SECS,
        default_value_t = DEFAULT_RETRY_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    retry_timeout_secs: u64,

    /// Where the bearer token is kept.
    #[arg(long, global = true, env = ENV_TOKEN_FILE)]
    token_file: Option<PathBuf>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn api_config(&self) -> Result<ApiConfig, CliError> {
        let retry = (self.retry == "on").then(|| RetryPolicy {
            delay: Duration::from_secs(self.retry_delay_secs),
            timeout: Duration::from_secs(self.retry_timeout_secs),
        });
        Ok(ApiConfig::new(&self.base_url)?
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(retry))
    }

    fn token_path(&self) -> Result<PathBuf, CliError> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => FileTokenStore::default_path().ok_or(CliError::NoTokenPath),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the token.
    Login(LoginArgs),
    /// Create an account and sign in.
    Register(RegisterArgs),
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Counts, monthly spend and upcoming renewals.
    Dashboard {
        #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
        days: i64,
    },
    #[command(subcommand)]
    Services(ServicesCommand),
    #[command(subcommand)]
    Subscriptions(SubscriptionsCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, env = "TECHSUBS_EMAIL")]
    email: String,
    #[arg(long, env = "TECHSUBS_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    remember: bool,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "TECHSUBS_PASSWORD", hide_env_values = true)]
    password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    password_confirmation: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ServicesCommand {
    List,
    Show { id: i64 },
    Create(ServiceFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: ServiceFields,
    },
    Delete { id: i64 },
    Stats,
}

#[derive(Subcommand, Debug)]
enum SubscriptionsCommand {
    List {
        #[arg(long, value_parser = status_filter)]
        status: Option<SubscriptionStatus>,
    },
    Show { id: i64 },
    Create(SubscriptionFields),
    /// Change only the given fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: SubscriptionPatchFields,
    },
    Cancel { id: i64 },
    Reactivate { id: i64 },
    Delete { id: i64 },
    Stats,
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    Update(ProfileFields),
    Password(PasswordArgs),
}

#[derive(Args, Debug)]
struct PasswordArgs {
    #[arg(long, env = "TECHSUBS_PASSWORD", hide_env_values = true)]
    current: String,
    #[arg(long = "new")]
    new_password: String,
    /// Defaults to `--new`.
    #[arg(long)]
    confirm: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Row count and total of the filtered subscriptions.
    Summary(ReportFilterFields),
    /// Write the filtered subscriptions as CSV or tab-separated XLS.
    Export {
        #[command(flatten)]
        filters: ReportFilterFields,
        #[arg(long, default_value = "csv", value_parser = export_format)]
        format: ExportFormat,
        /// Output file; `-` for stdout. Defaults to a dated file name.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

struct CliContext {
    store: SessionStore,
    json: bool,
}

impl CliContext {
    fn api(&self) -> &ApiClient {
        self.store.api()
    }

    fn print_text_or_json<T: serde::Serialize + ?Sized>(&self, text: String, value: &T) -> Result<(), CliError> {
        if self.json {
            print!("{}", render::json(value)?);
        } else {
            print!("{text}");
        }
        Ok(())
    }

    fn done(&self, message: &str) {
        if self.json {
            println!("{}", json!({ "message": message }));
        } else {
            println!("{message}");
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let navigator = Arc::new(TerminalNavigator::default());
    match run(cli, navigator.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            for detail in err.details() {
                eprintln!("  - {detail}");
            }
            let signed_out = matches!(err, CliError::Api(ApiError::Unauthorized) | CliError::NotSignedIn);
            if signed_out && !navigator.hinted() {
                eprintln!("{LOGIN_HINT}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, navigator: Arc<TerminalNavigator>) -> Result<(), CliError> {
    navigator.enter(screen_for(&cli.command));
    let token_path = cli.token_path()?;
    tracing::debug!(path = %token_path.display(), "using token file");
    let api = ApiClient::new(
        cli.api_config()?,
        Arc::new(ReqwestBackend::new()?),
        Arc::new(FileTokenStore::new(token_path)),
        navigator,
    );
    let ctx = CliContext { store: SessionStore::new(api), json: cli.json };

    match cli.command {
        Command::Login(args) => run_login(&ctx, args).await,
        Command::Register(args) => run_register(&ctx, args).await,
        Command::Logout => {
            ctx.store.logout().await;
            ctx.done("Signed out.");
            Ok(())
        }
        Command::Whoami => run_whoami(&ctx).await,
        Command::Dashboard { days } => run_dashboard(&ctx, days).await,
        Command::Services(command) => run_services(&ctx, command).await,
        Command::Subscriptions(command) => run_subscriptions(&ctx, command).await,
        Command::Profile(command) => run_profile(&ctx, command).await,
        Command::Report(command) => run_report(&ctx, command).await,
    }
}

/// Screen the pipeline sees while `command` runs.
fn screen_for(command: &Command) -> &'static str {
    match command {
        Command::Login(_) => LOGIN_PATH,
        Command::Register(_) => REGISTER_PATH,
        _ => CLI_PATH,
    }
}

fn settle_auth(ctx: &CliContext, outcome: AuthOutcome) -> Result<(), CliError> {
    match outcome {
        AuthOutcome::Success { user } => {
            let text = format!("Signed in as {}.\n", render::display_name(&user));
            ctx.print_text_or_json(text, &user)
        }
        AuthOutcome::Failure { message, errors } => Err(CliError::Auth { message, errors }),
    }
}

async fn run_login(ctx: &CliContext, args: LoginArgs) -> Result<(), CliError> {
    let errors = validate_login(&args.email, &args.password);
    if !errors.is_empty() {
        return Err(CliError::Invalid(errors));
    }
    let outcome = ctx.store.login(args.email.trim(), &args.password, args.remember).await;
    settle_auth(ctx, outcome)
}

async fn run_register(ctx: &CliContext, args: RegisterArgs) -> Result<(), CliError> {
    let form = RegisterForm {
        password_confirmation: args.password_confirmation.unwrap_or_else(|| args.password.clone()),
        name: args.name,
        email: args.email,
        password: args.password,
    };
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(CliError::Invalid(errors));
    }
    let outcome = ctx
        .store
        .register(form.name.trim(), form.email.trim(), &form.password, &form.password_confirmation)
        .await;
    settle_auth(ctx, outcome)
}

async fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    ctx.store.initialize().await;
    let user = ctx.store.user().ok_or(CliError::NotSignedIn)?;
    ctx.print_text_or_json(render::user_detail(&user), &user)
}

async fn run_dashboard(ctx: &CliContext, days: i64) -> Result<(), CliError> {
    let subscriptions = ctx.api().list_subscriptions().await?;
    let services = ctx.api().list_services().await?;
    let today = today();
    let summary = summarize_dashboard(&subscriptions, &services, today, days);
    let value = json!({
        "total_services": summary.total_services,
        "total_subscriptions": summary.total_subscriptions,
        "active_subscriptions": summary.active_subscriptions,
        "monthly_spend": summary.monthly_spend,
        "upcoming": summary.upcoming.iter().map(|r| json!({
            "subscription_id": r.subscription_id,
            "service": r.service,
            "plan": r.plan,
            "price": r.price,
            "currency": r.currency,
            "date": techsubs_api::dates::iso_date(r.date),
            "days_until": r.days_until,
        })).collect::<Vec<_>>(),
    });
    ctx.print_text_or_json(render::dashboard(&summary, today), &value)
}

async fn run_services(ctx: &CliContext, command: ServicesCommand) -> Result<(), CliError> {
    let api = ctx.api();
    match command {
        ServicesCommand::List => {
            let services = api.list_services().await?;
            ctx.print_text_or_json(render::services_table(&services), &services)
        }
        ServicesCommand::Show { id } => {
            let service = api.service(id).await?;
            ctx.print_text_or_json(render::service_detail(&service), &service)
        }
        ServicesCommand::Create(fields) => {
            let input = fields.apply(ServiceForm::create()).to_input().map_err(CliError::Invalid)?;
            let service = api.create_service(&input).await?;
            ctx.print_text_or_json(format!("Created service {} ({}).\n", service.name, service.id), &service)
        }
        ServicesCommand::Update { id, fields } => {
            let current = api.service(id).await?;
            let input = fields.edit(&current).to_input().map_err(CliError::Invalid)?;
            let service = api.update_service(id, &input).await?;
            ctx.print_text_or_json(format!("Updated service {} ({}).\n", service.name, service.id), &service)
        }
        ServicesCommand::Delete { id } => {
            let message = api.delete_service(id).await?;
            ctx.done(message.as_deref().unwrap_or("Service deleted."));
            Ok(())
        }
        ServicesCommand::Stats => {
            let stats = api.service_stats().await?;
            ctx.print_text_or_json(render::stats(&stats), &stats)
        }
    }
}

/// Service list for labels; a failure only costs the names.
async fn services_for_labels(api: &ApiClient) -> Vec<Service> {
    match api.list_services().await {
        Ok(services) => services,
        Err(err) => {
            tracing::warn!(%err, "service names unavailable");
            Vec::new()
        }
    }
}

async fn run_subscriptions(ctx: &CliContext, command: SubscriptionsCommand) -> Result<(), CliError> {
    let api = ctx.api();
    match command {
        SubscriptionsCommand::List { status } => {
            let mut subscriptions = api.list_subscriptions().await?;
            if let Some(status) = status {
                subscriptions.retain(|sub| sub.status == status);
            }
            let services = services_for_labels(api).await;
            ctx.print_text_or_json(render::subscriptions_table(&subscriptions, &services, today()), &subscriptions)
        }
        SubscriptionsCommand::Show { id } => {
            let subscription = api.subscription(id).await?;
            let services = services_for_labels(api).await;
            ctx.print_text_or_json(render::subscription_detail(&subscription, &services, today()), &subscription)
        }
        SubscriptionsCommand::Create(fields) => {
            let input = SubscriptionForm::from(fields).to_input().map_err(CliError::Invalid)?;
            let subscription = api.create_subscription(&input).await?;
            ctx.print_text_or_json(format!("Created subscription {}.\n", subscription.id), &subscription)
        }
        SubscriptionsCommand::Update { id, fields } => {
            let patch = fields.to_patch().map_err(CliError::Invalid)?;
            if patch.is_empty() {
                return Err(CliError::NothingToUpdate);
            }
            let subscription = api.patch_subscription(id, &patch).await?;
            ctx.print_text_or_json(format!("Updated subscription {}.\n", subscription.id), &subscription)
        }
        SubscriptionsCommand::Cancel { id } => {
            let subscription = api.cancel_subscription(id).await?;
            ctx.print_text_or_json(format!("Subscription {} canceled.\n", subscription.id), &subscription)
        }
        SubscriptionsCommand::Reactivate { id } => {
            let subscription = api.reactivate_subscription(id).await?;
            ctx.print_text_or_json(format!("Subscription {} reactivated.\n", subscription.id), &subscription)
        }
        SubscriptionsCommand::Delete { id } => {
            let message = api.delete_subscription(id).await?;
            ctx.done(message.as_deref().unwrap_or("Subscription deleted."));
            Ok(())
        }
        SubscriptionsCommand::Stats => {
            let stats = api.subscription_stats().await?;
            ctx.print_text_or_json(render::stats(&stats), &stats)
        }
    }
}

async fn run_profile(ctx: &CliContext, command: ProfileCommand) -> Result<(), CliError> {
    let api = ctx.api();
    match command {
        ProfileCommand::Show => {
            let user = api.profile().await?;
            ctx.print_text_or_json(render::user_detail(&user), &user)
        }
        ProfileCommand::Update(fields) => {
            if fields.is_empty() {
                return Err(CliError::NothingToUpdate);
            }
            let current = api.profile().await?;
            let update = fields.edit(&current).to_update().map_err(CliError::Invalid)?;
            let user = api.update_profile(&update).await?;
            ctx.print_text_or_json("Profile updated.\n".to_owned(), &user)
        }
        ProfileCommand::Password(args) => {
            let form = PasswordForm {
                confirm_password: args.confirm.unwrap_or_else(|| args.new_password.clone()),
                current_password: args.current,
                new_password: args.new_password,
            };
            let change = form.to_change().map_err(CliError::Invalid)?;
            let message = api.change_password(&change).await?;
            ctx.done(message.as_deref().unwrap_or("Password changed."));
            Ok(())
        }
    }
}

async fn run_report(ctx: &CliContext, command: ReportCommand) -> Result<(), CliError> {
    let (fields, export_to) = match command {
        ReportCommand::Summary(filters) => (filters, None),
        ReportCommand::Export { filters, format, output } => (filters, Some((format, output))),
    };
    let filters = fields.to_filters().map_err(CliError::Invalid)?;

    let listed = ctx.api().list_subscriptions().await?;
    let services = services_for_labels(ctx.api()).await;
    let subscriptions = with_service_names(listed, &services);
    let rows = filters.apply(&subscriptions);

    let Some((format, output)) = export_to else {
        let summary = summarize(&rows);
        let value = json!({
            "count": summary.count,
            "total_expenses": summary.total_expenses,
            "currency": summary.currency,
        });
        return ctx.print_text_or_json(render::report_summary(&summary), &value);
    };

    let body = export(&rows, format);
    let path = output.unwrap_or_else(|| PathBuf::from(export_filename(format, today())));
    if path.as_os_str() == "-" {
        print!("{body}");
        return Ok(());
    }
    std::fs::write(&path, body).map_err(|source| CliError::Write { path: path.display().to_string(), source })?;
    tracing::info!(path = %path.display(), rows = rows.len(), "report exported");
    ctx.done(&format!("Exported {} rows to {}.", rows.len(), path.display()));
    Ok(())
}
