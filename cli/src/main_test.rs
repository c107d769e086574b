use clap::CommandFactory;
use techsubs_api::navigation::{Navigator, is_auth_screen};

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("techsubs").chain(args.iter().copied())).expect("valid arguments")
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn flags_build_api_config() {
    let cli = parse(&[
        "--base-url",
        "https://api.example.com/v1/",
        "--timeout-secs",
        "5",
        "--retry-delay-secs",
        "1",
        "services",
        "list",
    ]);
    let config = cli.api_config().expect("config");
    assert_eq!(config.base_url, "https://api.example.com/v1");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.retry.map(|r| r.delay), Some(Duration::from_secs(1)));
}

#[test]
fn retry_can_be_switched_off() {
    let cli = parse(&["--retry", "off", "whoami"]);
    assert_eq!(cli.api_config().expect("config").retry, None);
}

#[test]
fn bad_base_url_is_a_config_error() {
    let cli = parse(&["--base-url", "localhost:8000", "whoami"]);
    assert!(matches!(cli.api_config(), Err(CliError::Config(_))));
}

#[test]
fn explicit_token_file_wins() {
    let cli = parse(&["--token-file", "/tmp/techsubs-token", "logout"]);
    assert_eq!(cli.token_path().expect("path"), PathBuf::from("/tmp/techsubs-token"));
}

#[test]
fn subscription_update_takes_optional_fields() {
    let cli = parse(&["subscriptions", "update", "7", "--price", "12.50", "--status", "paused"]);
    let Command::Subscriptions(SubscriptionsCommand::Update { id, fields }) = cli.command else {
        panic!("expected subscriptions update");
    };
    assert_eq!(id, 7);
    assert_eq!(fields.price.as_deref(), Some("12.50"));
    assert_eq!(fields.plan, None);
}

#[test]
fn list_status_is_parsed_up_front() {
    let cli = parse(&["subscriptions", "list", "--status", "cancelled"]);
    assert!(matches!(
        cli.command,
        Command::Subscriptions(SubscriptionsCommand::List { status: Some(SubscriptionStatus::Canceled) })
    ));
    assert!(Cli::try_parse_from(["techsubs", "subscriptions", "list", "--status", "gone"]).is_err());
}

#[test]
fn export_defaults_to_csv_and_accepts_stdout() {
    let cli = parse(&["report", "export", "--year", "2025", "-o", "-"]);
    let Command::Report(ReportCommand::Export { filters, format, output }) = cli.command else {
        panic!("expected report export");
    };
    assert_eq!(format, ExportFormat::Csv);
    assert_eq!(filters.year, Some(2025));
    assert_eq!(output, Some(PathBuf::from("-")));
}

#[test]
fn json_flag_is_global() {
    assert!(parse(&["services", "stats", "--json"]).json);
}

#[test]
fn sign_in_commands_run_on_their_auth_screen() {
    let login = parse(&["login", "--email", "a@b.co", "--password", "secret1"]);
    let register = parse(&["register", "--name", "Ann", "--email", "a@b.co", "--password", "secret1"]);
    assert_eq!(screen_for(&login.command), LOGIN_PATH);
    assert_eq!(screen_for(&register.command), REGISTER_PATH);
    assert_eq!(screen_for(&parse(&["whoami"]).command), CLI_PATH);

    let nav = TerminalNavigator::default();
    nav.enter(screen_for(&login.command));
    assert!(is_auth_screen(&nav.current_path()));
}
