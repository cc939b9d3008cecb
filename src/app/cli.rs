use super::keys::SCRIPT_KEYS_ENV_VAR;
use super::scripted::run_scripted;
use super::{parse_scripted_keys, App, AppAction, AppOptions};
use crate::config::Settings;
use crate::modal::ModalName;
use crate::remote::{
    GraphqlClient, InMemoryCustomerApi, InlineDispatch, RemoteDispatch, WorkerDispatch,
};
use crate::routing::DEFAULT_ROUTE;
use crate::shared::logging::{ErrorReporter, LogReporter, LEVEL_INFO};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub demo: bool,
    pub initial_path: Option<String>,
    pub open_modal: Option<ModalName>,
    pub show_help: bool,
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: custdesk [options]".to_string(),
        "Options:".to_string(),
        "  --config <path>    Settings file (default ~/.custdesk/config.yaml)".to_string(),
        "  --path </id>       Start at a location, e.g. /42".to_string(),
        "  --open <modal>     Open a modal (edit, delete) at startup".to_string(),
        "  --demo             Use built-in demo customers instead of the GraphQL endpoint"
            .to_string(),
        "  help, --help       Show this help".to_string(),
        format!("Set {SCRIPT_KEYS_ENV_VAR}=down,e,... to run without a terminal."),
    ]
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "help" | "--help" | "-h" => options.show_help = true,
            "--demo" => options.demo = true,
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                options.config = Some(PathBuf::from(value));
            }
            "--path" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--path requires a location such as /42".to_string())?;
                options.initial_path = Some(value.clone());
            }
            "--open" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--open requires a modal name".to_string())?;
                options.open_modal = ModalName::parse(value);
            }
            other => return Err(format!("unknown argument `{other}`; run `custdesk help`")),
        }
    }
    Ok(options)
}

fn build_dispatch(
    settings: &Settings,
    demo: bool,
    inline: bool,
) -> Result<Box<dyn RemoteDispatch>, String> {
    let dispatch: Box<dyn RemoteDispatch> = match (demo, inline) {
        (true, true) => Box::new(InlineDispatch::new(InMemoryCustomerApi::seeded())),
        (true, false) => Box::new(WorkerDispatch::spawn(InMemoryCustomerApi::seeded())?),
        (false, true) => Box::new(InlineDispatch::new(GraphqlClient::new(
            &settings.endpoint,
            settings.request_timeout(),
        ))),
        (false, false) => Box::new(WorkerDispatch::spawn(GraphqlClient::new(
            &settings.endpoint,
            settings.request_timeout(),
        ))?),
    };
    Ok(dispatch)
}

fn start_session(app: &mut App, options: &CliOptions) {
    app.bootstrap();
    if let Some(name) = options.open_modal.clone() {
        app.handle_action(AppAction::OpenModal(name));
    }
}

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let options = parse_cli_args(&args)?;
    if options.show_help {
        return Ok(cli_help_lines().join("\n"));
    }

    let settings = Settings::load(options.config.as_deref()).map_err(|e| e.to_string())?;
    let log_path = settings.resolved_log_path().map_err(|e| e.to_string())?;
    let reporter = LogReporter::new(Some(log_path));
    reporter.report(
        LEVEL_INFO,
        "session_started",
        &format!(
            "endpoint={} demo={}",
            if options.demo { "<demo>" } else { settings.endpoint.as_str() },
            options.demo
        ),
    );

    let app_options = AppOptions {
        initial_path: options
            .initial_path
            .clone()
            .unwrap_or_else(|| DEFAULT_ROUTE.to_string()),
        surface_errors: settings.surface_errors,
    };

    if let Some(raw) = std::env::var(SCRIPT_KEYS_ENV_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        let inputs = parse_scripted_keys(&raw)?;
        let dispatch = build_dispatch(&settings, options.demo, true)?;
        let mut app = App::new(app_options, Box::new(reporter), dispatch);
        start_session(&mut app, &options);
        return Ok(run_scripted(&mut app, &inputs));
    }

    if !(std::io::stdin().is_terminal() && std::io::stdout().is_terminal()) {
        return Err(format!(
            "custdesk needs an interactive terminal; set {SCRIPT_KEYS_ENV_VAR} to drive it without one"
        ));
    }

    let dispatch = build_dispatch(&settings, options.demo, false)?;
    let mut app = App::new(app_options, Box::new(reporter), dispatch);
    start_session(&mut app, &options);
    crate::tui::run_tui(&mut app)?;
    Ok("session closed".to_string())
}
