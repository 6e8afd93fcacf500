use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use url::Url;

use storefront::app::App;
use storefront::cart::{CartAction, CartBadge, CartClient, Toast};
use storefront::cli::{CartCommand, Cli, Command, DashboardCommand};
use storefront::config::{self, Config};
use storefront::dashboard::{
    self, ChartData, ChartState, DashboardClient, SESSION_REFRESH_INTERVAL,
};
use storefront::error::StorefrontError;
use storefront::suggest::SuggestState;
use storefront::validation::{self, FieldFeedback};
use storefront::{logging, sorting};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<ExitCode> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    logging::init();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let mut config = loaded.config;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(warning) = &loaded.warning {
        log::warn!("{}", warning);
    }

    match &cli.command {
        Some(Command::SortUrl { column, query }) => {
            println!("{}", sorting::sort_url(query, column));
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::ResetSort { query, path }) => {
            println!("{}", sorting::reset_sort_url(query, path));
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Validate { kind, value }) => Ok(run_validate(*kind, value)),
        Some(Command::Cart { action }) => run_cart(&config, action),
        Some(Command::Dashboard { action }) => run_dashboard(&config, action),
        Some(Command::Search { .. }) | None => {
            run_search(&config, cli.initial_query(), loaded.warning)
        }
    }
}

fn run_validate(kind: validation::FieldKind, value: &str) -> ExitCode {
    match validation::check_field(kind, value) {
        Some(FieldFeedback::Valid) => {
            println!("valid");
            ExitCode::SUCCESS
        }
        Some(FieldFeedback::Invalid(message)) => {
            println!("{}", message);
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

fn current_thread_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

fn cart_client(config: &Config) -> Result<CartClient, StorefrontError> {
    Ok(CartClient::new(
        config.base_url()?,
        config.request_timeout(),
        config.csrf_token.clone(),
    )?)
}

fn dashboard_client(config: &Config) -> Result<DashboardClient, StorefrontError> {
    Ok(DashboardClient::new(
        config.base_url()?,
        config.request_timeout(),
        config.csrf_token.clone(),
    )?)
}

fn run_cart(config: &Config, command: &CartCommand) -> Result<ExitCode> {
    let client = cart_client(config)?;
    let runtime = current_thread_runtime()?;

    let (action, result) = runtime.block_on(async {
        match command {
            CartCommand::Add { product_id } => {
                (CartAction::Add, client.add_to_cart(*product_id).await)
            }
            CartCommand::Update { item_id, quantity } => (
                CartAction::Update,
                client.update_cart(*item_id, *quantity).await,
            ),
        }
    });

    let toast = Toast::for_result(action, &result);
    println!("{}", toast.message);

    match result {
        Ok(response) => {
            let mut badge = CartBadge::default();
            if let Some(count) = response.cart_count {
                badge.apply(count);
            }
            if badge.is_visible() {
                println!("Cart: {} item(s)", badge.count());
            }
            if let Some(total) = &response.cart_total {
                println!("Total: {}", total);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::warn!("Cart request failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_dashboard(config: &Config, command: &DashboardCommand) -> Result<ExitCode> {
    if let DashboardCommand::ExportUrl { url } = command {
        println!("{}", dashboard::export_url(&Url::parse(url)?));
        return Ok(ExitCode::SUCCESS);
    }

    let client = dashboard_client(config)?;
    let runtime = current_thread_runtime()?;
    Ok(runtime.block_on(dashboard_action(&client, command))?)
}

async fn dashboard_action(
    client: &DashboardClient,
    command: &DashboardCommand,
) -> Result<ExitCode, StorefrontError> {
    match command {
        DashboardCommand::Chart { period, current } => {
            let mut chart = ChartState::new(current.as_str(), ChartData::default());
            if !client.switch_chart_period(&mut chart, period).await? {
                println!("Chart already shows {}", period);
                return Ok(ExitCode::SUCCESS);
            }
            let data = chart.data();
            for (label, value) in data.labels.iter().zip(&data.values) {
                println!("{}\t{}", label, value);
            }
            Ok(ExitCode::SUCCESS)
        }
        DashboardCommand::Sessions { watch } => loop {
            if let Some(markup) = client.active_sessions().await?.markup() {
                println!("{}", markup);
            }
            if !watch {
                return Ok(ExitCode::SUCCESS);
            }
            tokio::time::sleep(SESSION_REFRESH_INTERVAL).await;
        },
        DashboardCommand::Terminate { session_id } => {
            let result = client.terminate_session(session_id).await;
            println!("{}", dashboard::terminate_toast(&result).message);
            match result {
                Ok(()) => {
                    if let Some(markup) = client.active_sessions().await?.markup() {
                        println!("{}", markup);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    log::warn!("Terminating session failed: {}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        // Offline, printed before any client exists
        DashboardCommand::ExportUrl { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn run_search(config: &Config, query: Option<&str>, warning: Option<String>) -> Result<ExitCode> {
    let base_url = config.base_url()?;
    let suggest = SuggestState::connect(
        config.search.clone(),
        base_url.clone(),
        config.request_timeout(),
    )?;

    let mut app = App::new(suggest, base_url).with_query(query.unwrap_or(""), Instant::now());
    if let Some(warning) = warning {
        app.set_status(warning);
    }

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    if let Err(e) = execute!(
        std::io::stdout(),
        EnableBracketedPaste,
        EnableFocusChange,
        EnableMouseCapture
    ) {
        log::warn!("Failed to enable terminal modes: {}", e);
    }

    let result = run(terminal, &mut app);

    if let Err(e) = execute!(
        std::io::stdout(),
        DisableBracketedPaste,
        DisableFocusChange,
        DisableMouseCapture
    ) {
        log::warn!("Failed to disable terminal modes: {}", e);
    }
    ratatui::restore();
    result?;

    if let Some(url) = app.navigation_url() {
        println!("{}", url?);
    }
    Ok(ExitCode::SUCCESS)
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|frame| app.render(frame))?;
            needs_redraw = false;
        }

        // Wake up in time for a pending lookup
        let timeout = app
            .suggest
            .time_until_lookup(Instant::now())
            .map_or(POLL_INTERVAL, |wait| wait.min(POLL_INTERVAL));
        if event::poll(timeout)? {
            app.handle_event(event::read()?, Instant::now());
            needs_redraw = true;
        }

        if app.tick(Instant::now()) {
            needs_redraw = true;
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
