//! localweather - current conditions for the terminal's location

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use localweather::action::Action;
use localweather::api::{OpenWeatherClient, WeatherService};
use localweather::components::{Component, WeatherScreen, WeatherScreenProps};
use localweather::config::{Config, ConfigArgs, PositionSourceConfig};
use localweather::effect::Effect;
use localweather::flow;
use localweather::logging;
use localweather::position::{FixedPosition, IpPositionSource, PositionSource};
use localweather::reducer::reducer;
use localweather::state::{AppState, SPINNER_TICK_MS};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Current weather for wherever this terminal is
#[derive(Parser, Debug)]
#[command(name = "localweather", version)]
#[command(about = "Shows the current weather for your location")]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ScreenComponentId {
    Screen,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ScreenContext {
    Main,
}

impl EventRoutingState<ScreenComponentId, ScreenContext> for AppState {
    fn focused(&self) -> Option<ScreenComponentId> {
        Some(ScreenComponentId::Screen)
    }

    fn modal(&self) -> Option<ScreenComponentId> {
        None
    }

    fn binding_context(&self, _id: ScreenComponentId) -> ScreenContext {
        ScreenContext::Main
    }

    fn default_context(&self) -> ScreenContext {
        ScreenContext::Main
    }
}

/// The host capabilities effects run against
#[derive(Clone)]
struct Services {
    positions: Arc<dyn PositionSource>,
    weather: Arc<dyn WeatherService>,
}

impl Services {
    fn from_config(config: &Config) -> Self {
        let positions: Arc<dyn PositionSource> = match &config.position {
            PositionSourceConfig::Fixed(position) => {
                tracing::info!("Using fixed position source");
                Arc::new(FixedPosition::new(*position))
            }
            PositionSourceConfig::GeoIp { endpoint } => {
                tracing::info!("Using geoip position source at {}", endpoint);
                Arc::new(IpPositionSource::new(endpoint.clone()))
            }
        };
        let weather = Arc::new(OpenWeatherClient::new(
            config.api_key.clone(),
            config.api_base.clone(),
        ));
        Self { positions, weather }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let Args {
        config,
        debug: debug_args,
    } = Args::parse();

    let config = match config.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    // Guard must live for the entire app lifetime
    let _log_guard = match logging::init(&config.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    tracing::info!("localweather starting");

    let services = Services::from_config(&config);
    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let options = config.options.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(options))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, services, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("localweather exiting");
    Ok(())
}

struct ScreenUi {
    screen: WeatherScreen,
}

impl ScreenUi {
    fn new() -> Self {
        Self {
            screen: WeatherScreen,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ScreenComponentId>,
    ) {
        event_ctx.set_component_area(ScreenComponentId::Screen, area);

        let props = WeatherScreenProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = WeatherScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .screen
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    services: Services,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ScreenUi::new()));
    let mut bus: EventBus<AppState, Action, ScreenComponentId, ScreenContext> = EventBus::new();
    let keybindings: Keybindings<ScreenContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(ScreenComponentId::Screen, move |event, state| {
        ui_screen.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::LocationFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &services),
        )
        .await
}

/// Handle effects by spawning tasks; the runtime aborts them on exit
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::LocatePosition { options } => {
            let positions = Arc::clone(&services.positions);
            ctx.tasks().spawn("locate", async move {
                flow::locate_action(positions.as_ref(), &options).await
            });
        }
        Effect::FetchConditions { position } => {
            let weather = Arc::clone(&services.weather);
            ctx.tasks().spawn("conditions", async move {
                flow::conditions_action(weather.as_ref(), position).await
            });
        }
    }
}
