//! src/main.rs
//! Terminal driving-safety dashboard with a PID scan button

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event as TerminalEvent, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{signal, sync::watch};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use dash_core::{
    Logger,
    config::Config,
    controller::{Action, ActionDispatcher, Flow},
    model::ScanStatus,
    services::SimulatedScanService,
    view::{theme::init_theme, ui::UIRenderer},
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let config = Config::load().await.unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        Config::default()
    });

    let _log_guard: WorkerGuard =
        Logger::init(&config.logging).context("Failed to initialize logging")?;
    info!("Starting drive dashboard");

    let app = App::new(config).context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    dispatcher: ActionDispatcher,
    renderer: UIRenderer,
    status_rx: watch::Receiver<ScanStatus>,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        init_theme(config.theme);

        let service = Arc::new(SimulatedScanService::new(config.simulator.clone()));
        if config.simulator.protocol.is_none() {
            warn!("No diagnostic protocol configured; scans will fail until one is set");
        }

        let dispatcher = ActionDispatcher::new(&config, service);
        let status_rx = dispatcher.scan_controller().subscribe();
        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        Ok(Self {
            terminal,
            dispatcher,
            renderer: UIRenderer::new(),
            status_rx,
        })
    }

    async fn run(mut self) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(TICK_RATE);

        let result = loop {
            if let Err(e) = self.render() {
                break Err(e);
            }

            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break Ok(());
                }

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(TerminalEvent::Key(key))) => {
                            let mode = self.dispatcher.ui_state().read().mode;
                            if let Some(action) = Action::from_key(key, mode)
                                && self.dispatcher.dispatch(action) == Flow::Exit
                            {
                                break Ok(());
                            }
                        }
                        Some(Ok(TerminalEvent::Resize(width, height))) => {
                            debug!(width, height, "Terminal resized");
                            self.dispatcher.ui_state().read().request_redraw();
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            error!("Terminal event error: {}", e);
                            break Err(e).context("Failed to read terminal event");
                        }
                        None => break Ok(()),
                    }
                }

                changed = self.status_rx.changed() => {
                    if changed.is_ok() {
                        let status = *self.status_rx.borrow_and_update();
                        debug!(status = %status, "Scan status changed");
                        self.dispatcher.ui_state().read().request_redraw();
                    }
                }

                _ = tick.tick() => {
                    self.dispatcher.ui_state().write().update_notification();
                }
            }
        };

        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            error!("Failed to restore terminal: {:#}", e);
        }
        result
    }

    fn render(&mut self) -> Result<()> {
        let ui_state = self.dispatcher.ui_state().read();
        if !ui_state.needs_redraw() {
            return Ok(());
        }

        let status = self.dispatcher.scan_controller().status();
        let renderer = &mut self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, &ui_state, status))
            .context("Failed to draw frame")?;

        ui_state.clear_redraw();
        Ok(())
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
