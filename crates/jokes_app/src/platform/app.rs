use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use jokes_core::{update, AppState, Effect, Msg};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{self, Command};
use super::ui::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    /// A core message, usually a gateway completion.
    Msg(Msg),
    /// A line typed by the user.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    engine_logging::initialize(config.log_destination.into(), config.log_level()?);
    engine_info!("jokes_app starting against {}", config.base_url);

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.gateway_settings(), loop_tx.clone())
        .context("starting the content gateway")?;
    spawn_input_reader(loop_tx);

    let mut app = App {
        state: AppState::new(),
        runner,
        out: io::stdout(),
    };
    app.write(render::HELP)?;
    app.dispatch(Msg::Mounted)?;

    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Msg(msg) => app.dispatch(msg)?,
            LoopEvent::Line(line) => {
                if !app.handle_line(&line)? {
                    break;
                }
            }
            LoopEvent::InputClosed => break,
        }
    }

    app.runner.stop();
    engine_info!("jokes_app exiting");
    Ok(())
}

fn spawn_input_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let event = match line {
                Ok(line) => LoopEvent::Line(line),
                Err(err) => {
                    engine_warn!("Reading stdin failed: {}", err);
                    LoopEvent::InputClosed
                }
            };
            let closed = matches!(event, LoopEvent::InputClosed);
            if loop_tx.send(event).is_err() || closed {
                return;
            }
        }
        let _ = loop_tx.send(LoopEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    runner: EffectRunner,
    out: io::Stdout,
}

impl App {
    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(err) => {
                self.write(&format!("{err}\n"))?;
                return Ok(true);
            }
        };
        match command {
            Command::Quit => return Ok(false),
            Command::Help => self.write(render::HELP)?,
            command => match commands::to_msg(command, &self.state.view()) {
                Ok(Some(msg)) => self.dispatch(msg)?,
                Ok(None) => {}
                Err(err) => self.write(&format!("{err}\n"))?,
            },
        }
        Ok(true)
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;

        for effect in &effects {
            if let Effect::ShowJokeDetail(detail) = effect {
                self.write(&render::render_detail(detail))?;
            }
        }
        self.runner.enqueue(effects);

        if self.state.consume_dirty() {
            let view = self.state.view();
            self.write(&render::render(&view))?;
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}
