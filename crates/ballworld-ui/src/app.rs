use std::path::PathBuf;

use anyhow::Result;
use winit::dpi::LogicalSize;

use ballworld_engine::coords::Vec2;
use ballworld_engine::core::{App as EngineApp, AppControl, FrameCtx, InputCtx};
use ballworld_engine::device::GpuInit;
use ballworld_engine::draw::DrawList;
use ballworld_engine::input::Key;
use ballworld_engine::paint::Color;
use ballworld_engine::render::shapes::{ShapeRenderer, TextRenderer};
use ballworld_engine::text::{FontId, FontSystem};
use ballworld_engine::window::{Runtime, RuntimeConfig};
use ballworld_scene::Scene;

use crate::canvas::Canvas;
use crate::controller::{Controller, Effect, Services};
use crate::event::{ui_events, EventResult, UiEvent};
use crate::host::{ConsolePrompter, FileStore, Prompter};
use crate::menu::{standard_menus, Command};
use crate::menu_bar::{MenuBar, FONT_SIZE};
use crate::painter::{measure_text, Painter};
use crate::prompt::{DialogPrompter, DialogResult, PromptDialog};

pub const DEFAULT_TITLE: &str = "Ball World";
pub const DEFAULT_DRAWING_FILE: &str = "drawings.dp";

// ── Application ───────────────────────────────────────────────────────────

/// Ball World application builder.
///
/// ```rust,ignore
/// Application::new()
///     .font(std::fs::read("DejaVuSans.ttf")?)
///     .drawing_file("drawings.dp")
///     .run()?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    font: Option<Vec<u8>>,
    drawing_file: PathBuf,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 500.0,
            height: 500.0,
            font: None,
            drawing_file: PathBuf::from(DEFAULT_DRAWING_FILE),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Font for menu labels and prompts. Without one the menus still work
    /// but show no text, and custom values are asked for on the terminal.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.font = Some(data);
        self
    }

    /// File used by Save and Open. Relative paths resolve against the
    /// working directory.
    pub fn drawing_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.drawing_file = path.into();
        self
    }

    /// Opens the window and blocks until Quit or the window is closed.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };

        let mut fonts = FontSystem::new();
        let font = match self.font.as_deref() {
            Some(bytes) => match fonts.load_font(bytes) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("{e}; menu labels will not be drawn");
                    None
                }
            },
            None => {
                log::warn!("no font configured; menu labels will not be drawn");
                None
            }
        };

        // A dialog nobody can read is worse than a terminal prompt.
        let dialogs = font.map(|_| DialogPrompter::new());
        let prompter: Box<dyn Prompter> = match &dialogs {
            Some(d) => Box::new(d.clone()),
            None => {
                log::warn!("custom values will be read from stdin");
                Box::new(ConsolePrompter::stdio())
            }
        };

        let services = Services {
            prompter,
            store: Box::new(FileStore::new(self.drawing_file)),
            rng: Box::new(rand::thread_rng()),
        };

        let app = BallWorldApp::new(Session::new(services, dialogs, &fonts, font), fonts, font);
        Runtime::run(config, GpuInit::default(), app)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── Session ───────────────────────────────────────────────────────────────

/// The scene plus the widgets that edit it. Nothing here touches the GPU.
struct Session {
    scene: Scene,
    services: Services,
    /// Shared with `services.prompter` when prompts are shown in the window.
    dialogs: Option<DialogPrompter>,
    dialog: Option<PromptDialog>,
    menu_bar: MenuBar,
    canvas: Canvas,
}

impl Session {
    fn new(
        services: Services,
        dialogs: Option<DialogPrompter>,
        fonts: &FontSystem,
        font: Option<FontId>,
    ) -> Self {
        let menu_bar = MenuBar::new(standard_menus(), |s| measure_text(fonts, font, s, FONT_SIZE).x);
        let canvas = Canvas::new(menu_bar.height());
        Self { scene: Scene::new(), services, dialogs, dialog: None, menu_bar, canvas }
    }

    /// Routes one event: an open dialog takes everything; otherwise
    /// accelerators, then the menu bar, then the canvas.
    fn handle(&mut self, event: &UiEvent) -> Effect {
        if let Some(dialog) = &mut self.dialog {
            return match dialog.on_event(event) {
                DialogResult::Unchanged => Effect::Nothing,
                DialogResult::Changed => Effect::Redraw,
                DialogResult::Cancel => {
                    self.dialog = None;
                    Effect::Redraw
                }
                DialogResult::Submit(answer) => {
                    let command = dialog.command();
                    self.dialog = None;
                    if let Some(dialogs) = &self.dialogs {
                        dialogs.answer(answer);
                    }
                    self.run(command).and(Effect::Redraw)
                }
            };
        }

        if let UiEvent::KeyPress { key, modifiers } = event {
            if let Some(command) = accelerator(*key).filter(|_| modifiers.command()) {
                return self.run(command);
            }
        }

        match self.menu_bar.on_event(event) {
            // Picking an item closes the menu, which always needs a repaint.
            EventResult::Invoke(command) => self.run(command).and(Effect::Redraw),
            EventResult::Consumed => Effect::Redraw,
            EventResult::Ignored => match event {
                UiEvent::Click { pos } => match self.canvas.scene_point(*pos) {
                    Some((x, y)) => Controller::new(&mut self.scene, &mut self.services).click(x, y),
                    None => Effect::Nothing,
                },
                _ => Effect::Nothing,
            },
        }
    }

    /// Dispatches `command`, opening a dialog if it asked for a value.
    fn run(&mut self, command: Command) -> Effect {
        log::debug!("command {command:?}");
        let effect = Controller::new(&mut self.scene, &mut self.services).dispatch(command);

        match self.dialogs.as_ref().and_then(DialogPrompter::take_request) {
            Some(request) => {
                log::debug!("prompting for {request:?}");
                self.dialog = Some(PromptDialog::new(request, command));
                effect.and(Effect::Redraw)
            }
            None => effect,
        }
    }

    fn paint(&self, painter: &mut Painter<'_>, window: Vec2) {
        self.canvas.paint(painter, &self.scene, window);
        self.menu_bar.paint(painter, window.x);
        if let Some(dialog) = &self.dialog {
            dialog.paint(painter, window);
        }
    }
}

/// Ctrl (Cmd on macOS) shortcuts.
fn accelerator(key: Key) -> Option<Command> {
    match key {
        Key::S => Some(Command::Save),
        Key::O => Some(Command::Open),
        Key::Q => Some(Command::Quit),
        _ => None,
    }
}

// ── BallWorldApp ──────────────────────────────────────────────────────────

/// Engine-facing side: owns the draw list, fonts and renderers.
struct BallWorldApp {
    session: Session,
    fonts: FontSystem,
    font: Option<FontId>,
    draw_list: DrawList,
    shapes: ShapeRenderer,
    text: TextRenderer,
}

impl BallWorldApp {
    fn new(session: Session, fonts: FontSystem, font: Option<FontId>) -> Self {
        Self {
            session,
            fonts,
            font,
            draw_list: DrawList::new(),
            shapes: ShapeRenderer::new(),
            text: TextRenderer::new(),
        }
    }
}

impl EngineApp for BallWorldApp {
    fn on_input(&mut self, ctx: &mut InputCtx<'_>) -> AppControl {
        let mut effect = Effect::Nothing;
        for event in ui_events(ctx.input, ctx.frame) {
            effect = effect.and(self.session.handle(&event));
            if effect == Effect::Quit {
                return AppControl::Exit;
            }
        }

        if effect == Effect::Redraw {
            ctx.runtime.request_redraw();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();

        self.draw_list.clear();
        let mut painter = Painter::new(&mut self.draw_list, &self.fonts, self.font);
        self.session.paint(&mut painter, Vec2::new(w, h));

        let (dl, fonts) = (&self.draw_list, &self.fonts);
        let (shapes, text) = (&mut self.shapes, &mut self.text);

        ctx.render(Color::from_premul(0.0, 0.0, 0.0, 1.0), |rctx, target| {
            shapes.render(rctx, target, dl);
            text.render(rctx, target, dl, fonts);
        })
    }
}
