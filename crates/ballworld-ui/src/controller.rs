//! Turns user commands into scene mutations.
//!
//! A [`Controller`] is built for a single event from the scene and the host
//! services and dropped afterwards; nothing carries over between events.
//! Every entry point reports an [`Effect`] telling the caller whether the
//! canvas must be repainted.

use rand::RngCore;

use ballworld_scene::{Rgba, Scene};

use crate::error::DrawingError;
use crate::host::{DrawingStore, Prompter};
use crate::menu::Command;
use crate::pen::{parse_radius, random_color, random_radius, ColorChoice, RadiusChoice};

pub const BALL_COLOR_TITLE: &str = "Choose Circle Color";
pub const BACKGROUND_TITLE: &str = "Choose Background Color";
pub const RADIUS_PROMPT: &str = "Please input a value:";

/// What the caller should do after a command ran.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Effect {
    Nothing,
    Redraw,
    Quit,
}

impl Effect {
    /// The stronger of two effects: `Quit` over `Redraw` over `Nothing`.
    pub fn and(self, other: Effect) -> Effect {
        match (self, other) {
            (Effect::Quit, _) | (_, Effect::Quit) => Effect::Quit,
            (Effect::Redraw, _) | (_, Effect::Redraw) => Effect::Redraw,
            _ => Effect::Nothing,
        }
    }
}

/// Host-side collaborators the controller borrows.
pub struct Services {
    pub prompter: Box<dyn Prompter>,
    pub store: Box<dyn DrawingStore>,
    pub rng: Box<dyn RngCore>,
}

pub struct Controller<'a> {
    scene: &'a mut Scene,
    services: &'a mut Services,
}

impl<'a> Controller<'a> {
    pub fn new(scene: &'a mut Scene, services: &'a mut Services) -> Self {
        Self { scene, services }
    }

    /// Places a ball centered on a canvas point.
    pub fn click(&mut self, x: i32, y: i32) -> Effect {
        let ball = self.scene.place_ball(x, y);
        log::debug!("placed ball at ({x}, {y}): {ball:?}");
        Effect::Redraw
    }

    /// Runs a menu or accelerator command. Save and open failures are logged
    /// here and never reach the caller.
    pub fn dispatch(&mut self, command: Command) -> Effect {
        match command {
            Command::Save => {
                if let Err(err) = self.save() {
                    log::error!("could not save to {}: {}", err.path().display(), error_cause(&err));
                }
                Effect::Nothing
            }
            Command::Open => match self.open() {
                Ok(()) => Effect::Redraw,
                Err(err @ DrawingError::Io { .. }) => {
                    log::error!("could not open {}: {}", err.path().display(), error_cause(&err));
                    Effect::Nothing
                }
                Err(err @ DrawingError::Decode { .. }) => {
                    log::error!("{err}");
                    Effect::Nothing
                }
            },
            Command::ClearBalls => self.clear(),
            Command::Quit => Effect::Quit,
            Command::BallColor(choice) => self.choose_ball_color(choice),
            Command::Background(choice) => self.choose_background(choice),
            Command::Radius(choice) => self.choose_radius(choice),
        }
    }

    /// Writes the whole scene to the store.
    pub fn save(&mut self) -> Result<(), DrawingError> {
        let bytes = self.scene.to_bytes();
        let store = &mut self.services.store;
        store.write(&bytes).map_err(|source| DrawingError::Io { path: store.path(), source })?;
        log::info!("saved {} balls to {}", self.scene.balls().len(), store.path().display());
        Ok(())
    }

    /// Replaces the scene with the stored drawing. On error the scene is
    /// left as it was.
    pub fn open(&mut self) -> Result<(), DrawingError> {
        let store = &mut self.services.store;
        let bytes = store.read().map_err(|source| DrawingError::Io { path: store.path(), source })?;
        self.scene
            .load_bytes(&bytes)
            .map_err(|source| DrawingError::Decode { path: store.path(), source })?;
        log::info!("opened {} balls from {}", self.scene.balls().len(), store.path().display());
        Ok(())
    }

    pub fn clear(&mut self) -> Effect {
        self.scene.clear();
        log::debug!("cleared balls");
        Effect::Redraw
    }

    /// Changes the color of future balls. Existing balls keep theirs, so
    /// nothing needs repainting.
    pub fn choose_ball_color(&mut self, choice: ColorChoice) -> Effect {
        let current = self.scene.active_color();
        if let Some(color) = self.resolve_color(choice, BALL_COLOR_TITLE, current) {
            self.scene.set_active_color(color);
            log::debug!("ball color set to {color}");
        }
        Effect::Nothing
    }

    pub fn choose_background(&mut self, choice: ColorChoice) -> Effect {
        let current = self.scene.background();
        match self.resolve_color(choice, BACKGROUND_TITLE, current) {
            Some(color) => {
                self.scene.set_background(color);
                log::debug!("background set to {color}");
                Effect::Redraw
            }
            None => Effect::Nothing,
        }
    }

    /// Changes the radius of future balls. Unparseable input keeps the
    /// current radius.
    pub fn choose_radius(&mut self, choice: RadiusChoice) -> Effect {
        let radius = match choice {
            RadiusChoice::Preset(r) => Some(r),
            RadiusChoice::Random => Some(random_radius(self.services.rng.as_mut())),
            RadiusChoice::Custom => {
                self.services.prompter.request_text(RADIUS_PROMPT).and_then(|text| {
                    let parsed = parse_radius(&text);
                    if parsed.is_none() {
                        log::debug!("ignoring radius {text:?}: not a non-negative integer");
                    }
                    parsed
                })
            }
        };

        if let Some(r) = radius {
            self.scene.set_active_radius(r);
            log::debug!("radius set to {r}");
        }
        Effect::Nothing
    }

    fn resolve_color(&mut self, choice: ColorChoice, title: &str, current: Rgba) -> Option<Rgba> {
        match choice {
            ColorChoice::Preset(c) => Some(c),
            ColorChoice::Random => Some(random_color(self.services.rng.as_mut())),
            ColorChoice::Custom => self.services.prompter.request_color(title, current),
        }
    }
}

/// The wrapped error, without the path `DrawingError` prefixes it with.
fn error_cause(err: &DrawingError) -> &dyn std::error::Error {
    match err {
        DrawingError::Io { source, .. } => source,
        DrawingError::Decode { source, .. } => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::path::PathBuf;
    use std::rc::Rc;

    use ballworld_scene::{DecodeErrorKind, Point, scene::DEFAULT_RADIUS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ── fakes ─────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct ScriptedPrompter {
        texts: VecDeque<Option<String>>,
        colors: VecDeque<Option<Rgba>>,
        color_titles: Rc<RefCell<Vec<(String, Rgba)>>>,
    }

    impl Prompter for ScriptedPrompter {
        fn request_text(&mut self, _prompt: &str) -> Option<String> {
            self.texts.pop_front().flatten()
        }

        fn request_color(&mut self, title: &str, current: Rgba) -> Option<Rgba> {
            self.color_titles.borrow_mut().push((title.to_string(), current));
            self.colors.pop_front().flatten()
        }
    }

    /// Shares its bytes with the test so they survive the controller.
    #[derive(Clone, Default)]
    struct MemoryStore {
        bytes: Rc<RefCell<Option<Vec<u8>>>>,
        fail_writes: bool,
    }

    impl DrawingStore for MemoryStore {
        fn path(&self) -> PathBuf {
            PathBuf::from("/mem/drawings.dp")
        }

        fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            *self.bytes.borrow_mut() = Some(bytes.to_vec());
            Ok(())
        }

        fn read(&mut self) -> io::Result<Vec<u8>> {
            self.bytes
                .borrow()
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no drawing"))
        }
    }

    fn services(prompter: ScriptedPrompter, store: MemoryStore) -> Services {
        Services {
            prompter: Box::new(prompter),
            store: Box::new(store),
            rng: Box::new(StdRng::seed_from_u64(42)),
        }
    }

    fn texts(answers: &[Option<&str>]) -> ScriptedPrompter {
        ScriptedPrompter {
            texts: answers.iter().map(|a| a.map(str::to_string)).collect(),
            ..Default::default()
        }
    }

    // ── clicks and pens ───────────────────────────────────────────────────

    #[test]
    fn click_places_ball_and_redraws() {
        let mut scene = Scene::new();
        let mut svc = services(ScriptedPrompter::default(), MemoryStore::default());

        let effect = Controller::new(&mut scene, &mut svc).click(150, 150);
        assert_eq!(effect, Effect::Redraw);
        assert_eq!(scene.positions(), &[Point::new(50, 50)]);
    }

    #[test]
    fn only_background_changes_redraw() {
        let mut scene = Scene::new();
        let mut svc = services(ScriptedPrompter::default(), MemoryStore::default());
        let mut c = Controller::new(&mut scene, &mut svc);

        assert_eq!(c.dispatch(Command::BallColor(ColorChoice::Preset(Rgba::GREEN))), Effect::Nothing);
        assert_eq!(c.dispatch(Command::Radius(RadiusChoice::Preset(5))), Effect::Nothing);
        assert_eq!(c.dispatch(Command::Background(ColorChoice::Preset(Rgba::BLUE))), Effect::Redraw);

        assert_eq!(scene.active_color(), Rgba::GREEN);
        assert_eq!(scene.active_radius(), 5);
        assert_eq!(scene.background(), Rgba::BLUE);
    }

    #[test]
    fn custom_radius_keeps_current_on_bad_input() {
        let mut scene = Scene::new();
        let mut svc = services(texts(&[Some("abc"), Some(" 42 "), None]), MemoryStore::default());
        let mut c = Controller::new(&mut scene, &mut svc);

        c.dispatch(Command::Radius(RadiusChoice::Custom));
        assert_eq!(c.scene.active_radius(), DEFAULT_RADIUS);

        c.dispatch(Command::Radius(RadiusChoice::Custom));
        assert_eq!(c.scene.active_radius(), 42);

        // Cancelled.
        c.dispatch(Command::Radius(RadiusChoice::Custom));
        assert_eq!(scene.active_radius(), 42);
    }

    #[test]
    fn custom_colors_prompt_with_title_and_current() {
        let mut prompter = ScriptedPrompter::default();
        prompter.colors = VecDeque::from([Some(Rgba::GREEN), None]);
        let asked = prompter.color_titles.clone();

        let mut scene = Scene::new();
        let mut svc = services(prompter, MemoryStore::default());
        let mut c = Controller::new(&mut scene, &mut svc);

        assert_eq!(c.dispatch(Command::BallColor(ColorChoice::Custom)), Effect::Nothing);
        assert_eq!(c.dispatch(Command::Background(ColorChoice::Custom)), Effect::Nothing);

        assert_eq!(scene.active_color(), Rgba::GREEN);
        assert_eq!(scene.background(), Rgba::BLACK);
        assert_eq!(
            *asked.borrow(),
            vec![
                (BALL_COLOR_TITLE.to_string(), Rgba::RED),
                (BACKGROUND_TITLE.to_string(), Rgba::BLACK),
            ]
        );
    }

    #[test]
    fn random_choices_stay_in_bounds() {
        let mut scene = Scene::new();
        let mut svc = services(ScriptedPrompter::default(), MemoryStore::default());

        for _ in 0..100 {
            let mut c = Controller::new(&mut scene, &mut svc);
            c.dispatch(Command::BallColor(ColorChoice::Random));
            c.dispatch(Command::Radius(RadiusChoice::Random));
            assert_eq!(scene.active_color().a, 255);
            assert!(scene.active_radius() <= 500);
        }
    }

    #[test]
    fn clear_keeps_pen_settings() {
        let mut scene = Scene::new();
        let mut svc = services(ScriptedPrompter::default(), MemoryStore::default());
        let mut c = Controller::new(&mut scene, &mut svc);

        c.dispatch(Command::Radius(RadiusChoice::Preset(10)));
        c.click(20, 20);
        assert_eq!(c.dispatch(Command::ClearBalls), Effect::Redraw);

        assert!(scene.balls().is_empty());
        assert!(scene.positions().is_empty());
        assert_eq!(scene.active_radius(), 10);
    }

    #[test]
    fn effects_combine_by_strength() {
        assert_eq!(Effect::Nothing.and(Effect::Nothing), Effect::Nothing);
        assert_eq!(Effect::Nothing.and(Effect::Redraw), Effect::Redraw);
        assert_eq!(Effect::Redraw.and(Effect::Quit), Effect::Quit);
        assert_eq!(Effect::Quit.and(Effect::Nothing), Effect::Quit);
    }

    #[test]
    fn quit_is_reported() {
        let mut scene = Scene::new();
        let mut svc = services(ScriptedPrompter::default(), MemoryStore::default());
        assert_eq!(Controller::new(&mut scene, &mut svc).dispatch(Command::Quit), Effect::Quit);
    }

    // ── persistence ───────────────────────────────────────────────────────

    #[test]
    fn open_without_file_is_io_error_and_keeps_scene() {
        let mut scene = Scene::new();
        scene.place_ball(10, 10);
        let before = scene.clone();

        let mut svc = services(ScriptedPrompter::default(), MemoryStore::default());
        let mut c = Controller::new(&mut scene, &mut svc);

        let err = c.open().unwrap_err();
        assert!(matches!(err, DrawingError::Io { .. }));
        assert_eq!(err.path(), &PathBuf::from("/mem/drawings.dp"));
        assert_eq!(c.dispatch(Command::Open), Effect::Nothing);
        assert_eq!(scene, before);
    }

    #[test]
    fn corrupt_file_is_decode_error_and_keeps_scene() {
        let store = MemoryStore::default();
        *store.bytes.borrow_mut() = Some(vec![b'S', 1, 0]);

        let mut scene = Scene::new();
        scene.set_background(Rgba::GREEN);
        scene.place_ball(300, 300);
        let before = scene.clone();

        let mut svc = services(ScriptedPrompter::default(), store);
        let mut c = Controller::new(&mut scene, &mut svc);

        match c.open() {
            Err(DrawingError::Decode { source, .. }) => assert_eq!(source.kind, DecodeErrorKind::Truncated),
            other => panic!("expected decode error, got {other:?}"),
        }
        assert_eq!(scene, before);
    }

    #[test]
    fn failed_save_is_reported_not_raised() {
        let store = MemoryStore { fail_writes: true, ..Default::default() };
        let mut scene = Scene::new();
        let mut svc = services(ScriptedPrompter::default(), store.clone());
        let mut c = Controller::new(&mut scene, &mut svc);

        assert!(matches!(c.save(), Err(DrawingError::Io { .. })));
        assert_eq!(c.dispatch(Command::Save), Effect::Nothing);
        assert!(store.bytes.borrow().is_none());
    }

    #[test]
    fn place_save_clear_open_restores_both_balls() {
        let store = MemoryStore::default();
        let mut scene = Scene::new();
        let mut svc = services(ScriptedPrompter::default(), store.clone());
        let mut c = Controller::new(&mut scene, &mut svc);

        c.click(150, 150);
        c.dispatch(Command::BallColor(ColorChoice::Preset(Rgba::BLUE)));
        c.click(200, 200);
        assert_eq!(c.dispatch(Command::Save), Effect::Nothing);
        assert!(store.bytes.borrow().is_some());

        c.dispatch(Command::ClearBalls);
        assert!(c.scene.balls().is_empty());

        assert_eq!(c.dispatch(Command::Open), Effect::Redraw);

        let balls = scene.balls();
        assert_eq!(balls.len(), 2);
        assert_eq!((balls[0].color, balls[0].origin, balls[0].radius), (Rgba::RED, Point::new(50, 50), 100));
        assert_eq!((balls[1].color, balls[1].origin, balls[1].radius), (Rgba::BLUE, Point::new(100, 100), 100));
        assert_eq!(scene.positions(), &[Point::new(50, 50), Point::new(100, 100)]);
        assert_eq!(scene.active_color(), Rgba::BLUE);
    }
}
