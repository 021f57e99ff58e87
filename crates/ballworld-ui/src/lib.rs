//! Ball World UI: menus, canvas and the controller that edits the scene.
//!
//! Input arrives from `ballworld-engine` as [`event::UiEvent`]s. The menu bar
//! sees each event first; unclaimed clicks land on the canvas. Menu items and
//! keyboard accelerators resolve to a [`menu::Command`] which a
//! [`controller::Controller`] applies to the [`ballworld_scene::Scene`].
//! Custom colors and radii are typed into a modal [`prompt::PromptDialog`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ballworld_ui::Application;
//!
//! Application::new()
//!     .font(std::fs::read("/usr/share/fonts/TTF/DejaVuSans.ttf")?)
//!     .run()?;
//! ```
//!
//! Driving the controller directly, without a window:
//!
//! ```rust,ignore
//! let mut scene = Scene::new();
//! let mut services = Services { prompter, store, rng };
//! let effect = Controller::new(&mut scene, &mut services).click(150, 150);
//! assert_eq!(effect, Effect::Redraw);
//! ```

pub mod app;
pub mod canvas;
pub mod controller;
pub mod error;
pub mod event;
pub mod host;
pub mod menu;
pub mod menu_bar;
pub mod painter;
pub mod pen;
pub mod prompt;

pub use app::Application;
pub use controller::{Controller, Effect, Services};
pub use error::DrawingError;
pub use host::{ConsolePrompter, DrawingStore, FileStore, Prompter};
pub use menu::{Command, Menu, MenuItem};
pub use pen::{ColorChoice, RadiusChoice};
pub use prompt::{DialogPrompter, PromptDialog};
