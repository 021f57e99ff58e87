use ballworld_scene::Rgba;

use crate::pen::{ColorChoice, RadiusChoice};

/// Everything a menu item or accelerator can ask the controller to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    Save,
    Open,
    ClearBalls,
    Quit,
    BallColor(ColorChoice),
    Background(ColorChoice),
    Radius(RadiusChoice),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub command: Command,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, command: Command) -> Self {
        Self { label: label.into(), command }
    }
}

/// One drop-down of the menu bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self { title: title.into(), items }
    }
}

/// Red, Green, Blue, Custom and Random, each wrapped by `wrap`.
fn color_items(wrap: fn(ColorChoice) -> Command) -> Vec<MenuItem> {
    vec![
        MenuItem::new("Red", wrap(ColorChoice::Preset(Rgba::RED))),
        MenuItem::new("Green", wrap(ColorChoice::Preset(Rgba::GREEN))),
        MenuItem::new("Blue", wrap(ColorChoice::Preset(Rgba::BLUE))),
        MenuItem::new("Custom", wrap(ColorChoice::Custom)),
        MenuItem::new("Random", wrap(ColorChoice::Random)),
    ]
}

/// File, Color, Background and Radius, in bar order.
pub fn standard_menus() -> Vec<Menu> {
    let radius = |r: u32| MenuItem::new(r.to_string(), Command::Radius(RadiusChoice::Preset(r)));

    vec![
        Menu::new(
            "File",
            vec![
                MenuItem::new("Save", Command::Save),
                MenuItem::new("Open", Command::Open),
                MenuItem::new("Clear Balls", Command::ClearBalls),
                MenuItem::new("Quit", Command::Quit),
            ],
        ),
        Menu::new("Color", color_items(Command::BallColor)),
        Menu::new("Background", color_items(Command::Background)),
        Menu::new(
            "Radius",
            vec![
                radius(5),
                radius(10),
                radius(50),
                radius(100),
                MenuItem::new("Custom", Command::Radius(RadiusChoice::Custom)),
                MenuItem::new("Random", Command::Radius(RadiusChoice::Random)),
            ],
        ),
    ]
}
