use anyhow::Result;

use ballworld_engine::logging::{init_logging, LoggingConfig};
use ballworld_ui::Application;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut app = Application::new();
    match load_font() {
        Some(bytes) => app = app.font(bytes),
        None => log::warn!("no system font found; menus will have no labels"),
    }

    app.run()
}

/// First readable font from the usual system font locations.
fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}
