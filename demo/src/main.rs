use std::{env, fs, path::{Path, PathBuf}, collections::HashMap};

use anyhow::{Context, bail};
use serde::Deserialize;

use iconbutton::{
    widget::{Button, IconButton, button},
    style::{Attributes, StyledAttributes, Attr},
    resources::{Resources, ResourceId},
    tiny_skia::Pixmap,
    Theme, Font, Color, QuadStyle, Size, Ui
};

const BASE: Color = Color::rgb(35, 47, 46);
const TEXT: Color = Color::rgb(217, 221, 222);
const OUTLINE: Color = Color::rgb(172, 166, 149);

/// Description of the button to render.
#[derive(Deserialize, Debug)]
struct Scene {
    label: String,
    width: u32,
    height: u32,
    #[serde(default = "default_scale_factor")]
    scale_factor: f32,
    #[serde(default)]
    font_size: Option<f32>,
    /// Icon files by resource id, relative to the scene file.
    #[serde(default)]
    icons: HashMap<u32, PathBuf>,
    #[serde(default)]
    attributes: Attributes
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let (Some(scene_path), Some(out_path)) = (args.next(), args.next()) else {
        bail!("usage: demo <scene.json> <out.png>");
    };

    let scene_path = PathBuf::from(scene_path);
    let json = fs::read_to_string(&scene_path)
        .with_context(|| format!("reading {}", scene_path.display()))?;
    let scene: Scene = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", scene_path.display()))?;

    let base_dir = scene_path.parent().unwrap_or(Path::new("."));
    let resources = load_resources(&scene, base_dir);

    let mut ui = Ui::new(theme(scene.font_size));
    ui.set_scale_factor(scene.scale_factor);

    // Icon spacing the scene can override through its attributes.
    let default_style = Attributes::new()
        .set(Attr::IconPadding, "8dp")
        .set(Attr::IconSize, "20dp");
    let attrs = StyledAttributes::new(&scene.attributes)
        .default_style(&default_style);

    let base = Button::new(scene.label.as_str())
        .width(scene.width as f32)
        .height(scene.height as f32);
    let mut button = IconButton::new(base, &attrs, &resources)?;

    log::info!(
        "Rendering \"{}\" with icon aligned {}",
        button.text(),
        button.config().align
    );

    let size = ui.layout(
        &mut button,
        Size::new(scene.width as f32, scene.height as f32)
    );

    let mut pixmap = Pixmap::new(
        (size.width * scene.scale_factor).ceil() as u32,
        (size.height * scene.scale_factor).ceil() as u32
    ).context("button has an empty size")?;

    ui.draw(&mut button, &mut pixmap.as_mut());

    pixmap.save_png(&out_path)
        .with_context(|| format!("writing {}", out_path))?;

    log::info!("Wrote {}x{} image to {}", pixmap.width(), pixmap.height(), out_path);

    Ok(())
}

fn load_resources(scene: &Scene, base_dir: &Path) -> Resources {
    let mut resources = Resources::new();

    for (id, path) in &scene.icons {
        resources.insert(ResourceId(*id), base_dir.join(path));
    }

    resources
}

fn theme(font_size: Option<f32>) -> Theme {
    Theme::new(
        Font::default(),
        font_size.unwrap_or(16f32),
        TEXT,
        || button::Style {
            quad: QuadStyle::solid_background(BASE)
                .rounded(6f32)
                .with_border(1f32, OUTLINE),
            text_color: None
        }
    )
}

fn default_scale_factor() -> f32 {
    1f32
}
