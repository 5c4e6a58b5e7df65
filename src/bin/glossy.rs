use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "glossy", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an image standing on a glossy shelf as a PNG.
    Shelf(ShelfArgs),
    /// Print the effective reflection config as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct ReflectionArgs {
    /// Reflection config JSON (fields: height, alpha, offset).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reflection height in display units (overrides the config file).
    #[arg(long)]
    height: Option<f64>,

    /// Top-row opacity of the reflection, 0..1 (overrides the config file).
    #[arg(long)]
    alpha: Option<f32>,

    /// Gap between content and reflection in display units; negative overlaps.
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f64>,
}

#[derive(Parser, Debug)]
struct ShelfArgs {
    /// Input image (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    reflection: ReflectionArgs,

    /// Device pixels per display unit.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Padding around the image inside the reflected container, in display units.
    #[arg(long, default_value_t = 0.0)]
    padding: f64,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    #[command(flatten)]
    reflection: ReflectionArgs,
}

const BACKGROUND: [u8; 4] = [18, 20, 28, 255];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Shelf(args) => cmd_shelf(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(args: &ReflectionArgs) -> anyhow::Result<glossy::ReflectionConfig> {
    let mut cfg = match &args.config {
        Some(p) => glossy::ReflectionConfig::from_path(p)?,
        None => glossy::ReflectionConfig::default(),
    };
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(a) = args.alpha {
        cfg.alpha = a;
    }
    if let Some(o) = args.offset {
        cfg.offset = o;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.reflection)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

fn read_image(path: &Path) -> anyhow::Result<glossy::PixelImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = glossy::PixelImage::decode(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img)
}

fn cmd_shelf(args: ShelfArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.reflection)?;
    let scale = glossy::ScaleFactor::new(args.scale)?;
    let padding = if args.padding.is_finite() {
        args.padding.max(0.0)
    } else {
        0.0
    };

    let img = read_image(&args.image)?;
    let img_w = scale.to_units(img.width());
    let img_h = scale.to_units(img.height());

    let [r, g, b, a] = BACKGROUND;
    let background = glossy::Rgba8Premul::from_straight_rgba(r, g, b, a);
    let container = glossy::VisualContainer::new(glossy::Rect::new(
        0.0,
        0.0,
        img_w + 2.0 * padding,
        img_h + 2.0 * padding,
    ))
    .with_background(background)
    .with_child(glossy::Element::image(
        glossy::Rect::new(padding, padding, padding + img_w, padding + img_h),
        Arc::new(img),
    ));

    let mut view = glossy::ReflectionView::in_memory(cfg, scale);
    view.update_reflection(&container)
        .context("render reflection")?;
    let reflection = view
        .surface()
        .image()
        .context("reflection view presented no image")?;

    let snapshot =
        glossy::capture_snapshot(&container, scale, glossy::SnapshotOpts::default())?;
    let frame = glossy::compose_shelf(&snapshot, reflection, cfg.offset, Some(background))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .to_rgba_image()?
        .save(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    println!(
        "wrote {} ({}x{}, reflection {}x{})",
        args.out.display(),
        frame.width,
        frame.height,
        reflection.width(),
        reflection.height()
    );
    Ok(())
}
