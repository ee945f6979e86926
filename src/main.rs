use anyhow::Context;
use canvas_utils::draw::{
    ArcOptions, ArcTextOptions, BLUE, BezierOptions, GOLD, GREEN, LineKind, LineOptions,
    PaintStyle, RectOptions, StarOptions, TextOptions, TriangleOptions, WHITE,
};
use canvas_utils::export::{ExportFormat, SaveOptions};
use canvas_utils::{Canvas, Config};
use clap::{ArgAction, Parser};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "canvas-utils")]
#[command(version, about = "Render a demo scene with clickable shapes")]
struct Cli {
    /// Output image path (defaults to the configured export directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Logical width in CSS pixels
    #[arg(long)]
    width: Option<f64>,

    /// Logical height in CSS pixels
    #[arg(long)]
    height: Option<f64>,

    /// Device pixel scale
    #[arg(long)]
    scale: Option<f64>,

    /// Image format (png or jpeg); inferred from the output extension when omitted
    #[arg(long, value_name = "FORMAT", value_parser = parse_format)]
    format: Option<ExportFormat>,

    /// JPEG quality between 0.0 and 1.0
    #[arg(long)]
    quality: Option<f64>,

    /// Simulate a click at client coordinates X,Y (repeatable)
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    click: Vec<(f64, f64)>,

    /// Draw the background grid
    #[arg(long, action = ArgAction::SetTrue)]
    grid: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the documented example config to PATH and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(path) = &cli.init_config {
        Config::create_default_file(path)?;
        println!("Wrote example config to {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    if let Some(scale) = cli.scale {
        config.canvas.device_pixel_scale = scale;
    }

    let mut canvas = Canvas::from_config(&config).context("Failed to create canvas")?;

    let clicked: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let grid = cli.grid.then(|| config.grid.to_options());
    let scene_clicks = Rc::clone(&clicked);
    canvas.set_draw(move |canvas| {
        if let Some(grid) = &grid {
            canvas.grid(grid);
        }
        draw_demo_scene(canvas, &scene_clicks);
        Ok(())
    });
    canvas.render()?;

    for &(x, y) in &cli.click {
        let before = clicked.borrow().len();
        canvas.handle_click(x, y);
        let hit = clicked.borrow().get(before).copied();
        match hit {
            Some(name) => println!("click {x},{y} -> {name}"),
            None => println!("click {x},{y} -> none"),
        }
    }

    let mut save = config.export.to_save_options();
    if let Some(quality) = cli.quality {
        save.quality = quality;
    }
    save.format = cli
        .format
        .or_else(|| cli.output.as_deref().and_then(format_from_extension))
        .unwrap_or(save.format);
    if let Some(output) = &cli.output {
        apply_output_path(&mut save, output);
    }

    let path = canvas.save(&save)?;
    println!("Saved {}", path.display());

    Ok(())
}

/// Draws the demo scene; clickable shapes record their name in `clicked`.
fn draw_demo_scene(canvas: &mut Canvas, clicked: &Rc<RefCell<Vec<&'static str>>>) {
    let on_click = |name: &'static str| {
        let clicked = Rc::clone(clicked);
        move |_: &mut Canvas| {
            log::info!("Clicked {name}");
            clicked.borrow_mut().push(name);
        }
    };

    canvas.rect(
        &RectOptions {
            position: (20.0, 20.0),
            size: (80.0, 60.0),
            ..RectOptions::default()
        }
        .with_click(on_click("rect")),
    );
    canvas.triangle(
        &TriangleOptions {
            points: [(120.0, 80.0), (200.0, 80.0), (160.0, 20.0)],
            color: GREEN,
            ..TriangleOptions::default()
        }
        .with_click(on_click("triangle")),
    );
    canvas.arc(
        &ArcOptions {
            center: (250.0, 50.0),
            radius: 30.0,
            color: BLUE,
            ..ArcOptions::default()
        }
        .with_click(on_click("circle")),
    );

    canvas.line(&LineOptions {
        kind: LineKind::Dash,
        a: (20.0, 100.0),
        b: (280.0, 100.0),
        ..LineOptions::default()
    });
    canvas.bezier(&BezierOptions {
        start: (20.0, 130.0),
        controls: vec![(100.0, 100.0), (180.0, 150.0)],
        end: (280.0, 120.0),
        ..BezierOptions::default()
    });
    canvas.rect(&RectOptions {
        paint: PaintStyle::Dash,
        position: (15.0, 15.0),
        size: (90.0, 70.0),
        color: GOLD,
        ..RectOptions::default()
    });
    canvas.star(&StarOptions {
        center: (160.0, 125.0),
        size: 18.0,
        ..StarOptions::default()
    });
    canvas.text(&TextOptions {
        position: (30.0, 40.0),
        text: "Click me".to_string(),
        color: WHITE,
        font_size: 14.0,
        ..TextOptions::default()
    });
    canvas.text_along_arc(&ArcTextOptions {
        center: (250.0, 50.0),
        radius: 30.0,
        text: "canvas".to_string(),
        font_size: 10.0,
        ..ArcTextOptions::default()
    });
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("invalid X: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("invalid Y: {e}"))?;
    Ok((x, y))
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "png" => Ok(ExportFormat::Png),
        "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
        other => Err(format!("unsupported format '{other}' (expected png or jpeg)")),
    }
}

fn format_from_extension(path: &std::path::Path) -> Option<ExportFormat> {
    let extension = path.extension()?.to_str()?;
    parse_format(extension).ok()
}

fn apply_output_path(save: &mut SaveOptions, output: &std::path::Path) {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        save.directory = parent.to_path_buf();
    } else {
        save.directory = PathBuf::from(".");
    }
    save.filename = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
}
