use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use wetline::render::raster::{self, RasterError, RasterOptions};
use wetline::render::{PlotMode, SvgRenderOptions, render_geometry_svg, sanitize_svg_id};
use wetline::survey::{SurveyError, parse_station_elevation, parse_station_elevation_strict};
use wetline::{GeometryResult, ShapeDescriptor, ViewportConfig};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Geometry(wetline::Error),
    Raster(RasterError),
    Survey(SurveyError),
    Json(serde_json::Error),
    NoGeometry,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Geometry(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Survey(err) => write!(f, "survey error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoGeometry => write!(f, "Nothing to draw: profile needs at least 2 points"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<wetline::Error> for CliError {
    fn from(value: wetline::Error) -> Self {
        Self::Geometry(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<SurveyError> for CliError {
    fn from(value: SurveyError) -> Self {
        Self::Survey(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Geometry,
    Properties,
    Render,
    Survey,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Jpeg => "jpg",
            RenderFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    strict: bool,
    config: Option<String>,
    canvas_width: Option<f64>,
    canvas_height: Option<f64>,
    margin: Option<f64>,
    render_format: RenderFormat,
    mode: PlotMode,
    render_scale: f32,
    background: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "wetline-cli\n\
\n\
USAGE:\n\
  wetline-cli [geometry] [--pretty] [VIEWPORT] [<path>|-]\n\
  wetline-cli properties [--pretty] [<path>|-]\n\
  wetline-cli render [--format svg|png|jpg|pdf] [--mode dark|print] [--scale <n>] [--background <css-color>] [--id <plot-id>] [--out <path>] [VIEWPORT] [<path>|-]\n\
  wetline-cli survey [--pretty] [--strict] [<path>|-]\n\
\n\
VIEWPORT:\n\
  --canvas-width <w> --canvas-height <h> --margin <m> --config <json-file>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON shape descriptor (`kind` plus its parameters and `waterLevel`);\n\
    survey reads `<station> <elevation>` lines instead.\n\
  - geometry and properties print `null` when a profile has fewer than 2 points.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
"
}

fn parse_f64(value: Option<&String>) -> Result<f64, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    value.parse::<f64>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "geometry" => args.command = Command::Geometry,
            "properties" => args.command = Command::Properties,
            "render" => args.command = Command::Render,
            "survey" => args.command = Command::Survey,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--canvas-width" => args.canvas_width = Some(parse_f64(it.next())?),
            "--canvas-height" => args.canvas_height = Some(parse_f64(it.next())?),
            "--margin" => args.margin = Some(parse_f64(it.next())?),
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--mode" => {
                let Some(mode) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.mode = mode
                    .parse::<PlotMode>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> PathBuf {
    match input {
        Some(path) if path != "-" => PathBuf::from(path).with_extension(ext),
        _ => PathBuf::from(format!("out.{ext}")),
    }
}

/// `--config` first, then the individual flags on top.
fn viewport_config(args: &Args) -> Result<ViewportConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => ViewportConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ViewportConfig::default(),
    };
    if let Some(w) = args.canvas_width {
        config.canvas_width = w;
    }
    if let Some(h) = args.canvas_height {
        config.canvas_height = h;
    }
    if let Some(m) = args.margin {
        config.margin = m;
    }
    config.validate()?;
    Ok(config)
}

fn resolve(args: &Args, config: &ViewportConfig) -> Result<Option<GeometryResult>, CliError> {
    let text = read_input(args.input.as_deref())?;
    let descriptor = ShapeDescriptor::from_json(&text)?;
    tracing::debug!(kind = %descriptor.kind(), "descriptor read");
    Ok(wetline::render(&descriptor, config)?)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Survey => {
            let text = read_input(args.input.as_deref())?;
            let points = if args.strict {
                parse_station_elevation_strict(&text)?
            } else {
                parse_station_elevation(&text)
            };
            if points.len() < 2 {
                tracing::warn!(points = points.len(), "survey has fewer than 2 points");
            }
            write_json(&points, args.pretty)
        }
        Command::Geometry => {
            let config = viewport_config(&args)?;
            let geometry = resolve(&args, &config)?;
            write_json(&geometry, args.pretty)
        }
        Command::Properties => {
            let config = viewport_config(&args)?;
            let geometry = resolve(&args, &config)?;
            write_json(&geometry.map(|g| g.properties), args.pretty)
        }
        Command::Render => {
            let config = viewport_config(&args)?;
            let Some(geometry) = resolve(&args, &config)? else {
                return Err(CliError::NoGeometry);
            };
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
                mode: args.mode,
                ..Default::default()
            };
            let svg = render_geometry_svg(&geometry, &svg_options);

            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };
            let bytes = match args.render_format {
                RenderFormat::Svg => return write_text(&svg, args.out.as_deref()),
                RenderFormat::Png => raster::svg_to_png(&svg, &raster_options)?,
                RenderFormat::Jpeg => raster::svg_to_jpeg(&svg, &raster_options)?,
                RenderFormat::Pdf => raster::svg_to_pdf(&svg)?,
            };
            let out = args.out.as_deref().map(PathBuf::from).unwrap_or_else(|| {
                default_raster_out_path(args.input.as_deref(), args.render_format.extension())
            });
            std::fs::write(&out, bytes)?;
            tracing::debug!(path = %out.display(), "raster output written");
            Ok(())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::NoGeometry) => {
            eprintln!("{}", CliError::NoGeometry);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("wetline-cli")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn default_command_is_geometry() {
        let args = parse_args(&argv(&["shape.json"])).unwrap();
        assert!(matches!(args.command, Command::Geometry));
        assert_eq!(args.input.as_deref(), Some("shape.json"));
    }

    #[test]
    fn render_flags_are_parsed() {
        let args = parse_args(&argv(&[
            "render", "--format", "jpeg", "--mode", "print", "--scale", "2", "--margin", "10", "-",
        ]))
        .unwrap();
        assert!(matches!(args.render_format, RenderFormat::Jpeg));
        assert_eq!(args.mode, PlotMode::Print);
        assert_eq!(args.render_scale, 2.0);
        assert_eq!(args.margin, Some(10.0));
        assert_eq!(args.input.as_deref(), Some("-"));
    }

    #[test]
    fn bad_flags_are_usage_errors() {
        assert!(matches!(
            parse_args(&argv(&["--scale", "0"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["a.json", "b.json"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn raster_output_lands_next_to_the_input() {
        assert_eq!(
            default_raster_out_path(Some("dir/xs.json"), "png"),
            PathBuf::from("dir/xs.png")
        );
        assert_eq!(default_raster_out_path(None, "pdf"), PathBuf::from("out.pdf"));
    }
}
