#[cfg(feature = "cairo-backend")]
use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_REPORT_NAME: &str = "Planning BVT";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    result_path: PathBuf,
    image_dir: PathBuf,
    style_path: Option<PathBuf>,
    report_json_path: Option<PathBuf>,
    report_name: String,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = trajectory_plot::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use trajectory_plot::PosePlotter;
    use trajectory_plot::pipeline::load_result_document;
    use trajectory_plot::render::{CairoRenderer, PlotStyle};
    use trajectory_plot::report::{annotate_saved_images, build_report_document};

    let args = parse_args()?;

    let style = match &args.style_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read style `{}`: {err}", path.display()))?;
            PlotStyle::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => PlotStyle::default(),
    };

    fs::create_dir_all(&args.image_dir).map_err(|err| {
        format!(
            "failed to create image dir `{}`: {err}",
            args.image_dir.display()
        )
    })?;

    let mut document = load_result_document(&args.result_path).map_err(|err| err.to_string())?;
    let mut plotter =
        PosePlotter::new(CairoRenderer::new(), style).map_err(|err| err.to_string())?;
    let summary = plotter
        .run(&document, &args.image_dir)
        .map_err(|err| err.to_string())?;

    for case in &summary.rendered {
        for path in &case.saved_images {
            println!("generated {} [{}] -> {}", case.case_id, case.description, path.display());
        }
    }
    for failure in &summary.failed {
        println!(
            "skipped case #{} ({}): {}",
            failure.position,
            failure.case_id.as_deref().unwrap_or("unknown id"),
            failure.error
        );
    }

    if let Some(report_path) = &args.report_json_path {
        annotate_saved_images(&mut document, &summary).map_err(|err| err.to_string())?;
        let report =
            build_report_document(&document, &args.report_name).map_err(|err| err.to_string())?;
        let text = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize report json: {err}"))?;
        fs::write(report_path, text).map_err(|err| {
            format!(
                "failed to write report json `{}`: {err}",
                report_path.display()
            )
        })?;
    }

    println!(
        "done: generated {} png(s) for {} case(s)",
        summary.image_count(),
        summary.rendered.len()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut positional = Vec::new();
    let mut style_path = None;
    let mut report_json_path = None;
    let mut report_name = DEFAULT_REPORT_NAME.to_owned();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --style".to_owned())?;
                style_path = Some(PathBuf::from(value));
            }
            "--report-json" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --report-json".to_owned())?;
                report_json_path = Some(PathBuf::from(value));
            }
            "--report-name" => {
                report_name = args
                    .next()
                    .ok_or_else(|| "missing value for --report-name".to_owned())?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
            _ => positional.push(PathBuf::from(&arg)),
        }
    }

    let [result_path, image_dir]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| format!("expected <result.json> <image_dir>\n\n{}", usage_message()))?;

    Ok(CliArgs {
        result_path,
        image_dir,
        style_path,
        report_json_path,
        report_name,
    })
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: generate_trajectory_pngs <result.json> <image_dir> [options]\n\nExample: generate_trajectory_pngs ./result.json ./images\n\nOptions:\n  --style <path>         Plot style JSON (default: built-in style)\n  --report-json <path>   Write the report view of the results (with saved_images)\n  --report-name <name>   Report title suffix (default: {DEFAULT_REPORT_NAME})\n  -h, --help             Show this message"
    )
}
