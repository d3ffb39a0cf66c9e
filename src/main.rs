use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use design_loads::geometry::gbxml::GbXmlWriter;
use design_loads::geometry::mesh::write_obj;
use design_loads::model::Project;
use design_loads::{ExtractionParams, GeometryExtractor, LoadCalculator};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a design-day load calculation over a project JSON file
    Calculate(CalculateArgs),
    /// Extract room geometry from a floorplan image
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Path to the project description in JSON format
    input_file: String,
    #[arg(long, help = "Directory for output files (defaults to the input's)")]
    output_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false, help = "Also write a per-space summary CSV")]
    summary_csv: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Path to the floorplan image (PNG, JPEG, TIFF, BMP)
    input_file: String,
    #[arg(long, help = "Plan scale in pixels per metre")]
    pixels_per_metre: Option<f64>,
    #[arg(long, help = "Floor-to-ceiling height in metres")]
    floor_height: Option<f64>,
    #[arg(long, help = "Maximum snapping gap between rooms in metres")]
    gap_threshold: Option<f64>,
    #[arg(long, default_value_t = false, help = "Skip window/door detection")]
    no_openings: bool,
    #[arg(long, help = "Write a gbXML export to this path")]
    gbxml: Option<PathBuf>,
    #[arg(long, help = "Write an OBJ preview mesh to this path")]
    mesh: Option<PathBuf>,
    #[arg(long, help = "Directory to dump debug rasters into")]
    debug_dir: Option<PathBuf>,
    #[arg(long, help = "Path for the geometry JSON (defaults next to the input)")]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let tracing_subscriber = tracing_subscriber::fmt::fmt()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(tracing_subscriber)
        .context("setting tracing subscriber failed")?;

    match Cli::parse().command {
        Command::Calculate(args) => calculate(args),
        Command::Extract(args) => extract(args),
    }
}

fn output_base(input_file: &str, output_dir: Option<&Path>) -> (PathBuf, String) {
    let input = Path::new(input_file);
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    (dir, stem)
}

fn calculate(args: CalculateArgs) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.input_file)
        .with_context(|| format!("could not read {}", args.input_file))?;
    let project: Project =
        serde_json::from_str(&raw).context("project file is not valid project JSON")?;

    let calculator = LoadCalculator::default();
    let mut result = calculator
        .calculate_project(&project)
        .context("load calculation failed")?;
    result.calculated_at = Some(Utc::now());

    let (dir, stem) = output_base(&args.input_file, args.output_dir.as_deref());
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(&dir)?;
    }

    let results_path = dir.join(format!("{stem}__results.json"));
    fs::write(&results_path, serde_json::to_string_pretty(&result.to_dict())?)?;
    info!(path = %results_path.display(), "results written");

    if args.summary_csv {
        let summary_path = dir.join(format!("{stem}__summary.csv"));
        let mut writer = csv::Writer::from_path(&summary_path)?;
        writer.write_record([
            "space_id",
            "space_name",
            "floor_area_m2",
            "peak_cooling_w",
            "cooling_w_per_m2",
            "peak_heating_w",
            "supply_airflow_m3s",
        ])?;
        for space in &result.space_results {
            writer.write_record([
                space.space_id.clone(),
                space.space_name.clone(),
                format!("{:.2}", space.floor_area),
                format!("{:.1}", space.peak_summary.peak_total_cooling),
                format!("{:.1}", space.peak_summary.cooling_w_per_m2),
                format!("{:.1}", space.peak_summary.peak_sensible_heating),
                format!("{:.4}", space.supply_airflow_cooling),
            ])?;
        }
        writer.flush()?;
        info!(path = %summary_path.display(), "summary written");
    }

    println!(
        "{}: {:.1} kW cooling / {:.1} kW heating over {} spaces",
        result.building_name,
        result.total_cooling_load / 1000.0,
        result.total_heating_load / 1000.0,
        result.num_spaces,
    );

    Ok(())
}

fn extract(args: ExtractArgs) -> anyhow::Result<()> {
    let mut params = ExtractionParams::default();
    if let Some(ppm) = args.pixels_per_metre {
        params.pixels_per_metre = ppm;
    }
    if let Some(height) = args.floor_height {
        params.floor_height_m = height;
    }
    if let Some(gap) = args.gap_threshold {
        params.gap_threshold_m = gap;
    }
    params.detect_openings = !args.no_openings;

    let data =
        fs::read(&args.input_file).with_context(|| format!("could not read {}", args.input_file))?;
    let extractor = GeometryExtractor::new(params);
    let geometry = extractor.extract_from_bytes(&data)?;

    println!(
        "{} rooms, {:.1} m2, {} adjacencies, {} openings",
        geometry.rooms.len(),
        geometry.total_area_m2,
        geometry.adjacencies.len(),
        geometry.openings.len(),
    );

    let (dir, stem) = output_base(&args.input_file, None);
    let json_path = args
        .json
        .unwrap_or_else(|| dir.join(format!("{stem}__geometry.json")));
    fs::write(&json_path, serde_json::to_string_pretty(&geometry.to_dict())?)?;
    info!(path = %json_path.display(), "geometry written");

    if let Some(gbxml_path) = args.gbxml {
        let mut writer = GbXmlWriter::new(stem.clone(), None);
        writer.from_extracted_geometry(&geometry, "Ground Floor");
        fs::write(&gbxml_path, writer.generate())?;
        info!(path = %gbxml_path.display(), "gbXML written");
    }

    if let Some(mesh_path) = args.mesh {
        fs::write(&mesh_path, write_obj(&geometry))?;
        info!(path = %mesh_path.display(), "preview mesh written");
    }

    if let Some(debug_dir) = args.debug_dir {
        fs::create_dir_all(&debug_dir)?;
        for (stage, png) in &geometry.debug_images {
            let path = debug_dir.join(format!("{stem}__{stage}.png"));
            fs::write(&path, png)?;
        }
        info!(dir = %debug_dir.display(), "debug rasters written");
    }

    Ok(())
}
