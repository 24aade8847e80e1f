// File: crates/demo/src/main.rs
// Summary: Demo CLI: renders the life-table chart to SVG at one or more container
// widths, exports rows, lists selector facets and checks the backend.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::export::DEFAULT_STEM;
use chart_core::normalize::chartable_rows;
use chart_core::{
    export, load_records, ChartView, Dimension, ExportFormat, ExportScope, Facets, FrameKind, MortalityRecord,
    NormalizeOptions, RenderOptions, Selection, ValueTransform,
};
use chart_source::{ApiClient, ApiConfig, FilterParams, ForecastModel};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "mortality-chart", version, about = "Mortality rate charts from life-table rows")]
struct Cli {
    /// Backend root URL
    #[arg(long, global = true, env = "SIGERIP_API_URL")]
    api_url: Option<String>,

    /// Path prefix of the data endpoints
    #[arg(long, global = true, env = "SIGERIP_API_PREFIX")]
    api_prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the chart to SVG, one file per width
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Container widths to lay out for (repeatable)
        #[arg(short, long = "width", default_values_t = [800.0])]
        widths: Vec<f64>,

        #[arg(long, value_enum, default_value_t = DimensionArg::Age)]
        dimension: DimensionArg,

        #[arg(long, value_enum, default_value_t = TransformArg::Log10)]
        transform: TransformArg,

        /// Theme preset (light, dark)
        #[arg(long, default_value = "light")]
        theme: String,

        /// Leave out the stroke reveal animation
        #[arg(long = "static")]
        static_svg: bool,

        /// Output file; the width is appended when several widths are given
        #[arg(short, long, default_value = "target/out/mortalidade.svg")]
        out: PathBuf,
    },

    /// Export rows to CSV or JSON
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Export every loaded row instead of the filtered selection
        #[arg(long)]
        full: bool,

        #[arg(long, default_value = DEFAULT_STEM)]
        stem: String,

        #[arg(long, default_value = "target/out")]
        out_dir: PathBuf,
    },

    /// List the localities, years and age bands available
    Facets {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check backend health and database status
    Status,
}

#[derive(Args)]
struct SourceArgs {
    /// CSV or JSON file with life-table rows; the backend is queried when absent
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Forecast model to chart instead of the observed life table (backend only)
    #[arg(long)]
    model: Option<String>,

    #[arg(short, long)]
    local: Option<String>,

    #[arg(short = 'y', long)]
    ano: Option<i32>,

    /// Age band, for the over-time chart
    #[arg(short = 'f', long)]
    faixa: Option<String>,
}

impl SourceArgs {
    fn selection(&self) -> Selection {
        Selection { locality: self.local.clone(), year: self.ano, age_band: self.faixa.clone() }
    }

    fn params(&self) -> FilterParams {
        let mut p = match self.ano {
            Some(y) => FilterParams::year(y),
            None => FilterParams::default(),
        };
        p.local = self.local.clone();
        p.faixa_etaria = self.faixa.clone();
        p
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DimensionArg {
    Age,
    Year,
}

#[derive(Clone, Copy, ValueEnum)]
enum TransformArg {
    Log10,
    Ln,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = api_config(&cli)?;
    match cli.command {
        Command::Render { source, widths, dimension, transform, theme, static_svg, out } => {
            let options = RenderOptions {
                normalize: NormalizeOptions {
                    dimension: match dimension {
                        DimensionArg::Age => Dimension::AgeBand,
                        DimensionArg::Year => Dimension::Year,
                    },
                    transform: match transform {
                        TransformArg::Log10 => ValueTransform::Log10,
                        TransformArg::Ln => ValueTransform::Ln,
                    },
                },
                theme: chart_core::theme::find(&theme),
                animate: !static_svg,
                ..RenderOptions::default()
            };
            let rows = load_rows(&source, &config)?;
            render(rows, source.selection(), options, &widths, &out)
        }
        Command::Export { source, format, full, stem, out_dir } => {
            let rows = load_rows(&source, &config)?;
            let format = match format {
                FormatArg::Csv => ExportFormat::Csv,
                FormatArg::Json => ExportFormat::Json,
            };
            export_rows(&rows, &source.selection(), format, full, &stem, &out_dir)
        }
        Command::Facets { source } => {
            let rows = load_rows(&source, &config)?;
            let facets = Facets::collect(&rows);
            println!("Locais: {}", facets.localities.join(", "));
            println!("Anos: {}", facets.years.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", "));
            println!("Faixas etárias: {}", facets.age_bands.join(", "));
            Ok(())
        }
        Command::Status => {
            let client = ApiClient::new(config)?;
            let health = client.health().context("health check failed")?;
            println!("health: {}", serde_json::to_string_pretty(&health)?);
            let status = client.database_status().context("database status failed")?;
            println!(
                "database: {} ({}), {} records, has_data={}",
                status.database, status.database_file, status.total_records, status.has_data
            );
            for (table, count) in &status.tables {
                println!("  {table}: {count}");
            }
            Ok(())
        }
    }
}

fn api_config(cli: &Cli) -> Result<ApiConfig> {
    let mut config = ApiConfig::from_env().context("reading API configuration")?;
    if let Some(url) = &cli.api_url { config.base_url = url.clone(); }
    if let Some(prefix) = &cli.api_prefix { config.prefix = prefix.clone(); }
    Ok(config)
}

/// Rows from the file when given, otherwise from the backend.
fn load_rows(source: &SourceArgs, config: &ApiConfig) -> Result<Vec<MortalityRecord>> {
    if let Some(path) = &source.input {
        let rows = load_records(path).with_context(|| format!("failed to load '{}'", path.display()))?;
        println!("Loaded {} rows from {}", rows.len(), path.display());
        return Ok(rows);
    }

    let client = ApiClient::new(config.clone())?;
    let params = source.params();
    let rows: Vec<MortalityRecord> = match source.model.as_deref() {
        Some(name) => {
            let model = ForecastModel::from_name(name).with_context(|| format!("unknown forecast model '{name}'"))?;
            let rows = client.forecasts(model, &params).with_context(|| format!("fetching {} forecasts", model.name()))?;
            // Forecast rows chart and export through the life-table shape.
            rows.into_iter()
                .map(|f| {
                    // Forecast tables have no locality column; they belong to the requested one.
                    let locality = match (f.locality.is_empty(), &source.local) {
                        (true, Some(local)) => local.clone(),
                        _ => f.locality,
                    };
                    let mut r = MortalityRecord::new(f.year, locality, f.group, f.age_band, f.value);
                    r.id = f.id;
                    r.extra = f.extra;
                    if let Some(lo) = f.lower { r.extra.insert("lower_95".into(), lo.into()); }
                    if let Some(hi) = f.upper { r.extra.insert("upper_95".into(), hi.into()); }
                    r
                })
                .collect()
        }
        None => client.life_table(&params).context("fetching life table")?,
    };
    println!("Fetched {} rows from {}", rows.len(), config.base_url);
    Ok(rows)
}

fn render(
    rows: Vec<MortalityRecord>,
    selection: Selection,
    options: RenderOptions,
    widths: &[f64],
    out: &Path,
) -> Result<()> {
    let mut view = ChartView::new(options);
    view.set_records(rows)?;
    view.set_selection(selection)?;

    for &width in widths {
        let frame = match view.observe_width(width)? {
            Some(frame) => frame,
            None => view.render()?,
        };
        let path = if widths.len() > 1 { out_name_with(out, &format!("{}", width.round() as i64)) } else { out.to_path_buf() };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, frame.svg.as_bytes()).with_context(|| format!("writing '{}'", path.display()))?;
        let note = if frame.kind == FrameKind::Placeholder { " (no chartable rows)" } else { "" };
        println!(
            "Wrote {} [{}x{}{}]{note}",
            path.display(),
            frame.viewport.width,
            frame.viewport.height,
            if frame.viewport.is_mobile { ", mobile" } else { "" }
        );
    }
    Ok(())
}

fn export_rows(
    rows: &[MortalityRecord],
    selection: &Selection,
    format: ExportFormat,
    full: bool,
    stem: &str,
    out_dir: &Path,
) -> Result<()> {
    let (subset, scope): (Vec<MortalityRecord>, _) = if full {
        (rows.to_vec(), ExportScope::Full)
    } else {
        let matching = rows.iter().filter(|r| selection.matches(*r)).cloned().collect();
        (matching, ExportScope::Filtered)
    };
    tracing::debug!(chartable = chartable_rows(&subset, selection).len(), "rows in export");
    let file = export(&subset, format, stem, scope).context("nothing to export for this selection")?;
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&file.filename);
    std::fs::write(&path, &file.bytes)?;
    println!("Wrote {} ({} rows, {})", path.display(), subset.len(), file.mime_type);
    Ok(())
}

fn out_name_with(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("svg");
    path.with_file_name(format!("{stem}_{suffix}.{ext}"))
}
