use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use pdf_compose::{CandidateFile, ComposeOptions, ImageBatch, encoder, format_byte_size};

#[derive(Parser)]
#[command(name = "pdfc", about = "Compose PNG images into PDF documents", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose PNG images into a single PDF, one image per page
    Convert {
        /// Input PNG file(s) - can specify multiple
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file (defaults to a name derived from the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Page orientation
        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,

        /// Image fit mode
        #[arg(long, default_value = "fit", value_enum)]
        fit: FitArg,

        /// Show per-page placement only, don't generate a PDF
        #[arg(long)]
        layout_only: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    Fit,
    Fill,
    Original,
}

impl From<PaperArg> for pdf_compose::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_compose::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<FitArg> for pdf_compose::FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Fit => Self::Fit,
            FitArg::Fill => Self::Fill,
            FitArg::Original => Self::Original,
        }
    }
}

/// Media type declared for a path, judged by extension
fn media_type_for(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png".to_string(),
        Some(ext) => format!("image/{}", ext.to_ascii_lowercase()),
        None => "application/octet-stream".to_string(),
    }
}

async fn load_candidates(paths: &[PathBuf]) -> Result<Vec<CandidateFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(CandidateFile::new(name, media_type_for(path), bytes));
    }
    Ok(files)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            paper,
            orientation,
            fit,
            layout_only,
        } => {
            let options = ComposeOptions {
                paper_size: paper.into(),
                orientation: orientation.into(),
                fit_mode: fit.into(),
            };

            let candidates = load_candidates(&input).await?;
            let mut batch = ImageBatch::new();
            let added = batch.append(candidates)?;
            if added < input.len() {
                eprintln!("Skipped {} non-PNG file(s)", input.len() - added);
            }

            if layout_only {
                let placements = pdf_compose::preview_layout(batch.images(), &options).await?;
                let (page_w, page_h) = options.page_dimensions_mm();
                println!("Page: {:.1} x {:.1} mm", page_w, page_h);
                for (index, (image, rect)) in batch.images().iter().zip(&placements).enumerate() {
                    println!(
                        "  page {:>3}: {} ({}) -> {:.2} x {:.2} mm at ({:.2}, {:.2})",
                        index + 1,
                        image.name,
                        format_byte_size(image.size_bytes()),
                        rect.width_mm,
                        rect.height_mm,
                        rect.x_mm,
                        rect.y_mm
                    );
                }
                return Ok(());
            }

            let output = output.unwrap_or_else(|| PathBuf::from(batch.suggested_filename()));
            let encoder = encoder::resolve(encoder::PRINTPDF_BACKEND)?;
            let document =
                pdf_compose::assemble_to_file(batch.images(), &options, encoder, &output).await?;
            println!(
                "Composed {} page(s) → {}",
                document.page_count(),
                output.display()
            );
        }
    }

    Ok(())
}
