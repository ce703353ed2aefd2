use clap::{Parser, Subcommand};
use moldura::editor::Editor;
use moldura::templates::{Template, TemplateId};
use moldura::{config, delivery};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moldura")]
#[command(about = "Composite photos into promotional overlay frames")]
#[command(long_about = "\
Composite photos into promotional overlay frames

A photo is cover-fitted into the template's safe zone, optionally zoomed
and panned, clipped to the zone, and flattened under the overlay graphic
into a PNG sized for upload.

Templates:

  feed            1080x1350, zoom only
  story           1080x1920, zoom and pan
  story-centered  1080x1920 square window, zoom and pan

Overlay assets are resolved from moldura.toml (or its defaults) in the
config directory. Run 'moldura gen-config' to generate a documented
moldura.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing moldura.toml and the asset directory
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Composite a photo into a template and write the export
    Compose {
        /// Photo to composite (jpg or png)
        #[arg(long)]
        photo: PathBuf,

        /// Template variant
        #[arg(long, default_value = "feed")]
        template: TemplateId,

        /// Zoom factor, clamped to 0.5..=3.0
        #[arg(long, default_value_t = 1.0)]
        scale: f64,

        /// Horizontal pan in canvas pixels (pan-enabled templates only)
        #[arg(long, default_value_t = 0.0)]
        offset_x: f64,

        /// Vertical pan in canvas pixels (pan-enabled templates only)
        #[arg(long, default_value_t = 0.0)]
        offset_y: f64,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the registered templates as JSON
    Templates,
    /// Print a stock moldura.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compose {
            photo,
            template,
            scale,
            offset_x,
            offset_y,
            out,
        } => {
            let studio = config::load_config(&cli.config_dir)?;

            let mut editor = Editor::new(template);
            editor.set_export_filename(studio.export_filename(template));

            let overlay_path = cli.config_dir.join(studio.overlay_path(template));
            let overlay_bytes = std::fs::read(&overlay_path)
                .map_err(|e| format!("cannot read overlay {}: {e}", overlay_path.display()))?;
            editor.load_overlay(&overlay_bytes)?;

            let photo_bytes = std::fs::read(&photo)
                .map_err(|e| format!("cannot read photo {}: {e}", photo.display()))?;
            editor.select_file(mime_for(&photo), &photo_bytes)?;

            editor.set_zoom(scale)?;
            editor.set_offset(offset_x, offset_y)?;

            let output_dir = out.unwrap_or_else(|| cli.config_dir.join(&studio.output_dir));
            match editor.export_and_deliver(None, &output_dir)? {
                delivery::Delivered::Saved(path) => {
                    println!("==> Saved {}", path.display());
                }
                delivery::Delivered::Shared => {
                    println!("==> Shared");
                }
            }
        }
        Command::Templates => {
            let templates: Vec<&Template> = Template::all().collect();
            println!("{}", serde_json::to_string_pretty(&templates)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Infer the upload MIME type from the photo's extension, the same signal a
/// file picker would report. Unknown extensions pass through and fail
/// upstream validation.
fn mime_for(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
