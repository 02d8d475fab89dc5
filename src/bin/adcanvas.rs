use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use adcanvas::{
    AdCategory, AspectRatio, Compositor, CreativeAssets, CreativeText, EditorSession,
    ExportFormat, ExportOpts, GeneratedCreative, ImageSource, KeywordDecorations, LayoutRequest,
    NoRemoteRemover, PaletteProvider, RenderOpts, SeedPalette, SeededRandom, SessionInputs,
    TemplateFamily, ViewportOpts, dominant_colors, encode_data_url, export_all, generate,
    remove_background_or_fallback,
};

const DEFAULT_PRIMARY_HEX: &str = "#3B82F6";
const DEFAULT_SECONDARY_HEX: &str = "#93C5FD";

#[derive(Parser, Debug)]
#[command(name = "adcanvas", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and render one creative per aspect ratio.
    Generate(GenerateArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Png,
    Jpeg,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Product photo.
    #[arg(long)]
    packshot: PathBuf,

    /// Brand logo.
    #[arg(long)]
    logo: PathBuf,

    /// Decorative image; repeat for several.
    #[arg(long = "decor")]
    decor: Vec<PathBuf>,

    /// Headline copy.
    #[arg(long)]
    headline: String,

    /// Call to action label; empty hides the button.
    #[arg(long, default_value = "Shop Now")]
    cta: String,

    /// Optional secondary text.
    #[arg(long)]
    additional_text: Option<String>,

    /// Brand color. The default triggers sampling the logo's dominant colors.
    #[arg(long, default_value = DEFAULT_PRIMARY_HEX)]
    primary: String,

    /// Secondary palette color.
    #[arg(long, default_value = DEFAULT_SECONDARY_HEX)]
    secondary: String,

    /// Aspect ratio (`1:1`, `9:16`, `1.91:1`); repeat for several. Defaults to all.
    #[arg(long = "ratio")]
    ratios: Vec<AspectRatio>,

    /// Pin a template family instead of picking one at random per ratio.
    #[arg(long)]
    template: Option<TemplateFamily>,

    /// Advertising category label, e.g. `product-based` or `lifestyle`.
    #[arg(long, default_value = "product-based")]
    category: String,

    /// Seed for template picks, glyph colors and noise.
    #[arg(long)]
    seed: Option<u64>,

    /// TTF/OTF font used for all text. Defaults to an installed sans-serif font.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutFormat::Jpeg)]
    format: OutFormat,

    /// JPEG size budget in kilobytes.
    #[arg(long, default_value_t = 500)]
    max_kb: u32,

    /// Pause between written files, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pause_ms: u64,

    /// Keep image backgrounds instead of keying them out.
    #[arg(long, default_value_t = false)]
    keep_background: bool,

    /// Also write each layout as `layout-<ratio>.json`.
    #[arg(long, default_value_t = false)]
    dump_layout: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
    }
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let packshot_raw = read(&args.packshot)?;
    let logo_raw = read(&args.logo)?;
    let decor_raw = args
        .decor
        .iter()
        .map(|p| read(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let cut = |bytes: &[u8]| -> Vec<u8> {
        if args.keep_background {
            bytes.to_vec()
        } else {
            remove_background_or_fallback(&NoRemoteRemover, bytes)
        }
    };
    let packshot = cut(&packshot_raw);
    let logo = cut(&logo_raw);
    let decorative_images: Vec<String> = decor_raw
        .iter()
        .map(|bytes| encode_data_url("image/png", &cut(bytes)))
        .collect();

    let (primary, secondary) = if args.primary.eq_ignore_ascii_case(DEFAULT_PRIMARY_HEX) {
        sample_logo_colors(&logo_raw, &args.secondary)
    } else {
        (args.primary.clone(), args.secondary.clone())
    };
    let palette = SeedPalette::with_secondary(secondary).palette_for(&primary);

    let category = AdCategory::from_label(&args.category);
    if category.is_none() {
        tracing::warn!(label = %args.category, "unknown category, using the default texture");
    }

    let ratios = if args.ratios.is_empty() {
        AspectRatio::ALL.to_vec()
    } else {
        args.ratios.clone()
    };

    let mut rng = match args.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };

    let text = CreativeText {
        headline: args.headline.clone(),
        cta: args.cta.clone(),
        additional_text: args.additional_text.clone(),
    };

    let creatives: Vec<GeneratedCreative> = ratios
        .iter()
        .map(|&ratio| {
            let req = LayoutRequest {
                ratio,
                template: args.template,
                palette: &palette,
                headline: &text.headline,
                decorative_images: &decorative_images,
                category,
                additional_text: text.additional_text.as_deref(),
            };
            GeneratedCreative::new(generate(&req, &KeywordDecorations, &mut rng))
        })
        .collect();

    if args.dump_layout {
        std::fs::create_dir_all(&args.out)
            .with_context(|| format!("create output dir '{}'", args.out.display()))?;
        for creative in &creatives {
            let path = args
                .out
                .join(format!("layout-{}.json", creative.ratio.slug()));
            let json = serde_json::to_vec_pretty(&creative.layout).context("serialize layout")?;
            std::fs::write(&path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
    }

    let opts = RenderOpts {
        noise_seed: args.seed,
        ..RenderOpts::from_env()
    };
    let mut compositor = match &args.font {
        Some(path) => Compositor::with_font_bytes(opts, Arc::new(read(path)?))
            .with_context(|| format!("load font '{}'", path.display()))?,
        None => Compositor::new(opts).context("no --font given and no system font found")?,
    };

    let inputs = SessionInputs {
        assets: CreativeAssets {
            packshot: ImageSource::from(packshot),
            logo: ImageSource::from(logo),
        },
        text,
        palette,
        category,
        decorative_images,
    };
    let mut session = EditorSession::new(creatives, inputs, ViewportOpts::default())?;

    let export = ExportOpts {
        pause: Duration::from_millis(args.pause_ms),
        max_kb: args.max_kb,
        format: match args.format {
            OutFormat::Png => ExportFormat::Png,
            OutFormat::Jpeg => ExportFormat::Jpeg,
        },
    };
    for path in export_all(&mut session, &mut compositor, &args.out, &export)? {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

/// Primary and secondary colors sampled from the logo, falling back to `secondary` when
/// only one color stands out.
fn sample_logo_colors(logo: &[u8], secondary: &str) -> (String, String) {
    match image::load_from_memory(logo) {
        Ok(img) => {
            let colors = dominant_colors(&img, 2);
            let primary = colors
                .first()
                .map_or_else(|| DEFAULT_PRIMARY_HEX.to_owned(), |c| c.to_hex());
            let secondary = colors
                .get(1)
                .map_or_else(|| secondary.to_owned(), |c| c.to_hex());
            (primary, secondary)
        }
        Err(err) => {
            tracing::warn!(%err, "cannot decode logo for color sampling");
            (DEFAULT_PRIMARY_HEX.to_owned(), secondary.to_owned())
        }
    }
}
