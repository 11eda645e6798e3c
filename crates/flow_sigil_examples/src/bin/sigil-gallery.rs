use std::path::PathBuf;

use flow_sigil::prelude::*;
use flow_sigil_examples::{init_tracing, random_identifier, render_sigil_to_png};
use image::{imageops, RgbaImage};
use rand::rngs::ChaCha8Rng;
use rand::SeedableRng;

const TILE: u32 = 200;
const COLUMNS: u32 = 4;
const ROWS: u32 = 4;

/// Renders a grid of sigils for pseudo-random identifiers plus a contact sheet.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let out_dir = PathBuf::from(format!("{}/target/gallery", env!("CARGO_MANIFEST_DIR")));
    let mut rng = ChaCha8Rng::seed_from_u64(0x5161);
    let mut sheet = RgbaImage::new(TILE * COLUMNS, TILE * ROWS);

    for i in 0..COLUMNS * ROWS {
        let identifier = random_identifier(&mut rng).to_string();
        let path = out_dir.join(format!("{i:02}-{}.png", &identifier[..8]));
        let summary = render_sigil_to_png(&identifier, SigilConfig::new(TILE), &path)?;
        tracing::info!(
            %identifier,
            layout = %summary.layout,
            curves = summary.curves,
            "Tile {i} done."
        );

        let tile = image::open(&path)?.to_rgba8();
        let (x, y) = ((i % COLUMNS) * TILE, (i / COLUMNS) * TILE);
        imageops::overlay(&mut sheet, &tile, x as i64, y as i64);
    }

    let sheet_path = out_dir.join("sheet.png");
    sheet.save(&sheet_path)?;
    println!("Wrote {}", sheet_path.display());
    Ok(())
}

