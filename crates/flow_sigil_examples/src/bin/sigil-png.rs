use flow_sigil::prelude::*;
use flow_sigil_examples::{init_tracing, render_sigil_to_png};

const DEFAULT_IDENTIFIER: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Usage: `sigil-png [IDENTIFIER] [SIZE] [OUTPUT] [LAYOUT]`
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let identifier = args.next().unwrap_or_else(|| DEFAULT_IDENTIFIER.to_owned());
    let size: u32 = match args.next() {
        Some(s) => s.parse()?,
        None => 800,
    };
    let output = args.next().unwrap_or_else(|| "target/sigils/sigil.png".to_owned());

    let mut config = SigilConfig::new(size);
    if let Some(name) = args.next() {
        let layout = LayoutStrategy::ALL
            .into_iter()
            .find(|l| l.name() == name)
            .ok_or_else(|| anyhow::anyhow!("unknown layout '{name}'"))?;
        config = config.with_layout(layout);
    }

    let summary = render_sigil_to_png(&identifier, config, &output)?;
    println!(
        "{identifier}: {} layout, {} curves, {} shapes -> {output}",
        summary.layout, summary.curves, summary.shapes
    );
    Ok(())
}
