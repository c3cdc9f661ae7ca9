use std::io::Cursor;

use binrw::BinRead;
use waymark_presets::WaymarkPreset;
use waymark_presets::config::get_config;
use waymark_presets::ipc::FieldMarkerPreset;
use waymark_presets::preset::ZoneNameResolver;

/// There's no game data to look names up in, so just show the id.
fn zone_id_only(zone_id: u16, _show_id: bool) -> Result<String, Box<dyn std::error::Error>> {
    Ok(format!("#{zone_id}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage: waymark-tool <file> [--json]");
        std::process::exit(1);
    };
    let as_json = args.iter().skip(2).any(|arg| arg == "--json");

    let config = get_config()?;

    tracing::info!("Reading presets from {path}...");
    let buffer = std::fs::read(path)?;

    let records = buffer.chunks_exact(FieldMarkerPreset::SIZE);
    if !records.remainder().is_empty() {
        tracing::warn!(
            "Ignoring {} trailing bytes, that's not enough for another preset!",
            records.remainder().len()
        );
    }

    let resolver: &dyn ZoneNameResolver = &zone_id_only;
    for (index, record) in records.enumerate() {
        let game_preset = FieldMarkerPreset::read_le(&mut Cursor::new(record))?;
        let preset = WaymarkPreset::from_game_preset_localized(&game_preset, &config.localization);

        if as_json {
            println!("{}", preset.to_json(&config.serialization)?);
        } else {
            println!("[{index}]");
            println!(
                "{}",
                preset.describe_localized(Some(resolver), true, &config.localization)
            );
            println!();
        }
    }

    Ok(())
}
