use segdesc::{Hex, utils::presets::PRESETS};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    for preset in PRESETS {
        let descriptor = preset.descriptor();

        let notes = descriptor
            .configuration_notes()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        println!(
            "{:<14} {} {:<10} {}",
            preset.name,
            Hex(preset.value),
            notes.join(", "),
            preset.description
        );
    }

    tracing::info!(count = PRESETS.len(), "listed presets");
}
