use segdesc::{
    Hex, parse_descriptor,
    utils::{BoundsSummary, format_bytes},
    x86::SegmentAttributes,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let values = std::env::args().skip(1).collect::<Vec<_>>();
    if values.is_empty() {
        eprintln!("usage: decode <descriptor>...");
        eprintln!("example: decode 0x00cf9a000000ffff 00af9a000000ffffh");
        return Ok(());
    }

    for text in &values {
        let descriptor = parse_descriptor(text)?;

        println!("{descriptor}");
        println!("  bytes:      {}", format_bytes(descriptor.encode()));
        println!("  type:       {}", descriptor.segment_type());

        match descriptor.attributes() {
            SegmentAttributes::NotPresent => {}
            SegmentAttributes::System(system) => {
                println!("  system:     {}", system.system_type());
            }
            SegmentAttributes::Code(code) => {
                println!(
                    "  code:       accessed={} readable={} conforming={}",
                    code.accessed, code.readable, code.conforming
                );
            }
            SegmentAttributes::Data(data) => {
                println!(
                    "  data:       accessed={} writable={} expand_down={}",
                    data.accessed, data.writable, data.expand_down
                );
            }
        }

        if let Some(code_size) = descriptor.code_size() {
            println!("  size:       {code_size}");
        }

        println!("  flags:      {:?}", descriptor.flags());
        println!("  bounds:     {}", BoundsSummary::new(&descriptor));

        let notes = descriptor
            .configuration_notes()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        println!("  notes:      {}", notes.join(", "));

        tracing::debug!(value = %Hex(descriptor.encode()), valid = descriptor.is_valid());
    }

    Ok(())
}
