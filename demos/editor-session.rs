use segdesc::{
    SegdescError,
    utils::{
        BoundsSummary,
        editor::{Editor, EditorAction, TypeBit},
    },
    x86::{CodeSize, Granularity, SegmentType},
};

fn show(editor: &Editor) {
    let descriptor = editor.current();

    println!("  {descriptor}");
    println!("  bytes:  {}", editor.bytes());
    println!("  bounds: {}", BoundsSummary::new(descriptor));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let mut editor = Editor::new();
    println!("initial:");
    show(&editor);

    // Build a ring 3 data segment at 0x0040_0000 spanning 1 MiB.
    let actions = [
        EditorAction::ChangeType(SegmentType::Data),
        EditorAction::SetRing(3),
        EditorAction::SetBase("0x0040_0000"),
        EditorAction::SetLimit("0xff"),
        EditorAction::SetGranularity(Granularity::Page4K),
        EditorAction::SetTypeBit(TypeBit::ReadWrite, true),
    ];

    for action in actions {
        editor.update(action)?;
    }

    println!("user data:");
    show(&editor);

    // Toggling the present flag keeps the configuration around.
    editor.update(EditorAction::SetPresent(false))?;
    println!("not present:");
    show(&editor);

    editor.update(EditorAction::SetPresent(true))?;
    println!("present again:");
    show(&editor);

    // Switching to 64-bit code drops the fields long mode ignores.
    editor.update(EditorAction::ChangeType(SegmentType::Code))?;
    editor.update(EditorAction::SetCodeSize(CodeSize::Bits64))?;
    println!("64-bit code:");
    show(&editor);

    // Invalid input is rejected and leaves the session untouched.
    match editor.update(EditorAction::SetLimit("0x10_0000")) {
        Err(SegdescError::TooLarge { value, max }) => {
            println!("rejected limit {value:#x} (max {max:#x})");
        }
        result => result?,
    }

    Ok(())
}
