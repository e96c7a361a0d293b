use qaminer_core::variants::Identifier;
use qaminer_core::{QaError, VariantRegistry};

pub fn list(details: bool) -> Result<(), QaError> {
    let registry = VariantRegistry::builtin();
    println!("Supported report variants (tried in this order):\n");

    for variant in registry.iter() {
        println!("  {:<12} {}", variant.report_type(), variant.description());
        if details {
            let identifiers: Vec<String> = variant
                .identifiers()
                .iter()
                .map(|id| match id {
                    Identifier::Line(text) => format!("\"{text}\""),
                    Identifier::Substring(text) => format!("*{text}*"),
                })
                .collect();
            println!("               identifiers: {}", identifiers.join(", "));
            let columns: Vec<&str> = variant.columns().iter().map(|c| c.name).collect();
            println!("               columns: {}", columns.join(", "));
        }
        println!();
    }

    if details {
        println!("  \"text\" must be a whole line, *text* may appear anywhere in a line.");
    }
    Ok(())
}
