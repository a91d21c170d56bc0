use super::{load_presets, presets_path};

pub fn handle_presets_command(presets_file: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let path = presets_path(presets_file)?;
    let presets = load_presets(presets_file)?;

    let names: Vec<&str> = presets.names().collect();
    if names.is_empty() {
        println!("No presets saved in {}", path.display());
        return Ok(());
    }
    println!("Presets in {}:", path.display());
    for name in names {
        if let Some(spec) = presets.get(name) {
            println!("  {}: {}", name, spec);
        }
    }
    Ok(())
}
