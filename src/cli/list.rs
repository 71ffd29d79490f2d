use crate::cli::{GlobalOptions, Session};
use modman::core::ModmanResult;
use modman::di::RegistryStore;

pub fn run(options: &GlobalOptions, json: bool) -> ModmanResult<()> {
    let session = Session::open(options, false)?;
    print!("{}", render(session.services.registry_store.as_ref(), json)?);
    Ok(())
}

/// `[position] name` lines with indented descriptions, or a JSON array
fn render(store: &dyn RegistryStore, json: bool) -> ModmanResult<String> {
    let registry = store.load()?;

    if json {
        let text = serde_json::to_string_pretty(registry.list()).map_err(std::io::Error::from)?;
        return Ok(format!("{}\n", text));
    }

    let mut out = String::new();
    for (position, record) in registry.list().iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", position, record.display_name));
        if let Some(description) = &record.description {
            out.push_str(&format!("  {}\n", description));
        }
    }
    Ok(out)
}
