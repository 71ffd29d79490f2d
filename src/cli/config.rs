use crate::cli::{GlobalOptions, Session};
use modman::core::ModmanResult;

/// Print the effective configuration
pub fn show(options: &GlobalOptions) -> ModmanResult<()> {
    let session = Session::open(options, false)?;
    let config = &session.config;
    let dirs = &session.services.directories;

    println!("Config file:        {}", session.config_path.display());
    println!("Registry file:      {}", config.registry_file(&session.config_path).display());
    println!("Library dir:        {}", dirs.library_dir.display());
    println!("Base data dir:      {}", dirs.base_data_dir.display());
    println!("Expansion data dir: {}", dirs.expansion_data_dir.display());
    println!("Runtime dir:        {}", dirs.runtime_dir.display());
    println!("Runtime library:    {}", dirs.runtime_library.display());
    println!("Runtime update URL: {}", config.runtime_update_url);
    println!("Runtime archive:    {}", config.runtime_archive_entry);

    Ok(())
}
