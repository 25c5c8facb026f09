use anyhow::Result;
use mfw_infrastructure::MfwPaths;
use mfw_infrastructure::paths::CONFIG_DIR_ENV;

pub fn show(paths: &MfwPaths) -> Result<()> {
    println!("📁 Config dir:  {}", paths.config_dir()?.display());
    println!("⚙️  Config file: {}", paths.config_file()?.display());
    println!("🔑 Secret file: {}", paths.secret_file()?.display());
    println!("📜 Logs dir:    {}", paths.logs_dir()?.display());
    println!("\n💡 Set {} to use a different directory.", CONFIG_DIR_ENV);
    Ok(())
}
