use anyhow::Result;
use cache::FileCache;
use config::Config;
use dbus::DBusNotifier;
use mixer::Amixer;

mod app;
mod cache;
mod config;
mod dbus;
mod mixer;
mod presentation;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mixer = Amixer::new(&config.mixer_program, config.call_timeout);
    let notifier = DBusNotifier::new(&config.app_name, config.call_timeout);
    let cache = FileCache::new(&config.cache_dir);

    app::run(&args, &mixer, &notifier, &cache, config.cache_timeout).await?;

    Ok(())
}
