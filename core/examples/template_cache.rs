//! Wires the builtin loaders, a resolver and the logging decorator into
//! a small template/config setup.
//!
//! Run with `cargo run --example template_cache`.

use std::fs;
use std::sync::Arc;
use std::time::SystemTime;

use lodestone::prelude::*;

struct PrintListener(&'static str);

impl Listener for PrintListener {
    fn on_loaded(&self, resource: &Resource) {
        println!("[{}] loaded {resource}", self.0);
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    let workdir = tempfile::tempdir().expect("temp dir");
    fs::write(workdir.path().join("header.html"), "<header/>").expect("fixture");
    fs::write(workdir.path().join("footer.html"), "<footer/>").expect("fixture");

    let templates = Arc::new(FileLoader::new(vec![workdir.path().to_path_buf()]));
    templates.add_listener(Arc::new(PrintListener("templates")));

    let configs = Arc::new(InMemoryLoader::new());
    configs.insert("conf:app", "debug = true");
    configs.add_listener(Arc::new(PrintListener("configs")));

    // Requests the template loader cannot serve fall through to the
    // resolver, which delegates to the config loader.
    templates.set_resolver(Arc::new(LoaderResolver::new(vec![
        configs.clone() as Arc<dyn Loader>,
    ])));

    let front = LoggingLoader::new(templates.clone());

    front.import(&"header.html".into()).expect("local load");
    front.import(&"conf:app".into()).expect("delegated load");
    front
        .load(&"*.html".into(), LoadMode::All)
        .expect("load everything");

    let header = Resource::new("header.html");
    println!(
        "header fresh: {}",
        front.is_valid(&header, SystemTime::now())
    );
    println!(
        "header artifact: {}",
        templates.artifact(&header).expect("cached").content
    );
}
