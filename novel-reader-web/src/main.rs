mod api;
mod app;
mod components;
mod config;
mod dom;
mod logging;
mod storage;

use tracing_subscriber::filter::LevelFilter;

fn main() {
    logging::init(if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    });

    dom::pad_novel_grid(config::site().cards_per_row);
    dom::submit_on_enter("input[name=\"keyword\"]");
    app::mount_islands();
}
