use clap::Parser;
use std::rc::Rc;
use twelvedays_core::{ScratchConfig, SpoilerPolicy};
use wasm_bindgen::prelude::*;

mod app;
mod board;
mod canvas;
mod catalog;
mod detail;
mod input;
mod matching;
mod spoiler;
mod utils;

/// Runtime overrides, read from the location hash, e.g. `#-vv&--threshold=0.5`.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Cleared fraction of the cover needed to reveal a card
    #[arg(long)]
    threshold: Option<f64>,

    /// Smallest brush radius, in CSS pixels
    #[arg(long)]
    brush_min: Option<f64>,

    /// Only every Nth pixel is sampled by the reveal check
    #[arg(long)]
    sample_stride: Option<usize>,

    /// Remember accepted spoiler warnings instead of asking every time
    #[arg(long)]
    remember_spoilers: bool,
}

impl Args {
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn config(&self) -> ScratchConfig {
        let mut config = ScratchConfig::default();
        if let Some(threshold) = self.threshold {
            config.reveal_threshold = threshold;
        }
        if let Some(min_radius) = self.brush_min {
            config.brush.min_radius = min_radius;
        }
        if let Some(stride) = self.sample_stride {
            config.sample_stride = stride;
        }
        if self.remember_spoilers {
            config.spoiler_policy = SpoilerPolicy::Remember;
        }
        config.sanitized()
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, arg_error) = match Args::from_hash(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = arg_error {
        log::warn!("ignoring location hash arguments: {}", err);
    }

    let config = args.config();
    log::debug!("config: {:?}", config);

    let site = match catalog::SiteData::embedded() {
        Ok(site) => site,
        Err(err) => {
            log::error!("bottle catalog is broken: {}", err);
            return;
        }
    };

    let Some(root) = document().get_element_by_id("app") else {
        log::error!("Could not find id=\"app\" element");
        return;
    };

    log::debug!("App started");
    let props = app::AppProps {
        config,
        catalog: Rc::new(site.catalog),
        links: Rc::new(site.links),
    };
    yew::Renderer::<app::App>::with_root_and_props(root, props).render();
}
