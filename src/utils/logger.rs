use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. The HTTP stack stays at warn even in
/// verbose mode so gate waits are not buried under connection chatter.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "crpt_submit=debug,reqwest=warn,hyper=warn,hyper_util=warn,info"
    } else {
        "crpt_submit=info,warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    // 詳細模式顯示 target 與經過時間，方便觀察等待
    let layer = tracing_subscriber::fmt::layer()
        .with_target(verbose)
        .with_timer(uptime())
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .init();
}

/// One JSON object per event, fields at the top level.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();
}
