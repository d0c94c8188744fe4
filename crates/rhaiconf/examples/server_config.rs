//! Load a typed server configuration from a Rhai snippet.

use rhaiconf::{BindingSet, EvalOptions, eval_ext_to};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ServerConfig {
    bind: String,
    workers: i64,
    request_timeout_secs: f64,
}

const SOURCE: &str = r#"
let cores = 4;

config::value(#{
    bind: net::loopback(8080),
    workers: cores * 2,
    request_timeout_secs: defaults::request_timeout_secs,
})
"#;

fn main() -> rhaiconf::Result<()> {
    let mut net = BindingSet::new("net");
    net.module_mut()
        .set_native_fn("loopback", |port: i64| Ok(format!("127.0.0.1:{port}")));

    let defaults = BindingSet::new("defaults").with_value("request_timeout_secs", 30.0_f64);

    let mut config = ServerConfig::default();
    eval_ext_to(&mut config, SOURCE, EvalOptions::default(), [net, defaults])?;

    println!("{config:#?}");
    Ok(())
}
