use std::env;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        let port = raw_args
            .get(2)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        if let Err(e) = fund_compare::api::run_http_server(port).await {
            log::error!("server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    match fund_compare::api::run_cli(raw_args) {
        Ok(report) => print!("{report}"),
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Usage: fund-compare [OPTIONS] | fund-compare serve [port]");
            std::process::exit(1);
        }
    }
}
