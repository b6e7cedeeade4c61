//! Host-side helper: `cargo run` builds the WASM package into `static/pkg` and
//! serves `static/` on a local HTTP server.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use log::{error, info, warn};
    use std::process::{Command, ExitCode};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = std::env::var("VIZ_PORT").unwrap_or_else(|_| "8000".to_string());

    info!("building wasm package");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => {
            error!("wasm-pack exited with {st}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            warn!("wasm-pack not runnable ({e}); serving whatever is already in static/pkg");
        }
    }

    info!("serving http://127.0.0.1:{port}");
    match Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .status()
    {
        Ok(st) if st.success() => ExitCode::SUCCESS,
        Ok(st) => {
            error!("http server exited with {st}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("could not start http server: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
