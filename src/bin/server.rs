use std::net::SocketAddr;

use anyhow::Context;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use reactdiff::config::Config;
use reactdiff::presets::PRESETS;
use reactdiff::seed::SeedPolicy;
use reactdiff::{ConfigError, render};

const MAX_DIM: usize = 1024;
const MAX_STEPS: usize = 50_000;
const MAX_FRAMES: usize = 64;

#[derive(Deserialize)]
struct SimulateRequest {
    seed: Option<u64>,
    rows: Option<usize>,
    cols: Option<usize>,
    preset: Option<String>,
    feed: Option<f32>,
    kill: Option<f32>,
    steps: Option<usize>,
    snapshot_every: Option<usize>,
}

#[derive(Serialize)]
struct SimulateResponse {
    frames: Vec<Layer>,
    timings: Vec<TimingEntry>,
    rows: usize,
    cols: usize,
    generation: u64,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Serialize)]
struct PresetEntry {
    index: usize,
    name: &'static str,
    feed: f32,
    kill: f32,
}

type ApiError = (StatusCode, String);

fn bad_request(msg: impl ToString) -> ApiError {
    (StatusCode::BAD_REQUEST, msg.to_string())
}

fn encode_png(rgba: &[u8], rows: usize, cols: usize) -> Result<String, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, cols as u32, rows as u32, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn build_config(req: &SimulateRequest) -> Result<(Config, usize), ConfigError> {
    let defaults = Config::default();
    let rows = req.rows.unwrap_or(defaults.rows).min(MAX_DIM);
    let cols = req.cols.unwrap_or(defaults.cols).min(MAX_DIM);
    let steps = req.steps.unwrap_or(2000).min(MAX_STEPS);
    // At least `steps / MAX_FRAMES` between frames.
    let snapshot_every = req
        .snapshot_every
        .unwrap_or(defaults.snapshot_every)
        .max(steps.div_ceil(MAX_FRAMES));

    let config = Config {
        rows,
        cols,
        preset: req.preset.clone().unwrap_or_else(|| defaults.preset.clone()),
        feed: req.feed,
        kill: req.kill,
        seed: SeedPolicy::RandomInterior {
            seed: req.seed.unwrap_or(42),
        },
        snapshot_every,
        ..defaults
    };
    config.validate()?;
    Ok((config, steps))
}

async fn simulate_handler(
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let (config, steps) = build_config(&req).map_err(|e| {
        warn!("rejected request: {e}");
        bad_request(e)
    })?;

    let response = tokio::task::spawn_blocking(move || -> Result<SimulateResponse, ApiError> {
        let (sim, frames, timings) = reactdiff::run(&config, steps).map_err(bad_request)?;
        let (rows, cols) = (sim.rows(), sim.cols());

        let mut layers = frames
            .iter()
            .map(|f| -> Result<Layer, image::ImageError> {
                Ok(Layer {
                    name: format!("gen_{}", f.generation),
                    data_url: encode_png(&f.rgba, rows, cols)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
        layers.push(Layer {
            name: "palette".into(),
            data_url: encode_png(&render::render_activator(sim.active()), rows, cols)
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
        });

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        Ok(SimulateResponse {
            frames: layers,
            timings: timing_entries,
            rows,
            cols,
            generation: sim.generation(),
        })
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;

    info!(
        "simulated {}x{} for {} generations",
        response.rows, response.cols, response.generation
    );
    Ok(Json(response))
}

async fn presets_handler() -> Json<Vec<PresetEntry>> {
    Json(
        PRESETS
            .iter()
            .enumerate()
            .map(|(index, p)| PresetEntry {
                index,
                name: p.name,
                feed: p.feed,
                kill: p.kill,
            })
            .collect(),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/simulate", post(simulate_handler))
        .route("/api/presets", get(presets_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("reactdiff server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
