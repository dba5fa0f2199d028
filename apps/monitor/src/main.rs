mod banner;
mod config;
mod draw;
mod window;

use std::path::{Path, PathBuf};

use log::{info, warn};
use posture_base::{init_stdout_logger, log_fatal};
use posture_camera::{CameraConfig, V4l2Camera};
use posture_core::{AngleBounds, ExitReason, PostureClassifier, monitor};
use posture_infer::{Device, ModelSource, OnnxBackend, YoloPoseEstimator};

use crate::config::MonitorConfig;
use crate::window::PreviewWindow;

const CONFIG_PATH: &str = "posture.toml";
const WINDOW_TITLE: &str = "Posture Monitor - ESC to exit";

#[tokio::main]
async fn main() {
    init_stdout_logger();

    let config_path = Path::new(CONFIG_PATH);
    let config = match MonitorConfig::load_or_default(config_path) {
        Ok(config) => config,
        Err(err) => log_fatal!("cannot read {CONFIG_PATH}: {err}"),
    };
    if !config_path.exists() {
        // First run: leave an editable config template behind.
        if let Err(err) = config.save(config_path) {
            warn!("cannot write default {CONFIG_PATH}: {err}");
        }
    }

    let model_path = match std::env::var("POSTURE_MODEL_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from(&config.model_path),
    };

    info!("opening camera {}", config.camera_device);
    let camera_config = CameraConfig::default()
        .with_device(config.camera_device.clone())
        .with_width(config.camera_width)
        .with_height(config.camera_height)
        .with_fps(config.camera_fps);
    let camera = match V4l2Camera::new(camera_config) {
        Ok(camera) => camera,
        Err(err) => log_fatal!("cannot open camera {}: {err}", config.camera_device),
    };

    let device = if config.use_cuda {
        Device::Cuda {
            device_id: config.cuda_device_id,
        }
    } else {
        Device::Cpu
    };
    info!("loading pose model {} on {device}", model_path.display());
    let backend = OnnxBackend::new(device);
    let mut estimator = match YoloPoseEstimator::new(ModelSource::File(model_path), &backend) {
        Ok(estimator) => estimator,
        Err(err) => log_fatal!("cannot load pose model: {err}"),
    };

    let classifier = PostureClassifier::new(
        AngleBounds {
            min_deg: config.good_angle_min_deg,
            max_deg: config.good_angle_max_deg,
        },
        config.min_keypoint_visibility,
    );

    let (width, height) = (config.camera_width as usize, config.camera_height as usize);
    let mut surface = match PreviewWindow::new(
        WINDOW_TITLE,
        width,
        height,
        config.camera_fps,
        config.min_keypoint_visibility,
    ) {
        Ok(surface) => surface,
        Err(err) => log_fatal!("cannot create preview window: {err}"),
    };
    if let Err(err) = surface.splash(width, height) {
        log_fatal!("cannot present preview window: {err}");
    }

    match monitor::run(camera, &mut estimator, &mut surface, &classifier).await {
        Ok(exit) => {
            info!("monitor stopped after {} frames ({:?})", exit.frames, exit.reason);
            if exit.reason == ExitReason::SourceFailed {
                std::process::exit(1);
            }
        }
        Err(err) => log_fatal!("monitor failed: {err}"),
    }
}
