//! Headless picker run: render, replay input, wait for the spawn point.

use std::sync::Arc;

use anyhow::{Context, Result};
use ares_common::{PixelPoint, WorldPoint};
use ares_minimap::{HeadlessHost, MinimapSpawnPlugin, PointerEvent, PointerSender};
use ares_spawn::{NoiseSpaceClassifier, SpaceClassifier, WorldSampler};
use tracing::{info, warn};

use crate::config::EngineConfig;

/// Runs the picker with the noise classifier described by `config`.
pub async fn run(config: &EngineConfig) -> Result<WorldPoint> {
    let classifier = Arc::new(NoiseSpaceClassifier::new(config.spawn.classifier));
    pick(config, classifier).await
}

/// Runs the picker against an arbitrary classifier.
pub async fn pick(
    config: &EngineConfig,
    classifier: Arc<dyn SpaceClassifier>,
) -> Result<WorldPoint> {
    let mut plugin = MinimapSpawnPlugin::new(config.spawn.clone(), &config.world, classifier)?;
    if let Some(logo) = &config.logo {
        plugin = plugin
            .load_logo(logo)
            .with_context(|| format!("loading logo {}", logo.display()))?;
    }

    let host = HeadlessHost::new();
    let sender = plugin.mount(Box::new(host.clone()))?;

    if let Some(path) = &config.backdrop_png {
        plugin
            .surface()
            .save_png(path)
            .with_context(|| format!("writing backdrop {}", path.display()))?;
        info!("Backdrop written to {}", path.display());
    }

    if config.script.is_empty() {
        let target = first_eligible_pixel(&plugin).context("no eligible spawn point on the map")?;
        info!("No pointer script, clicking ({:.1}, {:.1})", target.x, target.y);
        replay(&sender, [PointerEvent::Moved(target), PointerEvent::Clicked(target)]);
    } else {
        info!("Replaying {} scripted pointer events", config.script.len());
        replay(&sender, config.script.iter().copied().map(PointerEvent::from));
    }
    drop(sender);

    let outcome = plugin.run_and_get_user_coords().await;
    plugin.teardown();

    match outcome {
        Ok(point) => {
            info!("Spawn point chosen at {point}");
            Ok(point)
        },
        Err(e) => {
            warn!(
                "No spawn point chosen after {} feedback updates",
                host.view().history.len()
            );
            Err(e.into())
        },
    }
}

/// Sends `inputs` to the plugin, returning how many were delivered.
pub fn replay(sender: &PointerSender, inputs: impl IntoIterator<Item = PointerEvent>) -> usize {
    let mut delivered = 0;
    for input in inputs {
        if sender.send(input) {
            delivered += 1;
        } else {
            warn!("Pointer listener detached, dropped {input:?}");
        }
    }
    delivered
}

/// First sampled pixel whose click would commit.
///
/// Clicks are resolved through the pixel grid, so a sample only counts if
/// its pixel maps back to an eligible world point.
pub fn first_eligible_pixel(plugin: &MinimapSpawnPlugin) -> Option<PixelPoint> {
    let controller = plugin.controller();
    let oracle = controller.oracle();
    let transform = controller.transform();
    let sampler = WorldSampler::new(*plugin.geometry(), plugin.config().sample_step);

    sampler
        .sample(oracle.classifier())
        .filter(|sample| oracle.classify(sample.world_point).is_eligible())
        .map(|sample| {
            let pixel = transform.to_pixel(sample.world_point);
            PixelPoint::new(pixel.x + 0.5, pixel.y + 0.5)
        })
        .find(|pixel| oracle.classify(transform.to_world(*pixel)).is_eligible())
}
