use bevy::log::info;
use bevy::render::renderer::RenderAdapterInfo;

/// One-shot capability probe, resolved at startup and never retried.
///
/// Bevy only inserts `RenderAdapterInfo` into the main world when wgpu
/// produced a usable adapter, so presence of the resource is the detection
/// signal; there is nothing else to allocate.
pub(crate) fn probe(adapter: Option<&RenderAdapterInfo>) -> bool {
    match adapter {
        Some(info) => {
            info!("Render adapter detected: {}", info.name);
            true
        }
        None => false,
    }
}
