use anyhow::{Context, Result};
use warden_engine::config::EngineConfig;
use warden_engine::device;
use warden_engine::handle::NativeKind;
use warden_engine::resources::{ShaderSources, VertexArray, WindowSpec, WindowTraits};

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => EngineConfig::default(),
    };

    let store = warden_engine::bootstrap(&config)?;
    let mut store = store.lock();

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║           WARDEN STUDIO v0.1           ║");
    println!("  ║   handle registry  ·  headless driver  ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    // ── OWNED RESOURCES ───────────────────────────────────────────────────
    let window = store.windows.emplace(
        "main",
        WindowSpec::new("Warden Studio", 820, 560).with_traits(WindowTraits::DECORATED | WindowTraits::VSYNC),
    )?;
    let shader = store
        .shaders
        .emplace("basic", Some(ShaderSources::new("shaders/basic.vert", "shaders/basic.frag")))?;
    let quad = store.meshes.emplace("quad", 12)?;
    store.cameras.emplace("", Default::default())?;

    log::info!("window {window:?}, shader {shader:?}, mesh {quad:?} ready");

    // ── BORROWED RESOURCES ────────────────────────────────────────────────
    // A vertex array created outside the store: recorded as a non-owning view.
    let external = device::allocate(NativeKind::VertexArray)?;
    let name = store.vertex_arrays.record(VertexArray::adopt(external, false)?, "imported");
    println!("  recorded {external} as {name:?}");

    if let Some(found) = store.vertex_arrays.find_by_handle(external) {
        println!("  lookup {external} -> {found:?}");
    }

    store.vertex_arrays.rename(&name, "legacy-vao")?;
    let vao = store.vertex_arrays.retrieve("legacy-vao")?;
    println!("  retrieved {vao:?} (owning: {})", vao.is_owning());
    drop(vao);
    device::free(NativeKind::VertexArray, external);

    println!();
    println!("  store: {}", store.summary());
    println!();

    store.clear();
    Ok(())
}
