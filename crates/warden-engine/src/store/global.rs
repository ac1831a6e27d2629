use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::device;
use crate::subsystem::{InitError, InitGate};

use super::ResourceStore;

static STORE: InitGate<Mutex<ResourceStore>> = InitGate::new("resource store");

/// Returns the process-wide store, creating it with default configuration
/// on first use.
pub fn global() -> Result<&'static Mutex<ResourceStore>, InitError> {
    global_with(&EngineConfig::default())
}

/// Returns the process-wide store, creating it from `config` on first use.
///
/// The device subsystem is brought up first. Once the store exists,
/// `config` is ignored.
pub fn global_with(config: &EngineConfig) -> Result<&'static Mutex<ResourceStore>, InitError> {
    if let Some(store) = STORE.get() {
        return Ok(store);
    }

    STORE.get_or_try_init(|| {
        device::ensure(&config.device)?;
        Ok(Mutex::new(ResourceStore::new(&config.names)))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use super::*;
    use crate::resources::{CameraDesc, ShaderSources, WindowSpec};

    type Touch = fn(&mut ResourceStore) -> String;

    #[test]
    fn concurrent_first_callers_share_one_store() {
        let touches: [Touch; 3] = [
            |store: &mut ResourceStore| store.windows.emplace("race-window", WindowSpec::default()).unwrap(),
            |store: &mut ResourceStore| store.shaders.emplace("race-shader", Some(ShaderSources::default())).unwrap(),
            |store: &mut ResourceStore| store.cameras.emplace("race-camera", CameraDesc::default()).unwrap(),
        ];
        let barrier = Barrier::new(touches.len());

        let results: Vec<(usize, String)> = thread::scope(|scope| {
            let workers: Vec<_> = touches
                .iter()
                .map(|touch| {
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        let store = global().unwrap();
                        let name = touch(&mut store.lock());
                        (store as *const Mutex<ResourceStore> as usize, name)
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        let first = results[0].0;
        assert!(results.iter().all(|(addr, _)| *addr == first));

        let mut store = global().unwrap().lock();
        assert!(store.windows.remove(&results[0].1));
        assert!(store.shaders.remove(&results[1].1));
        assert!(store.cameras.remove(&results[2].1));
    }

    #[test]
    fn later_configuration_is_ignored() {
        let config = EngineConfig {
            log_filter: Some("off".to_string()),
            ..EngineConfig::default()
        };
        let store = global_with(&config).unwrap();
        assert!(std::ptr::eq(store, global().unwrap()));
    }
}
