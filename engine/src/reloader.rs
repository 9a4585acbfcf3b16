use crate::host_api::{HostApi, Input};
use libloading as lib;
use log::warn;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::channel;
use std::sync::mpsc::Receiver;

const LIBGAME: &str = "./target/release/libgame.so";

/// Watch the built game library and signal whenever a fresh build lands.
pub fn run() -> Result<(Receiver<()>, RecommendedWatcher), Box<dyn std::error::Error>> {
    let libgame = Path::new(LIBGAME).canonicalize()?;
    let path = libgame.parent().ok_or("libgame has no parent dir")?.to_owned();

    let (tx, rx) = channel();

    let mut watcher: RecommendedWatcher =
        Watcher::new_immediate(move |res: Result<notify::Event, _>| match res {
            Ok(event) => {
                if let notify::EventKind::Create(_) = event.kind {
                    if event.paths.iter().any(|x| x == &libgame) {
                        // signal that we need to reload
                        let _ = tx.send(());
                    }
                }
            }
            Err(e) => warn!("watch error: {:?}", e),
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    Ok((rx, watcher))
}

pub struct GameLib {
    lib: lib::Library,
}

impl GameLib {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let lib = lib::Library::new(LIBGAME)?;
        Ok(Self { lib })
    }

    pub fn reload(self) -> Result<Self, Box<dyn std::error::Error>> {
        std::mem::drop(self);
        Ok(Self {
            lib: lib::Library::new(LIBGAME)?,
        })
    }

    pub fn api(&mut self) -> Result<GameApi<'_>, Box<dyn std::error::Error>> {
        unsafe {
            let load = self.lib.get(b"game_load")?;
            let update = self.lib.get(b"game_update")?;
            Ok(GameApi { load, update })
        }
    }
}

/// Opaque on the host side; only the game knows the layout.
#[repr(C)]
pub struct GameState {
    _private: [u8; 0],
}

pub struct GameApi<'lib> {
    /// Called exactly once, before the first frame
    pub load: lib::Symbol<'lib, extern "C" fn(&mut dyn HostApi) -> *mut GameState>,

    /// Called once per frame. Returns `true` while the game keeps running
    pub update:
        lib::Symbol<'lib, extern "C" fn(*mut GameState, &Input, &mut dyn HostApi) -> bool>,
}
